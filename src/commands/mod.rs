mod count;

pub use count::*;
