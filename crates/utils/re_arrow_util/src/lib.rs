//! Helpers for working with arrow

mod arrays;
mod offsets;

pub use self::arrays::*;
pub use self::offsets::*;
