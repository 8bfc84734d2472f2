pub mod dto;
pub mod range;

pub use dto::*;
pub use range::*;
