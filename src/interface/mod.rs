mod error;
mod interface;
mod tests;

pub use error::*;
pub use interface::*;
