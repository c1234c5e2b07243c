mod error;
mod iter;
mod node;
mod red_black_tree;

pub use error::*;
pub use iter::*;
pub(crate) use node::*;
pub use red_black_tree::*;
