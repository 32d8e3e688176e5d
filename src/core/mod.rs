pub mod board;
pub mod error;
pub mod types;

pub use board::*;
pub use error::*;
pub use types::*;
