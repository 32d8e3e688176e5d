pub mod alpha_beta;
pub mod eval_cache;
pub mod evaluation;
pub mod move_ordering;
pub mod parallel_search;

pub use alpha_beta::*;
pub use eval_cache::*;
pub use evaluation::*;
pub use move_ordering::*;
pub use parallel_search::*;
