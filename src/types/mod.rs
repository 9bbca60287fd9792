mod context;
mod error;

pub use context::*;
pub use error::*;
