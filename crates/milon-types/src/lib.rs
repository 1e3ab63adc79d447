mod entry;
mod types;

pub use entry::*;
pub use types::*;
