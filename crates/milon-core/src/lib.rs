pub mod debounce;
pub mod error;
pub mod practice;
pub mod speech;
pub mod store;
