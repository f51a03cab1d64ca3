// Utility functions
pub mod error;
pub mod gravatar;

pub use error::*;
