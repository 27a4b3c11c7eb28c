//! Data models

pub mod navigation;
pub mod options;
pub mod prediction;

pub use navigation::*;
pub use options::*;
pub use prediction::*;
