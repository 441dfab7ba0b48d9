//! Request and response models

pub mod dashboard;

pub use dashboard::*;
