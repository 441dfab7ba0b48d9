//! HTTP handlers

pub mod health;
pub mod dashboard;
pub mod export;
