//! Logic Module - Pipeline & Coordination
//!
//! Leaf-first:
//! - `snapshot` - record model and wire decoding
//! - `categorize` / `severity` - canonicalization
//! - `filter` - free-text record filter
//! - `aggregate` - one aggregator per metric family
//! - `view` - view state and the view model builder
//! - `session` - host-owned dashboard state
//! - `refresh` - scheduler, snapshot sources, refresh coordinator
//! - `export` - delimited export of snapshot datasets

pub mod snapshot;
pub mod categorize;
pub mod severity;
pub mod filter;
pub mod aggregate;
pub mod view;
pub mod session;
pub mod refresh;
pub mod export;
