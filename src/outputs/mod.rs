//! Output generation.
//!
//! - [`json`]: writes the decorated [`Feed`](crate::models::Feed) for the site build

pub mod json;
