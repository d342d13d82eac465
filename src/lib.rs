//! Preview-image resolution and content decoration for a news/commentary site.
//!
//! The core is [`og::OgImageResolver`]; the remaining modules load the site's
//! content collections and feed them through it.

pub mod cli;
pub mod content;
pub mod data;
pub mod decorate;
pub mod models;
pub mod og;
pub mod outputs;
pub mod utils;

pub use og::{OgImageResolver, PreviewImage, fetch_og_image};
