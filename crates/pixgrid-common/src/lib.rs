//! Common utilities shared across pixgrid crates.
//!
//! Provides error codes and categories plus terminal color handling.

#![deny(clippy::all)]

mod color;
pub mod error_codes;

pub use color::Colors;
pub use color::init as color_init;
pub use color::is_disabled as color_is_disabled;
pub use error_codes::ErrorCategory;
