//! HTTP handlers for the palette service.

pub mod health;
pub mod palette;

pub use health::{metrics, not_found, readiness_check, root};
pub use palette::{generate_palette, PaletteError};
