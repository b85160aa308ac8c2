//! Domain models for the palette service.

pub mod palette;

pub use palette::{ColorName, ColorRole, PaletteRequest, PaletteResponse, PaletteResult};
