//! Inkboard Render Library
//!
//! Paints composed frames onto an abstract [`Surface`]. Two surfaces ship
//! with the crate: a display-list recorder and an SVG writer.

mod painter;
mod recording;
mod surface;
mod svg;

pub use painter::{Theme, paint_frame};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{RenderError, RenderResult, Surface};
pub use svg::SvgSurface;
