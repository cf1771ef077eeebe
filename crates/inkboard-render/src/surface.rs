//! Surface trait abstraction.

use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Color;
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unbalanced transform stack")]
    UnbalancedTransform,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// A drawing target.
///
/// Paths arrive in the coordinate space set up by the pushed transforms.
/// Every `push_transform` is matched by a `pop_transform` within a frame.
pub trait Surface {
    /// Concatenate a transform onto the current one.
    fn push_transform(&mut self, transform: Affine);

    /// Restore the transform active before the last push.
    fn pop_transform(&mut self);

    fn fill(&mut self, path: &BezPath, color: Color);

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color);

    /// Draw a single text run with its baseline at `origin`.
    fn text(&mut self, content: &str, origin: Point, font_size: f64, color: Color);
}
