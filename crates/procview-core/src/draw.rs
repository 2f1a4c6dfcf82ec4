//! Drawable primitives for process figures.
//!
//! Every primitive implements [`Drawable`], rendering itself into a
//! [`LayeredOutput`] so that the final SVG document stacks flows under
//! markers and markers under labels regardless of drawing order.

mod connector;
mod label;
mod layer;
mod marker;

pub use connector::{Connector, ConnectorStyle};
pub use label::{Label, LabelStyle};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use marker::{Marker, MarkerShape, MarkerStyle};

use crate::geometry::{Point, Size};

/// Something that can be rendered at a position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element centered (or anchored) at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the extent the element covers around its position.
    fn size(&self) -> Size;
}
