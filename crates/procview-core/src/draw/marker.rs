//! Node markers: the symbol drawn at a node position.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Geometric symbol used for a node category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Square,
    Diamond,
    Circle,
}

impl MarkerShape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Diamond => "diamond",
            Self::Circle => "circle",
        }
    }
}

/// Fill, outline and size shared by all markers of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    size: f32,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: f32,
}

impl MarkerStyle {
    pub fn new(size: f32, fill_color: Color, stroke_color: Color) -> Self {
        Self {
            size,
            fill_color,
            stroke_color,
            stroke_width: 1.0,
        }
    }

    /// Side length (or diameter) of a marker.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        let white = Color::new("white").expect("'white' is a valid CSS color");
        Self::new(40.0, white, Color::default())
    }
}

/// A marker of a given shape.
///
/// # Examples
///
/// ```
/// # use procview_core::draw::{Drawable, Marker, MarkerShape, MarkerStyle};
/// # use procview_core::geometry::Point;
/// let style = MarkerStyle::default();
/// let marker = Marker::new(MarkerShape::Diamond, &style);
///
/// let output = marker.render_to_layers(Point::new(100.0, 100.0));
/// assert!(!output.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Marker<'a> {
    shape: MarkerShape,
    style: &'a MarkerStyle,
}

impl<'a> Marker<'a> {
    pub fn new(shape: MarkerShape, style: &'a MarkerStyle) -> Self {
        Self { shape, style }
    }

    pub fn shape(&self) -> MarkerShape {
        self.shape
    }

    fn outline<T: svg::Node>(&self, element: T) -> T {
        let mut element = element;
        element.assign("fill", &self.style.fill_color);
        element.assign("stroke", &self.style.stroke_color);
        element.assign("stroke-width", self.style.stroke_width);
        element.assign("data-marker", self.shape.name());
        element
    }
}

impl Drawable for Marker<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let half = self.style.size / 2.0;

        let node: Box<dyn svg::Node> = match self.shape {
            MarkerShape::Square => {
                let min_point = position.to_bounds(self.size()).min_point();
                Box::new(self.outline(
                    svg_element::Rectangle::new()
                        .set("x", min_point.x())
                        .set("y", min_point.y())
                        .set("width", self.style.size)
                        .set("height", self.style.size),
                ))
            }
            MarkerShape::Diamond => {
                let points = format!(
                    "{},{} {},{} {},{} {},{}",
                    position.x(),
                    position.y() - half,
                    position.x() + half,
                    position.y(),
                    position.x(),
                    position.y() + half,
                    position.x() - half,
                    position.y(),
                );
                Box::new(self.outline(svg_element::Polygon::new().set("points", points)))
            }
            MarkerShape::Circle => Box::new(
                self.outline(
                    svg_element::Circle::new()
                        .set("cx", position.x())
                        .set("cy", position.y())
                        .set("r", half),
                ),
            ),
        };

        output.add_to_layer(RenderLayer::Marker, node);
        output
    }

    fn size(&self) -> Size {
        Size::new(self.style.size, self.style.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: MarkerShape) -> String {
        let style = MarkerStyle::default();
        Marker::new(shape, &style)
            .render_to_layers(Point::new(50.0, 50.0))
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_square_marker_is_centered() {
        let svg = render(MarkerShape::Square);
        assert!(svg.contains("<rect"));
        assert!(svg.contains("x=\"30\""));
        assert!(svg.contains("y=\"30\""));
        assert!(svg.contains("data-marker=\"square\""));
    }

    #[test]
    fn test_diamond_marker_points() {
        let svg = render(MarkerShape::Diamond);
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("points=\"50,30 70,50 50,70 30,50\""));
    }

    #[test]
    fn test_circle_marker() {
        let svg = render(MarkerShape::Circle);
        assert!(svg.contains("<circle"));
        assert!(svg.contains("r=\"20\""));
    }

    #[test]
    fn test_marker_renders_on_marker_layer() {
        let svg = render(MarkerShape::Circle);
        assert!(svg.contains("data-layer=\"marker\""));
    }
}
