//! Directed flow lines between node markers.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::Point,
};

/// Stroke and arrow head settings for flow lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorStyle {
    color: Color,
    width: f32,
    head_length: f32,
    clearance: f32,
}

impl ConnectorStyle {
    /// Creates a style whose lines stop `clearance` short of each endpoint.
    pub fn new(color: Color, clearance: f32) -> Self {
        Self {
            color,
            width: 1.0,
            head_length: 8.0,
            clearance,
        }
    }

    pub fn clearance(&self) -> f32 {
        self.clearance
    }
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self::new(Color::default(), 20.0)
    }
}

/// A polyline ending in an arrow head.
#[derive(Debug, Clone)]
pub struct Connector<'a> {
    style: &'a ConnectorStyle,
}

impl<'a> Connector<'a> {
    pub fn new(style: &'a ConnectorStyle) -> Self {
        Self { style }
    }

    /// Renders a line through `points`, with the arrow head at the last point.
    ///
    /// Fewer than two distinct points render nothing.
    pub fn render(&self, points: &[Point]) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let Some(points) = self.trimmed(points) else {
            return output;
        };

        let mut data = String::new();
        for (idx, point) in points.iter().enumerate() {
            let command = if idx == 0 { "M" } else { "L" };
            if !data.is_empty() {
                data.push(' ');
            }
            data.push_str(&format!("{command} {} {}", point.x(), point.y()));
        }

        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", &self.style.color)
            .set("stroke-opacity", self.style.color.alpha())
            .set("stroke-width", self.style.width);
        output.add_to_layer(RenderLayer::Edge, Box::new(path));

        let tip = points[points.len() - 1];
        let from = points[points.len() - 2];
        if let Some(head) = self.arrow_head(from, tip) {
            output.add_to_layer(RenderLayer::Edge, Box::new(head));
        }

        output
    }

    /// Pulls both ends of the polyline back by the clearance so the line
    /// meets the marker outline instead of its center.
    fn trimmed(&self, points: &[Point]) -> Option<Vec<Point>> {
        if points.len() < 2 {
            return None;
        }

        let mut points = points.to_vec();
        let clearance = self.style.clearance;

        let first = points[0];
        let second = points[1];
        points[0] = Self::pull_towards(first, second, clearance);

        let last_idx = points.len() - 1;
        let last = points[last_idx];
        let before_last = points[last_idx - 1];
        points[last_idx] = Self::pull_towards(last, before_last, clearance);

        let total: f32 = points
            .windows(2)
            .map(|pair| pair[1].sub_point(pair[0]).hypot())
            .sum();
        (total > 0.0).then_some(points)
    }

    /// Moves `from` by `distance` towards `to`, never past the segment midpoint.
    fn pull_towards(from: Point, to: Point, distance: f32) -> Point {
        let delta = to.sub_point(from);
        let length = delta.hypot();
        if length == 0.0 {
            return from;
        }
        let distance = distance.min(length / 2.0);
        from.add_point(delta.scale(distance / length))
    }

    fn arrow_head(&self, from: Point, tip: Point) -> Option<svg_element::Polygon> {
        let delta = tip.sub_point(from);
        let length = delta.hypot();
        if length == 0.0 {
            return None;
        }

        let dir = delta.scale(1.0 / length);
        let normal = Point::new(-dir.y(), dir.x());
        let head_length = self.style.head_length;
        let base = tip.sub_point(dir.scale(head_length));
        let left = base.add_point(normal.scale(head_length / 2.0));
        let right = base.sub_point(normal.scale(head_length / 2.0));

        let points = format!(
            "{},{} {},{} {},{}",
            tip.x(),
            tip.y(),
            left.x(),
            left.y(),
            right.x(),
            right.y()
        );

        Some(
            svg_element::Polygon::new()
                .set("points", points)
                .set("fill", &self.style.color)
                .set("fill-opacity", self.style.color.alpha()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(style: &ConnectorStyle, points: &[Point]) -> String {
        Connector::new(style)
            .render(points)
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_connector_trims_both_ends() {
        let style = ConnectorStyle::new(Color::default(), 20.0);
        let svg = render(&style, &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);

        assert!(svg.contains("d=\"M 20 0 L 80 0\""));
        assert!(svg.contains("data-layer=\"edge\""));
    }

    #[test]
    fn test_connector_arrow_head_at_tip() {
        let style = ConnectorStyle::new(Color::default(), 0.0);
        let svg = render(&style, &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);

        assert!(svg.contains("points=\"100,0 92,4 92,-4\""));
    }

    #[test]
    fn test_connector_with_waypoints() {
        let style = ConnectorStyle::new(Color::default(), 0.0);
        let svg = render(
            &style,
            &[
                Point::new(0.0, 0.0),
                Point::new(0.0, 50.0),
                Point::new(50.0, 50.0),
            ],
        );

        assert!(svg.contains("d=\"M 0 0 L 0 50 L 50 50\""));
    }

    #[test]
    fn test_connector_degenerate() {
        let style = ConnectorStyle::default();
        assert!(render(&style, &[Point::new(1.0, 1.0)]).is_empty());
        assert!(render(&style, &[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]).is_empty());
    }
}
