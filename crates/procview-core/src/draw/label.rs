//! Single-line text labels for nodes and flows.

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Font settings for figure labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    background_color: Option<Color>,
}

impl LabelStyle {
    pub fn new(font_size: u16) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Draws a box behind the text, used for flow labels crossing lines.
    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 8,
            color: None,
            background_color: None,
        }
    }
}

/// A text label anchored at its center.
///
/// Labels are rendered on one line; callers collapse newlines beforehand.
#[derive(Debug, Clone)]
pub struct Label<'a> {
    style: &'a LabelStyle,
    content: &'a str,
}

impl<'a> Label<'a> {
    pub fn new(style: &'a LabelStyle, content: &'a str) -> Self {
        Self { style, content }
    }

    pub fn content(&self) -> &str {
        self.content
    }
}

impl Drawable for Label<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.style.font_family.as_str())
            .set("font-size", self.style.font_size)
            .add(SvgText::new(self.content));

        if let Some(color) = &self.style.color {
            text = text.set("fill", color).set("fill-opacity", color.alpha());
        }

        if let Some(bg_color) = &self.style.background_color {
            let min_point = position.to_bounds(self.size()).min_point();
            let background = svg_element::Rectangle::new()
                .set("x", min_point.x())
                .set("y", min_point.y())
                .set("width", self.size().width())
                .set("height", self.size().height())
                .set("fill", bg_color)
                .set("fill-opacity", bg_color.alpha());
            output.add_to_layer(RenderLayer::Text, Box::new(background));
        }

        output.add_to_layer(RenderLayer::Text, Box::new(text));
        output
    }

    /// Approximate extent, assuming an average glyph width of 0.6em.
    fn size(&self) -> Size {
        let font_size = f32::from(self.style.font_size);
        let chars = self.content.chars().count() as f32;
        Size::new(chars * font_size * 0.6, font_size * 1.2)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_label_renders_text() {
        let style = LabelStyle::new(10);
        let label = Label::new(&style, "Check order");

        let svg: String = label
            .render_to_layers(Point::new(5.0, 6.0))
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert!(svg.contains("Check order"));
        assert!(svg.contains("font-size=\"10\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_label_background() {
        let style = LabelStyle::default().with_background_color(Color::new("white").ok());
        let label = Label::new(&style, "Yes");

        let svg: String = label
            .render_to_layers(Point::new(0.0, 0.0))
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_label_size_estimate() {
        let style = LabelStyle::new(10);
        let size = Label::new(&style, "abcd").size();
        assert_approx_eq!(f32, size.width(), 24.0);
        assert_approx_eq!(f32, size.height(), 12.0);
    }
}
