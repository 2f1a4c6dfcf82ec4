//! SVG rendering of figures.

use log::debug;
use svg::node::element as svg_element;

use procview_core::{
    color::Color,
    draw::{
        Connector, ConnectorStyle, Drawable, Label, LabelStyle, LayeredOutput, Marker,
        MarkerStyle, RenderLayer,
    },
    geometry::{Bounds, Size},
};

use super::Error;
use crate::{
    config::StyleConfig,
    view::figure::{Figure, FigureLabel},
};

/// Space left around the figure content.
const MARGIN: f32 = 20.0;

/// Resolved drawing styles of a figure.
#[derive(Debug, Clone, Default)]
pub struct FigureStyle {
    marker: MarkerStyle,
    node_label: LabelStyle,
    edge_label: LabelStyle,
    connector: ConnectorStyle,
    background: Option<Color>,
}

impl FigureStyle {
    /// Builds figure styles from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn from_config(config: &StyleConfig) -> Result<Self, Error> {
        let background = config.background_color().map_err(Error::Render)?;
        let stroke = config.marker_stroke().map_err(Error::Render)?;
        let marker = MarkerStyle::new(
            config.marker_size(),
            config.marker_fill().map_err(Error::Render)?,
            stroke,
        );
        let connector = ConnectorStyle::new(
            config.edge_color().map_err(Error::Render)?,
            config.marker_size() / 2.0,
        );

        // Flow labels sit on their line, so they get an opaque backdrop.
        let backdrop = match background {
            Some(color) => color,
            None => Color::new("white").map_err(Error::Render)?,
        };

        Ok(Self {
            marker,
            node_label: LabelStyle::new(config.font_size()).with_color(Some(stroke)),
            edge_label: LabelStyle::new(config.font_size())
                .with_color(Some(stroke))
                .with_background_color(Some(backdrop)),
            connector,
            background,
        })
    }
}

impl Figure {
    /// Renders the figure to an SVG document.
    ///
    /// Flows are drawn under markers and markers under labels. The view box
    /// fits the content plus a fixed margin.
    pub fn to_svg_document(&self, style: &FigureStyle) -> svg::Document {
        let mut output = LayeredOutput::new();

        let connector = Connector::new(&style.connector);
        for edge in self.edges() {
            output.merge(connector.render(&[edge.source, edge.target]));
        }

        for instruction in self.markers() {
            let marker = Marker::new(instruction.shape, &style.marker);
            for (_, position) in &instruction.positions {
                output.merge(marker.render_to_layers(*position));
            }
        }

        for label in self.node_labels() {
            output.merge(render_label(label, &style.node_label));
        }
        for label in self.edge_labels() {
            output.merge(render_label(label, &style.edge_label));
        }

        let view = self.content_bounds(style).expand(MARGIN);
        if let Some(color) = &style.background {
            let background = svg_element::Rectangle::new()
                .set("x", view.min_x())
                .set("y", view.min_y())
                .set("width", view.width())
                .set("height", view.height())
                .set("fill", color)
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(background));
        }

        debug!(width = view.width(), height = view.height(); "Rendering figure to SVG");

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view.min_x(),
                    view.min_y(),
                    view.width(),
                    view.height()
                ),
            )
            .set("width", view.width())
            .set("height", view.height());

        for group in output.render() {
            doc = doc.add(group);
        }
        doc
    }

    /// Returns the figure rendered as SVG text.
    pub fn to_svg_string(&self, style: &FigureStyle) -> String {
        self.to_svg_document(style).to_string()
    }

    /// Smallest bounds covering every marker and label.
    fn content_bounds(&self, style: &FigureStyle) -> Bounds {
        let marker_size = Size::new(style.marker.size(), style.marker.size());

        let markers = self
            .markers()
            .iter()
            .flat_map(|instruction| instruction.positions.iter())
            .map(|(_, position)| position.to_bounds(marker_size));
        let node_labels = self
            .node_labels()
            .iter()
            .map(|label| label_bounds(label, &style.node_label));
        let edge_labels = self
            .edge_labels()
            .iter()
            .map(|label| label_bounds(label, &style.edge_label));

        markers
            .chain(node_labels)
            .chain(edge_labels)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}

fn render_label(label: &FigureLabel, style: &LabelStyle) -> LayeredOutput {
    Label::new(style, &label.text).render_to_layers(label.position)
}

fn label_bounds(label: &FigureLabel, style: &LabelStyle) -> Bounds {
    label
        .position
        .to_bounds(Label::new(style, &label.text).size())
}

#[cfg(test)]
mod tests {
    use procview_core::{
        geometry::Point,
        graph::{Category, DiagramGraph, Edge, Node, NodeKind},
        identifier::Id,
    };

    use super::*;

    fn figure() -> Figure {
        let mut graph = DiagramGraph::new();
        for (id, category, name, x) in [
            ("S", Category::StartEvent, "Start", 0.0),
            ("T", Category::Task, "Check", 200.0),
        ] {
            graph.add_node(
                Node::new(Id::new(id), NodeKind::empty(category))
                    .with_name(name)
                    .with_bounds(Bounds::new_from_top_left(
                        Point::new(x, 0.0),
                        Size::new(36.0, 36.0),
                    )),
            );
        }
        graph.add_edge(Edge::new(Id::new("F"), Id::new("S"), Id::new("T")).with_name("approve"));
        Figure::from_graph(&graph)
    }

    #[test]
    fn test_layers_are_ordered() {
        let svg = figure().to_svg_string(&FigureStyle::default());

        let edge = svg.find("data-layer=\"edge\"").unwrap();
        let marker = svg.find("data-layer=\"marker\"").unwrap();
        let text = svg.find("data-layer=\"text\"").unwrap();
        assert!(edge < marker);
        assert!(marker < text);
    }

    #[test]
    fn test_markers_and_labels_present() {
        let svg = figure().to_svg_string(&FigureStyle::default());

        assert!(svg.contains("data-marker=\"circle\""));
        assert!(svg.contains("data-marker=\"square\""));
        assert!(svg.contains("Start"));
        assert!(svg.contains("Check"));
        assert!(svg.contains("approve"));
    }

    #[test]
    fn test_view_box_covers_markers() {
        let svg = figure().to_svg_string(&FigureStyle::default());

        // Markers of size 40 centered at x=0 and x=200, plus the margin.
        // Labels fit inside the markers' extent.
        assert!(svg.contains("viewBox=\"-40 -40 280 80\""), "{svg}");
    }

    #[test]
    fn test_background_from_config() {
        let config = StyleConfig::default().with_background_color("#eeeeee");
        let style = FigureStyle::from_config(&config).unwrap();

        let svg = figure().to_svg_string(&style);
        assert!(svg.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_invalid_config_color() {
        let config = StyleConfig::default().with_background_color("not a color");
        assert!(matches!(
            FigureStyle::from_config(&config),
            Err(Error::Render(_))
        ));
    }

    #[test]
    fn test_empty_figure_renders() {
        let svg = Figure::default().to_svg_string(&FigureStyle::default());
        assert!(svg.starts_with("<svg"));
    }
}
