//! UXF diagram serialization
//!
//! Renders placed class boxes and routed relationship edges into UMLet's
//! UXF XML schema. The whole document is built in memory first; the file
//! write happens once at the end, so a failed write can never leave a
//! partial diagram behind while reporting success.

use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, span, Level};

use crate::core::{ArrowDirection, DiagramError, Result};
use crate::layout::NodeBox;
use crate::model::{ClassRecord, RelationshipKind};
use crate::routing::{RoutedEdge, ARROW_MARGIN};

const UMLET_PROGRAM: &str = "umlet";
const UMLET_VERSION: &str = "15.1";
const ZOOM_LEVEL: &str = "10";

/// Label fragments the serializer knows how to render, matched
/// case-insensitively. Anything else is an invariant violation.
const RECOGNIZED_LABELS: [&str; 4] = ["inherits", "of type", "contain", "return type"];

type XmlWriter = Cursor<Vec<u8>>;

/// Serializer for the UMLet UXF schema
pub struct UxfSerializer;

impl UxfSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Render the diagram document as a pretty-printed XML string
    pub fn to_xml(
        &self,
        classes: &[ClassRecord],
        boxes: &[NodeBox],
        edges: &[RoutedEdge],
    ) -> Result<String> {
        let render_span = span!(
            Level::INFO,
            "serialize_uxf",
            classes = classes.len(),
            edges = edges.len()
        );
        let _enter = render_span.enter();

        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        write_tag_start_with_attrs(
            &mut writer,
            "diagram",
            &[("program", UMLET_PROGRAM), ("version", UMLET_VERSION)],
        )?;
        write_tag(&mut writer, "zoom_level", ZOOM_LEVEL)?;

        for class in classes {
            let node = boxes
                .iter()
                .find(|b| b.name == class.name)
                .ok_or_else(|| DiagramError::unknown_class(&class.name))?;
            self.write_class_element(&mut writer, class, node)?;
        }

        for edge in edges {
            self.write_relation_element(&mut writer, edge)?;
        }

        write_tag_end(&mut writer, "diagram")?;

        let bytes = writer.into_inner().into_inner();
        let xml = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        debug!(bytes = xml.len(), "Serialized diagram");
        Ok(xml)
    }

    /// Render the diagram and write it to `path` in one shot.
    ///
    /// Serialization (and with it the relationship-label check) completes
    /// before anything touches the filesystem.
    pub fn write_file(
        &self,
        classes: &[ClassRecord],
        boxes: &[NodeBox],
        edges: &[RoutedEdge],
        path: &Path,
    ) -> Result<()> {
        let xml = self.to_xml(classes, boxes, edges)?;
        std::fs::write(path, xml)?;
        Ok(())
    }

    fn write_class_element(
        &self,
        writer: &mut Writer<XmlWriter>,
        class: &ClassRecord,
        node: &NodeBox,
    ) -> Result<()> {
        write_tag_start(writer, "element")?;
        write_tag(writer, "id", "UMLClass")?;
        write_coordinates(writer, node.x, node.y, node.width, node.height)?;
        write_tag(writer, "panel_attributes", &class_panel_text(class))?;
        write_empty_tag(writer, "additional_attributes")?;
        write_tag_end(writer, "element")
    }

    fn write_relation_element(
        &self,
        writer: &mut Writer<XmlWriter>,
        edge: &RoutedEdge,
    ) -> Result<()> {
        let panel = relation_panel_text(edge)?;

        write_tag_start(writer, "element")?;
        write_tag(writer, "id", "Relation")?;
        write_coordinates(writer, edge.start.x, edge.start.y, edge.travel.x, edge.travel.y)?;
        write_tag(writer, "panel_attributes", &panel)?;
        write_tag(
            writer,
            "additional_attributes",
            &format!(
                "{}.0;{}.0;{}.0;{}.0",
                ARROW_MARGIN, ARROW_MARGIN, edge.travel.x, edge.travel.y
            ),
        )?;
        write_tag_end(writer, "element")
    }
}

impl Default for UxfSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Multi-section panel text of one class box
pub fn class_panel_text(class: &ClassRecord) -> String {
    let mut details = String::from("style=wordwrap\n");
    details.push_str(&format!("<<Class>>\n{}\n", class.name));
    if !class.docstring.is_empty() {
        details.push_str(&format!("{{Doc string: {}}}\n", class.docstring));
    }
    details.push_str("--\n*Attributes*\n");
    for attribute in &class.attributes {
        details.push_str(&format!("- {}\n", attribute.rendered()));
    }
    details.push_str("--\n*Functions*\n");
    for method in &class.methods {
        details.push_str(&format!("- {}\n", method.signature()));
        if !method.docstring.is_empty() {
            details.push_str(&format!("={{Doc string: {}}}\n", method.docstring));
        }
    }
    details
}

/// Panel text of one relation element.
///
/// Fails with `UnrecognizedRelationship` when the label matches none of the
/// renderable fragments; container relationships additionally carry
/// multiplicity lines.
fn relation_panel_text(edge: &RoutedEdge) -> Result<String> {
    let mut text = String::new();
    if edge.direction == ArrowDirection::Left {
        text.push_str("lt=<-\n");
    } else {
        text.push_str("lt=->\n");
    }

    for _ in 0..edge.bend_offset {
        text.push('\n');
    }

    let lower = edge.label.to_lowercase();
    if !RECOGNIZED_LABELS.iter().any(|n| lower.contains(n)) {
        return Err(DiagramError::unrecognized_relationship(&edge.label));
    }

    match edge.kind {
        RelationshipKind::ContainerOf => {
            text.push_str(&format!("m1=contains\nm2=0...n\n{}", edge.label));
        }
        _ => text.push_str(&edge.label),
    }

    Ok(text)
}

fn write_tag_start(writer: &mut Writer<XmlWriter>, tag_name: &str) -> Result<()> {
    write_tag_start_with_attrs(writer, tag_name, &[])
}

fn write_tag_start_with_attrs(
    writer: &mut Writer<XmlWriter>,
    tag_name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(tag_name);
    for attr in attrs.iter() {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

fn write_tag_end(writer: &mut Writer<XmlWriter>, tag_name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}

fn write_tag(writer: &mut Writer<XmlWriter>, tag_name: &str, content: &str) -> Result<()> {
    write_tag_start(writer, tag_name)?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    write_tag_end(writer, tag_name)
}

fn write_empty_tag(writer: &mut Writer<XmlWriter>, tag_name: &str) -> Result<()> {
    writer.write_event(Event::Empty(BytesStart::new(tag_name)))?;
    Ok(())
}

fn write_coordinates(
    writer: &mut Writer<XmlWriter>,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
) -> Result<()> {
    write_tag_start(writer, "coordinates")?;
    write_tag(writer, "x", &x.to_string())?;
    write_tag(writer, "y", &y.to_string())?;
    write_tag(writer, "w", &w.to_string())?;
    write_tag(writer, "h", &h.to_string())?;
    write_tag_end(writer, "coordinates")
}
