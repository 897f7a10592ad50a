//! Layout engine
//!
//! Assigns each class a content-sized bounding box and places the boxes in
//! a line (one or two classes) or on the vertices of a regular polygon,
//! then normalizes the result to non-negative coordinates.

use std::f64::consts::PI;

use tracing::{debug, span, trace, Level};
use unicode_width::UnicodeWidthStr;

use crate::core::{longest_line_width, DiagramError, Result, Side};
use crate::model::ClassRecord;

/// Minimum rendered box width
pub const MIN_BOX_WIDTH: i64 = 210;
/// Pixels per character column when sizing a box to its content
pub const CHAR_SCALE: i64 = 10;
/// Fixed box height
pub const BOX_HEIGHT: i64 = 260;

/// Per-side connection counters of one box
///
/// Owned by the box and mutated only by the connection router, one
/// sequential pass per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideSlots([i64; 4]);

impl SideSlots {
    /// Current connection count on a side
    pub fn get(&self, side: Side) -> i64 {
        self.0[side.index()]
    }

    /// Increment a side's counter and return the post-increment value
    pub fn bump(&mut self, side: Side) -> i64 {
        self.0[side.index()] += 1;
        self.0[side.index()]
    }
}

/// A placed class box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBox {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub slots: SideSlots,
}

/// Content-driven box sizing and line-or-polygon placement
pub struct LayoutEngine {
    min_width: i64,
    char_scale: i64,
    box_height: i64,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            min_width: MIN_BOX_WIDTH,
            char_scale: CHAR_SCALE,
            box_height: BOX_HEIGHT,
        }
    }

    /// Width of the longest rendered text line across a class's fields
    fn longest_content_line(class: &ClassRecord) -> usize {
        let mut max_width = UnicodeWidthStr::width(class.name.as_str());

        if !class.docstring.is_empty() {
            max_width = max_width.max(longest_line_width(&class.docstring));
        }

        for method in &class.methods {
            max_width = max_width.max(UnicodeWidthStr::width(method.signature().as_str()));
            if !method.docstring.is_empty() {
                max_width = max_width.max(longest_line_width(&method.docstring));
            }
        }

        for attribute in &class.attributes {
            max_width = max_width.max(UnicodeWidthStr::width(attribute.rendered().as_str()));
        }

        if !class.bases.is_empty() {
            max_width = max_width.max(UnicodeWidthStr::width(class.bases.join(", ").as_str()));
        }

        max_width
    }

    /// Rendered width of one class box
    pub fn content_width(&self, class: &ClassRecord) -> i64 {
        let longest = Self::longest_content_line(class) as i64;
        (longest * self.char_scale).max(self.min_width)
    }

    /// Place one box per class and normalize to non-negative coordinates.
    ///
    /// One or two boxes sit on a horizontal line at even spacing; more than
    /// two sit on the vertices of a regular polygon whose radius is the sum
    /// of all box widths divided by four. The radius is a content heuristic,
    /// not a tight-packing guarantee.
    pub fn arrange(&self, classes: &[ClassRecord]) -> Result<Vec<NodeBox>> {
        let layout_span = span!(Level::INFO, "arrange_boxes", count = classes.len());
        let _enter = layout_span.enter();

        if classes.is_empty() {
            return Err(DiagramError::unsupported_shape(0));
        }

        let widths: Vec<i64> = classes.iter().map(|c| self.content_width(c)).collect();
        let total_width: i64 = widths.iter().sum();
        let shape = classes.len();

        let centers: Vec<(f64, f64)> = if shape <= 2 {
            (0..shape)
                .map(|i| (i as f64 * (total_width as f64 / shape as f64), 0.0))
                .collect()
        } else {
            let radius = total_width as f64 / 4.0;
            let angle = 2.0 * PI / shape as f64;
            (0..shape)
                .map(|i| {
                    let theta = i as f64 * angle;
                    (radius * theta.cos(), radius * theta.sin())
                })
                .collect()
        };

        // Placement first; normalization reads the stored positions and
        // never recomputes from the centers.
        let mut boxes = Vec::with_capacity(shape);
        let mut min_x = i64::MAX;
        let mut min_y = i64::MAX;

        for ((class, width), (cx, cy)) in classes.iter().zip(&widths).zip(&centers) {
            let x = (cx - (width / 2) as f64).floor() as i64;
            let y = (cy - (self.box_height / 2) as f64).floor() as i64;
            min_x = min_x.min(x);
            min_y = min_y.min(y);

            trace!(class = %class.name, x, y, width, "Placed box");
            boxes.push(NodeBox {
                name: class.name.clone(),
                x,
                y,
                width: *width,
                height: self.box_height,
                slots: SideSlots::default(),
            });
        }

        let dx = if min_x < 0 { -min_x } else { 0 };
        let dy = if min_y < 0 { -min_y } else { 0 };
        if dx != 0 || dy != 0 {
            for node in &mut boxes {
                node.x += dx;
                node.y += dy;
            }
        }

        debug!(boxes = boxes.len(), dx, dy, "Arranged boxes");
        Ok(boxes)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TypeDescriptor;
    use crate::model::{AttributeRecord, MethodRecord, ParamRecord};

    fn named_classes(names: &[&str]) -> Vec<ClassRecord> {
        names.iter().map(|n| ClassRecord::new(*n)).collect()
    }

    fn center_of(node: &NodeBox) -> (f64, f64) {
        (
            node.x as f64 + (node.width / 2) as f64,
            node.y as f64 + (node.height / 2) as f64,
        )
    }

    #[test]
    fn test_empty_input_is_unsupported() {
        let engine = LayoutEngine::new();
        let result = engine.arrange(&[]);
        assert!(matches!(
            result,
            Err(DiagramError::UnsupportedShape { count: 0 })
        ));
    }

    #[test]
    fn test_single_box_is_normalized() {
        let engine = LayoutEngine::new();
        let boxes = engine.arrange(&named_classes(&["A"])).unwrap();

        assert_eq!(boxes.len(), 1);
        assert!(boxes[0].x >= 0);
        assert!(boxes[0].y >= 0);
        assert_eq!(boxes[0].width, MIN_BOX_WIDTH);
        assert_eq!(boxes[0].height, BOX_HEIGHT);
    }

    #[test]
    fn test_min_width_applies_to_short_content() {
        let engine = LayoutEngine::new();
        let class = ClassRecord::new("A");
        assert_eq!(engine.content_width(&class), MIN_BOX_WIDTH);
    }

    #[test]
    fn test_width_tracks_longest_line() {
        let engine = LayoutEngine::new();
        let class = ClassRecord::new("A").with_method(
            MethodRecord::new("a_rather_long_method_name")
                .with_param(ParamRecord::new("value").with_type(TypeDescriptor::Scalar(
                    "SomeLongTypeName".into(),
                ))),
        );
        let signature_len = class.methods[0].signature().len() as i64;
        assert_eq!(engine.content_width(&class), signature_len * CHAR_SCALE);
    }

    #[test]
    fn test_width_considers_attributes_and_bases() {
        let engine = LayoutEngine::new();
        let class = ClassRecord::new("X")
            .with_base("SomeVeryLongBaseClassNameIndeedYes")
            .with_attribute(AttributeRecord::new("y"));
        let bases_len = "SomeVeryLongBaseClassNameIndeedYes".len() as i64;
        assert_eq!(engine.content_width(&class), bases_len * CHAR_SCALE);
    }

    #[test]
    fn test_two_boxes_are_colinear() {
        let engine = LayoutEngine::new();
        let boxes = engine.arrange(&named_classes(&["A", "B"])).unwrap();

        let (_, ay) = center_of(&boxes[0]);
        let (_, by) = center_of(&boxes[1]);
        assert_eq!(ay, by);
        assert!(boxes.iter().all(|b| b.x >= 0 && b.y >= 0));
    }

    #[test]
    fn test_polygon_centers_are_equidistant_from_centroid() {
        let engine = LayoutEngine::new();
        let boxes = engine
            .arrange(&named_classes(&["A", "B", "C", "D", "E"]))
            .unwrap();

        let centers: Vec<(f64, f64)> = boxes.iter().map(center_of).collect();
        let n = centers.len() as f64;
        let centroid = (
            centers.iter().map(|c| c.0).sum::<f64>() / n,
            centers.iter().map(|c| c.1).sum::<f64>() / n,
        );

        let distances: Vec<f64> = centers
            .iter()
            .map(|c| ((c.0 - centroid.0).powi(2) + (c.1 - centroid.1).powi(2)).sqrt())
            .collect();
        // Integer flooring perturbs each center by less than a pixel
        for d in &distances {
            assert!((d - distances[0]).abs() < 2.0, "distances: {:?}", distances);
        }
    }

    #[test]
    fn test_all_positions_non_negative_after_polygon_layout() {
        let engine = LayoutEngine::new();
        let boxes = engine
            .arrange(&named_classes(&["A", "B", "C", "D"]))
            .unwrap();
        assert!(boxes.iter().all(|b| b.x >= 0 && b.y >= 0));
        // The polygon spans negative coordinates before normalization, so
        // at least one box must now sit on each minimum.
        assert_eq!(boxes.iter().map(|b| b.x).min().unwrap(), 0);
    }

    #[test]
    fn test_slots_start_at_zero() {
        let engine = LayoutEngine::new();
        let boxes = engine.arrange(&named_classes(&["A"])).unwrap();
        for side in Side::ALL {
            assert_eq!(boxes[0].slots.get(side), 0);
        }
    }

    #[test]
    fn test_slot_bump_post_increments() {
        let mut slots = SideSlots::default();
        assert_eq!(slots.bump(Side::East), 1);
        assert_eq!(slots.bump(Side::East), 2);
        assert_eq!(slots.get(Side::East), 2);
        assert_eq!(slots.get(Side::West), 0);
    }
}
