//! Connection routing
//!
//! For each relationship edge, selects the closest pair of box sides,
//! allocates per-side connection slots, and derives the anchor points,
//! travel vector, arrow direction, and label bend offset.

use tracing::{debug, span, trace, Level};

use crate::core::{ArrowDirection, DiagramError, Point, Result, Side};
use crate::layout::NodeBox;
use crate::model::{RelationshipEdge, RelationshipKind};

/// Pixel offset subtracted from the start anchor on both axes
pub const ARROW_MARGIN: i64 = 20;

/// A fully routed relationship, immutable once computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEdge {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    pub label: String,
    pub start: Point,
    pub end: Point,
    pub travel: Point,
    pub direction: ArrowDirection,
    /// Extra leading blank lines in the rendered label, used to visually
    /// separate connections that landed on the same slot index at both ends
    pub bend_offset: i64,
}

/// Point on a box side.
///
/// Without a slot this is the exact midpoint of the side. With a slot
/// `(index, total)` the side length is divided by `total + 1` and
/// multiplied by the 1-based index, using integer division before the
/// multiply. For two connections this yields offsets at 1/2 and 2/3 of the
/// side rather than even thirds; the approximation is deliberate and must
/// not be corrected.
pub fn point_on_side(node: &NodeBox, side: Side, slot: Option<(i64, i64)>) -> Point {
    let (x, y, w, h) = (node.x, node.y, node.width, node.height);
    match slot {
        None => match side {
            Side::North => Point::new(x + w / 2, y),
            Side::South => Point::new(x + w / 2, y + h),
            Side::East => Point::new(x + w, y + h / 2),
            Side::West => Point::new(x, y + h / 2),
        },
        Some((index, total)) => {
            let total = total + 1;
            match side {
                Side::North => Point::new(x + w / total * index, y),
                Side::South => Point::new(x + w / total * index, y + h),
                Side::East => Point::new(x + w, y + h / total * index),
                Side::West => Point::new(x, y + h / total * index),
            }
        }
    }
}

/// Pick the pair of sides whose plain midpoints are closest.
///
/// All sixteen combinations are evaluated in the fixed order of
/// [`Side::ALL`]; only a strictly smaller distance replaces the current
/// best, so ties keep the first pair encountered.
pub fn closest_sides(source: &NodeBox, target: &NodeBox) -> (Side, Side) {
    let mut min_distance = f64::INFINITY;
    let mut best = (Side::North, Side::North);

    for source_side in Side::ALL {
        for target_side in Side::ALL {
            let a = point_on_side(source, source_side, None);
            let b = point_on_side(target, target_side, None);
            let distance = a.distance(b);
            if distance < min_distance {
                min_distance = distance;
                best = (source_side, target_side);
            }
        }
    }

    best
}

/// Sequential, order-preserving router over the run's edges
pub struct ConnectionRouter;

impl ConnectionRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route every edge in input order.
    ///
    /// The per-side slot counters on `boxes` are read and incremented in
    /// edge order; that order is load-bearing for slot assignment and must
    /// not be parallelized or reordered.
    pub fn route(
        &self,
        edges: &[RelationshipEdge],
        boxes: &mut [NodeBox],
    ) -> Result<Vec<RoutedEdge>> {
        let route_span = span!(Level::INFO, "route_edges", edges = edges.len());
        let _enter = route_span.enter();

        let mut routed = Vec::with_capacity(edges.len());

        for edge in edges {
            let source_idx = Self::box_index(boxes, &edge.source)?;
            let target_idx = Self::box_index(boxes, &edge.target)?;

            let (source_side, target_side) =
                closest_sides(&boxes[source_idx], &boxes[target_idx]);

            // Read-then-increment per end, source first. The "total" for an
            // anchor is the counter value right after that end's increment,
            // so earlier connections on a side keep their original spread.
            let source_slot = boxes[source_idx].slots.bump(source_side);
            let source_total = boxes[source_idx].slots.get(source_side);
            let target_slot = boxes[target_idx].slots.bump(target_side);
            let target_total = boxes[target_idx].slots.get(target_side);

            let source_point = point_on_side(
                &boxes[source_idx],
                source_side,
                Some((source_slot, source_total)),
            );
            let end = point_on_side(
                &boxes[target_idx],
                target_side,
                Some((target_slot, target_total)),
            );

            let start = Point::new(source_point.x - ARROW_MARGIN, source_point.y - ARROW_MARGIN);
            let travel = Point::new(end.x - start.x, end.y - start.y);

            let bend_offset = if source_slot != target_slot || source_slot == 1 {
                0
            } else {
                source_slot * 2
            };

            trace!(
                source = %edge.source,
                target = %edge.target,
                %source_side,
                %target_side,
                source_slot,
                target_slot,
                "Routed edge"
            );

            routed.push(RoutedEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                kind: edge.kind,
                label: edge.label.clone(),
                start,
                end,
                travel,
                direction: source_side.direction(),
                bend_offset,
            });
        }

        debug!(routed = routed.len(), "Routing complete");
        Ok(routed)
    }

    fn box_index(boxes: &[NodeBox], name: &str) -> Result<usize> {
        boxes
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| DiagramError::unknown_class(name))
    }
}

impl Default for ConnectionRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SideSlots;

    fn node(name: &str, x: i64, y: i64, w: i64, h: i64) -> NodeBox {
        NodeBox {
            name: name.into(),
            x,
            y,
            width: w,
            height: h,
            slots: SideSlots::default(),
        }
    }

    fn edge(source: &str, target: &str) -> RelationshipEdge {
        RelationshipEdge::new(
            source,
            target,
            RelationshipKind::AttributeType,
            "Attribute <x> of type",
        )
    }

    #[test]
    fn test_midpoints_without_slot() {
        let b = node("A", 10, 20, 100, 50);
        assert_eq!(point_on_side(&b, Side::North, None), Point::new(60, 20));
        assert_eq!(point_on_side(&b, Side::South, None), Point::new(60, 70));
        assert_eq!(point_on_side(&b, Side::East, None), Point::new(110, 45));
        assert_eq!(point_on_side(&b, Side::West, None), Point::new(10, 45));
    }

    #[test]
    fn test_slot_formula_divides_before_multiplying() {
        let b = node("A", 0, 0, 100, 90);
        // total becomes 3+1=4: 100/4*3 = 75
        assert_eq!(
            point_on_side(&b, Side::North, Some((3, 3))),
            Point::new(75, 0)
        );
        // 90/4*3 = 22*3 = 66, not 67 (integer division first)
        assert_eq!(
            point_on_side(&b, Side::East, Some((3, 3))),
            Point::new(100, 66)
        );
    }

    #[test]
    fn test_closest_sides_horizontal_neighbors() {
        let a = node("A", 0, 0, 100, 50);
        let b = node("B", 200, 0, 100, 50);
        assert_eq!(closest_sides(&a, &b), (Side::East, Side::West));
    }

    #[test]
    fn test_closest_sides_vertical_neighbors() {
        let a = node("A", 0, 0, 100, 50);
        let b = node("B", 0, 200, 100, 50);
        assert_eq!(closest_sides(&a, &b), (Side::South, Side::North));
    }

    #[test]
    fn test_closest_sides_tie_keeps_first_pair() {
        // Identical boxes: every pair with the same side has distance zero,
        // so (north, north) is kept as the first encountered.
        let a = node("A", 0, 0, 100, 50);
        let b = node("B", 0, 0, 100, 50);
        assert_eq!(closest_sides(&a, &b), (Side::North, Side::North));
    }

    #[test]
    fn test_single_edge_routing() {
        let mut boxes = vec![node("A", 0, 0, 100, 50), node("B", 300, 0, 100, 50)];
        let edges = vec![edge("A", "B")];

        let routed = ConnectionRouter::new().route(&edges, &mut boxes).unwrap();
        assert_eq!(routed.len(), 1);

        let r = &routed[0];
        // First connection on each side: total = 1+1 = 2, so the anchor is
        // the ordinary midpoint for this box size.
        assert_eq!(r.start, Point::new(100 - ARROW_MARGIN, 25 - ARROW_MARGIN));
        assert_eq!(r.end, Point::new(300, 25));
        assert_eq!(r.travel, Point::new(r.end.x - r.start.x, r.end.y - r.start.y));
        assert_eq!(r.direction, ArrowDirection::Right);
        assert_eq!(r.bend_offset, 0);

        assert_eq!(boxes[0].slots.get(Side::East), 1);
        assert_eq!(boxes[1].slots.get(Side::West), 1);
    }

    #[test]
    fn test_two_connections_on_one_side_use_half_then_two_thirds() {
        // Known quirk: the first connection is allocated at total=1 and lands
        // at h/2; the second at total=2 lands at h/3*2. The split is 1/2 and
        // 2/3, not even thirds.
        let mut boxes = vec![
            node("A", 0, 0, 100, 90),
            node("B", 300, 0, 100, 90),
        ];
        let edges = vec![edge("A", "B"), edge("A", "B")];

        let routed = ConnectionRouter::new().route(&edges, &mut boxes).unwrap();

        // First edge: east side of A, slot (1, 1) -> h/2*1 = 45
        assert_eq!(routed[0].start.y + ARROW_MARGIN, 45);
        // Second edge: slot (2, 2) -> h/3*2 = 60
        assert_eq!(routed[1].start.y + ARROW_MARGIN, 60);

        assert_eq!(boxes[0].slots.get(Side::East), 2);
        assert_eq!(boxes[1].slots.get(Side::West), 2);
    }

    #[test]
    fn test_bend_offset_for_matching_slot_indices() {
        let mut boxes = vec![node("A", 0, 0, 100, 90), node("B", 300, 0, 100, 90)];
        let edges = vec![edge("A", "B"), edge("A", "B"), edge("A", "B")];

        let routed = ConnectionRouter::new().route(&edges, &mut boxes).unwrap();

        // Slot indices match on both ends for every edge; only index 1 stays
        // flat, later ones get index * 2 blank lines.
        assert_eq!(routed[0].bend_offset, 0);
        assert_eq!(routed[1].bend_offset, 4);
        assert_eq!(routed[2].bend_offset, 6);
    }

    #[test]
    fn test_direction_follows_source_side() {
        let mut boxes = vec![node("A", 300, 0, 100, 50), node("B", 0, 0, 100, 50)];
        let edges = vec![edge("A", "B")];

        let routed = ConnectionRouter::new().route(&edges, &mut boxes).unwrap();
        assert_eq!(routed[0].direction, ArrowDirection::Left);
    }

    #[test]
    fn test_self_edge_shares_counters() {
        let mut boxes = vec![node("A", 0, 0, 100, 90)];
        let edges = vec![edge("A", "A")];

        let routed = ConnectionRouter::new().route(&edges, &mut boxes).unwrap();
        assert_eq!(routed.len(), 1);
        // Both ends land on the same box's north side: counter reaches 2.
        assert_eq!(boxes[0].slots.get(Side::North), 2);
    }

    #[test]
    fn test_unknown_class_is_an_error() {
        let mut boxes = vec![node("A", 0, 0, 100, 50)];
        let edges = vec![edge("A", "Ghost")];

        let result = ConnectionRouter::new().route(&edges, &mut boxes);
        assert!(matches!(result, Err(DiagramError::UnknownClass { .. })));
    }

    #[test]
    fn test_routing_is_deterministic() {
        let build = || {
            let mut boxes = vec![
                node("A", 0, 0, 100, 90),
                node("B", 300, 0, 120, 90),
                node("C", 150, 300, 100, 90),
            ];
            let edges = vec![edge("A", "B"), edge("B", "C"), edge("A", "C"), edge("C", "A")];
            ConnectionRouter::new().route(&edges, &mut boxes).unwrap()
        };
        assert_eq!(build(), build());
    }
}
