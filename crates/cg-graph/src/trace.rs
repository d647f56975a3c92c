//! Dead-end pairing and road-strip tracing.
//!
//! Two dead-end boxes pair when they cover the same span across one axis and
//! every cell of the strip between them is road: they are the two termini of
//! one straight road.  Tracing then walks the strip from the first terminus to
//! the second, linking every building, warehouse or intersection it passes,
//! in order, into a path:
//!
//! ```text
//! RoadEnd ── (intersections / buildings along the strip) ── RoadEnd
//! ```
//!
//! Every edge of the path carries the strip width as its weight.

use std::collections::HashSet;

use log::{debug, trace};

use cg_core::{Axis, BBox, NodeIndex};
use cg_grid::CellGrid;

use crate::CityGraphBuilder;
use crate::index::BoxIndex;

/// Two dead ends terminating the same straight road strip.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DeadEndPair {
    /// Terminus with the lower coordinate along `axis`.
    pub first:  NodeIndex,
    pub second: NodeIndex,
    pub axis:   Axis,
    /// `(min, max)` across `axis` shared by both termini.
    pub across: (i32, i32),
    /// First strip position along `axis` past `first`.
    pub from:   i32,
    /// Last strip position along `axis` before `second`.
    pub to:     i32,
}

impl DeadEndPair {
    /// Width of the strip: its extent across `axis`.
    #[inline]
    pub fn width(&self) -> u32 {
        (self.across.1 - self.across.0 + 1) as u32
    }

    /// The strip cells strictly between the two termini along
    /// `start..=end`, or `None` when the range is empty.
    pub fn strip(&self, start: i32, end: i32) -> Option<BBox> {
        (start <= end).then(|| {
            let lo = self.axis.pos(start, self.across.0);
            let hi = self.axis.pos(end, self.across.1);
            BBox::new(lo.x, lo.y, hi.x, hi.y)
        })
    }
}

/// Pair dead-end boxes greedily in input order.
///
/// Each dead end joins at most one pair; the rest stay unpaired.
pub fn pair_dead_ends<G: CellGrid + ?Sized>(grid: &G, ends: &[(NodeIndex, BBox)]) -> Vec<DeadEndPair> {
    let mut paired = vec![false; ends.len()];
    let mut pairs = Vec::new();

    for i in 0..ends.len() {
        if paired[i] {
            continue;
        }
        for j in (i + 1)..ends.len() {
            if paired[j] {
                continue;
            }
            let Some(pair) = align(ends[i], ends[j]) else { continue };
            if strip_is_road(grid, &pair) {
                paired[i] = true;
                paired[j] = true;
                trace!("paired {} and {} ({:?}, width {})", pair.first, pair.second, pair.axis, pair.width());
                pairs.push(pair);
                break;
            }
        }
    }

    let unpaired = paired.iter().filter(|p| !**p).count();
    if unpaired > 0 {
        debug!("{unpaired} dead ends left unpaired");
    }
    pairs
}

/// Shared span on one axis and disjoint along the other.
fn align((na, a): (NodeIndex, BBox), (nb, b): (NodeIndex, BBox)) -> Option<DeadEndPair> {
    let axis = if (a.min_y, a.max_y) == (b.min_y, b.max_y) {
        Axis::Horizontal
    } else if (a.min_x, a.max_x) == (b.min_x, b.max_x) {
        Axis::Vertical
    } else {
        return None;
    };

    let (a_lo, a_hi) = a.span_along(axis);
    let (b_lo, b_hi) = b.span_along(axis);
    let ((first, first_hi), (second, second_lo)) = if a_hi < b_lo {
        ((na, a_hi), (nb, b_lo))
    } else if b_hi < a_lo {
        ((nb, b_hi), (na, a_lo))
    } else {
        return None;
    };

    Some(DeadEndPair {
        first,
        second,
        axis,
        across: a.span_across(axis),
        from: first_hi + 1,
        to: second_lo - 1,
    })
}

fn strip_is_road<G: CellGrid + ?Sized>(grid: &G, pair: &DeadEndPair) -> bool {
    (pair.from..=pair.to).all(|along| {
        (pair.across.0..=pair.across.1).all(|across| grid.is_road(pair.axis.pos(along, across)))
    })
}

/// Walk one paired strip and link the nodes found along it.
///
/// `candidates` indexes the buildings, warehouses and intersections that may
/// be linked.  `consumed` collects the nodes already linked on this trace;
/// the caller clears it between pairs.  Returns the number of edges added.
pub fn trace_pair(
    pair:       &DeadEndPair,
    candidates: &BoxIndex,
    consumed:   &mut HashSet<NodeIndex>,
    graph:      &mut CityGraphBuilder,
) -> usize {
    let weight = pair.width();
    let (lo, hi) = pair.across;
    let mut cursor = pair.first;
    let mut seg_start = pair.from;
    let mut added = 0;

    for along in pair.from..=pair.to {
        // Flank before the strip, the strip cells, flank after.
        for across in (lo - 1)..=(hi + 1) {
            let p = pair.axis.pos(along, across);
            for (node, bbox) in candidates.at(p) {
                if !consumed.insert(node) {
                    continue;
                }
                let (b_lo, b_hi) = bbox.span_across(pair.axis);
                let in_strip = b_lo <= hi && lo <= b_hi;
                let seg_end = if in_strip { along - 1 } else { along };

                if graph.add_edge(cursor, node, weight, pair.strip(seg_start, seg_end)).is_some() {
                    added += 1;
                }
                cursor = node;
                seg_start = if in_strip { bbox.span_along(pair.axis).1 + 1 } else { along };
            }
        }
    }

    if graph.add_edge(cursor, pair.second, weight, pair.strip(seg_start, pair.to)).is_some() {
        added += 1;
    }
    added
}
