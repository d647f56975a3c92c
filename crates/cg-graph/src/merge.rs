//! Corner clustering: turns per-cell corner symptoms into one rectangular
//! region per junction or road terminus.
//!
//! Both merges walk the corner list in row-major order.  An unprocessed
//! corner seeds a cluster; other unprocessed corners on the same row or column
//! join it when the cells strictly between the two pass a joinability test.
//! Each cluster closes into its bounding box, which also swallows any other
//! corner it covers; identical boxes coalesce.
//!
//! # Intersections
//!
//! Cells between two corners must all be deep interior (all eight neighbours
//! road).  Adjacent corners trivially qualify.  Growth is transitive: every
//! absorbed corner is itself searched, because the corners of a 2-D overlap
//! are not all on the seed's row or column.
//!
//! # Dead ends
//!
//! Cells between two corners must be road, and each must have no orthogonal
//! non-road neighbour unless it sits on the grid border.  Growth is from the
//! seed only: a dead-end cluster is a run along one border, and the row-major
//! seed is always at one end of it.  Searching from absorbed members would
//! let the middle row of a wide road reach across the map to the opposite
//! terminus.

use std::collections::HashSet;

use log::trace;

use cg_core::{BBox, Pos};

use crate::classify::Classification;

/// Merge intersection corners into junction boxes.
pub fn merge_intersections(classes: &Classification) -> Vec<BBox> {
    let boxes = cluster(&classes.intersection_corners, true, |c, o| {
        between(c, o).all(|p| classes.is_deep_interior(p))
    });
    trace!("intersection regions: {boxes:?}");
    boxes
}

/// Merge dead-end corners into road-terminus boxes.
pub fn merge_dead_ends(classes: &Classification) -> Vec<BBox> {
    let boxes = cluster(&classes.dead_end_corners, false, |c, o| {
        between(c, o).all(|p| {
            classes
                .probe(p)
                .is_some_and(|pr| pr.orthogonal.on_edge || pr.orthogonal.sum == 0)
        })
    });
    trace!("dead-end regions: {boxes:?}");
    boxes
}

fn cluster<F>(corners: &[Pos], transitive: bool, joinable: F) -> Vec<BBox>
where
    F: Fn(Pos, Pos) -> bool,
{
    let mut processed = vec![false; corners.len()];
    let mut seen: HashSet<BBox> = HashSet::new();
    let mut boxes = Vec::new();

    for seed in 0..corners.len() {
        if processed[seed] {
            continue;
        }
        processed[seed] = true;

        let mut members = vec![seed];
        let mut next = 0;
        while next < members.len() {
            let c = corners[members[next]];
            next += 1;
            for (j, &o) in corners.iter().enumerate() {
                if processed[j] || !shares_axis(c, o) {
                    continue;
                }
                if joinable(c, o) {
                    processed[j] = true;
                    members.push(j);
                }
            }
            if !transitive {
                break;
            }
        }

        let bbox = members
            .iter()
            .fold(BBox::from_pos(corners[seed]), |b, &i| b.expanded(corners[i]));
        // Corners inside a closed box belong to it even when they share no
        // row or column with an absorbed member.
        for (j, &o) in corners.iter().enumerate() {
            if !processed[j] && bbox.contains(o) {
                processed[j] = true;
            }
        }
        if seen.insert(bbox) {
            boxes.push(bbox);
        }
    }

    boxes
}

#[inline]
fn shares_axis(a: Pos, b: Pos) -> bool {
    a != b && (a.x == b.x || a.y == b.y)
}

/// Cells strictly between two positions on a shared row or column.
fn between(a: Pos, b: Pos) -> impl Iterator<Item = Pos> {
    let (dx, dy) = ((b.x - a.x).signum(), (b.y - a.y).signum());
    let steps = (b.x - a.x).abs().max((b.y - a.y).abs());
    (1..steps).map(move |k| a.offset(dx * k, dy * k))
}
