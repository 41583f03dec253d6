//! Spatial queries over the live entity list
//!
//! A linear vertical probe rather than a spatial index: room height is
//! bounded and entity counts stay in the tens. A much larger world would want
//! a column-keyed grid here, keeping the same nearest-in-ascending-y
//! tie-break.

use super::entity::Entity;

/// Index of an entity whose bounding box contains the point, excluding
/// `skip`. This is the grounding support test: inclusive edges mean a body
/// resting exactly on a surface still registers contact.
pub fn support_at(entities: &[Entity], skip: usize, x: f32, y: f32) -> Option<usize> {
    entities
        .iter()
        .enumerate()
        .find(|(i, e)| *i != skip && e.contains_point(x, y))
        .map(|(i, _)| i)
}

/// Nearest entity strictly below `(x, y_start)`, excluding `skip`.
///
/// Probes downward one pixel at a time until `bottom_bound`; the first
/// containing box wins, so the result is the nearest in ascending y order,
/// not the first in list order. Returns `None` when nothing is below - that
/// is the normal airborne case, not an error.
pub fn find_nearest_below(
    entities: &[Entity],
    skip: usize,
    x: f32,
    y_start: f32,
    bottom_bound: f32,
) -> Option<usize> {
    let mut y = y_start + 1.0;
    while y <= bottom_bound {
        if let Some(found) = support_at(entities, skip, x, y) {
            return Some(found);
        }
        y += 1.0;
    }
    None
}
