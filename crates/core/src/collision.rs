//! Collision and merge
//!
//! [`collides`] is the single legality predicate used for moves, rotations,
//! gravity and spawning. [`merge`] is the only way a piece's cells get into
//! the well.

use crate::shape::Shape;
use crate::types::Position;
use crate::well::Well;

/// True when any filled cell of `shape` placed at `pos` lands on a filled well
/// cell or outside the well. Out-of-range rows and columns count as blocked.
pub fn collides(well: &Well, shape: &Shape, pos: Position) -> bool {
    shape
        .filled()
        .any(|(dx, dy, _)| well.is_blocked(pos.x + dx, pos.y + dy))
}

/// Commit every filled cell of `shape` at `pos` into the well, overwriting
/// whatever is there. Cells outside the well are dropped.
pub fn merge(well: &mut Well, shape: &Shape, pos: Position) {
    for (dx, dy, kind) in shape.filled() {
        well.set(pos.x + dx, pos.y + dy, Some(kind));
    }
}
