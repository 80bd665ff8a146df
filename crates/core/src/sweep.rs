//! Line sweep and scoring
//!
//! Rows are scanned bottom-up. Each full row is removed, an empty row enters
//! at the top and the same index is checked again. The first row of a sweep
//! scores [`LINE_BASE_POINTS`] and every further row doubles the previous
//! award: 1 row = 10, 2 rows = 30, 3 rows = 70, 4 rows = 150.
//!
//! By default row 0 is never a sweep target, even when full. Pass
//! `include_top_row = true` for strict full-height sweeping.

use crate::types::LINE_BASE_POINTS;
use crate::well::Well;

/// Result of one sweep call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepOutcome {
    /// Rows removed
    pub rows: u32,
    /// Points awarded
    pub points: u32,
}

/// Points for clearing `rows` rows in a single sweep.
///
/// ```
/// use tui_blockfall_core::sweep::points_for_rows;
///
/// assert_eq!(points_for_rows(0), 0);
/// assert_eq!(points_for_rows(1), 10);
/// assert_eq!(points_for_rows(4), 150);
/// ```
pub fn points_for_rows(rows: u32) -> u32 {
    let mut multiplier: u32 = 1;
    let mut points: u32 = 0;
    for _ in 0..rows {
        points = points.saturating_add(multiplier.saturating_mul(LINE_BASE_POINTS));
        multiplier = multiplier.saturating_mul(2);
    }
    points
}

/// Remove full rows and compute the award.
pub fn sweep(well: &mut Well, include_top_row: bool) -> SweepOutcome {
    let lowest = if include_top_row { 0 } else { 1 };
    let mut outcome = SweepOutcome::default();
    let mut multiplier: u32 = 1;

    let mut y = well.height();
    while y > lowest {
        let row = y - 1;
        if well.is_row_full(row) {
            well.remove_row(row);
            outcome.rows += 1;
            outcome.points = outcome
                .points
                .saturating_add(multiplier.saturating_mul(LINE_BASE_POINTS));
            multiplier = multiplier.saturating_mul(2);
            // Re-check the same index: the row above has shifted into it.
            continue;
        }
        y -= 1;
    }

    outcome
}
