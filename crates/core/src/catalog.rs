//! Piece catalog - spawn matrices for the seven tetrominoes
//!
//! Templates are immutable; [`template`] hands out a fresh owned copy that the
//! caller may rotate freely.

use crate::shape::Shape;
use crate::types::PieceKind;

const I_MASK: &[&[u8]] = &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]];
const L_MASK: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]];
const J_MASK: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]];
const O_MASK: &[&[u8]] = &[&[1, 1], &[1, 1]];
const S_MASK: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]];
const T_MASK: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]];
const Z_MASK: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]];

/// 0/1 mask of a kind's spawn orientation.
pub fn mask(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => I_MASK,
        PieceKind::L => L_MASK,
        PieceKind::J => J_MASK,
        PieceKind::O => O_MASK,
        PieceKind::S => S_MASK,
        PieceKind::T => T_MASK,
        PieceKind::Z => Z_MASK,
    }
}

/// Fresh copy of a kind's spawn shape.
///
/// ```
/// use tui_blockfall_core::catalog::template;
/// use tui_blockfall_core::types::PieceKind;
///
/// let o = template(PieceKind::O);
/// assert_eq!(o.to_u8_grid(), vec![vec![4, 4], vec![4, 4]]);
/// ```
pub fn template(kind: PieceKind) -> Shape {
    Shape::from_mask(kind, mask(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells_of_its_own_color() {
        for kind in PieceKind::ALL {
            let shape = template(kind);
            let cells: Vec<_> = shape.filled().collect();
            assert_eq!(cells.len(), 4, "{:?}", kind);
            assert!(cells.iter().all(|&(_, _, k)| k == kind));
        }
    }

    #[test]
    fn templates_are_square() {
        for kind in PieceKind::ALL {
            let shape = template(kind);
            assert_eq!(shape.width(), shape.height(), "{:?}", kind);
        }
    }

    #[test]
    fn template_returns_independent_copies() {
        let mut a = template(PieceKind::T);
        a.rotate(crate::types::RotateDir::Cw);
        assert_ne!(a, template(PieceKind::T));
    }
}
