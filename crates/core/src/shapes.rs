//! Shapes module - the static catalogue of the seven shape kinds
//!
//! For every kind and orientation this module holds two tables:
//!
//! - the four `(column, row)` offsets of the blocks relative to the anchor
//! - the indices of the blocks that face downward ("bottom" blocks), which
//!   are the only ones checked against the floor and settled blocks
//!
//! Block order inside an offset table is significant: bottom indices refer to
//! it, and `Shape::recompute_blocks` writes offsets back by index.

use crate::rng::RandomSource;
use crate::types::{Orientation, ShapeKind};

/// Offset of a single block relative to the shape anchor
pub type BlockOffset = (i32, i32);

/// Shape of a piece - 4 block offsets from the anchor
pub type ShapeOffsets = [BlockOffset; 4];

/// Get the block offsets for a shape kind and orientation
pub fn offsets_for(kind: ShapeKind, orientation: Orientation) -> ShapeOffsets {
    match kind {
        ShapeKind::Square => square_offsets(orientation),
        ShapeKind::Line => line_offsets(orientation),
        ShapeKind::T => t_offsets(orientation),
        ShapeKind::L => l_offsets(orientation),
        ShapeKind::J => j_offsets(orientation),
        ShapeKind::S => s_offsets(orientation),
        ShapeKind::Z => z_offsets(orientation),
    }
}

/// Get the bottom block indices for a shape kind and orientation
pub fn bottom_indices_for(kind: ShapeKind, orientation: Orientation) -> &'static [usize] {
    use Orientation::*;

    match (kind, orientation) {
        (ShapeKind::Square, _) => &[2, 3],

        (ShapeKind::Line, Zero | OneEighty) => &[3],
        (ShapeKind::Line, Ninety | TwoSeventy) => &[0, 1, 2, 3],

        (ShapeKind::T, Zero) => &[1, 2, 3],
        (ShapeKind::T, Ninety) => &[0, 3],
        (ShapeKind::T, OneEighty) => &[0, 1, 3],
        (ShapeKind::T, TwoSeventy) => &[0, 3],

        (ShapeKind::L, Zero) => &[2, 3],
        (ShapeKind::L, Ninety) => &[0, 1, 3],
        (ShapeKind::L, OneEighty) => &[0, 3],
        (ShapeKind::L, TwoSeventy) => &[0, 1, 2],

        (ShapeKind::J, Zero) => &[2, 3],
        (ShapeKind::J, Ninety) => &[0, 1, 2],
        (ShapeKind::J, OneEighty) => &[0, 3],
        (ShapeKind::J, TwoSeventy) => &[0, 1, 3],

        (ShapeKind::S, Zero | OneEighty) => &[1, 3],
        (ShapeKind::S, Ninety | TwoSeventy) => &[0, 2, 3],

        (ShapeKind::Z, Zero | OneEighty) => &[1, 3],
        (ShapeKind::Z, Ninety | TwoSeventy) => &[0, 2, 3],
    }
}

/// Uniformly chosen shape kind
pub fn random_kind<R: RandomSource + ?Sized>(rng: &mut R) -> ShapeKind {
    rng.shape_kind()
}

/// Square shapes (same for all orientations)
///
/// ```text
/// | 0 | 1 |
/// | 2 | 3 |
/// ```
fn square_offsets(_orientation: Orientation) -> ShapeOffsets {
    [(0, 0), (1, 0), (0, 1), (1, 1)]
}

/// Line shapes: vertical at 0/180, horizontal at 90/270
fn line_offsets(orientation: Orientation) -> ShapeOffsets {
    match orientation {
        Orientation::Zero | Orientation::OneEighty => [(0, 0), (0, 1), (0, 2), (0, 3)],
        Orientation::Ninety | Orientation::TwoSeventy => [(-1, 0), (0, 0), (1, 0), (2, 0)],
    }
}

/// T shapes
fn t_offsets(orientation: Orientation) -> ShapeOffsets {
    match orientation {
        Orientation::Zero => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Orientation::Ninety => [(2, 1), (1, 0), (1, 1), (1, 2)],
        Orientation::OneEighty => [(1, 2), (0, 1), (1, 1), (2, 1)],
        Orientation::TwoSeventy => [(0, 1), (1, 0), (1, 1), (1, 2)],
    }
}

/// L shapes
fn l_offsets(orientation: Orientation) -> ShapeOffsets {
    match orientation {
        Orientation::Zero => [(0, 0), (0, 1), (0, 2), (1, 2)],
        Orientation::Ninety => [(1, 1), (0, 1), (-1, 1), (-1, 2)],
        Orientation::OneEighty => [(0, 2), (0, 1), (0, 0), (-1, 0)],
        Orientation::TwoSeventy => [(-1, 1), (0, 1), (1, 1), (1, 0)],
    }
}

/// J shapes (mirror of L)
fn j_offsets(orientation: Orientation) -> ShapeOffsets {
    match orientation {
        Orientation::Zero => [(1, 0), (1, 1), (1, 2), (0, 2)],
        Orientation::Ninety => [(2, 1), (1, 1), (0, 1), (0, 0)],
        Orientation::OneEighty => [(0, 2), (0, 1), (0, 0), (1, 0)],
        Orientation::TwoSeventy => [(0, 0), (1, 0), (2, 0), (2, 1)],
    }
}

/// S shapes: two poses, each repeated
fn s_offsets(orientation: Orientation) -> ShapeOffsets {
    match orientation {
        Orientation::Zero | Orientation::OneEighty => [(0, 0), (0, 1), (1, 1), (1, 2)],
        Orientation::Ninety | Orientation::TwoSeventy => [(2, 0), (1, 0), (1, 1), (0, 1)],
    }
}

/// Z shapes (mirror of S)
fn z_offsets(orientation: Orientation) -> ShapeOffsets {
    match orientation {
        Orientation::Zero | Orientation::OneEighty => [(1, 0), (1, 1), (0, 1), (0, 2)],
        Orientation::Ninety | Orientation::TwoSeventy => [(-1, 0), (0, 0), (0, 1), (1, 1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_four_distinct_offsets() {
        for kind in ShapeKind::ALL {
            for orientation in Orientation::ALL {
                let offsets = offsets_for(kind, orientation);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(
                            offsets[i], offsets[j],
                            "{:?} {:?} repeats an offset",
                            kind, orientation
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_bottom_blocks_have_nothing_of_their_own_below() {
        // A bottom block must not sit directly on top of another block of the same shape,
        // and every block that does have open space below must be listed.
        for kind in ShapeKind::ALL {
            for orientation in Orientation::ALL {
                let offsets = offsets_for(kind, orientation);
                let bottoms = bottom_indices_for(kind, orientation);
                for (idx, &(dc, dr)) in offsets.iter().enumerate() {
                    let covered = offsets.contains(&(dc, dr + 1));
                    assert_eq!(
                        bottoms.contains(&idx),
                        !covered,
                        "{:?} {:?} block {} misclassified",
                        kind,
                        orientation,
                        idx
                    );
                }
            }
        }
    }

    #[test]
    fn test_offsets_are_connected() {
        for kind in ShapeKind::ALL {
            for orientation in Orientation::ALL {
                let offsets = offsets_for(kind, orientation);
                for &(c, r) in &offsets {
                    let touching = offsets
                        .iter()
                        .filter(|&&(oc, or)| (oc - c).abs() + (or - r).abs() == 1)
                        .count();
                    assert!(touching >= 1, "{:?} {:?} has a detached block", kind, orientation);
                }
            }
        }
    }
}
