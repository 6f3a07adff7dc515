//! Shape module - a live, anchored arrangement of four blocks
//!
//! A shape's block positions always equal `anchor + offset` for its kind and
//! orientation, with one deliberate exception: [`Shape::rotate`] changes the
//! orientation without touching the blocks, so callers pair it with
//! [`Shape::recompute_blocks`] (the session does this for you).

use std::fmt;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;

use crate::rng::RandomSource;
use crate::shapes::{bottom_indices_for, offsets_for, random_kind};
use crate::types::{Block, BlockColor, Orientation, ShapeKind, BLOCKS_PER_SHAPE};

/// A falling or preview shape
///
/// Equality and hashing look at the anchor only: two shapes at the same
/// `(column, row)` compare equal whatever their kind, color or orientation.
/// Keep that in mind before putting shapes in a `HashSet`.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    column: i32,
    row: i32,
    color: BlockColor,
    orientation: Orientation,
    blocks: [Block; BLOCKS_PER_SHAPE],
}

impl Shape {
    /// Create a shape with its blocks laid out from the offset table
    pub fn new(
        kind: ShapeKind,
        column: i32,
        row: i32,
        color: BlockColor,
        orientation: Orientation,
    ) -> Self {
        let offsets = offsets_for(kind, orientation);
        let blocks = offsets.map(|(dc, dr)| Block::new(column + dc, row + dr, color));
        Self {
            kind,
            column,
            row,
            color,
            orientation,
            blocks,
        }
    }

    /// Create a shape of the given kind with random color and orientation
    pub fn with_random_style<R: RandomSource + ?Sized>(
        kind: ShapeKind,
        column: i32,
        row: i32,
        rng: &mut R,
    ) -> Self {
        let color = rng.block_color();
        let orientation = rng.orientation();
        Self::new(kind, column, row, color, orientation)
    }

    /// Create a random shape (kind, color and orientation) at the given anchor
    pub fn random<R: RandomSource + ?Sized>(column: i32, row: i32, rng: &mut R) -> Self {
        let kind = random_kind(rng);
        Self::with_random_style(kind, column, row, rng)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    /// Anchor as `(column, row)`
    pub fn anchor(&self) -> (i32, i32) {
        (self.column, self.row)
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn blocks(&self) -> &[Block; BLOCKS_PER_SHAPE] {
        &self.blocks
    }

    /// Mutable blocks, for attaching visual handles. Positions are
    /// overwritten by the next move or recompute.
    pub fn blocks_mut(&mut self) -> &mut [Block; BLOCKS_PER_SHAPE] {
        &mut self.blocks
    }

    /// Consume the shape, yielding its blocks
    pub fn into_blocks(self) -> [Block; BLOCKS_PER_SHAPE] {
        self.blocks
    }

    /// The downward-facing blocks for the current orientation
    pub fn bottom_blocks(&self) -> ArrayVec<Block, BLOCKS_PER_SHAPE> {
        bottom_indices_for(self.kind, self.orientation)
            .iter()
            .map(|&idx| self.blocks[idx])
            .collect()
    }

    /// Lay the blocks out for `orientation` around the current anchor
    ///
    /// Only positions change; colors, handles and `self.orientation` stay.
    pub fn recompute_blocks(&mut self, orientation: Orientation) {
        let offsets = offsets_for(self.kind, orientation);
        for (block, (dc, dr)) in self.blocks.iter_mut().zip(offsets) {
            block.column = self.column + dc;
            block.row = self.row + dr;
        }
    }

    /// Step the orientation once and return it. Blocks are not moved.
    pub fn rotate(&mut self, clockwise: bool) -> Orientation {
        self.orientation = self.orientation.rotate(clockwise);
        self.orientation
    }

    /// Move the anchor and every block by the same delta
    pub fn shift_by(&mut self, columns: i32, rows: i32) {
        self.column += columns;
        self.row += rows;
        for block in &mut self.blocks {
            block.column += columns;
            block.row += rows;
        }
    }

    /// True when `shift_by(columns, rows)` keeps every coordinate inside `i32`
    pub fn can_shift_by(&self, columns: i32, rows: i32) -> bool {
        let fits = |column: i32, row: i32| {
            column.checked_add(columns).is_some() && row.checked_add(rows).is_some()
        };
        fits(self.column, self.row) && self.blocks.iter().all(|b| fits(b.column, b.row))
    }

    pub fn lower_by_one_row(&mut self) {
        self.shift_by(0, 1);
    }

    pub fn raise_by_one_row(&mut self) {
        self.shift_by(0, -1);
    }

    pub fn shift_left_by_one_column(&mut self) {
        self.shift_by(-1, 0);
    }

    pub fn shift_right_by_one_column(&mut self) {
        self.shift_by(1, 0);
    }

    /// Put the anchor at (column, row) and rebuild the blocks from the table
    pub fn move_to(&mut self, column: i32, row: i32) {
        self.column = column;
        self.row = row;
        self.recompute_blocks(self.orientation);
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column.hash(state);
        self.row.hash(state);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} facing {}: {}, {}, {}, {}",
            self.color,
            self.kind.as_str(),
            self.orientation,
            self.blocks[0],
            self.blocks[1],
            self.blocks[2],
            self.blocks[3]
        )
    }
}
