//! Grid module - the fixed-size playfield
//!
//! The grid maps (column, row) to an optional [`Block`]. Storage is a flat
//! row-major vector (`row * columns + column`) sized once at construction.
//! Coordinates: column grows left to right, row grows top to bottom.
//!
//! Reading or writing outside the grid is a caller bug and panics. Use
//! [`Grid::contains`] or [`Grid::is_vacant`] when the coordinates come from a
//! shape that may have left the board.

use crate::types::Block;

/// The game grid - `columns` x `rows` slots using flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    /// Flat array of slots, row-major order (row * columns + column)
    slots: Vec<Option<Block>>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            slots: vec![None; columns * rows],
        }
    }

    /// Calculate flat index from (column, row) coordinates
    #[inline(always)]
    fn index(&self, column: i32, row: i32) -> usize {
        assert!(
            self.contains(column, row),
            "grid access out of bounds: ({}, {}) on a {}x{} grid",
            column,
            row,
            self.columns,
            self.rows
        );
        (row as usize) * self.columns + (column as usize)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Check if (column, row) lies on the grid
    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= 0 && row >= 0 && (column as usize) < self.columns && (row as usize) < self.rows
    }

    /// Block stored at (column, row)
    pub fn get(&self, column: i32, row: i32) -> Option<&Block> {
        self.slots[self.index(column, row)].as_ref()
    }

    /// Mutable access, e.g. for attaching a visual handle
    pub fn get_mut(&mut self, column: i32, row: i32) -> Option<&mut Block> {
        let idx = self.index(column, row);
        self.slots[idx].as_mut()
    }

    /// Store (or clear) the slot at (column, row)
    pub fn set(&mut self, column: i32, row: i32, block: Option<Block>) {
        let idx = self.index(column, row);
        self.slots[idx] = block;
    }

    /// Remove and return the block at (column, row)
    pub fn take(&mut self, column: i32, row: i32) -> Option<Block> {
        let idx = self.index(column, row);
        self.slots[idx].take()
    }

    /// Check if position is on the grid and empty
    pub fn is_vacant(&self, column: i32, row: i32) -> bool {
        self.contains(column, row) && self.get(column, row).is_none()
    }

    /// Check if position is on the grid and filled
    pub fn is_occupied(&self, column: i32, row: i32) -> bool {
        self.contains(column, row) && self.get(column, row).is_some()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        self.row_slots(row).iter().all(Option::is_some)
    }

    /// The slots of one row, left to right
    pub fn row_slots(&self, row: usize) -> &[Option<Block>] {
        let start = row * self.columns;
        &self.slots[start..start + self.columns]
    }

    /// Every stored block in row-major order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.slots.iter().flatten()
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.blocks().count()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
