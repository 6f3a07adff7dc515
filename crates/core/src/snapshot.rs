use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::shape::Shape;
use crate::types::{BlockColor, Orientation, ShapeKind, BLOCKS_PER_SHAPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub kind: ShapeKind,
    pub color: BlockColor,
    pub orientation: Orientation,
    pub column: i32,
    pub row: i32,
    pub blocks: [(i32, i32); BLOCKS_PER_SHAPE],
}

impl From<&Shape> for ShapeSnapshot {
    fn from(value: &Shape) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            orientation: value.orientation(),
            column: value.column(),
            row: value.row(),
            blocks: value.blocks().map(|b| (b.column, b.row)),
        }
    }
}

/// Plain-data copy of a session, row-major board of colors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub board: Vec<Vec<Option<BlockColor>>>,
    pub falling: Option<ShapeSnapshot>,
    pub next: Option<ShapeSnapshot>,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Overwrite this snapshot, reusing the board rows when the size matches
    pub fn fill_from(
        &mut self,
        grid: &Grid,
        falling: Option<&Shape>,
        next: Option<&Shape>,
        game_over: bool,
    ) {
        self.columns = grid.columns();
        self.rows = grid.rows();
        self.board.resize_with(grid.rows(), Vec::new);
        for (row, out) in self.board.iter_mut().enumerate() {
            out.clear();
            out.extend(grid.row_slots(row).iter().map(|slot| slot.map(|b| b.color)));
        }
        self.falling = falling.map(ShapeSnapshot::from);
        self.next = next.map(ShapeSnapshot::from);
        self.game_over = game_over;
    }

    pub fn color_at(&self, column: usize, row: usize) -> Option<BlockColor> {
        self.board.get(row).and_then(|r| r.get(column)).copied().flatten()
    }
}

/// Text dump: settled blocks by color initial, falling blocks as `#`
impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.board.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                let falling = self.falling.is_some_and(|shape| {
                    shape
                        .blocks
                        .contains(&(column as i32, row as i32))
                });
                let ch = match cell {
                    _ if falling => '#',
                    Some(color) => color.as_str().as_bytes()[0].to_ascii_uppercase() as char,
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Block;

    #[test]
    fn test_fill_from_grid() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 3, Some(Block::new(1, 3, BlockColor::Orange)));
        let shape = Shape::new(ShapeKind::Square, 2, 0, BlockColor::Blue, Orientation::Zero);

        let mut snap = GameSnapshot::default();
        snap.fill_from(&grid, Some(&shape), None, false);

        assert_eq!(snap.board.len(), 4);
        assert_eq!(snap.color_at(1, 3), Some(BlockColor::Orange));
        assert_eq!(snap.color_at(0, 3), None);
        assert_eq!(snap.falling.unwrap().blocks, [(2, 0), (3, 0), (2, 1), (3, 1)]);
        assert_eq!(snap.to_string(), "..##\n..##\n....\n.O..\n");
    }

    #[test]
    fn test_fill_from_shrinks_board() {
        let mut snap = GameSnapshot::default();
        snap.fill_from(&Grid::new(10, 20), None, None, false);
        snap.fill_from(&Grid::new(5, 6), None, None, true);
        assert_eq!(snap.board.len(), 6);
        assert!(snap.board.iter().all(|r| r.len() == 5));
        assert!(snap.game_over);
    }
}
