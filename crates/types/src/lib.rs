//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used by the game core and by the
//! collaborators that draw, play sounds, or feed input. All types are plain
//! data with no game rules attached.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Starting anchor**: (4, 0) for the falling shape
//! - **Preview anchor**: (12, 1), to the right of the board
//!
//! All of these can be overridden through [`GameConfig`].
//!
//! # Examples
//!
//! ```
//! use swiftris_types::{Block, BlockColor, Orientation, BOARD_COLUMNS, BOARD_ROWS};
//!
//! // Blocks compare by position and color only
//! let a = Block::new(3, 4, BlockColor::Blue);
//! let b = Block::new(3, 4, BlockColor::Blue);
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "blue: [3, 4]");
//!
//! // Rotate
//! let rotated = Orientation::Zero.rotate(true);
//! assert_eq!(rotated, Orientation::Ninety);
//!
//! // Board dimensions
//! assert_eq!(BOARD_COLUMNS, 10);
//! assert_eq!(BOARD_ROWS, 20);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_COLUMNS: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_ROWS: usize = 20;

/// Anchor column a shape is moved to when it starts falling
pub const STARTING_COLUMN: i32 = 4;

/// Anchor row a shape is moved to when it starts falling
pub const STARTING_ROW: i32 = 0;

/// Anchor column of the preview ("next") shape
pub const PREVIEW_COLUMN: i32 = 12;

/// Anchor row of the preview ("next") shape
pub const PREVIEW_ROW: i32 = 1;

/// Smallest board edge accepted by [`GameConfig::validate`]
pub const MIN_BOARD_EDGE: usize = 4;

/// Number of blocks in every shape
pub const BLOCKS_PER_SHAPE: usize = 4;

/// The six block colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Blue,
    Orange,
    Purple,
    Red,
    Teal,
    Yellow,
}

impl BlockColor {
    /// Every color, in index order
    pub const ALL: [BlockColor; 6] = [
        BlockColor::Blue,
        BlockColor::Orange,
        BlockColor::Purple,
        BlockColor::Red,
        BlockColor::Teal,
        BlockColor::Yellow,
    ];

    /// Lowercase name, also used by renderers as the sprite name
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Blue => "blue",
            BlockColor::Orange => "orange",
            BlockColor::Purple => "purple",
            BlockColor::Red => "red",
            BlockColor::Teal => "teal",
            BlockColor::Yellow => "yellow",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for BlockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orientation states, in clockwise order starting from the authored pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Zero,
    Ninety,
    OneEighty,
    TwoSeventy,
}

impl Orientation {
    /// Every orientation, in clockwise order
    pub const ALL: [Orientation; 4] = [
        Orientation::Zero,
        Orientation::Ninety,
        Orientation::OneEighty,
        Orientation::TwoSeventy,
    ];

    /// Position of this orientation in [`Orientation::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Orientation::Zero => 0,
            Orientation::Ninety => 1,
            Orientation::OneEighty => 2,
            Orientation::TwoSeventy => 3,
        }
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::Zero => Orientation::Ninety,
            Orientation::Ninety => Orientation::OneEighty,
            Orientation::OneEighty => Orientation::TwoSeventy,
            Orientation::TwoSeventy => Orientation::Zero,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Orientation::Zero => Orientation::TwoSeventy,
            Orientation::TwoSeventy => Orientation::OneEighty,
            Orientation::OneEighty => Orientation::Ninety,
            Orientation::Ninety => Orientation::Zero,
        }
    }

    /// Advance one step in the requested direction, wrapping at either end
    pub fn rotate(&self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }

    /// Angle in degrees
    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Zero => 0,
            Orientation::Ninety => 90,
            Orientation::OneEighty => 180,
            Orientation::TwoSeventy => 270,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// The seven shape archetypes
///
/// - **Square**: 2x2 block, identical in every orientation
/// - **Line**: four in a row
/// - **T**: T-shaped
/// - **L** / **J**: mirror images of each other
/// - **S** / **Z**: mirror images of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Square,
    Line,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// Every shape kind, in catalogue order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Square,
        ShapeKind::Line,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Line => "line",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Opaque handle a render collaborator attaches to a block
///
/// The core stores it and never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

/// A single occupied position on (or next to) the board
///
/// Equality and hashing cover `(column, row, color)` only; the visual handle
/// is ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Block {
    pub column: i32,
    pub row: i32,
    pub color: BlockColor,
    #[serde(skip)]
    pub handle: Option<VisualHandle>,
}

impl Block {
    pub fn new(column: i32, row: i32, color: BlockColor) -> Self {
        Self {
            column,
            row,
            color,
            handle: None,
        }
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row && self.color == other.color
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column.hash(state);
        self.row.hash(state);
        self.color.hash(state);
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}, {}]", self.color, self.column, self.row)
    }
}

/// Board geometry and the two fixed anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: usize,
    pub rows: usize,
    pub starting_column: i32,
    pub starting_row: i32,
    pub preview_column: i32,
    pub preview_row: i32,
}

impl GameConfig {
    /// Check the board is large enough and the starting anchor is on it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MIN_BOARD_EDGE || self.rows < MIN_BOARD_EDGE {
            return Err(ConfigError::BoardTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let column_ok = self.starting_column >= 0 && (self.starting_column as usize) < self.columns;
        let row_ok = self.starting_row >= 0 && (self.starting_row as usize) < self.rows;
        if !column_ok || !row_ok {
            return Err(ConfigError::StartOffBoard {
                column: self.starting_column,
                row: self.starting_row,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_COLUMNS,
            rows: BOARD_ROWS,
            starting_column: STARTING_COLUMN,
            starting_row: STARTING_ROW,
            preview_column: PREVIEW_COLUMN,
            preview_row: PREVIEW_ROW,
        }
    }
}

/// Rejected [`GameConfig`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {columns}x{rows}", min = MIN_BOARD_EDGE)]
    BoardTooSmall { columns: usize, rows: usize },
    #[error("starting anchor ({column}, {row}) is outside the board")]
    StartOffBoard { column: i32, row: i32 },
}

/// Things that happened inside a session, in order
///
/// Collaborators (sound, animation) drain these after each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Began,
    ShapeSpawned,
    ShapeMoved,
    ShapeDropped { rows: u32 },
    ShapeLanded,
    LinesCleared { rows: u32 },
    Ended,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn orientation_wraps_both_ways() {
        assert_eq!(Orientation::TwoSeventy.rotate(true), Orientation::Zero);
        assert_eq!(Orientation::Zero.rotate(false), Orientation::TwoSeventy);
        for o in Orientation::ALL {
            assert_eq!(o.rotate_cw().rotate_ccw(), o);
            assert_eq!(Orientation::ALL[o.index()], o);
        }
    }

    #[test]
    fn block_equality_ignores_handle() {
        let plain = Block::new(2, 7, BlockColor::Teal);
        let mut drawn = plain;
        drawn.handle = Some(VisualHandle(42));
        assert_eq!(plain, drawn);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&drawn));

        assert_ne!(plain, Block::new(2, 7, BlockColor::Red));
        assert_ne!(plain, Block::new(3, 7, BlockColor::Teal));
    }

    #[test]
    fn color_names_roundtrip() {
        for color in BlockColor::ALL {
            assert_eq!(BlockColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(BlockColor::from_str("YELLOW"), Some(BlockColor::Yellow));
        assert_eq!(BlockColor::from_str("green"), None);
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.columns, 10);
        assert_eq!(config.rows, 20);
        assert_eq!((config.starting_column, config.starting_row), (4, 0));
        assert_eq!((config.preview_column, config.preview_row), (12, 1));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn config_rejects_bad_geometry() {
        let tiny = GameConfig {
            columns: 3,
            ..GameConfig::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(ConfigError::BoardTooSmall { columns: 3, rows: 20 })
        ));

        let off = GameConfig {
            starting_column: 10,
            ..GameConfig::default()
        };
        assert!(matches!(
            off.validate(),
            Err(ConfigError::StartOffBoard { column: 10, row: 0 })
        ));
    }
}
