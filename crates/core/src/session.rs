//! Session module - one game from first spawn to game over
//!
//! The session owns the grid, the falling shape and the preview shape. It
//! validates every move against the grid, locks shapes that can no longer
//! descend, removes completed rows and lets the remaining blocks fall.
//!
//! There is no clock in here: the caller decides when a tick happens and
//! calls [`GameSession::descend`] once per tick.

use std::vec::Drain;

use crate::error::SessionError;
use crate::grid::Grid;
use crate::rng::{RandomSource, SimpleRng};
use crate::shape::Shape;
use crate::snapshot::GameSnapshot;
use crate::types::{Block, GameConfig, GameEvent, BLOCKS_PER_SHAPE};

/// Shapes handed back by a successful spawn
#[derive(Debug)]
pub struct Spawned<'a> {
    pub falling: &'a Shape,
    pub next: &'a Shape,
}

/// Rows removed by a lock and the blocks that fell afterwards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineClear {
    /// One entry per removed row, bottom row first
    pub removed: Vec<Vec<Block>>,
    /// One entry per column that had blocks fall, positions already updated
    pub fallen: Vec<Vec<Block>>,
}

impl LineClear {
    /// Number of rows removed
    pub fn lines(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn removed_blocks(&self) -> impl Iterator<Item = &Block> {
        self.removed.iter().flatten()
    }

    pub fn fallen_blocks(&self) -> impl Iterator<Item = &Block> {
        self.fallen.iter().flatten()
    }
}

/// Result of writing a shape into the grid
#[derive(Debug, Clone, PartialEq)]
pub struct LockOutcome {
    /// The shape's blocks where they were written, before any row removal
    pub landed: [Block; BLOCKS_PER_SHAPE],
    pub cleared: LineClear,
}

/// Result of one descent step
#[derive(Debug, Clone, PartialEq)]
pub enum Descent {
    Moved,
    Locked(LockOutcome),
}

/// Result of a hard drop
#[derive(Debug, Clone, PartialEq)]
pub struct HardDrop {
    /// Rows travelled before locking
    pub rows: u32,
    pub outcome: LockOutcome,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    config: GameConfig,
    grid: Grid,
    falling_shape: Option<Shape>,
    next_shape: Option<Shape>,
    rng: R,
    events: Vec<GameEvent>,
    game_over: bool,
}

impl GameSession<SimpleRng> {
    /// Create a new session with the given RNG seed
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create a new session drawing shapes from `rng`
    ///
    /// `config` must pass [`GameConfig::validate`]; debug builds assert it.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid game config: {:?}",
            config
        );
        Self {
            grid: Grid::new(config.columns, config.rows),
            config,
            falling_shape: None,
            next_shape: None,
            rng,
            events: Vec::new(),
            game_over: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for collaborators and test setups
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling_shape(&self) -> Option<&Shape> {
        self.falling_shape.as_ref()
    }

    /// Mutable falling shape, for attaching visual handles
    pub fn falling_shape_mut(&mut self) -> Option<&mut Shape> {
        self.falling_shape.as_mut()
    }

    pub fn next_shape(&self) -> Option<&Shape> {
        self.next_shape.as_ref()
    }

    pub fn next_shape_mut(&mut self) -> Option<&mut Shape> {
        self.next_shape.as_mut()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Hand queued events to the caller, oldest first
    ///
    /// Events accumulate until drained or cleared, so a caller that has no
    /// use for them should call [`GameSession::clear_events`] now and then.
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Drop every queued event
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Prepare the preview shape if there is none yet
    pub fn begin(&mut self) {
        if self.next_shape.is_none() {
            self.next_shape = Some(self.preview_shape());
        }
        self.events.push(GameEvent::Began);
    }

    /// Empty the board and start over with the same random source
    pub fn restart(&mut self) {
        self.grid.clear();
        self.falling_shape = None;
        self.next_shape = None;
        self.game_over = false;
        self.clear_events();
        self.begin();
    }

    /// Promote the preview shape to the falling shape and draw a new preview
    ///
    /// A shape that is still falling is replaced without being locked.
    /// When the starting position is taken the game ends with
    /// [`SessionError::NoRoom`] and the preview shape stays in the preview slot.
    pub fn spawn(&mut self) -> Result<Spawned<'_>, SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        let mut shape = self.next_shape.take().ok_or(SessionError::NotStarted)?;
        shape.move_to(self.config.starting_column, self.config.starting_row);

        if !Self::fits(&self.grid, &shape) {
            shape.move_to(self.config.preview_column, self.config.preview_row);
            self.next_shape = Some(shape);
            self.falling_shape = None;
            self.end_game();
            return Err(SessionError::NoRoom);
        }

        let next = self.preview_shape();
        self.events.push(GameEvent::ShapeSpawned);
        Ok(Spawned {
            falling: self.falling_shape.insert(shape),
            next: self.next_shape.insert(next),
        })
    }

    /// One tick of gravity: lower the shape, or lock it if it is resting
    pub fn descend(&mut self) -> Result<Descent, SessionError> {
        self.ensure_playing()?;
        if self.detect_touch() {
            return self.settle_shape().map(Descent::Locked);
        }

        let shape = self
            .falling_shape
            .as_mut()
            .ok_or(SessionError::NoFallingShape)?;
        shape.lower_by_one_row();
        if !Self::fits(&self.grid, shape) {
            shape.raise_by_one_row();
            return self.settle_shape().map(Descent::Locked);
        }
        self.events.push(GameEvent::ShapeMoved);
        Ok(Descent::Moved)
    }

    /// Move the falling shape by a delta if the target is free
    pub fn shift_shape(&mut self, columns: i32, rows: i32) -> Result<(), SessionError> {
        self.ensure_playing()?;
        let shape = self
            .falling_shape
            .as_mut()
            .ok_or(SessionError::NoFallingShape)?;
        if !shape.can_shift_by(columns, rows) {
            return Err(SessionError::Blocked);
        }
        let mut moved = shape.clone();
        moved.shift_by(columns, rows);
        if !Self::fits(&self.grid, &moved) {
            return Err(SessionError::Blocked);
        }
        *shape = moved;
        self.events.push(GameEvent::ShapeMoved);
        Ok(())
    }

    pub fn move_left(&mut self) -> Result<(), SessionError> {
        self.shift_shape(-1, 0)
    }

    pub fn move_right(&mut self) -> Result<(), SessionError> {
        self.shift_shape(1, 0)
    }

    /// Lower by one row without locking
    pub fn lower_shape(&mut self) -> Result<(), SessionError> {
        self.shift_shape(0, 1)
    }

    /// Rotate in place; an illegal result is rotated back
    pub fn rotate_shape(&mut self, clockwise: bool) -> Result<(), SessionError> {
        self.ensure_playing()?;
        let shape = self
            .falling_shape
            .as_mut()
            .ok_or(SessionError::NoFallingShape)?;
        let orientation = shape.rotate(clockwise);
        shape.recompute_blocks(orientation);
        if !Self::fits(&self.grid, shape) {
            let orientation = shape.rotate(!clockwise);
            shape.recompute_blocks(orientation);
            return Err(SessionError::Blocked);
        }
        self.events.push(GameEvent::ShapeMoved);
        Ok(())
    }

    /// Drop the falling shape as far as it goes and lock it
    pub fn hard_drop(&mut self) -> Result<HardDrop, SessionError> {
        self.ensure_playing()?;
        let shape = self
            .falling_shape
            .as_mut()
            .ok_or(SessionError::NoFallingShape)?;

        let mut rows = 0u32;
        loop {
            shape.lower_by_one_row();
            if !Self::fits(&self.grid, shape) {
                shape.raise_by_one_row();
                break;
            }
            rows += 1;
        }

        self.events.push(GameEvent::ShapeDropped { rows });
        let outcome = self.settle_shape()?;
        Ok(HardDrop { rows, outcome })
    }

    /// Write the falling shape into the grid, then remove completed rows
    pub fn settle_shape(&mut self) -> Result<LockOutcome, SessionError> {
        let shape = self
            .falling_shape
            .take()
            .ok_or(SessionError::NoFallingShape)?;

        if !Self::fits(&self.grid, &shape) {
            self.falling_shape = Some(shape);
            self.end_game();
            return Err(SessionError::NoRoom);
        }

        let landed = shape.into_blocks();
        for block in landed {
            self.grid.set(block.column, block.row, Some(block));
        }
        self.events.push(GameEvent::ShapeLanded);

        let cleared = self.remove_completed_lines();
        if !cleared.is_empty() {
            self.events.push(GameEvent::LinesCleared {
                rows: cleared.lines() as u32,
            });
        }
        Ok(LockOutcome { landed, cleared })
    }

    /// Remove every full row and let the blocks above fall
    ///
    /// After removal each column is compacted on its own: every block above
    /// the lowest removed row drops until it rests on a block or the floor.
    pub fn remove_completed_lines(&mut self) -> LineClear {
        let columns = self.grid.columns() as i32;
        let rows = self.grid.rows() as i32;

        let mut removed = Vec::new();
        for row in (0..rows).rev() {
            if self.grid.is_row_full(row as usize) {
                let line: Vec<Block> = (0..columns)
                    .filter_map(|column| self.grid.take(column, row))
                    .collect();
                removed.push(line);
            }
        }

        let Some(lowest) = removed.first().and_then(|line| line.first()).map(|b| b.row) else {
            return LineClear::default();
        };

        let mut fallen = Vec::new();
        for column in 0..columns {
            let mut column_fallen = Vec::new();
            for row in (0..lowest).rev() {
                if self.grid.get(column, row).is_none() {
                    continue;
                }
                let mut new_row = row;
                while new_row + 1 < rows && self.grid.get(column, new_row + 1).is_none() {
                    new_row += 1;
                }
                if new_row == row {
                    continue;
                }
                if let Some(mut block) = self.grid.take(column, row) {
                    block.row = new_row;
                    self.grid.set(column, new_row, Some(block));
                    column_fallen.push(block);
                }
            }
            if !column_fallen.is_empty() {
                fallen.push(column_fallen);
            }
        }

        LineClear { removed, fallen }
    }

    /// Empty the grid, returning its blocks row by row from the top
    pub fn remove_all_blocks(&mut self) -> Vec<Vec<Block>> {
        let columns = self.grid.columns() as i32;
        let rows = self.grid.rows() as i32;
        (0..rows)
            .map(|row| {
                (0..columns)
                    .filter_map(|column| self.grid.take(column, row))
                    .collect::<Vec<_>>()
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Mark the game as finished. Further moves are refused.
    pub fn end_game(&mut self) {
        if !self.game_over {
            self.game_over = true;
            self.events.push(GameEvent::Ended);
        }
    }

    /// True when the falling shape is off the board or overlaps a block
    pub fn detect_illegal_placement(&self) -> bool {
        self.falling_shape
            .as_ref()
            .is_some_and(|shape| !Self::fits(&self.grid, shape))
    }

    /// True when a bottom block of the falling shape rests on the floor or a block
    pub fn detect_touch(&self) -> bool {
        let Some(shape) = self.falling_shape.as_ref() else {
            return false;
        };
        let floor = self.grid.rows() as i32;
        shape.bottom_blocks().iter().any(|block| {
            let below = block.row + 1;
            below >= floor || self.grid.is_occupied(block.column, below)
        })
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.fill_from(
            &self.grid,
            self.falling_shape.as_ref(),
            self.next_shape.as_ref(),
            self.game_over,
        );
    }

    fn preview_shape(&mut self) -> Shape {
        Shape::random(
            self.config.preview_column,
            self.config.preview_row,
            &mut self.rng,
        )
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        Ok(())
    }

    fn fits(grid: &Grid, shape: &Shape) -> bool {
        shape
            .blocks()
            .iter()
            .all(|block| grid.is_vacant(block.column, block.row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockColor, Orientation, ShapeKind};

    fn started(seed: u32) -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), seed);
        session.begin();
        session
    }

    #[test]
    fn test_begin_creates_preview_once() {
        let mut session = GameSession::new(GameConfig::default(), 3);
        assert!(session.next_shape().is_none());
        session.begin();
        let anchor = session.next_shape().unwrap().anchor();
        assert_eq!(anchor, (12, 1));

        let kind = session.next_shape().unwrap().kind();
        session.begin();
        assert_eq!(session.next_shape().unwrap().kind(), kind);
    }

    #[test]
    fn test_spawn_before_begin_is_refused() {
        let mut session = GameSession::new(GameConfig::default(), 3);
        assert_eq!(session.spawn().unwrap_err(), SessionError::NotStarted);
    }

    #[test]
    fn test_spawn_promotes_preview() {
        let mut session = started(11);
        let preview_kind = session.next_shape().unwrap().kind();

        let spawned = session.spawn().unwrap();
        assert_eq!(spawned.falling.kind(), preview_kind);
        assert_eq!(spawned.falling.anchor(), (4, 0));
        assert_eq!(spawned.next.anchor(), (12, 1));

        assert!(session.falling_shape().is_some());
        assert!(session.next_shape().is_some());
    }

    #[test]
    fn test_moves_without_shape() {
        let mut session = started(1);
        assert_eq!(session.move_left(), Err(SessionError::NoFallingShape));
        assert_eq!(session.descend(), Err(SessionError::NoFallingShape));
        assert!(!session.detect_touch());
        assert!(!session.detect_illegal_placement());
    }

    #[test]
    fn test_wall_blocks_shift() {
        let mut session = started(1);
        session.spawn().unwrap();
        while session.move_left().is_ok() {}

        let shape = session.falling_shape().unwrap();
        let leftmost = shape.blocks().iter().map(|b| b.column).min().unwrap();
        assert_eq!(leftmost, 0);
        let anchor = shape.anchor();

        assert_eq!(session.move_left(), Err(SessionError::Blocked));
        assert_eq!(session.falling_shape().unwrap().anchor(), anchor);
    }

    #[test]
    fn test_blocked_rotation_is_undone() {
        let mut session = started(1);
        session.spawn().unwrap();
        // Replace the falling shape with a vertical line against the left wall.
        *session.falling_shape_mut().unwrap() =
            Shape::new(ShapeKind::Line, 0, 5, BlockColor::Red, Orientation::Zero);

        let before: Vec<Block> = session.falling_shape().unwrap().blocks().to_vec();
        // Horizontal line needs column -1.
        assert_eq!(session.rotate_shape(true), Err(SessionError::Blocked));
        let shape = session.falling_shape().unwrap();
        assert_eq!(shape.orientation(), Orientation::Zero);
        assert_eq!(shape.blocks().to_vec(), before);
    }

    #[test]
    fn test_hard_drop_locks_on_floor() {
        let mut session = started(8);
        session.spawn().unwrap();
        let drop = session.hard_drop().unwrap();

        assert!(drop.rows > 0);
        assert!(session.falling_shape().is_none());
        let lowest = drop.outcome.landed.iter().map(|b| b.row).max().unwrap();
        assert_eq!(lowest, 19);
        assert_eq!(session.grid().occupied_count(), 4);
    }

    #[test]
    fn test_events_are_queued_in_order() {
        let mut session = started(8);
        session.spawn().unwrap();
        session.hard_drop().unwrap();

        let events: Vec<GameEvent> = session.drain_events().collect();
        assert_eq!(events[0], GameEvent::Began);
        assert_eq!(events[1], GameEvent::ShapeSpawned);
        assert!(matches!(events[2], GameEvent::ShapeDropped { .. }));
        assert_eq!(events[3], GameEvent::ShapeLanded);
        assert_eq!(events.len(), 4);
        assert_eq!(session.drain_events().count(), 0);
    }

    #[test]
    fn test_remove_all_blocks_empties_grid() {
        let mut session = started(2);
        session.grid_mut().set(0, 19, Some(Block::new(0, 19, BlockColor::Blue)));
        session.grid_mut().set(3, 5, Some(Block::new(3, 5, BlockColor::Red)));

        let rows = session.remove_all_blocks();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Block::new(3, 5, BlockColor::Red)]);
        assert_eq!(rows[1], vec![Block::new(0, 19, BlockColor::Blue)]);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_extreme_shift_is_rejected() {
        let mut session = started(4);
        session.spawn().unwrap();
        let before: Vec<Block> = session.falling_shape().unwrap().blocks().to_vec();

        for (columns, rows) in [(i32::MAX, 0), (i32::MIN, 0), (0, i32::MAX), (0, i32::MIN)] {
            assert_eq!(session.shift_shape(columns, rows), Err(SessionError::Blocked));
            assert_eq!(session.falling_shape().unwrap().blocks().to_vec(), before);
        }
        assert!(session.move_right().is_ok());
    }

    #[test]
    fn test_clear_events() {
        let mut session = started(4);
        session.spawn().unwrap();
        session.clear_events();
        assert_eq!(session.drain_events().count(), 0);

        session.move_left().unwrap();
        assert_eq!(session.drain_events().collect::<Vec<_>>(), vec![GameEvent::ShapeMoved]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "invalid game config")]
    fn test_invalid_config_is_caught_in_debug() {
        let config = GameConfig {
            columns: 2,
            ..GameConfig::default()
        };
        let _ = GameSession::new(config, 1);
    }

    #[test]
    fn test_restart_resets_game_over() {
        let mut session = started(2);
        session.end_game();
        assert!(session.is_game_over());
        assert_eq!(session.spawn().unwrap_err(), SessionError::GameOver);

        session.restart();
        assert!(!session.is_game_over());
        assert!(session.spawn().is_ok());
    }
}
