//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains every rule of the game: the grid, the shape catalogue,
//! shape movement and rotation, descent, locking, row removal and collapse.
//! It has **no dependencies** on rendering, sound, input or I/O:
//!
//! - **Deterministic**: the same seed (or [`rng::RandomSource`]) produces the same game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Passive**: there is no clock; the caller decides when a tick happens
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size playfield of optional blocks
//! - [`shapes`]: offset and bottom-block tables for the seven shape kinds
//! - [`shape`]: an anchored, oriented shape and its movement operations
//! - [`rng`]: seedable random source
//! - [`session`]: spawning, descent, locking, line removal, game over
//! - [`snapshot`]: serialisable read-only view for renderers
//!
//! # Example
//!
//! ```
//! use swiftris_core::{Descent, GameSession};
//! use swiftris_types::GameConfig;
//!
//! let mut game = GameSession::new(GameConfig::default(), 12345);
//! game.begin();
//! game.spawn().unwrap();
//!
//! // Tick until the shape locks on the floor
//! while let Ok(Descent::Moved) = game.descend() {}
//! assert!(game.falling_shape().is_none());
//! assert_eq!(game.grid().occupied_count(), 4);
//! ```

pub mod error;
pub mod grid;
pub mod rng;
pub mod session;
pub mod shape;
pub mod shapes;
pub mod snapshot;

pub use swiftris_types as types;

// Re-export commonly used types for convenience
pub use error::SessionError;
pub use grid::Grid;
pub use rng::{RandomSource, SimpleRng};
pub use session::{Descent, GameSession, HardDrop, LineClear, LockOutcome, Spawned};
pub use shape::Shape;
pub use shapes::{bottom_indices_for, offsets_for, random_kind};
pub use snapshot::{GameSnapshot, ShapeSnapshot};
