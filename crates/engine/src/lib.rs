//! Placement engine - drives a session through its public, legality-checked moves
//!
//! - [`place`]: rotate, slide and hard-drop the falling shape to a target
//! - [`autoplay`]: pick the best target by simulating every placement

pub mod autoplay;
pub mod place;

pub use autoplay::{best_placement, play_turn, GridFeatures, Placement};
pub use place::{apply_place, PlaceError};
