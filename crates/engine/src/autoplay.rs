//! Greedy one-shape-lookahead player
//!
//! Every reachable (orientation, column) pair is tried on a clone of the
//! session and the resulting grid is scored with the classic four-feature
//! heuristic: completed lines, aggregate height, holes and bumpiness.

use swiftris_core::{GameSession, Grid, HardDrop, RandomSource};
use swiftris_types::Orientation;

use crate::place::{apply_place, PlaceError};

// Weights x1000
const LINE_WEIGHT: i64 = 760;
const HEIGHT_WEIGHT: i64 = 510;
const HOLE_WEIGHT: i64 = 360;
const BUMP_WEIGHT: i64 = 180;

/// Where to put the falling shape, and how good that looked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: i32,
    pub orientation: Orientation,
    pub score: i64,
}

/// Per-grid features used for scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridFeatures {
    pub aggregate_height: i64,
    pub holes: i64,
    pub bumpiness: i64,
}

impl GridFeatures {
    pub fn measure(grid: &Grid) -> Self {
        let rows = grid.rows() as i32;
        let mut heights = Vec::with_capacity(grid.columns());
        let mut holes = 0;

        for column in 0..grid.columns() as i32 {
            let top = (0..rows).find(|&row| grid.is_occupied(column, row));
            let height = top.map_or(0, |row| rows - row);
            if let Some(top) = top {
                holes += ((top + 1)..rows)
                    .filter(|&row| !grid.is_occupied(column, row))
                    .count() as i64;
            }
            heights.push(height as i64);
        }

        Self {
            aggregate_height: heights.iter().sum(),
            holes,
            bumpiness: heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum(),
        }
    }
}

fn score(lines: usize, features: GridFeatures) -> i64 {
    lines as i64 * LINE_WEIGHT
        - features.aggregate_height * HEIGHT_WEIGHT
        - features.holes * HOLE_WEIGHT
        - features.bumpiness * BUMP_WEIGHT
}

/// Best placement for the falling shape, or `None` if nothing can be placed
pub fn best_placement<R: RandomSource + Clone>(session: &GameSession<R>) -> Option<Placement> {
    let columns = session.grid().columns() as i32;
    let mut best: Option<Placement> = None;

    // Trials start from an empty event queue
    let mut base = session.clone();
    base.clear_events();

    for orientation in Orientation::ALL {
        // Anchors may sit left of the board when offsets are positive.
        for column in -2..columns + 2 {
            let mut trial = base.clone();
            let Ok(drop) = apply_place(&mut trial, column, orientation) else {
                continue;
            };
            let value = score(
                drop.outcome.cleared.lines(),
                GridFeatures::measure(trial.grid()),
            );
            if best.map_or(true, |b| value > b.score) {
                best = Some(Placement {
                    column,
                    orientation,
                    score: value,
                });
            }
        }
    }

    best
}

/// Place the falling shape at its best spot
pub fn play_turn<R: RandomSource + Clone>(
    session: &mut GameSession<R>,
) -> Result<HardDrop, PlaceError> {
    match best_placement(session) {
        Some(placement) => apply_place(session, placement.column, placement.orientation),
        None => session.hard_drop().map_err(PlaceError::from),
    }
}
