use swiftris_core::{offsets_for, GameSession, HardDrop, RandomSource, SessionError};
use swiftris_types::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    ColumnOutOfBounds,
    ColumnBlocked,
    NotPlayable,
    NoFallingShape,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::NoFallingShape => "no_falling_shape",
            PlaceError::RotationBlocked
            | PlaceError::ColumnOutOfBounds
            | PlaceError::ColumnBlocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::ColumnOutOfBounds => "target column would place shape out of bounds",
            PlaceError::ColumnBlocked => "could not move to target column due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoFallingShape => "no falling shape",
        }
    }
}

impl From<SessionError> for PlaceError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::NoFallingShape | SessionError::NotStarted => PlaceError::NoFallingShape,
            SessionError::Blocked => PlaceError::ColumnBlocked,
            SessionError::NoRoom | SessionError::GameOver => PlaceError::NotPlayable,
        }
    }
}

/// Rotate the falling shape to `target`, slide its anchor to `target_column`
/// and hard-drop it. On error the session is left as it was.
pub fn apply_place<R: RandomSource + Clone>(
    session: &mut GameSession<R>,
    target_column: i32,
    target: Orientation,
) -> Result<HardDrop, PlaceError> {
    if session.is_game_over() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(shape0) = session.falling_shape() else {
        return Err(PlaceError::NoFallingShape);
    };

    let cur = shape0.orientation().index() as i8;
    let tgt = target.index() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    // Try the shorter direction first; for 180 both are 2.
    let mut plans: [(bool, u8); 2] = [(true, cw), (false, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    // Validate the column against the target orientation's footprint.
    let offsets = offsets_for(shape0.kind(), target);
    let min_dc = offsets.iter().map(|&(dc, _)| dc).min().unwrap_or(0);
    let max_dc = offsets.iter().map(|&(dc, _)| dc).max().unwrap_or(0);
    let columns = session.grid().columns() as i32;
    let left = target_column.checked_add(min_dc);
    let right = target_column.checked_add(max_dc);
    let in_bounds = matches!((left, right), (Some(l), Some(r)) if l >= 0 && r < columns);
    if !in_bounds {
        return Err(PlaceError::ColumnOutOfBounds);
    }

    let snapshot = session.clone();
    let mut rotated = false;
    for (clockwise, steps) in plans {
        *session = snapshot.clone();
        if (0..steps).all(|_| session.rotate_shape(clockwise).is_ok()) {
            rotated = true;
            break;
        }
    }
    if !rotated {
        *session = snapshot;
        return Err(PlaceError::RotationBlocked);
    }

    let Some(column) = session.falling_shape().map(|shape| shape.column()) else {
        *session = snapshot;
        return Err(PlaceError::NoFallingShape);
    };

    let dc = target_column - column;
    let step = dc.signum();
    for _ in 0..dc.abs() {
        if session.shift_shape(step, 0).is_err() {
            *session = snapshot;
            return Err(PlaceError::ColumnBlocked);
        }
    }

    session.hard_drop().map_err(|e| {
        let err = PlaceError::from(e);
        *session = snapshot;
        err
    })
}
