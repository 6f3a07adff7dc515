use thiserror::Error;

/// Why a session operation was refused
///
/// `Blocked` is the everyday case: the shape is left exactly where it was.
/// `NoRoom` is the game-over signal; what happens next is up to the caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has not begun: there is no preview shape to spawn")]
    NotStarted,
    #[error("no shape is falling")]
    NoFallingShape,
    #[error("move blocked by the board edge or a settled block")]
    Blocked,
    #[error("no room to place the shape")]
    NoRoom,
    #[error("game is over")]
    GameOver,
}
