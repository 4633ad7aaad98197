use thiserror::Error;

/// Misuse of the game and state machine layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a state transition is already pending for this frame")]
    TransitionPending,
}
