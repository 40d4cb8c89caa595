use thiserror::Error;

/// Validation failures returned straight to the caller. None of them are
/// fatal to the match; state is left untouched and the command may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("not this seat's turn")]
    OutOfTurn,
    #[error("card is not in this player's hand")]
    CardNotInHand,
    #[error("team may not take that wager action now")]
    InvalidWagerAction,
    #[error("the stake cannot go past 12")]
    WagerLimitExceeded,
    #[error("no wager is waiting for a response")]
    NoActiveWager,
    #[error("the hand of eleven must be answered before playing")]
    ConsentRequired,
    #[error("a pending raise must be answered before play continues")]
    WagerPending,
    #[error("the match is already over")]
    MatchOver,
}
