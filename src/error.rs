use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokerError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Duplicate card: {0}")]
    DuplicateCard(String),

    #[error("Hand must be exactly {expected} cards, got {got}")]
    InvalidHandSize { expected: usize, got: usize },

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    NotEnoughDeck { requested: usize, available: usize },

    #[error("Deck ran out mid-attempt: {0}")]
    DeckUnderflow(String),

    #[error("Range must be between 0 and 100, got {0}")]
    InvalidRange(f64),

    #[error("Invalid iteration count: {0}")]
    InvalidIterations(u64),

    #[error("Not a number: {0}")]
    InvalidNumber(String),

    #[error("Unknown opponent: {0}")]
    UnknownOpponent(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PokerResult<T> = Result<T, PokerError>;
