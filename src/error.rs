use thiserror::Error;

/// Errors.
///    Error 1: Invalid color value
///    Error 2: Invalid corner value
///    Error 3: Invalid edge value
///    Error 4: Invalid scramble string
///    Error 5: Invalid cubie representation
///    Error 6: Invalid slot name
///    Error 7: Invalid orientation class name
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid color value")]
    InvalidColor,
    #[error("Invalid corner value")]
    InvalidCorner,
    #[error("Invalid edge value")]
    InvalidEdge,
    #[error("Invalid scramble string")]
    InvalidScramble,
    #[error("Invalid cubie reperesentation")]
    InvalidCubieValue,
    #[error("Invalid slot name")]
    InvalidSlot,
    #[error("Invalid orientation class")]
    InvalidOrientationClass,
}
