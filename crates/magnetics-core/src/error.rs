use std::fmt;

/// Error produced by a physics kernel or data-model operation.
///
/// Variants map directly onto the outcomes a caller needs to tell apart:
/// malformed input, geometry that cannot be realized, a design that
/// saturates or overheats or over-resists, a numeric computation that
/// could not be trusted, or a catalogue lookup that came up empty.
#[derive(Debug, Clone, PartialEq)]
pub enum MagneticsError {
    InvalidInput(String),
    InvalidGeometry(String),
    Saturation(String),
    OverLoss(String),
    ResistanceTooHigh(String),
    NumericalInstability(String),
    CatalogueMiss(String),
}

impl fmt::Display for MagneticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagneticsError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MagneticsError::InvalidGeometry(msg) => write!(f, "invalid geometry: {msg}"),
            MagneticsError::Saturation(msg) => write!(f, "saturation: {msg}"),
            MagneticsError::OverLoss(msg) => write!(f, "over loss: {msg}"),
            MagneticsError::ResistanceTooHigh(msg) => write!(f, "resistance too high: {msg}"),
            MagneticsError::NumericalInstability(msg) => write!(f, "numerical instability: {msg}"),
            MagneticsError::CatalogueMiss(msg) => write!(f, "catalogue miss: {msg}"),
        }
    }
}

impl std::error::Error for MagneticsError {}

/// Error code used in the HTTP error envelope and CLI diagnostics.
impl MagneticsError {
    pub fn code(&self) -> &'static str {
        match self {
            MagneticsError::InvalidInput(_) => "INVALID_INPUT",
            MagneticsError::InvalidGeometry(_) => "INVALID_GEOMETRY",
            MagneticsError::Saturation(_) => "SATURATION",
            MagneticsError::OverLoss(_) => "OVER_LOSS",
            MagneticsError::ResistanceTooHigh(_) => "RESISTANCE_TOO_HIGH",
            MagneticsError::NumericalInstability(_) => "NUMERICAL_INSTABILITY",
            MagneticsError::CatalogueMiss(_) => "CATALOGUE_MISS",
        }
    }

    pub fn message(&self) -> String {
        match self {
            MagneticsError::InvalidInput(m)
            | MagneticsError::InvalidGeometry(m)
            | MagneticsError::Saturation(m)
            | MagneticsError::OverLoss(m)
            | MagneticsError::ResistanceTooHigh(m)
            | MagneticsError::NumericalInstability(m)
            | MagneticsError::CatalogueMiss(m) => m.clone(),
        }
    }
}
