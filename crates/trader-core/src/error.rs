//! Error types for the trading engine.

use thiserror::Error;

/// Top-level trading engine error.
#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TradingError {
    /// True for the not-enough-history case, which callers skip quietly
    /// instead of reporting.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            TradingError::Indicator(IndicatorError::InsufficientData { .. })
        )
    }
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Risk management errors.
#[derive(Error, Debug)]
pub enum RiskError {
    /// Required sizing inputs (balance, symbol limits, stop distance) are
    /// missing or degenerate. Callers must abort the attempt, never guess
    /// a fallback lot size.
    #[error("Position sizing unavailable: {0}")]
    SizingUnavailable(String),

    #[error("Invalid risk parameter: {0}")]
    InvalidParameter(String),
}

/// Broker terminal errors.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Not connected to terminal")]
    NotConnected,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Position not found: {0}")]
    PositionNotFound(String),

    #[error("Order rejected: {0}")]
    OrderRejected(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for trading operations.
pub type TradingResult<T> = Result<T, TradingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_detection() {
        let err: TradingError = IndicatorError::InsufficientData {
            required: 50,
            available: 12,
        }
        .into();
        assert!(err.is_insufficient_data());

        let err: TradingError = TerminalError::NotConnected.into();
        assert!(!err.is_insufficient_data());
    }

    #[test]
    fn test_error_display() {
        let err = IndicatorError::InsufficientData {
            required: 50,
            available: 49,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: need 50 bars, have 49"
        );
    }
}
