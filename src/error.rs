//! Error types for the pair spot-price tool.
//!
//! This module provides a unified error type [`PriceError`] covering every
//! failure the pipeline can surface: configuration loading, token registry
//! resolution, pair ordering, reserve validation, RPC calls, and the
//! normalization arithmetic itself.
//!
//! # Design
//!
//! The core performs no local recovery: every violated precondition becomes
//! a typed variant returned to the caller. The host program (the CLI) is the
//! only place that turns an error into user-facing text and an exit status.
//! No variant ever substitutes a default price or a partial result.
//!
//! All errors implement [`std::error::Error`] and, where a foreign error
//! caused the failure, carry it in the source chain.

use alloy::primitives::Address;
use std::fmt;

/// Result type alias using [`PriceError`].
pub type PriceResult<T> = Result<T, PriceError>;

/// Unified error type for the pair spot-price pipeline.
#[derive(Debug)]
pub enum PriceError {
    /// Configuration or environment variable errors.
    Config {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// RPC provider or network errors.
    Rpc {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Token registry file could not be read or parsed.
    Registry {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No registry entry matches the requested symbol on the given chain.
    TokenNotFound {
        /// Symbol that was looked up
        symbol: String,
        /// Chain the lookup was scoped to
        chain_id: u64,
    },

    /// More than one registry entry matches the requested symbol on the
    /// given chain. Resolution must be unambiguous, so this is an error
    /// rather than a silent first-match pick.
    AmbiguousToken {
        /// Symbol that was looked up
        symbol: String,
        /// Chain the lookup was scoped to
        chain_id: u64,
        /// Number of entries that matched
        matches: usize,
    },

    /// A token pair cannot be ordered: the two addresses are equal
    /// (a token paired with itself) or a descriptor is malformed.
    InvalidPair {
        /// Human-readable error message
        message: String,
    },

    /// The factory has no deployed pool for the ordered token pair.
    PairNotFound {
        /// Lower-addressed token of the pair
        token0: Address,
        /// Higher-addressed token of the pair
        token1: Address,
    },

    /// Token decimals outside the on-chain domain of 0-18.
    InvalidDecimals {
        /// Symbol of the offending token
        symbol: String,
        /// The out-of-domain decimals value
        decimals: u8,
    },

    /// A reserve value is malformed (exceeds the uint112 field it is
    /// stored in on-chain, or otherwise fails validation).
    InvalidReserve {
        /// Human-readable error message
        message: String,
    },

    /// A pool reserve is zero on the divisor side: the price in that
    /// direction is undefined, not zero.
    ZeroReserve {
        /// Which reserve (token0 or token1) was zero
        side: ReserveSide,
    },

    /// Arithmetic failure in the normalization pipeline (overflow of the
    /// wide-integer intermediates, or a display conversion out of range).
    Math {
        /// Human-readable error message
        message: String,
    },
}

/// Identifies which side of a reserve snapshot triggered a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveSide {
    /// The reserve backing token0.
    Token0,
    /// The reserve backing token1.
    Token1,
}

impl fmt::Display for ReserveSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token0 => write!(f, "reserve0"),
            Self::Token1 => write!(f, "reserve1"),
        }
    }
}

impl PriceError {
    /// Create a new configuration error.
    #[must_use]
    pub fn config(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
        }
    }

    /// Create a new RPC error.
    #[must_use]
    pub fn rpc(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Rpc {
            message: message.into(),
            source,
        }
    }

    /// Create a new registry error.
    #[must_use]
    pub fn registry(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Registry {
            message: message.into(),
            source,
        }
    }

    /// Create a new invalid-pair error.
    #[must_use]
    pub fn invalid_pair(message: impl Into<String>) -> Self {
        Self::InvalidPair {
            message: message.into(),
        }
    }

    /// Create a new invalid-reserve error.
    #[must_use]
    pub fn invalid_reserve(message: impl Into<String>) -> Self {
        Self::InvalidReserve {
            message: message.into(),
        }
    }

    /// Create a new math error.
    #[must_use]
    pub fn math(message: impl Into<String>) -> Self {
        Self::Math {
            message: message.into(),
        }
    }
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, .. } => write!(f, "Configuration error: {message}"),
            Self::Rpc { message, .. } => write!(f, "RPC error: {message}"),
            Self::Registry { message, .. } => write!(f, "Token registry error: {message}"),
            Self::TokenNotFound { symbol, chain_id } => {
                write!(f, "Token '{symbol}' not found on chain {chain_id}")
            }
            Self::AmbiguousToken {
                symbol,
                chain_id,
                matches,
            } => write!(
                f,
                "Token '{symbol}' is ambiguous on chain {chain_id}: {matches} registry entries match"
            ),
            Self::InvalidPair { message } => write!(f, "Invalid token pair: {message}"),
            Self::PairNotFound { token0, token1 } => {
                write!(f, "No pool deployed for pair {token0}/{token1}")
            }
            Self::InvalidDecimals { symbol, decimals } => write!(
                f,
                "Token '{symbol}' has invalid decimals {decimals} (expected 0-18)"
            ),
            Self::InvalidReserve { message } => write!(f, "Invalid reserve: {message}"),
            Self::ZeroReserve { side } => {
                write!(f, "Price undefined: {side} is zero")
            }
            Self::Math { message } => write!(f, "Math error: {message}"),
        }
    }
}

impl std::error::Error for PriceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config { source, .. }
            | Self::Rpc { source, .. }
            | Self::Registry { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let err = PriceError::config("ETHEREUM_URL not set", None);
        assert!(matches!(err, PriceError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: ETHEREUM_URL not set");
    }

    #[test]
    fn test_token_not_found_display() {
        let err = PriceError::TokenNotFound {
            symbol: "WBTC".to_string(),
            chain_id: 1,
        };
        assert_eq!(err.to_string(), "Token 'WBTC' not found on chain 1");
    }

    #[test]
    fn test_ambiguous_token_display() {
        let err = PriceError::AmbiguousToken {
            symbol: "USDC".to_string(),
            chain_id: 1,
            matches: 2,
        };
        assert_eq!(
            err.to_string(),
            "Token 'USDC' is ambiguous on chain 1: 2 registry entries match"
        );
    }

    #[test]
    fn test_zero_reserve_display() {
        let err = PriceError::ZeroReserve {
            side: ReserveSide::Token1,
        };
        assert_eq!(err.to_string(), "Price undefined: reserve1 is zero");
    }

    #[test]
    fn test_invalid_decimals_display() {
        let err = PriceError::InvalidDecimals {
            symbol: "BAD".to_string(),
            decimals: 42,
        };
        assert_eq!(
            err.to_string(),
            "Token 'BAD' has invalid decimals 42 (expected 0-18)"
        );
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PriceError::registry("failed to read tokens file", Some(Box::new(source)));

        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Token registry error: failed to read tokens file"
        );
    }

    #[test]
    fn test_error_trait() {
        let err = PriceError::rpc("test", None);
        let _: &dyn std::error::Error = &err;
    }
}
