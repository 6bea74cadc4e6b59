//! Token registry: symbol resolution against a JSON token list.
//!
//! The registry is a flat JSON array of entries in the common token-list
//! shape:
//!
//! ```json
//! [
//!   {
//!     "chainId": 1,
//!     "symbol": "WETH",
//!     "address": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
//!     "decimals": 18
//!   }
//! ]
//! ```
//!
//! Resolution is scoped to a `(chain_id, symbol)` key and must be
//! unambiguous: zero matches fail with [`PriceError::TokenNotFound`], more
//! than one match fails with [`PriceError::AmbiguousToken`]. Symbols are
//! not globally unique across chains, so a lookup without a chain scope
//! would be meaningless.

use crate::error::{PriceError, PriceResult};
use crate::token::TokenDescriptor;
use alloy::primitives::Address;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// One raw registry entry, as deserialized from the token list file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Chain the token is deployed on.
    pub chain_id: u64,
    /// Display symbol.
    pub symbol: String,
    /// 20-byte contract address.
    pub address: Address,
    /// Decimal scale of the token's base units.
    pub decimals: u8,
}

/// In-memory token registry loaded from a JSON token list.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    entries: Vec<RegistryEntry>,
}

impl TokenRegistry {
    /// Load a registry from a JSON token list file.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Registry`] if the file cannot be read or does
    /// not parse as a token list.
    pub fn load(path: &Path) -> PriceResult<Self> {
        debug!(path = %path.display(), "Loading token registry");

        let raw = std::fs::read_to_string(path).map_err(|e| {
            PriceError::registry(
                format!("failed to read token list {}", path.display()),
                Some(Box::new(e)),
            )
        })?;

        let registry = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            tokens = registry.len(),
            "Token registry loaded"
        );
        Ok(registry)
    }

    /// Parse a registry from a JSON token list string.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Registry`] if the JSON is malformed.
    pub fn from_json(raw: &str) -> PriceResult<Self> {
        let entries: Vec<RegistryEntry> = serde_json::from_str(raw).map_err(|e| {
            PriceError::registry("token list is not valid JSON", Some(Box::new(e)))
        })?;
        Ok(Self { entries })
    }

    /// Number of entries in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a symbol on a chain to a validated [`TokenDescriptor`].
    ///
    /// Symbol comparison is exact (case-sensitive), matching how token
    /// lists are published.
    ///
    /// # Errors
    ///
    /// - [`PriceError::TokenNotFound`] if no entry matches.
    /// - [`PriceError::AmbiguousToken`] if more than one entry matches;
    ///   silently picking the first would hide a corrupt or hostile list.
    /// - [`PriceError::InvalidDecimals`] if the matched entry carries
    ///   decimals outside 0-18.
    pub fn resolve(&self, symbol: &str, chain_id: u64) -> PriceResult<TokenDescriptor> {
        let mut matches = self
            .entries
            .iter()
            .filter(|entry| entry.chain_id == chain_id && entry.symbol == symbol);

        let Some(entry) = matches.next() else {
            return Err(PriceError::TokenNotFound {
                symbol: symbol.to_string(),
                chain_id,
            });
        };

        let extra = matches.count();
        if extra > 0 {
            return Err(PriceError::AmbiguousToken {
                symbol: symbol.to_string(),
                chain_id,
                matches: extra + 1,
            });
        }

        debug!(
            symbol = %entry.symbol,
            address = %entry.address,
            decimals = entry.decimals,
            "Resolved token"
        );
        TokenDescriptor::new(entry.address, entry.decimals, entry.symbol.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOKEN_LIST: &str = r#"[
        {
            "chainId": 1,
            "symbol": "WETH",
            "address": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "decimals": 18
        },
        {
            "chainId": 1,
            "symbol": "WBTC",
            "address": "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599",
            "decimals": 8
        },
        {
            "chainId": 137,
            "symbol": "WETH",
            "address": "0x7ceB23fD6bC0adD59E62ac25578270cFf1b9f619",
            "decimals": 18
        },
        {
            "chainId": 1,
            "symbol": "DUP",
            "address": "0x0000000000000000000000000000000000000010",
            "decimals": 18
        },
        {
            "chainId": 1,
            "symbol": "DUP",
            "address": "0x0000000000000000000000000000000000000011",
            "decimals": 6
        },
        {
            "chainId": 1,
            "symbol": "BROKEN",
            "address": "0x0000000000000000000000000000000000000012",
            "decimals": 255
        }
    ]"#;

    fn registry() -> TokenRegistry {
        match TokenRegistry::from_json(TOKEN_LIST) {
            Ok(registry) => registry,
            Err(_) => unreachable!(),
        }
    }

    #[test]
    fn test_resolve_known_token() {
        let result = registry().resolve("WBTC", 1);
        assert!(result.is_ok());
        if let Ok(token) = result {
            assert_eq!(token.symbol(), "WBTC");
            assert_eq!(token.decimals(), 8);
        }
    }

    #[test]
    fn test_resolve_is_chain_scoped() {
        // WETH exists on both chain 1 and chain 137; each lookup sees
        // exactly one entry.
        let mainnet = registry().resolve("WETH", 1);
        let polygon = registry().resolve("WETH", 137);
        assert!(mainnet.is_ok());
        assert!(polygon.is_ok());
        if let (Ok(mainnet), Ok(polygon)) = (mainnet, polygon) {
            assert_ne!(mainnet.address(), polygon.address());
        }
    }

    #[test]
    fn test_resolve_unknown_symbol() {
        let result = registry().resolve("NOPE", 1);
        assert!(matches!(
            result,
            Err(PriceError::TokenNotFound { chain_id: 1, .. })
        ));
    }

    #[test]
    fn test_resolve_unknown_chain() {
        let result = registry().resolve("WBTC", 42161);
        assert!(matches!(result, Err(PriceError::TokenNotFound { .. })));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let result = registry().resolve("wbtc", 1);
        assert!(matches!(result, Err(PriceError::TokenNotFound { .. })));
    }

    #[test]
    fn test_duplicate_entries_are_an_error() {
        let result = registry().resolve("DUP", 1);
        assert!(matches!(
            result,
            Err(PriceError::AmbiguousToken { matches: 2, .. })
        ));
    }

    #[test]
    fn test_entry_with_bad_decimals_rejected_at_resolution() {
        let result = registry().resolve("BROKEN", 1);
        assert!(matches!(
            result,
            Err(PriceError::InvalidDecimals { decimals: 255, .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_registry_error() {
        let result = TokenRegistry::from_json("not json");
        assert!(matches!(result, Err(PriceError::Registry { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new();
        assert!(file.is_ok());
        if let Ok(mut file) = file {
            assert!(file.write_all(TOKEN_LIST.as_bytes()).is_ok());
            let registry = TokenRegistry::load(file.path());
            assert!(registry.is_ok());
            if let Ok(registry) = registry {
                assert_eq!(registry.len(), 6);
                assert!(!registry.is_empty());
            }
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = TokenRegistry::load(Path::new("/nonexistent/tokens.json"));
        assert!(matches!(result, Err(PriceError::Registry { .. })));
    }
}
