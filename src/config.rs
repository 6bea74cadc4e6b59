//! Configuration management for the pair spot-price tool.
//!
//! Loads and validates runtime configuration from environment variables
//! using `dotenvy`. The chain identifier and factory contract address are
//! deliberately configuration, not module constants: the same binary prices
//! pairs against any Uniswap V2-compatible factory on any chain.
//!
//! ## Environment Variables
//!
//! Required:
//! - `ETHEREUM_URL`: HTTP(S) JSON-RPC endpoint of an Ethereum node
//!
//! Optional (with defaults):
//! - `CHAIN_ID`: Chain to scope token resolution to (default: 1, mainnet)
//! - `FACTORY_ADDRESS`: Uniswap V2 factory contract (default: the canonical
//!   mainnet deployment)
//! - `TOKENS_FILE`: Path to the JSON token list (default: "./data/tokens.json")
//!
//! ## Example
//!
//! ```no_run
//! use pair_spot_price::config::Config;
//! use pair_spot_price::error::PriceResult;
//!
//! # fn main() -> PriceResult<()> {
//! let config = Config::from_env()?;
//! println!("RPC URL: {}", config.rpc_url());
//! # Ok(())
//! # }
//! ```

use crate::error::{PriceError, PriceResult};
use alloy::primitives::{address, Address};
use std::env;
use std::path::PathBuf;

/// Canonical Uniswap V2 factory deployment on Ethereum mainnet.
const DEFAULT_FACTORY: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint
    rpc_url: String,

    /// Chain identifier used to scope token resolution
    chain_id: u64,

    /// Uniswap V2 factory contract address
    factory_address: Address,

    /// Path to the JSON token list
    tokens_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if one is present, then reads and
    /// validates each variable, applying defaults for the optional ones.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Config`] if:
    /// - `ETHEREUM_URL` is missing or empty
    /// - `CHAIN_ID` is not a valid integer
    /// - `FACTORY_ADDRESS` is not a valid 20-byte hex address
    pub fn from_env() -> PriceResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        // Required: RPC endpoint
        let rpc_url = env::var("ETHEREUM_URL").map_err(|e| {
            PriceError::config(
                "ETHEREUM_URL environment variable is required",
                Some(Box::new(e)),
            )
        })?;

        if rpc_url.is_empty() {
            return Err(PriceError::config(
                "ETHEREUM_URL must be set to a JSON-RPC endpoint",
                None,
            ));
        }

        // Optional: chain id (default: 1, Ethereum mainnet)
        let chain_id = env::var("CHAIN_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u64>()
            .map_err(|e| {
                PriceError::config("CHAIN_ID must be a valid integer", Some(Box::new(e)))
            })?;

        // Optional: factory address (default: canonical mainnet factory)
        let factory_address = match env::var("FACTORY_ADDRESS") {
            Ok(raw) => raw.parse::<Address>().map_err(|e| {
                PriceError::config(
                    format!("FACTORY_ADDRESS is not a valid address: {raw}"),
                    Some(Box::new(e)),
                )
            })?,
            Err(_) => DEFAULT_FACTORY,
        };

        if factory_address == Address::ZERO {
            return Err(PriceError::config(
                "FACTORY_ADDRESS must not be the zero address",
                None,
            ));
        }

        // Optional: token list path
        let tokens_file = env::var("TOKENS_FILE")
            .unwrap_or_else(|_| "./data/tokens.json".to_string())
            .into();

        Ok(Self {
            rpc_url,
            chain_id,
            factory_address,
            tokens_file,
        })
    }

    /// Get the Ethereum RPC URL.
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Get the chain identifier token resolution is scoped to.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the Uniswap V2 factory contract address.
    #[must_use]
    pub const fn factory_address(&self) -> Address {
        self.factory_address
    }

    /// Get the token list path.
    #[must_use]
    pub const fn tokens_file(&self) -> &PathBuf {
        &self.tokens_file
    }
}
