//! # Pair Spot-Price
//!
//! Spot-price computation for Uniswap V2 pairs with exact wide-integer
//! arithmetic, built on [Alloy](https://github.com/alloy-rs/alloy).
//!
//! Given two token symbols, the tool resolves them against a JSON token
//! list, sorts them into the canonical on-chain order, looks up the pool
//! through the factory contract, reads one reserve snapshot, and derives
//! both directional prices without ever passing the value through a float.
//!
//! ## Architecture
//!
//! The crate is organized into a pure core and thin collaborator layers:
//!
//! 1. **Core** ([`token`], [`pricing`]) - pair ordering and the
//!    normalization arithmetic; pure, synchronous, no I/O
//! 2. **Config Layer** ([`config`]) - environment variable loading
//! 3. **Registry Layer** ([`registry`]) - symbol resolution from a token list
//! 4. **RPC Layer** ([`rpc`]) - factory lookup and reserve fetching
//! 5. **CLI Layer** ([`cli`]) - argument parsing, orchestration, display
//!
//! The core never blocks and shares no mutable state: pricing many pairs
//! concurrently needs no coordination.
//!
//! ## Quick Start
//!
//! ```bash
//! # .env: ETHEREUM_URL=https://your-node/rpc
//! cargo run --release -- -A WBTC -B WETH
//! ```
//!
//! ### Using as a Library
//!
//! ```
//! use alloy::primitives::{address, U256};
//! use pair_spot_price::pricing::{quote_pair, ReserveSnapshot};
//! use pair_spot_price::token::{OrderedPair, TokenDescriptor};
//!
//! # fn main() -> pair_spot_price::error::PriceResult<()> {
//! let wbtc = TokenDescriptor::new(
//!     address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"), 8, "WBTC")?;
//! let weth = TokenDescriptor::new(
//!     address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), 18, "WETH")?;
//! let pair = OrderedPair::order(wbtc, weth)?;
//!
//! let snapshot = ReserveSnapshot::new(
//!     U256::from(100_000_000_u64),                       // 1.0 WBTC
//!     U256::from(20_000_000_000_000_000_000_u128),       // 20.0 WETH
//!     0,
//! )?;
//!
//! let quote = quote_pair(&snapshot, &pair, 15)?;
//! println!("1 WBTC = {} WETH", quote.forward);
//! println!("1 WETH = {} WBTC", quote.inverse);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`error::PriceResult<T>`](error::PriceResult);
//! every violated precondition surfaces as a typed [`error::PriceError`]
//! variant and nothing is ever substituted with a default price.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod pricing;
pub mod registry;
pub mod rpc;
pub mod token;
