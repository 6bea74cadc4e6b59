//! RPC collaborators: provider management and on-chain pair queries.
//!
//! This module owns every network interaction the tool performs: creating
//! the HTTP provider, resolving a pair's pool address through the Uniswap V2
//! factory, and reading the pool's reserves. The pricing core never touches
//! the network; it consumes the [`ReserveSnapshot`] produced here.
//!
//! Contract bindings are generated with Alloy's `sol!` macro, so the call
//! signatures are validated at compile time and the returned values arrive
//! already typed; no ABI JSON files and no manual decoding.
//!
//! ## Example
//!
//! ```no_run
//! use pair_spot_price::rpc::{create_provider, fetch_reserves};
//! use pair_spot_price::error::PriceResult;
//! use alloy::primitives::address;
//!
//! # async fn example() -> PriceResult<()> {
//! let provider = create_provider("https://eth.example.org/rpc")?;
//! let pool = address!("0d4a11d5EEaaC28EC3F61d100daF4d40471f1852");
//! let snapshot = fetch_reserves(&provider, pool).await?;
//! println!("reserve0: {}", snapshot.reserve0());
//! # Ok(())
//! # }
//! ```

use crate::error::{PriceError, PriceResult};
use crate::pricing::ReserveSnapshot;
use crate::token::OrderedPair;
use alloy::primitives::{Address, U256};
use alloy::providers::{ProviderBuilder, RootProvider};
use alloy::sol;
use alloy::transports::http::{Client, Http};
use tracing::{debug, info};

// Typed bindings for the two Uniswap V2 calls this tool makes. The macro
// generates the encoding, the RPC plumbing, and the return structs.
sol! {
    #[sol(rpc)]
    interface IUniswapV2Factory {
        /// Look up the pool deployed for a token pair.
        ///
        /// Returns the zero address when no pool exists. The factory
        /// sorts the arguments itself, but callers here always pass them
        /// in canonical token0/token1 order.
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    #[sol(rpc)]
    interface IUniswapV2Pair {
        /// Read the pool's current reserves in one atomic call.
        ///
        /// `reserve0`/`reserve1` correspond to the pool's token0/token1,
        /// which the pair contract sorted by address at deployment - the
        /// same order `OrderedPair` produces.
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
}

/// Type alias for the HTTP provider used throughout the tool.
pub type Provider = RootProvider<Http<Client>>;

/// Create an Ethereum RPC provider connected via HTTP.
///
/// # Errors
///
/// Returns [`PriceError::Rpc`] if the URL does not parse.
pub fn create_provider(rpc_url: &str) -> PriceResult<Provider> {
    debug!(rpc_url, "Initializing RPC provider");

    let url = rpc_url
        .parse()
        .map_err(|e| PriceError::rpc("Failed to parse RPC URL", Some(Box::new(e))))?;

    let provider = ProviderBuilder::new().on_http(url);

    info!("RPC provider initialized");

    Ok(provider)
}

/// Resolve the pool address for an ordered token pair via the factory.
///
/// # Errors
///
/// Returns [`PriceError::Rpc`] if the call fails, or
/// [`PriceError::PairNotFound`] if the factory has no pool for the pair
/// (it returns the zero address in that case).
pub async fn pair_address(
    provider: &Provider,
    factory: Address,
    pair: &OrderedPair,
) -> PriceResult<Address> {
    let token0 = pair.token0().address();
    let token1 = pair.token1().address();
    debug!(%factory, %token0, %token1, "Querying factory for pool address");

    let contract = IUniswapV2Factory::new(factory, provider.clone());
    let result = contract
        .getPair(token0, token1)
        .call()
        .await
        .map_err(|e| PriceError::rpc("Factory getPair call failed", Some(Box::new(e))))?;

    if result.pair == Address::ZERO {
        return Err(PriceError::PairNotFound { token0, token1 });
    }

    info!(pool = %result.pair, "Resolved pool address");
    Ok(result.pair)
}

/// Fetch the pool's reserves as a single atomic read.
///
/// No retry, no caching, no reconciliation across reads: each call
/// observes one snapshot and each snapshot feeds one price computation.
///
/// # Errors
///
/// Returns [`PriceError::Rpc`] if the call fails, or
/// [`PriceError::InvalidReserve`] if the returned values do not form a
/// valid snapshot.
pub async fn fetch_reserves(provider: &Provider, pool: Address) -> PriceResult<ReserveSnapshot> {
    debug!(%pool, "Fetching pool reserves");

    let contract = IUniswapV2Pair::new(pool, provider.clone());
    let reserves = contract
        .getReserves()
        .call()
        .await
        .map_err(|e| PriceError::rpc("Pair getReserves call failed", Some(Box::new(e))))?;

    let snapshot = ReserveSnapshot::new(
        U256::from(reserves.reserve0),
        U256::from(reserves.reserve1),
        reserves.blockTimestampLast,
    )?;

    debug!(
        reserve0 = %snapshot.reserve0(),
        reserve1 = %snapshot.reserve1(),
        last_update = snapshot.block_timestamp_last(),
        "Reserves fetched"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_invalid_url() {
        let result = create_provider("not-a-valid-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_create_provider_valid_url() {
        let result = create_provider("http://localhost:8545");
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[ignore = "Requires an ETHEREUM_URL pointing at a mainnet node"]
    async fn test_pair_address_integration() {
        use crate::token::TokenDescriptor;
        use alloy::primitives::address;

        let Ok(rpc_url) = std::env::var("ETHEREUM_URL") else {
            return;
        };
        let Ok(provider) = create_provider(&rpc_url) else {
            return;
        };

        let weth = TokenDescriptor::new(
            address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            18,
            "WETH",
        );
        let usdt = TokenDescriptor::new(
            address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
            6,
            "USDT",
        );
        assert!(weth.is_ok());
        assert!(usdt.is_ok());

        if let (Ok(weth), Ok(usdt)) = (weth, usdt) {
            let pair = OrderedPair::order(weth, usdt);
            assert!(pair.is_ok());
            if let Ok(pair) = pair {
                let factory = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
                let pool = pair_address(&provider, factory, &pair).await;
                assert!(pool.is_ok());
                // The canonical WETH/USDT pool.
                if let Ok(pool) = pool {
                    assert_eq!(pool, address!("0d4a11d5EEaaC28EC3F61d100daF4d40471f1852"));
                }
            }
        }
    }

    #[tokio::test]
    #[ignore = "Requires an ETHEREUM_URL pointing at a mainnet node"]
    async fn test_fetch_reserves_integration() {
        use alloy::primitives::address;

        let Ok(rpc_url) = std::env::var("ETHEREUM_URL") else {
            return;
        };
        let Ok(provider) = create_provider(&rpc_url) else {
            return;
        };

        let pool = address!("0d4a11d5EEaaC28EC3F61d100daF4d40471f1852");
        let snapshot = fetch_reserves(&provider, pool).await;
        assert!(snapshot.is_ok());

        if let Ok(snapshot) = snapshot {
            assert!(!snapshot.reserve0().is_zero());
            assert!(!snapshot.reserve1().is_zero());
        }
    }
}
