//! Token identity and canonical pair ordering.
//!
//! A [`TokenDescriptor`] carries the identity and decimal scale of one asset.
//! Two descriptors are sorted into a deterministic (token0, token1) order by
//! [`OrderedPair::order`], matching the convention Uniswap V2 contracts use
//! internally: the token with the lexicographically smaller address is
//! token0. Because every contract sorts the same way, the reserve0/reserve1
//! values returned by a pool correspond unambiguously to token0/token1.
//!
//! # Example
//!
//! ```
//! use alloy::primitives::address;
//! use pair_spot_price::token::{OrderedPair, TokenDescriptor};
//!
//! let weth = TokenDescriptor::new(
//!     address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
//!     18,
//!     "WETH",
//! )
//! .unwrap();
//! let usdt = TokenDescriptor::new(
//!     address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
//!     6,
//!     "USDT",
//! )
//! .unwrap();
//!
//! let pair = OrderedPair::order(weth, usdt).unwrap();
//! assert_eq!(pair.token0().symbol(), "WETH");
//! ```

use crate::error::{PriceError, PriceResult};
use alloy::primitives::Address;

/// Maximum decimals any ERC-20 token uses in practice.
///
/// Values above 18 indicate a broken contract or corrupt registry data and
/// are rejected at construction rather than deep inside the arithmetic.
pub const MAX_DECIMALS: u8 = 18;

/// Identity and decimal scale of one asset.
///
/// Immutable once constructed; read-only input to the pricing core. The
/// address is only ever byte-compared (for ordering) or displayed, never
/// interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    address: Address,
    decimals: u8,
    symbol: String,
}

impl TokenDescriptor {
    /// Create a new token descriptor, validating the decimal scale.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidDecimals`] if `decimals` exceeds
    /// [`MAX_DECIMALS`].
    pub fn new(address: Address, decimals: u8, symbol: impl Into<String>) -> PriceResult<Self> {
        let symbol = symbol.into();
        if decimals > MAX_DECIMALS {
            return Err(PriceError::InvalidDecimals { symbol, decimals });
        }
        Ok(Self {
            address,
            decimals,
            symbol,
        })
    }

    /// The token's 20-byte contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Number of decimals in the token's native base-unit representation.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Display symbol. Unique only jointly with a chain identifier.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// A token pair sorted into the canonical on-chain order.
///
/// `token0` always holds the lexicographically smaller address. The ordering
/// is a strict total order on distinct addresses, so it is deterministic and
/// symmetric: `order(a, b)` and `order(b, a)` produce the same pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedPair {
    token0: TokenDescriptor,
    token1: TokenDescriptor,
}

impl OrderedPair {
    /// Sort two tokens into canonical (token0, token1) order by address.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidPair`] if:
    /// - both descriptors carry the same address (a token paired with
    ///   itself has no defined ordering and no pool)
    /// - either address is the zero address (a malformed descriptor)
    pub fn order(a: TokenDescriptor, b: TokenDescriptor) -> PriceResult<Self> {
        if a.address() == Address::ZERO || b.address() == Address::ZERO {
            return Err(PriceError::invalid_pair(format!(
                "token '{}' has the zero address",
                if a.address() == Address::ZERO {
                    a.symbol()
                } else {
                    b.symbol()
                }
            )));
        }
        if a.address() == b.address() {
            return Err(PriceError::invalid_pair(format!(
                "'{}' and '{}' share address {}; a token cannot be paired with itself",
                a.symbol(),
                b.symbol(),
                a.address()
            )));
        }

        let (token0, token1) = if a.address() < b.address() {
            (a, b)
        } else {
            (b, a)
        };
        Ok(Self { token0, token1 })
    }

    /// The lower-addressed token of the pair.
    #[must_use]
    pub const fn token0(&self) -> &TokenDescriptor {
        &self.token0
    }

    /// The higher-addressed token of the pair.
    #[must_use]
    pub const fn token1(&self) -> &TokenDescriptor {
        &self.token1
    }
}
