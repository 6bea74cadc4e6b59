//! Reserve normalization and spot-price arithmetic.
//!
//! This module converts a raw [`ReserveSnapshot`] plus the two tokens'
//! decimal scales into directional prices using exact integer arithmetic.
//! The whole pipeline runs in a single wide integer type ([`U512`]) with
//! checked operations; nothing is converted to a floating type until the
//! optional display step.
//!
//! # Price derivation
//!
//! Raw reserves are expressed in each token's native base units
//! (`amount * 10^decimals`). To compare one base-unit quantity against the
//! other as a human-scale ratio, each side is rescaled by the *other*
//! token's decimal count, cancelling the decimals out of the result:
//!
//! ```text
//! forward (token0 priced in token1):
//!     numerator   = reserve1 * 10^decimals0
//!     denominator = reserve0 * 10^decimals1
//!     scaled      = (10^precision * numerator) / denominator
//! ```
//!
//! The multiply-before-divide ordering is load-bearing: dividing first in
//! integer arithmetic would truncate away every fractional digit before the
//! precision scaling is applied.
//!
//! The inverse price (token1 priced in token0) is derived independently
//! with numerator and denominator swapped, through the same integer
//! pipeline. Taking the floating reciprocal of the forward value would
//! compound the rounding already applied to it.
//!
//! # Example
//!
//! ```
//! use alloy::primitives::{address, U256};
//! use pair_spot_price::pricing::{quote_pair, ReserveSnapshot};
//! use pair_spot_price::token::{OrderedPair, TokenDescriptor};
//!
//! // A BTC-like 8-decimal token0 against an ETH-like 18-decimal token1.
//! let token0 = TokenDescriptor::new(
//!     address!("0000000000000000000000000000000000000001"), 8, "WBTC").unwrap();
//! let token1 = TokenDescriptor::new(
//!     address!("0000000000000000000000000000000000000002"), 18, "WETH").unwrap();
//! let pair = OrderedPair::order(token0, token1).unwrap();
//!
//! // 1.0 token0 and 20.0 token1 in the pool: 1 token0 = 20 token1.
//! let snapshot = ReserveSnapshot::new(
//!     U256::from(100_000_000_u64),
//!     U256::from(20_000_000_000_000_000_000_u128),
//!     0,
//! )
//! .unwrap();
//!
//! let quote = quote_pair(&snapshot, &pair, 15).unwrap();
//! assert_eq!(quote.forward.to_string(), "20.000000000000000");
//! assert_eq!(quote.inverse.to_string(), "0.050000000000000");
//! ```

use crate::error::{PriceError, PriceResult, ReserveSide};
use crate::token::OrderedPair;
use alloy::primitives::{U256, U512};
use std::fmt;

/// Largest reserve value a Uniswap V2 pool can hold: `2^112 - 1`.
///
/// Reserves live in uint112 storage fields on-chain; anything larger in a
/// snapshot is malformed collaborator data.
pub const MAX_RESERVE: U256 = U256::from_limbs([u64::MAX, 0xFFFF_FFFF_FFFF, 0, 0]);

/// Default number of fractional digits carried through the division.
pub const DEFAULT_PRECISION: u32 = 15;

/// Upper bound on the precision parameter accepted at the CLI boundary.
///
/// Keeps the `10^p` scale factor comfortably inside the checked U512
/// pipeline for any representable reserve pair.
pub const MAX_PRECISION: u32 = 38;

/// Two raw pool balances observed in a single atomic read.
///
/// `reserve0`/`reserve1` are in native on-chain base units (no decimal
/// scaling applied) and correspond to token0/token1 under the same
/// [`OrderedPair`] used to derive the pool address. One immutable snapshot
/// feeds one price computation; snapshots are never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSnapshot {
    reserve0: U256,
    reserve1: U256,
    block_timestamp_last: u32,
}

impl ReserveSnapshot {
    /// Construct a snapshot, validating both reserves fit the on-chain
    /// uint112 domain.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidReserve`] if either reserve exceeds
    /// [`MAX_RESERVE`].
    pub fn new(reserve0: U256, reserve1: U256, block_timestamp_last: u32) -> PriceResult<Self> {
        if reserve0 > MAX_RESERVE {
            return Err(PriceError::invalid_reserve(format!(
                "reserve0 {reserve0} exceeds the uint112 maximum"
            )));
        }
        if reserve1 > MAX_RESERVE {
            return Err(PriceError::invalid_reserve(format!(
                "reserve1 {reserve1} exceeds the uint112 maximum"
            )));
        }
        Ok(Self {
            reserve0,
            reserve1,
            block_timestamp_last,
        })
    }

    /// Raw balance of token0, in token0 base units.
    #[must_use]
    pub const fn reserve0(&self) -> U256 {
        self.reserve0
    }

    /// Raw balance of token1, in token1 base units.
    #[must_use]
    pub const fn reserve1(&self) -> U256 {
        self.reserve1
    }

    /// Timestamp of the pool's last reserve update, carried through from
    /// the source. Not used by the price computation.
    #[must_use]
    pub const fn block_timestamp_last(&self) -> u32 {
        self.block_timestamp_last
    }
}

/// An exact rational price held as `scaled / 10^precision`.
///
/// "1 unit of the base token = price units of the quote token". The value
/// stays in integer form; [`fmt::Display`] renders the exact decimal string
/// and [`NormalizedPrice::approx`] offers a lossy float for hosts that want
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedPrice {
    scaled: U512,
    precision: u32,
}

impl NormalizedPrice {
    /// The integer price numerator, scaled by `10^precision`.
    #[must_use]
    pub const fn scaled(&self) -> U512 {
        self.scaled
    }

    /// Number of fractional digits the scaled value carries.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Lossy floating-point rendition, for display convenience only.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Math`] if the scaled value does not fit in a
    /// `u128` (a price far outside any realistic market range).
    pub fn approx(&self) -> PriceResult<f64> {
        let scaled = u128::try_from(self.scaled)
            .map_err(|_| PriceError::math("scaled price too large for float conversion"))?;
        let exponent = i32::try_from(self.precision)
            .map_err(|_| PriceError::math("precision out of range for float conversion"))?;
        #[allow(clippy::cast_precision_loss)]
        Ok(scaled as f64 / 10_f64.powi(exponent))
    }
}

impl fmt::Display for NormalizedPrice {
    /// Exact decimal rendering: integer part, a dot, then exactly
    /// `precision` fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 10^precision existed during construction, so this cannot fail.
        let Some(base) = pow10(self.precision) else {
            return Err(fmt::Error);
        };
        let integer = self.scaled / base;
        let fraction = (self.scaled % base).to_string();
        let width = self.precision as usize;
        write!(f, "{integer}.{fraction:0>width$}")
    }
}

/// Both directional prices derived from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairQuote {
    /// token0 priced in token1.
    pub forward: NormalizedPrice,
    /// token1 priced in token0, independently derived.
    pub inverse: NormalizedPrice,
}

/// `10^exp` as a U512, or `None` on overflow.
fn pow10(exp: u32) -> Option<U512> {
    U512::from(10_u64).checked_pow(U512::from(exp))
}

/// Shared integer pipeline for both price directions.
///
/// `numerator_reserve` is rescaled by the *other* token's decimals
/// (`numerator_scale`), and symmetrically for the denominator, cancelling
/// the decimal conventions out of the ratio.
#[allow(clippy::similar_names)]
fn scaled_ratio(
    numerator_reserve: U256,
    numerator_scale: u8,
    numerator_side: ReserveSide,
    denominator_reserve: U256,
    denominator_scale: u8,
    denominator_side: ReserveSide,
    precision: u32,
) -> PriceResult<NormalizedPrice> {
    if precision == 0 {
        return Err(PriceError::math("precision must be at least 1"));
    }
    if denominator_reserve.is_zero() {
        return Err(PriceError::ZeroReserve {
            side: denominator_side,
        });
    }
    // A zero numerator must also fail: an empty pool has no defined price
    // in either direction, and returning 0 would hide that.
    if numerator_reserve.is_zero() {
        return Err(PriceError::ZeroReserve {
            side: numerator_side,
        });
    }

    let overflow = |what: &str| PriceError::math(format!("overflow computing {what}"));

    let numerator = U512::from(numerator_reserve)
        .checked_mul(pow10(u32::from(numerator_scale)).ok_or_else(|| overflow("10^decimals"))?)
        .ok_or_else(|| overflow("price numerator"))?;
    let denominator = U512::from(denominator_reserve)
        .checked_mul(pow10(u32::from(denominator_scale)).ok_or_else(|| overflow("10^decimals"))?)
        .ok_or_else(|| overflow("price denominator"))?;

    // Multiply by 10^p before dividing: integer division first would
    // truncate every fractional digit to zero.
    let scaled = pow10(precision)
        .ok_or_else(|| overflow("10^precision"))?
        .checked_mul(numerator)
        .ok_or_else(|| overflow("scaled numerator"))?
        .checked_div(denominator)
        .ok_or_else(|| overflow("price quotient"))?;

    Ok(NormalizedPrice { scaled, precision })
}

/// Price of one unit of token0, expressed in token1.
///
/// # Errors
///
/// Returns [`PriceError::ZeroReserve`] if either reserve is zero (the
/// price of an empty pool is undefined, never 0), or [`PriceError::Math`]
/// if the precision is zero or an intermediate overflows.
pub fn forward_price(
    snapshot: &ReserveSnapshot,
    pair: &OrderedPair,
    precision: u32,
) -> PriceResult<NormalizedPrice> {
    scaled_ratio(
        snapshot.reserve1(),
        pair.token0().decimals(),
        ReserveSide::Token1,
        snapshot.reserve0(),
        pair.token1().decimals(),
        ReserveSide::Token0,
        precision,
    )
}

/// Price of one unit of token1, expressed in token0.
///
/// Derived independently from the swapped integer ratio, never as the
/// reciprocal of the forward value.
///
/// # Errors
///
/// Returns [`PriceError::ZeroReserve`] if either reserve is zero, or
/// [`PriceError::Math`] if the precision is zero or an intermediate
/// overflows.
pub fn inverse_price(
    snapshot: &ReserveSnapshot,
    pair: &OrderedPair,
    precision: u32,
) -> PriceResult<NormalizedPrice> {
    scaled_ratio(
        snapshot.reserve0(),
        pair.token1().decimals(),
        ReserveSide::Token0,
        snapshot.reserve1(),
        pair.token0().decimals(),
        ReserveSide::Token1,
        precision,
    )
}

/// Compute both directional prices from a single snapshot.
///
/// # Errors
///
/// Fails with [`PriceError::ZeroReserve`] if either reserve is zero, since
/// one of the two directions is then undefined.
pub fn quote_pair(
    snapshot: &ReserveSnapshot,
    pair: &OrderedPair,
    precision: u32,
) -> PriceResult<PairQuote> {
    Ok(PairQuote {
        forward: forward_price(snapshot, pair, precision)?,
        inverse: inverse_price(snapshot, pair, precision)?,
    })
}
