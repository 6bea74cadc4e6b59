//! Command-line interface for the pair spot-price tool.
//!
//! Resolves two token symbols against the registry, orders them, finds the
//! pool through the factory, reads one reserve snapshot, and prints both
//! directional prices.
//!
//! # Example
//!
//! ```bash
//! # Price WBTC against WETH at the default precision (15)
//! pair-spot-price -A WBTC -B WETH
//!
//! # Same pair with fewer fractional digits
//! pair-spot-price -A WBTC -B WETH --precision 6
//! ```

use crate::config::Config;
use crate::error::PriceResult;
use crate::pricing::{self, PairQuote, ReserveSnapshot, DEFAULT_PRECISION, MAX_PRECISION};
use crate::registry::TokenRegistry;
use crate::rpc::{self, create_provider};
use crate::token::OrderedPair;
use clap::Parser;
use colored::Colorize;
use tracing::info;

/// Uniswap V2 pair spot-price tool
#[derive(Parser, Debug)]
#[command(name = "pair-spot-price")]
#[command(about = "Compute both directional spot prices of a Uniswap V2 pair", long_about = None)]
#[command(version)]
struct Cli {
    /// Symbol of the first ERC20 token (e.g. WBTC)
    #[arg(short = 'A', long)]
    token_a: String,

    /// Symbol of the second ERC20 token (e.g. WETH)
    #[arg(short = 'B', long)]
    token_b: String,

    /// Number of fractional digits carried through the price division
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRECISION,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PRECISION)),
    )]
    precision: u32,
}

/// Parse CLI arguments and run the price query.
///
/// # Errors
///
/// Returns an error if configuration loading, token resolution, any RPC
/// call, or the price computation fails. The caller maps the error to the
/// process exit status.
pub async fn run() -> PriceResult<()> {
    let cli = Cli::parse();
    run_price_query(&cli.token_a, &cli.token_b, cli.precision).await
}

/// Execute the full resolve-order-fetch-normalize pipeline.
async fn run_price_query(symbol_a: &str, symbol_b: &str, precision: u32) -> PriceResult<()> {
    info!(symbol_a, symbol_b, precision, "Starting price query");

    // Configuration and registry
    let config = Config::from_env()?;
    let registry = TokenRegistry::load(config.tokens_file())?;

    // Resolve both symbols on the configured chain
    let token_a = registry.resolve(symbol_a, config.chain_id())?;
    let token_b = registry.resolve(symbol_b, config.chain_id())?;

    // Canonical ordering fixes which reserve belongs to which token
    let pair = OrderedPair::order(token_a, token_b)?;

    // On-chain collaborators: pool lookup, then one atomic reserve read
    let provider = create_provider(config.rpc_url())?;
    let pool = rpc::pair_address(&provider, config.factory_address(), &pair).await?;

    println!(
        "{}-{} Pair Pool Address: {}",
        pair.token0().symbol().bold(),
        pair.token1().symbol().bold(),
        pool.to_string().cyan()
    );

    let snapshot = rpc::fetch_reserves(&provider, pool).await?;

    // Both directions derived independently through the integer pipeline
    let quote = pricing::quote_pair(&snapshot, &pair, precision)?;

    print_quote(&pair, &snapshot, &quote);

    Ok(())
}

/// Display both directional prices and the snapshot they came from.
fn print_quote(pair: &OrderedPair, snapshot: &ReserveSnapshot, quote: &PairQuote) {
    let sym0 = pair.token0().symbol();
    let sym1 = pair.token1().symbol();

    println!(
        "1 {} = {} {}",
        sym0.bold(),
        quote.forward.to_string().green().bold(),
        sym1.bold()
    );
    println!(
        "1 {} = {} {}",
        sym1.bold(),
        quote.inverse.to_string().green().bold(),
        sym0.bold()
    );
    println!(
        "{} reserve0: {} | reserve1: {} | last update: {}",
        "📊".cyan(),
        snapshot.reserve0().to_string().blue(),
        snapshot.reserve1().to_string().magenta(),
        format_last_update(snapshot.block_timestamp_last()).dimmed()
    );
}

/// Render the pool's last-update timestamp as UTC, or the raw value if it
/// is out of chrono's range.
fn format_last_update(timestamp: u32) -> String {
    chrono::DateTime::from_timestamp(i64::from(timestamp), 0).map_or_else(
        || timestamp.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_mandatory_symbols() {
        let args = vec!["pair-spot-price", "-A", "WBTC", "-B", "WETH"];
        let cli = Cli::try_parse_from(args);
        assert!(cli.is_ok());

        if let Ok(cli) = cli {
            assert_eq!(cli.token_a, "WBTC");
            assert_eq!(cli.token_b, "WETH");
            assert_eq!(cli.precision, DEFAULT_PRECISION);
        }
    }

    #[test]
    fn test_cli_parsing_missing_symbol_fails() {
        let args = vec!["pair-spot-price", "-A", "WBTC"];
        let cli = Cli::try_parse_from(args);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parsing_long_options() {
        let args = vec![
            "pair-spot-price",
            "--token-a",
            "USDC",
            "--token-b",
            "WETH",
            "--precision",
            "6",
        ];
        let cli = Cli::try_parse_from(args);
        assert!(cli.is_ok());

        if let Ok(cli) = cli {
            assert_eq!(cli.precision, 6);
        }
    }

    #[test]
    fn test_cli_rejects_zero_precision() {
        let args = vec!["pair-spot-price", "-A", "WBTC", "-B", "WETH", "-p", "0"];
        let cli = Cli::try_parse_from(args);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_rejects_excessive_precision() {
        let args = vec!["pair-spot-price", "-A", "WBTC", "-B", "WETH", "-p", "99"];
        let cli = Cli::try_parse_from(args);
        assert!(cli.is_err());
    }

    #[test]
    fn test_format_last_update() {
        // 2021-01-01 00:00:00 UTC
        assert_eq!(format_last_update(1_609_459_200), "2021-01-01 00:00:00 UTC");
    }
}
