use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::env;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use twap_trader::{
    utils, Config, FuturesRestClient, Side, TimeInForce, TwapExecutor, TwapPlan,
};

#[derive(Debug, Parser)]
#[command(name = "twap_trader")]
#[command(about = "Binance Futures testnet order CLI with a simple TWAP executor")]
struct Cli {
    /// Binance API key (testnet); falls back to BINANCE_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Binance API secret (testnet); falls back to BINANCE_SECRET_KEY
    #[arg(long, global = true)]
    api_secret: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Place a market order
    Market {
        #[arg(long)]
        symbol: String,
        #[arg(long, value_enum, ignore_case = true)]
        side: Side,
        #[arg(long)]
        qty: Decimal,
    },

    /// Place a limit order
    Limit {
        #[arg(long)]
        symbol: String,
        #[arg(long, value_enum, ignore_case = true)]
        side: Side,
        #[arg(long)]
        qty: Decimal,
        #[arg(long)]
        price: Decimal,
        #[arg(long, value_enum, ignore_case = true, default_value_t = TimeInForce::Gtc)]
        tif: TimeInForce,
    },

    /// Slice a parent order into market orders spread evenly over time
    Twap {
        #[arg(long)]
        symbol: String,
        #[arg(long, value_enum, ignore_case = true)]
        side: Side,
        #[arg(long)]
        total_qty: Decimal,
        #[arg(long, default_value_t = 5)]
        slices: u32,
        /// Total duration in seconds
        #[arg(long, default_value_t = 30)]
        duration: u64,
    },

    /// Get account balance info
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()?;
    utils::logger::init_from_config(&config.logging);

    let api_key = cli
        .api_key
        .or_else(|| env::var("BINANCE_API_KEY").ok())
        .ok_or_else(|| anyhow::anyhow!("missing API key: pass --api-key or set BINANCE_API_KEY"))?;
    let api_secret = cli
        .api_secret
        .or_else(|| env::var("BINANCE_SECRET_KEY").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("missing API secret: pass --api-secret or set BINANCE_SECRET_KEY")
        })?;

    let client = FuturesRestClient::new(api_key, api_secret, config.exchange.api_endpoint.clone());
    info!("Trading against {}", config.exchange.api_endpoint);

    if let Err(e) = run(cli.cmd, &client).await {
        error!("Unhandled error: {:#}", e);
        println!("Error: {:#}", e);
        // Scripted callers need a failure they can detect
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cmd: Command, client: &FuturesRestClient) -> anyhow::Result<()> {
    match cmd {
        Command::Market { symbol, side, qty } => {
            let ack = client.place_market_order(&symbol, side, qty).await?;
            println!("Result: {}", serde_json::to_string_pretty(&ack)?);
        }

        Command::Limit {
            symbol,
            side,
            qty,
            price,
            tif,
        } => {
            let ack = client
                .place_limit_order(&symbol, side, qty, price, tif)
                .await?;
            println!("Result: {}", serde_json::to_string_pretty(&ack)?);
        }

        Command::Twap {
            symbol,
            side,
            total_qty,
            slices,
            duration,
        } => {
            let plan = TwapPlan::new(&symbol, side, total_qty).with_schedule(slices, duration);

            // Ctrl-C stops the run between slices; outcomes so far are printed
            let cancel = CancellationToken::new();
            let handle = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    handle.cancel();
                }
            });

            let outcomes = TwapExecutor::new(client)
                .run_with_cancel(&plan, &cancel)
                .await?;
            println!("TWAP results: {}", serde_json::to_string_pretty(&outcomes)?);
        }

        Command::Info => {
            let balances = client.get_balances().await?;
            println!("{}", serde_json::to_string_pretty(&balances)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_twap_defaults() {
        let cli = Cli::parse_from([
            "twap_trader",
            "--api-key", "k",
            "--api-secret", "s",
            "twap",
            "--symbol", "btcusdt",
            "--side", "buy",
            "--total-qty", "10",
        ]);

        match cli.cmd {
            Command::Twap { slices, duration, side, .. } => {
                assert_eq!(slices, 5);
                assert_eq!(duration, 30);
                assert_eq!(side, Side::Buy);
            }
            other => panic!("expected twap subcommand, got {:?}", other),
        }
    }
}
