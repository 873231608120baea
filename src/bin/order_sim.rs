//! order-sim CLI: place orders against the mock venue, list and clear the log.
//!
//! Commands:
//! - `place` — validate and place a MARKET, LIMIT, STOP_LIMIT, STOP_MARKET or OCO order
//! - `list` — print standalone orders and OCO groups
//! - `clear` — delete every order from the log

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use order_sim_rs::Decimal;
use order_sim_rs::execution::{
    MockConfig, MockExchangeConnector, OrderRouter, Placement, RouterConfig,
};
use order_sim_rs::persistence::{DEFAULT_STORE_PATH, JsonFileRepository, OrderRepository};
use order_sim_rs::report::{group_orders, render_report};

#[derive(Parser)]
#[command(name = "order-sim", about = "Local order-placement simulator")]
struct Cli {
    /// Order log file.
    #[arg(long, env = "ORDER_SIM_STORE", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Simulated fill latency per order, in milliseconds.
    #[arg(long, env = "ORDER_SIM_LATENCY_MS", default_value_t = 1000)]
    latency_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a new order.
    Place {
        /// Symbol, e.g. BTCUSDT.
        symbol: String,

        /// buy or sell.
        side: String,

        /// MARKET, LIMIT, STOP_LIMIT, STOP_MARKET or OCO.
        order_type: String,

        /// Order quantity.
        quantity: Decimal,

        /// Limit price (LIMIT, STOP_LIMIT) or take-profit price (OCO).
        #[arg(long)]
        price: Option<Decimal>,

        /// Trigger price (STOP_LIMIT, STOP_MARKET, OCO).
        #[arg(long)]
        stop_price: Option<Decimal>,

        /// Limit price after trigger (OCO).
        #[arg(long)]
        stop_limit_price: Option<Decimal>,
    },
    /// Show every order in the log.
    List,
    /// Delete every order in the log.
    Clear {
        /// Confirm deletion.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let repo: Arc<dyn OrderRepository> = Arc::new(
        JsonFileRepository::load(&cli.store)
            .await
            .with_context(|| format!("failed to open order log {}", cli.store.display()))?,
    );

    match cli.command {
        Commands::Place {
            symbol,
            side,
            order_type,
            quantity,
            price,
            stop_price,
            stop_limit_price,
        } => {
            let config =
                MockConfig::default().with_fill_latency(Duration::from_millis(cli.latency_ms));
            let venue = MockExchangeConnector::new(config, Arc::clone(&repo)).await?;
            let mut router = OrderRouter::new(RouterConfig::default(), Arc::new(venue));

            match router
                .place_order_raw(
                    &symbol,
                    &side,
                    &order_type,
                    quantity,
                    price,
                    stop_price,
                    stop_limit_price,
                )
                .await
            {
                Ok(Placement::Single(order)) => {
                    println!("Order executed:\n{}", serde_json::to_string_pretty(&order)?);
                }
                Ok(Placement::Oco(pair)) => {
                    println!("OCO order executed (group {}):", pair.group_id);
                    for (idx, leg) in [&pair.take_profit, &pair.stop_loss].iter().enumerate() {
                        println!(" - Leg {}: {}", idx + 1, serde_json::to_string(leg)?);
                    }
                }
                Err(e) => {
                    println!("Order failed: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::List => {
            let orders = repo.all().await?;
            if orders.is_empty() {
                println!("No orders placed yet.");
            } else {
                println!("Total Orders: {}", orders.len());
                print!("{}", render_report(&group_orders(&orders)));
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                println!("Cancelled. Pass --yes to delete all orders.");
                return Ok(ExitCode::FAILURE);
            }
            repo.clear().await?;
            println!("All orders have been cleared.");
        }
    }

    Ok(ExitCode::SUCCESS)
}
