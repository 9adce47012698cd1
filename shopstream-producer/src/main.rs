//! shopstream producer
//!
//! Publishes a synthetic stream of multi-tenant order and customer events to
//! Kafka until interrupted.

mod config;
mod publisher;
mod shutdown;

use clap::Parser;
use config::{ConfigLoader, Overrides};
use publisher::build_publisher;
use shopstream_core::config::Profile;
use shopstream_core::generator::EventGenerator;
use shopstream_core::processors::{PublisherLoop, shutdown_channel};
use shopstream_core::random::SeededRandom;
use shopstream_core::registry::CustomerRegistry;
use shutdown::install_shutdown_handler;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// shopstream - synthetic commerce event producer
#[derive(Parser, Debug)]
#[command(name = "shopstream-producer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "PRODUCER_CONFIG")]
    config: Option<PathBuf>,

    /// Kafka bootstrap servers (e.g., localhost:9092)
    #[arg(long, env = "KAFKA_BOOTSTRAP_SERVERS")]
    bootstrap_servers: Option<String>,

    /// Kafka client id
    #[arg(long, env = "KAFKA_CLIENT_ID")]
    client_id: Option<String>,

    /// Stream profile: "split" (orders and customers topics), "shared" (one topic)
    /// or "events" (counter/value samples on one topic)
    #[arg(long, env = "PRODUCER_PROFILE")]
    profile: Option<Profile>,

    /// Topic for order events in the split profile
    #[arg(long, env = "ORDERS_TOPIC")]
    orders_topic: Option<String>,

    /// Topic for customer events in the split profile
    #[arg(long, env = "CUSTOMERS_TOPIC")]
    customers_topic: Option<String>,

    /// Topic for every event in the shared and events profiles
    #[arg(long, env = "TOPIC_NAME")]
    topic: Option<String>,

    /// Pause between events, in milliseconds
    #[arg(short, long, env = "INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Seed for a reproducible stream
    #[arg(long, env = "PRODUCER_SEED")]
    seed: Option<u64>,

    /// Stop after this many events
    #[arg(long, env = "MAX_EVENTS")]
    max_events: Option<u64>,

    /// Log events instead of sending them
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    dry_run: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bootstrap_servers: self.bootstrap_servers.clone(),
            client_id: self.client_id.clone(),
            profile: self.profile,
            orders_topic: self.orders_topic.clone(),
            customers_topic: self.customers_topic.clone(),
            topic: self.topic.clone(),
            interval_ms: self.interval_ms,
            seed: self.seed,
            max_events: self.max_events,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting shopstream-producer v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(args.config.as_ref(), args.overrides());
    let config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    tracing::info!(
        profile = %config.profile,
        brokers = %config.broker.bootstrap_servers,
        topics = ?config.routing.topics(),
        interval_ms = config.loop_config.interval.as_millis() as u64,
        "Producer started"
    );

    let publisher = build_publisher(&config.broker, args.dry_run)?;

    // Ctrl+C / SIGTERM flips the shutdown channel
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = install_shutdown_handler(shutdown_tx).map_err(|e| {
        tracing::error!("Failed to install signal handlers: {}", e);
        e
    })?;

    let publisher_loop = PublisherLoop::new(
        EventGenerator::new(config.generator),
        CustomerRegistry::with_defaults(config.customers),
        SeededRandom::new(config.seed),
        publisher,
        config.routing,
        config.loop_config,
        shutdown_rx,
    );

    let result = publisher_loop.run().await;

    // The loop may have stopped on its own (event limit, failure)
    signal_handle.abort();

    let report = result.map_err(|e| {
        tracing::error!("Producer stopped with an error: {}", e);
        e
    })?;

    tracing::info!(
        generated = report.generated,
        published = report.published,
        failed = report.failed,
        "Producer shutdown complete"
    );
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,rdkafka=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_overrides() {
        let args = Args::try_parse_from([
            "shopstream-producer",
            "--profile",
            "shared",
            "--topic",
            "commerce-events",
            "--interval-ms",
            "250",
            "--max-events",
            "3",
            "--dry-run",
        ])
        .unwrap();

        assert!(args.dry_run);
        let overrides = args.overrides();
        assert_eq!(overrides.profile, Some(Profile::Shared));
        assert_eq!(overrides.topic.as_deref(), Some("commerce-events"));
        assert_eq!(overrides.interval_ms, Some(250));
        assert_eq!(overrides.max_events, Some(3));
    }

    #[test]
    fn test_events_profile_parses() {
        let args = Args::try_parse_from(["shopstream-producer", "--profile", "events"]).unwrap();
        assert_eq!(args.overrides().profile, Some(Profile::Events));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let result = Args::try_parse_from(["shopstream-producer", "--profile", "dual"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        let result = Args::try_parse_from(["shopstream-producer", "--interval-ms", "soon"]);
        assert!(result.is_err());
    }
}
