//! Configuration module for shopstream-producer.
//!
//! Handles loading configuration from an optional TOML file, environment
//! variables and CLI arguments, then validates the result into the runtime
//! types the core crate runs with.

pub mod file;

use crate::config::file::FileConfig;
use shopstream_core::config::{GeneratorConfig, LoopConfig, Profile, StreamKind, TopicRouting};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values taken from the environment or the command line.
///
/// Each one, when present, replaces the corresponding file or default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bootstrap_servers: Option<String>,
    pub client_id: Option<String>,
    pub profile: Option<Profile>,
    pub orders_topic: Option<String>,
    pub customers_topic: Option<String>,
    pub topic: Option<String>,
    pub interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub max_events: Option<u64>,
}

/// Kafka client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    pub bootstrap_servers: String,
    pub client_id: String,
    pub message_timeout: Duration,
    pub flush_timeout: Duration,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub broker: BrokerConfig,
    pub profile: Profile,
    pub routing: TopicRouting,
    pub generator: GeneratorConfig,
    pub customers: Vec<u32>,
    pub loop_config: LoopConfig,
    pub seed: Option<u64>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: Option<impl AsRef<Path>>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Apply environment and CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match &self.config_path {
            Some(path) => {
                let config_content = std::fs::read_to_string(path)?;
                toml::from_str(&config_content)?
            }
            None => FileConfig::default(),
        };
        self.resolve(file_config)
    }

    /// Apply overrides to an already parsed file and validate the result.
    pub fn resolve(&self, mut file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        self.apply_overrides(&mut file_config);
        validate(&file_config)?;
        Ok(build_loaded_config(file_config))
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        let o = &self.overrides;
        if let Some(v) = &o.bootstrap_servers {
            config.broker.bootstrap_servers = v.clone();
        }
        if let Some(v) = &o.client_id {
            config.broker.client_id = v.clone();
        }
        if let Some(v) = o.profile {
            config.producer.profile = v;
        }
        if let Some(v) = &o.orders_topic {
            config.topics.orders = v.clone();
        }
        if let Some(v) = &o.customers_topic {
            config.topics.customers = v.clone();
        }
        if let Some(v) = &o.topic {
            config.topics.shared = v.clone();
        }
        if let Some(v) = o.interval_ms {
            config.producer.interval_ms = v;
        }
        if o.seed.is_some() {
            config.producer.seed = o.seed;
        }
        if o.max_events.is_some() {
            config.producer.max_events = o.max_events;
        }
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.broker.bootstrap_servers.trim().is_empty() {
        return invalid("bootstrap servers must not be empty");
    }
    if config.broker.client_id.trim().is_empty() {
        return invalid("client id must not be empty");
    }
    if config.broker.message_timeout_ms == 0 || config.broker.flush_timeout_ms == 0 {
        return invalid("broker timeouts must be greater than zero");
    }

    match config.producer.profile {
        Profile::Split => {
            if config.topics.orders.trim().is_empty() || config.topics.customers.trim().is_empty() {
                return invalid("split profile needs both an orders and a customers topic");
            }
        }
        Profile::Shared | Profile::Events => {
            if config.topics.shared.trim().is_empty() {
                return invalid("shared and events profiles need a topic name");
            }
        }
    }

    if config.producer.interval_ms == 0 {
        return invalid("interval must be at least 1 ms");
    }
    if config.producer.max_events == Some(0) {
        return invalid("max events must be greater than zero when set");
    }
    // Samples carry no tenant or customer.
    if config.producer.profile.stream_kind() == StreamKind::Samples {
        return Ok(());
    }
    if config.producer.tenants.is_empty() {
        return invalid("at least one tenant id is required");
    }
    if config.producer.customers.is_empty() {
        return invalid("at least one customer id is required");
    }

    let mut seen = HashSet::new();
    for id in &config.producer.customers {
        if !seen.insert(id) {
            return Err(ConfigError::ValidationError(format!(
                "customer id {id} is listed twice"
            )));
        }
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    let FileConfig {
        broker,
        topics,
        producer,
    } = file_config;

    let routing = match producer.profile {
        Profile::Split => TopicRouting::Split {
            orders: topics.orders,
            customers: topics.customers,
        },
        Profile::Shared | Profile::Events => TopicRouting::Shared {
            topic: topics.shared,
        },
    };

    LoadedConfig {
        broker: BrokerConfig {
            bootstrap_servers: broker.bootstrap_servers,
            client_id: broker.client_id,
            message_timeout: Duration::from_millis(broker.message_timeout_ms),
            flush_timeout: Duration::from_millis(broker.flush_timeout_ms),
        },
        profile: producer.profile,
        routing,
        generator: GeneratorConfig::for_profile(producer.profile, producer.tenants),
        customers: producer.customers,
        loop_config: LoopConfig {
            interval: Duration::from_millis(producer.interval_ms),
            max_events: producer.max_events,
        },
        seed: producer.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(overrides: Overrides) -> ConfigLoader {
        ConfigLoader::new(None::<PathBuf>, overrides)
    }

    fn validation_message(result: Result<LoadedConfig, ConfigError>) -> String {
        match result {
            Err(ConfigError::ValidationError(msg)) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let config = loader(Overrides::default()).load().unwrap();
        assert_eq!(config.broker.bootstrap_servers, "localhost:9092");
        assert_eq!(config.broker.client_id, "event-producer");
        assert_eq!(config.profile, Profile::Split);
        assert_eq!(
            config.routing,
            TopicRouting::Split {
                orders: "orders-topic".to_string(),
                customers: "customers-topic".to_string(),
            }
        );
        assert_eq!(config.loop_config.interval, Duration::from_millis(1_000));
        assert_eq!(config.loop_config.max_events, None);
        assert_eq!(config.customers, vec![1001, 1002, 1003, 1004, 1005]);
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
[broker]
bootstrap_servers = "file:9092"

[topics]
shared = "file-topic"

[producer]
profile = "split"
interval_ms = 50
"#,
        )
        .unwrap();
        let overrides = Overrides {
            bootstrap_servers: Some("env:9092".to_string()),
            profile: Some(Profile::Shared),
            interval_ms: Some(200),
            seed: Some(9),
            max_events: Some(10),
            ..Overrides::default()
        };

        let config = loader(overrides).resolve(file).unwrap();
        assert_eq!(config.broker.bootstrap_servers, "env:9092");
        assert_eq!(config.profile, Profile::Shared);
        assert_eq!(
            config.routing,
            TopicRouting::Shared {
                topic: "file-topic".to_string(),
            }
        );
        assert_eq!(config.generator.order_kinds.len(), 4);
        assert_eq!(config.loop_config.interval, Duration::from_millis(200));
        assert_eq!(config.loop_config.max_events, Some(10));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_topic_overrides() {
        let overrides = Overrides {
            orders_topic: Some("orders".to_string()),
            customers_topic: Some("customers".to_string()),
            ..Overrides::default()
        };
        let config = loader(overrides).load().unwrap();
        assert_eq!(
            config.routing,
            TopicRouting::Split {
                orders: "orders".to_string(),
                customers: "customers".to_string(),
            }
        );
    }

    #[test]
    fn test_events_profile_uses_shared_topic() {
        let file: FileConfig = toml::from_str(
            r#"
[producer]
tenants = []
customers = []
"#,
        )
        .unwrap();
        let overrides = Overrides {
            profile: Some(Profile::Events),
            topic: Some("events".to_string()),
            ..Overrides::default()
        };
        let config = loader(overrides).resolve(file).unwrap();
        assert_eq!(config.profile, Profile::Events);
        assert_eq!(
            config.routing,
            TopicRouting::Shared {
                topic: "events".to_string(),
            }
        );
        assert_eq!(config.generator.kind, StreamKind::Samples);
    }

    #[test]
    fn test_rejects_empty_broker() {
        let overrides = Overrides {
            bootstrap_servers: Some("  ".to_string()),
            ..Overrides::default()
        };
        let msg = validation_message(loader(overrides).load());
        assert!(msg.contains("bootstrap"));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let overrides = Overrides {
            interval_ms: Some(0),
            ..Overrides::default()
        };
        let msg = validation_message(loader(overrides).load());
        assert!(msg.contains("interval"));
    }

    #[test]
    fn test_rejects_missing_shared_topic() {
        let overrides = Overrides {
            profile: Some(Profile::Shared),
            topic: Some(String::new()),
            ..Overrides::default()
        };
        let msg = validation_message(loader(overrides).load());
        assert!(msg.contains("shared"));

        let overrides = Overrides {
            profile: Some(Profile::Events),
            topic: Some(" ".to_string()),
            ..Overrides::default()
        };
        let msg = validation_message(loader(overrides).load());
        assert!(msg.contains("events"));
    }

    #[test]
    fn test_rejects_duplicate_customers() {
        let file: FileConfig = toml::from_str("[producer]\ncustomers = [1, 2, 1]\n").unwrap();
        let msg = validation_message(loader(Overrides::default()).resolve(file));
        assert!(msg.contains("listed twice"));
    }

    #[test]
    fn test_rejects_empty_populations() {
        let file: FileConfig = toml::from_str("[producer]\ntenants = []\n").unwrap();
        let msg = validation_message(loader(Overrides::default()).resolve(file));
        assert!(msg.contains("tenant"));

        let file: FileConfig = toml::from_str("[producer]\ncustomers = []\n").unwrap();
        let msg = validation_message(loader(Overrides::default()).resolve(file));
        assert!(msg.contains("customer"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let loader = ConfigLoader::new(
            Some("/nonexistent/shopstream.toml"),
            Overrides::default(),
        );
        assert!(matches!(loader.load(), Err(ConfigError::IoError(_))));
    }
}
