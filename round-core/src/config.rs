//! Configuration for new rounds

use crate::{bets::BetConfig, types::NineType};
use serde::{Deserialize, Serialize};

/// Round configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Defaults applied to newly created rounds
    #[serde(default)]
    pub round: RoundDefaults,

    /// Bet amounts snapshotted into new rounds
    #[serde(default)]
    pub bets: BetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "round-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            round: RoundDefaults::default(),
            bets: BetConfig::default(),
        }
    }
}

/// Defaults for new rounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundDefaults {
    /// Holes played (9 or 18)
    pub holes: u8,

    /// Nine played for 9-hole rounds
    #[serde(default)]
    pub nine_type: NineType,

    /// Default tee when a player has no selection
    #[serde(default)]
    pub default_tee: Option<String>,
}

impl Default for RoundDefaults {
    fn default() -> Self {
        Self {
            holes: 18,
            nine_type: NineType::Front,
            default_tee: None,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(holes) = std::env::var("ROUND_DEFAULT_HOLES") {
            config.round.holes = holes
                .parse()
                .map_err(|e| crate::Error::Config(format!("ROUND_DEFAULT_HOLES: {}", e)))?;
        }

        if let Ok(nine) = std::env::var("ROUND_DEFAULT_NINE") {
            config.round.nine_type = match nine.as_str() {
                "front" => NineType::Front,
                "back" => NineType::Back,
                other => {
                    return Err(crate::Error::Config(format!(
                        "ROUND_DEFAULT_NINE: unknown nine '{}'",
                        other
                    )))
                }
            };
        }

        if let Ok(tee) = std::env::var("ROUND_DEFAULT_TEE") {
            config.round.default_tee = Some(tee);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bets::BetCategory;
    use rust_decimal::Decimal;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "round-core");
        assert_eq!(config.round.holes, 18);
        assert_eq!(config.bets.amount(BetCategory::HoleWinner), Some(Decimal::from(30)));
    }

    #[test]
    fn test_config_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
service_name = "muerte-lenta"
service_version = "0.1.0"

[round]
holes = 9
nine_type = "back"
default_tee = "Blancas"

[bets]
holeWinner = 10
medal = 50
pinkies = 15
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.round.holes, 9);
        assert_eq!(config.round.nine_type, NineType::Back);
        assert_eq!(config.round.default_tee.as_deref(), Some("Blancas"));
        assert_eq!(config.bets.amount(BetCategory::Medal), Some(Decimal::from(50)));
        assert_eq!(config.bets.amount(BetCategory::Birdie), None);
        assert!(config.bets.is_penalty("pinkies"));
    }
}
