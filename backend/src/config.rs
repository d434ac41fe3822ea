//! Configuration management for the AgriSights field monitor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides such as `AGRI__SERVER__PORT`
//!
//! The text-generation key may also come from `GEMINI_API_KEY` or `API_KEY`.

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Coordinate, MapLayer, SATELLITE_TILE_URL, STREET_TILE_URL};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Text-generation service configuration
    pub gemini: GeminiConfig,

    /// Synthetic analysis configuration
    pub analysis: AnalysisConfig,

    /// Map surface configuration
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key; absent means interpretations are disabled
    pub api_key: Option<String>,

    /// Model used for generateContent
    pub model: String,

    /// Base URL of the Generative Language API
    pub endpoint: String,

    /// Request timeout in seconds, unlimited when unset
    pub request_timeout_secs: Option<u64>,
}

impl GeminiConfig {
    /// The key, if one is set and not blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Delay before a synthetic analysis resolves, in milliseconds
    pub simulated_latency_ms: u64,

    /// Heatmap samples per axis
    pub grid_resolution: usize,
}

impl AnalysisConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    /// Centre used when the client has no geolocation
    pub default_center: Coordinate,

    /// Initial zoom level
    pub default_zoom: u8,

    /// Imagery tiles for the satellite layer
    pub satellite_tile_url: String,

    /// Street tiles for the index layers
    pub street_tile_url: String,
}

impl MapConfig {
    /// Client geolocation if available, otherwise the configured centre
    pub fn resolve_center(&self, geolocation: Option<Coordinate>) -> Coordinate {
        geolocation.unwrap_or(self.default_center)
    }

    pub fn tile_url(&self, layer: MapLayer) -> &str {
        if layer.uses_satellite_tiles() {
            &self.satellite_tile_url
        } else {
            &self.street_tile_url
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let fallback_key = fallback_credential(|name| std::env::var(name).ok());

        let config = Self::defaults(config::Config::builder(), &environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI__ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: Config = config.try_deserialize()?;
        if loaded.gemini.credential().is_none() {
            loaded.gemini.api_key = fallback_key;
        }
        Ok(loaded)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("gemini.model", "gemini-2.5-flash")?
            .set_default(
                "gemini.endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("analysis.simulated_latency_ms", 1500)?
            .set_default("analysis.grid_resolution", 10)?
            .set_default("map.default_center.lat", 40.7128)?
            .set_default("map.default_center.lng", -74.0060)?
            .set_default("map.default_zoom", 13)?
            .set_default("map.satellite_tile_url", SATELLITE_TILE_URL)?
            .set_default("map.street_tile_url", STREET_TILE_URL)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1500,
            grid_resolution: 10,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(40.7128, -74.0060),
            default_zoom: 13,
            satellite_tile_url: SATELLITE_TILE_URL.to_string(),
            street_tile_url: STREET_TILE_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            analysis: AnalysisConfig::default(),
            map: MapConfig::default(),
        }
    }
}

/// First non-blank key among the conventional variable names
fn fallback_credential(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .into_iter()
        .filter_map(lookup)
        .find(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let built = Config::defaults(config::Config::builder(), "test")
            .unwrap()
            .build()
            .unwrap();
        let config: Config = built.try_deserialize().unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.analysis.simulated_latency(), Duration::from_millis(1500));
        assert_eq!(config.analysis.grid_resolution, 10);
        assert_eq!(config.map.default_center, Coordinate::new(40.7128, -74.0060));
        assert!(config.gemini.api_key.is_none());
        assert!(config.gemini.request_timeout().is_none());
    }

    #[test]
    fn test_blank_credential_is_absent() {
        let gemini = GeminiConfig {
            api_key: Some("   ".to_string()),
            ..GeminiConfig::default()
        };
        assert!(gemini.credential().is_none());

        let gemini = GeminiConfig {
            api_key: Some("abc".to_string()),
            ..GeminiConfig::default()
        };
        assert_eq!(gemini.credential(), Some("abc"));
    }

    #[test]
    fn test_resolve_center_falls_back() {
        let map = MapConfig::default();
        assert_eq!(map.resolve_center(None), map.default_center);

        let here = Coordinate::new(18.79, 98.98);
        assert_eq!(map.resolve_center(Some(here)), here);
    }

    #[test]
    fn test_tile_url_by_layer() {
        let map = MapConfig::default();
        assert_eq!(map.tile_url(MapLayer::Satellite), SATELLITE_TILE_URL);
        assert_eq!(map.tile_url(MapLayer::WaterIndex), STREET_TILE_URL);
    }

    #[test]
    fn test_blank_gemini_key_falls_through() {
        let key = fallback_credential(|name| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("from-api-key".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("from-api-key"));

        let key = fallback_credential(|name| (name == "GEMINI_API_KEY").then(|| "g".to_string()));
        assert_eq!(key.as_deref(), Some("g"));

        assert!(fallback_credential(|_| Some(String::new())).is_none());
    }
}
