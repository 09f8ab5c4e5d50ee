use crate::core::ReportLayout;
use crate::models::ScoringWeights;
use crate::services::DuplicatePolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub assignment: AssignmentSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            seed_demo_data: true,
        }
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_catalog_ttl")]
    pub catalog_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            catalog_ttl_secs: default_catalog_ttl(),
        }
    }
}

fn default_catalog_ttl() -> u64 { 60 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_prior_assignment")]
    pub prior_assignment: u32,
    #[serde(default = "default_domain_affinity")]
    pub domain_affinity: u32,
    #[serde(default = "default_skill_overlap")]
    pub skill_overlap: u32,
    #[serde(default = "default_noise_modulus")]
    pub noise_modulus: u32,
    #[serde(default = "default_urgency_critical")]
    pub urgency_critical: u32,
    #[serde(default = "default_urgency_high")]
    pub urgency_high: u32,
    #[serde(default = "default_urgency_medium")]
    pub urgency_medium: u32,
    #[serde(default = "default_urgency_default")]
    pub urgency_default: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            prior_assignment: default_prior_assignment(),
            domain_affinity: default_domain_affinity(),
            skill_overlap: default_skill_overlap(),
            noise_modulus: default_noise_modulus(),
            urgency_critical: default_urgency_critical(),
            urgency_high: default_urgency_high(),
            urgency_medium: default_urgency_medium(),
            urgency_default: default_urgency_default(),
        }
    }
}

fn default_prior_assignment() -> u32 { 90 }
fn default_domain_affinity() -> u32 { 70 }
fn default_skill_overlap() -> u32 { 60 }
fn default_noise_modulus() -> u32 { 20 }
fn default_urgency_critical() -> u32 { 15 }
fn default_urgency_high() -> u32 { 12 }
fn default_urgency_medium() -> u32 { 8 }
fn default_urgency_default() -> u32 { 5 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            prior_assignment: config.prior_assignment,
            domain_affinity: config.domain_affinity,
            skill_overlap: config.skill_overlap,
            noise_modulus: config.noise_modulus,
            urgency_critical: config.urgency_critical,
            urgency_high: config.urgency_high,
            urgency_medium: config.urgency_medium,
            urgency_default: config.urgency_default,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentSettings {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_report_title")]
    pub title: String,
    #[serde(default = "default_page_height")]
    pub page_height: u32,
    #[serde(default = "default_top_margin")]
    pub top_margin: u32,
    #[serde(default = "default_line_height")]
    pub line_height: u32,
    #[serde(default = "default_record_gap")]
    pub record_gap: u32,
    #[serde(default = "default_page_break_at")]
    pub page_break_at: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            page_height: default_page_height(),
            top_margin: default_top_margin(),
            line_height: default_line_height(),
            record_gap: default_record_gap(),
            page_break_at: default_page_break_at(),
        }
    }
}

fn default_report_title() -> String { "Volunteer History Report".to_string() }
fn default_page_height() -> u32 { 297 }
fn default_top_margin() -> u32 { 20 }
fn default_line_height() -> u32 { 10 }
fn default_record_gap() -> u32 { 10 }
fn default_page_break_at() -> u32 { 270 }

impl From<&ReportSettings> for ReportLayout {
    fn from(settings: &ReportSettings) -> Self {
        Self {
            title: settings.title.clone(),
            page_height: settings.page_height,
            top_margin: settings.top_margin,
            line_height: settings.line_height,
            record_gap: settings.record_gap,
            // A threshold past the page edge would let records overflow
            page_break_at: settings.page_break_at.min(settings.page_height),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VOLUNTEER__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VOLUNTEER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VOLUNTEER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_database_url(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VOLUNTEER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    pub fn report_layout(&self) -> ReportLayout {
        ReportLayout::from(&self.report)
    }
}

/// `DATABASE_URL` takes precedence over `database.url`
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        _ => Ok(settings),
    }
}
