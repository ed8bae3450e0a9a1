// Remote source configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Default endpoints
// ============================================================================

/// GO release ontology in OBO format (basic version, no cross-ontology links)
pub const DEFAULT_GO_ONTOLOGY_URL: &str = "http://purl.obolibrary.org/obo/go/go-basic.obo";

/// GOA per-organism GAF directory; `{DIR}/goa_{name}.gaf.gz` lives below it
pub const DEFAULT_GOA_BASE_URL: &str = "https://ftp.ebi.ac.uk/pub/databases/GO/goa";

/// UniChem page listing the source databases as an HTML table
pub const DEFAULT_UNICHEM_SOURCES_URL: &str = "https://www.ebi.ac.uk/unichem/ucquery/listSources";

/// UniChem whole-source mapping directory
pub const DEFAULT_UNICHEM_MAPPING_URL: &str =
    "https://ftp.ebi.ac.uk/pub/databases/chembl/UniChem/data/wholeSourceMapping";

/// Configuration for all remote downloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// GO ontology (OBO) URL
    pub go_ontology_url: String,

    /// Base URL for GOA annotation files
    pub goa_base_url: String,

    /// UniChem sources page URL
    pub unichem_sources_url: String,

    /// Base URL for UniChem mapping tables
    pub unichem_mapping_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Maximum attempts for a failed download
    pub max_retries: u32,

    /// Download cache directory (None = no caching)
    pub cache_dir: Option<PathBuf>,

    /// Cache entries older than this are downloaded again (None = never expire)
    pub cache_max_age_days: Option<i64>,

    /// Draw progress bars for downloads
    pub show_progress: bool,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            go_ontology_url: DEFAULT_GO_ONTOLOGY_URL.to_string(),
            goa_base_url: DEFAULT_GOA_BASE_URL.to_string(),
            unichem_sources_url: DEFAULT_UNICHEM_SOURCES_URL.to_string(),
            unichem_mapping_url: DEFAULT_UNICHEM_MAPPING_URL.to_string(),
            timeout_secs: 600, // GOA files for large organisms take a while
            max_retries: 3,
            cache_dir: default_cache_dir(),
            cache_max_age_days: Some(30),
            show_progress: true,
            user_agent: format!("goxref/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// `<platform cache dir>/goxref`, if the platform has one
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("goxref"))
}

impl SourceConfig {
    pub fn builder() -> SourceConfigBuilder {
        SourceConfigBuilder::default()
    }

    /// URL of the GOA GAF file for an organism's GOA short name
    ///
    /// `"human"` -> `{goa_base_url}/HUMAN/goa_human.gaf.gz`
    pub fn goa_organism_url(&self, goa_name: &str) -> String {
        format!(
            "{}/{}/goa_{}.gaf.gz",
            self.goa_base_url.trim_end_matches('/'),
            goa_name.to_uppercase(),
            goa_name
        )
    }

    /// URL of the UniChem mapping between two numeric source ids
    pub fn unichem_mapping_table_url(&self, src_id: &str, target_src_id: &str) -> String {
        format!(
            "{}/src_id{}/src{}src{}.txt.gz",
            self.unichem_mapping_url.trim_end_matches('/'),
            src_id,
            src_id,
            target_src_id
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let urls = [
            ("GO ontology URL", &self.go_ontology_url),
            ("GOA base URL", &self.goa_base_url),
            ("UniChem sources URL", &self.unichem_sources_url),
            ("UniChem mapping URL", &self.unichem_mapping_url),
        ];

        for (label, url) in urls {
            if url.is_empty() {
                return Err(format!("{} cannot be empty", label));
            }
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_retries == 0 {
            return Err("At least one download attempt is required".to_string());
        }

        if matches!(self.cache_max_age_days, Some(days) if days < 0) {
            return Err("Cache max age cannot be negative".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for SourceConfig
#[derive(Debug, Default)]
pub struct SourceConfigBuilder {
    go_ontology_url: Option<String>,
    goa_base_url: Option<String>,
    unichem_sources_url: Option<String>,
    unichem_mapping_url: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    cache_dir: Option<Option<PathBuf>>,
    cache_max_age_days: Option<Option<i64>>,
    show_progress: Option<bool>,
}

impl SourceConfigBuilder {
    pub fn go_ontology_url(mut self, url: impl Into<String>) -> Self {
        self.go_ontology_url = Some(url.into());
        self
    }

    pub fn goa_base_url(mut self, url: impl Into<String>) -> Self {
        self.goa_base_url = Some(url.into());
        self
    }

    pub fn unichem_sources_url(mut self, url: impl Into<String>) -> Self {
        self.unichem_sources_url = Some(url.into());
        self
    }

    pub fn unichem_mapping_url(mut self, url: impl Into<String>) -> Self {
        self.unichem_mapping_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(Some(dir.into()));
        self
    }

    pub fn no_cache(mut self) -> Self {
        self.cache_dir = Some(None);
        self
    }

    pub fn cache_max_age_days(mut self, days: Option<i64>) -> Self {
        self.cache_max_age_days = Some(days);
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = Some(show);
        self
    }

    pub fn build(self) -> SourceConfig {
        let default = SourceConfig::default();

        SourceConfig {
            go_ontology_url: self.go_ontology_url.unwrap_or(default.go_ontology_url),
            goa_base_url: self.goa_base_url.unwrap_or(default.goa_base_url),
            unichem_sources_url: self
                .unichem_sources_url
                .unwrap_or(default.unichem_sources_url),
            unichem_mapping_url: self
                .unichem_mapping_url
                .unwrap_or(default.unichem_mapping_url),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            max_retries: self.max_retries.unwrap_or(default.max_retries),
            cache_dir: self.cache_dir.unwrap_or(default.cache_dir),
            cache_max_age_days: self
                .cache_max_age_days
                .unwrap_or(default.cache_max_age_days),
            show_progress: self.show_progress.unwrap_or(default.show_progress),
            user_agent: default.user_agent,
        }
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl SourceConfig {
    /// Quick, quiet, uncached configuration for tests against mock servers
    pub fn test_config() -> Self {
        SourceConfig {
            timeout_secs: 10,
            max_retries: 1,
            cache_dir: None,
            show_progress: false,
            ..SourceConfig::default()
        }
    }

    /// Default endpoints without a download cache
    pub fn no_cache() -> Self {
        SourceConfig {
            cache_dir: None,
            ..SourceConfig::default()
        }
    }
}

// ============================================================================
// Environment Variable Support
// ============================================================================

impl SourceConfig {
    /// Load configuration from environment variables over the defaults
    ///
    /// - `GOXREF_GO_ONTOLOGY_URL`, `GOXREF_GOA_BASE_URL`
    /// - `GOXREF_UNICHEM_SOURCES_URL`, `GOXREF_UNICHEM_MAPPING_URL`
    /// - `GOXREF_TIMEOUT_SECS`, `GOXREF_MAX_RETRIES`
    /// - `GOXREF_CACHE_DIR`, `GOXREF_NO_CACHE`, `GOXREF_CACHE_MAX_AGE_DAYS`
    pub fn from_env() -> Self {
        let default = SourceConfig::default();

        let cache_dir = if env_flag("GOXREF_NO_CACHE") {
            None
        } else {
            std::env::var("GOXREF_CACHE_DIR")
                .ok()
                .map(PathBuf::from)
                .or(default.cache_dir)
        };

        SourceConfig {
            go_ontology_url: std::env::var("GOXREF_GO_ONTOLOGY_URL")
                .unwrap_or(default.go_ontology_url),
            goa_base_url: std::env::var("GOXREF_GOA_BASE_URL").unwrap_or(default.goa_base_url),
            unichem_sources_url: std::env::var("GOXREF_UNICHEM_SOURCES_URL")
                .unwrap_or(default.unichem_sources_url),
            unichem_mapping_url: std::env::var("GOXREF_UNICHEM_MAPPING_URL")
                .unwrap_or(default.unichem_mapping_url),
            timeout_secs: std::env::var("GOXREF_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            max_retries: std::env::var("GOXREF_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.max_retries),
            cache_dir,
            cache_max_age_days: std::env::var("GOXREF_CACHE_MAX_AGE_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(default.cache_max_age_days),
            show_progress: default.show_progress,
            user_agent: default.user_agent,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.go_ontology_url, DEFAULT_GO_ONTOLOGY_URL);
        assert_eq!(config.timeout_secs, 600);
        assert_eq!(config.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_goa_organism_url() {
        let config = SourceConfig::default();
        assert_eq!(
            config.goa_organism_url("human"),
            "https://ftp.ebi.ac.uk/pub/databases/GO/goa/HUMAN/goa_human.gaf.gz"
        );
    }

    #[test]
    fn test_unichem_mapping_table_url() {
        let config = SourceConfig::builder()
            .unichem_mapping_url("http://localhost:1234/mapping/")
            .build();
        assert_eq!(
            config.unichem_mapping_table_url("1", "2"),
            "http://localhost:1234/mapping/src_id1/src1src2.txt.gz"
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = SourceConfig::builder()
            .timeout_secs(30)
            .max_retries(5)
            .cache_dir("/tmp/goxref-cache")
            .show_progress(false)
            .build();

        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/goxref-cache")));
        assert!(!config.show_progress);

        let uncached = SourceConfig::builder().no_cache().build();
        assert!(uncached.cache_dir.is_none());
    }

    #[test]
    fn test_validate() {
        let mut config = SourceConfig::test_config();
        assert!(config.validate().is_ok());

        config.unichem_sources_url = String::new();
        assert!(config.validate().is_err());

        let mut config = SourceConfig::test_config();
        config.max_retries = 0;
        assert!(config.validate().is_err());

        let mut config = SourceConfig::test_config();
        config.cache_max_age_days = Some(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        let test = SourceConfig::test_config();
        assert!(test.cache_dir.is_none());
        assert!(!test.show_progress);
        assert_eq!(test.max_retries, 1);

        assert!(SourceConfig::no_cache().cache_dir.is_none());
    }
}
