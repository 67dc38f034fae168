use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
    #[serde(default = "default_csv_filename")]
    pub csv_filename: String,
    #[serde(default)]
    pub json_dump: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    #[serde(default = "default_page_load_wait")]
    pub page_load_wait_secs: u64,

    #[serde(default = "default_pre_scrape_pause")]
    pub pre_scrape_pause_secs: u64,

    #[serde(default = "default_scroll_pause")]
    pub scroll_pause_secs: u64,

    #[serde(default = "default_reflow_pause")]
    pub reflow_pause_secs: u64,

    #[serde(default = "default_click_wait_timeout")]
    pub click_wait_timeout_secs: u64,

    #[serde(default = "default_presence_wait_timeout")]
    pub presence_wait_timeout_secs: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_millis: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

// Default implementations
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            csv_filename: default_csv_filename(),
            json_dump: false,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            window_width: default_window_width(),
            window_height: default_window_height(),
            page_load_wait_secs: default_page_load_wait(),
            pre_scrape_pause_secs: default_pre_scrape_pause(),
            scroll_pause_secs: default_scroll_pause(),
            reflow_pause_secs: default_reflow_pause(),
            click_wait_timeout_secs: default_click_wait_timeout(),
            presence_wait_timeout_secs: default_presence_wait_timeout(),
            poll_interval_millis: default_poll_interval(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::InvalidValue("base_url cannot be empty".to_string()).into());
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "base_url must start with http(s): {}",
                self.base_url
            ))
            .into());
        }
        Url::parse(&self.base_url).map_err(|e| {
            ConfigError::InvalidValue(format!("base_url is not a valid URL: {}", e))
        })?;

        Url::parse(&self.browser.webdriver_url).map_err(|e| {
            ConfigError::InvalidValue(format!("webdriver_url is not a valid URL: {}", e))
        })?;

        if self.output.directory.is_empty() {
            return Err(
                ConfigError::InvalidValue("output directory cannot be empty".to_string()).into(),
            );
        }

        if self.output.csv_filename.is_empty() {
            return Err(
                ConfigError::InvalidValue("csv_filename cannot be empty".to_string()).into(),
            );
        }

        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(ConfigError::InvalidValue(
                "window dimensions must be greater than 0".to_string(),
            )
            .into());
        }

        if self.browser.click_wait_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "click_wait_timeout_secs must be greater than 0".to_string(),
            )
            .into());
        }

        if self.browser.presence_wait_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "presence_wait_timeout_secs must be greater than 0".to_string(),
            )
            .into());
        }

        if self.browser.poll_interval_millis == 0 {
            return Err(ConfigError::InvalidValue(
                "poll_interval_millis must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://www.ohhlala.shop/page-shop".to_string()
}

fn default_output_directory() -> String {
    "ohhlala_products".to_string()
}

fn default_csv_filename() -> String {
    "products.csv".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_page_load_wait() -> u64 {
    5
}

fn default_pre_scrape_pause() -> u64 {
    2
}

fn default_scroll_pause() -> u64 {
    1
}

fn default_reflow_pause() -> u64 {
    3
}

fn default_click_wait_timeout() -> u64 {
    10
}

fn default_presence_wait_timeout() -> u64 {
    5
}

fn default_poll_interval() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "scraper.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.base_url, "https://www.ohhlala.shop/page-shop");
        assert_eq!(config.output.directory, "ohhlala_products");
        assert_eq!(config.output.csv_filename, "products.csv");
        assert!(!config.output.json_dump);
        assert!(!config.browser.headless);
        assert_eq!(config.browser.window_width, 1920);
        assert_eq!(config.browser.window_height, 1080);
        assert_eq!(config.browser.click_wait_timeout_secs, 10);
        assert_eq!(config.browser.presence_wait_timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            base_url = "https://example.com/shop"

            [browser]
            headless = true
            click_wait_timeout_secs = 3

            [output]
            directory = "out"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://example.com/shop");
        assert!(config.browser.headless);
        assert_eq!(config.browser.click_wait_timeout_secs, 3);
        assert_eq!(config.output.directory, "out");
        // Untouched fields keep their defaults.
        assert_eq!(config.browser.presence_wait_timeout_secs, 5);
        assert_eq!(config.output.csv_filename, "products.csv");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config: Config = toml::from_str(r#"base_url = "ftp://example.com""#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config: Config = toml::from_str(
            r#"
            [browser]
            click_wait_timeout_secs = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str(
            r#"
            [browser]
            poll_interval_millis = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
