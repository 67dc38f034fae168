use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Scraping error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to build browser session: {0}")]
    BuildError(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Script execution failed: {0}")]
    ScriptError(String),

    #[error("Timed out after {timeout_secs}s waiting for {selector}")]
    WaitTimeout { selector: String, timeout_secs: u64 },
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Failed to read page snapshot: {0}")]
    EmptySnapshot(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
