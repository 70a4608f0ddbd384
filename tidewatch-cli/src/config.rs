//! CLI configuration

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Tidewatch server
    pub server_url: String,
}
