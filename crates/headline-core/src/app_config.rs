use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the TEI server hosting the sentence encoder.
    pub embedding_url: String,
    /// Model name or local path the TEI server is expected to serve.
    pub embedding_model: String,
    /// Inputs per `/embed` call.
    pub embed_batch_size: usize,
    /// Linear SVM artifact exported as JSON.
    pub classifier_path: PathBuf,
}
