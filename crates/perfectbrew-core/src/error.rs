use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("knowledge base file not found: {0}")]
    KnowledgeBaseNotFound(std::path::PathBuf),

    #[error("knowledge base parse error: {0}")]
    KnowledgeBase(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
