//! Error types for the found-pet bot.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("Failed to fetch file {file_id} on channel {name}: {reason}")]
    FetchFailed {
        name: String,
        file_id: String,
        reason: String,
    },

    #[error("Channel {name} does not support {operation}")]
    Unsupported { name: String, operation: String },

    #[error("Invalid message format: {0}")]
    InvalidMessage(String),
}

/// Local persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Photo download failed: {0}")]
    Download(#[from] ChannelError),
}

/// Publication errors.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Report has no photos to publish")]
    NoPhotos,

    #[error("Channel post failed: {0}")]
    Channel(#[from] ChannelError),

    #[error("Report could not be delivered to any of {attempted} admins")]
    AllAdminsFailed { attempted: usize },
}
