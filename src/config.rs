//! Configuration types.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default photo cap per report.
pub const DEFAULT_MAX_PHOTOS: usize = 5;

/// Telegram albums hold at most ten items.
pub const MAX_PHOTOS_LIMIT: usize = 10;

/// Settings the wizard itself needs.
#[derive(Debug, Clone)]
pub struct WizardSettings {
    /// Maximum number of photos accepted per report.
    pub max_photos: usize,
    /// Comment inputs (case-insensitive) that mean "no comment".
    pub no_comment_words: Vec<String>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            max_photos: DEFAULT_MAX_PHOTOS,
            no_comment_words: vec!["no".to_string(), "нет".to_string()],
        }
    }
}

/// Where confirmed reports go.
#[derive(Debug, Clone, Default)]
pub struct PublishConfig {
    /// Channel that receives the public post.
    pub channel_id: Option<String>,
    /// Admin chats used when no channel is configured.
    pub admin_ids: Vec<String>,
    /// Chat notified about every saved report.
    pub notification_chat_id: Option<String>,
}

/// Full bot configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token. `None` runs the bot on the CLI channel.
    pub bot_token: Option<SecretString>,
    pub wizard: WizardSettings,
    pub publish: PublishConfig,
    /// Root directory for saved reports.
    pub data_dir: PathBuf,
}

impl BotConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = non_empty("TELEGRAM_BOT_TOKEN")
            .or_else(|| non_empty("BOT_TOKEN"))
            .map(SecretString::from);

        let max_photos = match non_empty("MAX_PHOTOS") {
            Some(raw) => {
                let value: usize =
                    raw.trim()
                        .parse()
                        .map_err(|e| ConfigError::InvalidValue {
                            key: "MAX_PHOTOS".into(),
                            message: format!("{e}"),
                        })?;
                if value == 0 || value > MAX_PHOTOS_LIMIT {
                    return Err(ConfigError::InvalidValue {
                        key: "MAX_PHOTOS".into(),
                        message: format!("must be between 1 and {MAX_PHOTOS_LIMIT}, got {value}"),
                    });
                }
                value
            }
            None => DEFAULT_MAX_PHOTOS,
        };

        let no_comment_words = match non_empty("NO_COMMENT_WORDS") {
            Some(raw) => split_list(&raw),
            None => WizardSettings::default().no_comment_words,
        };

        let admin_ids = non_empty("ADMIN_IDS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();
        for id in &admin_ids {
            if id.parse::<i64>().is_err() {
                return Err(ConfigError::InvalidValue {
                    key: "ADMIN_IDS".into(),
                    message: format!("'{id}' is not a numeric chat id"),
                });
            }
        }

        let data_dir = non_empty("PET_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/pets"));

        Ok(Self {
            bot_token,
            wizard: WizardSettings {
                max_photos,
                no_comment_words,
            },
            publish: PublishConfig {
                channel_id: non_empty("CHANNEL_ID").map(|s| s.trim().to_string()),
                admin_ids,
                notification_chat_id: non_empty("NOTIFICATION_CHAT_ID")
                    .map(|s| s.trim().to_string()),
            },
            data_dir,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
