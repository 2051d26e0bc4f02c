//! CLI channel — stdin/stdout REPL for local testing.
//!
//! Input lines map onto event kinds:
//! - `/start`, `/cancel` → command
//! - `#category:dog` → button press with that action
//! - `@55.75,37.62` → geo point
//! - `+photo <path>` → photo upload (the path is read when the report is saved)
//! - anything else → free text

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::channels::{Channel, EventKind, IncomingEvent, MessageStream, Outbound, RemoteFile};
use crate::error::ChannelError;

const CLI_USER: &str = "local-user";

/// A simple CLI channel that reads from stdin and writes to stdout.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();
            let callbacks = AtomicU64::new(0);

            eprint!("> ");

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Some(kind) = parse_line(&line, &callbacks) else {
                            eprint!("> ");
                            continue;
                        };
                        let event = IncomingEvent::new("cli", CLI_USER, CLI_USER, kind)
                            .with_username(CLI_USER);
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn deliver(&self, _chat_id: &str, outbound: Outbound) -> Result<(), ChannelError> {
        println!("\n{}\n", render(&outbound));
        eprint!("> ");
        Ok(())
    }

    async fn acknowledge(&self, _callback_id: &str, alert: Option<&str>) -> Result<(), ChannelError> {
        if let Some(line) = alert_line(alert) {
            println!("\n{line}\n");
            eprint!("> ");
        }
        Ok(())
    }

    /// Photo ids on the CLI are local file paths.
    async fn fetch_file(&self, file_id: &str) -> Result<RemoteFile, ChannelError> {
        let bytes = tokio::fs::read(file_id)
            .await
            .map_err(|e| ChannelError::FetchFailed {
                name: "cli".into(),
                file_id: file_id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(RemoteFile {
            path: file_id.to_string(),
            bytes,
        })
    }
}

/// Parse one input line into an event kind. Blank lines yield `None`.
fn parse_line(line: &str, callbacks: &AtomicU64) -> Option<EventKind> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(action) = line.strip_prefix('#') {
        let n = callbacks.fetch_add(1, Ordering::Relaxed);
        return Some(EventKind::Button {
            data: action.trim().to_string(),
            callback_id: format!("cli-{n}"),
            message_id: None,
        });
    }

    if let Some(rest) = line.strip_prefix("+photo") {
        let file_id = rest.trim();
        if !file_id.is_empty() {
            return Some(EventKind::Photo {
                file_id: file_id.to_string(),
                file_unique_id: file_id.to_string(),
            });
        }
    }

    if let Some((lat, lon)) = line.strip_prefix('@').and_then(|c| c.split_once(',')) {
        if let (Ok(latitude), Ok(longitude)) = (lat.trim().parse(), lon.trim().parse()) {
            return Some(EventKind::Location {
                latitude,
                longitude,
            });
        }
    }

    if let Some(rest) = line.strip_prefix('/') {
        let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
        if !name.is_empty() {
            return Some(EventKind::Command {
                name: name.to_lowercase(),
                args: args.trim().to_string(),
            });
        }
    }

    Some(EventKind::Text(line.to_string()))
}

/// Button alerts are popups on Telegram; print them inline.
fn alert_line(alert: Option<&str>) -> Option<String> {
    alert.map(|text| format!("[alert] {text}"))
}

fn render(outbound: &Outbound) -> String {
    match outbound {
        Outbound::Text(message) => {
            let mut out = message.text.clone();
            if let Some(ref keyboard) = message.keyboard {
                for row in keyboard {
                    let buttons: Vec<String> = row
                        .iter()
                        .map(|b| format!("[{} → #{}]", b.label, b.action))
                        .collect();
                    out.push('\n');
                    out.push_str(&buttons.join(" "));
                }
            }
            out
        }
        Outbound::Photo(photo) => format!(
            "🖼 {}{}",
            photo.file_id,
            photo
                .caption
                .as_deref()
                .map(|c| format!("\n{c}"))
                .unwrap_or_default()
        ),
        Outbound::Album(photos) => {
            let mut out = format!("🖼 album of {}:", photos.len());
            for photo in photos {
                out.push_str(&format!("\n  {}", photo.file_id));
                if let Some(ref caption) = photo.caption {
                    out.push_str(&format!("\n{caption}"));
                }
            }
            out
        }
    }
}
