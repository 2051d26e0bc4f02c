//! Telegram channel — long-polls the Bot API for updates.
//!
//! Speaks the Bot API directly over reqwest: messages and callback queries
//! come in through `getUpdates`, replies go out as `sendMessage`,
//! `editMessageText`, `sendPhoto` and `sendMediaGroup`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::channels::{
    Channel, EventKind, IncomingEvent, Keyboard, MessageStream, Outbound, OutgoingPhoto,
    RemoteFile, TextFormat, TextMessage,
};
use crate::error::ChannelError;

/// Maximum message length for Telegram's sendMessage API.
pub const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Maximum caption length for photos.
const TELEGRAM_MAX_CAPTION_LENGTH: usize = 1024;

const API_BASE: &str = "https://api.telegram.org";

/// Telegram channel — connects to the Bot API via long-polling.
pub struct TelegramChannel {
    bot_token: SecretString,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: SecretString) -> Self {
        Self {
            bot_token,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{API_BASE}/bot{}/{method}", self.bot_token.expose_secret())
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{API_BASE}/file/bot{}/{file_path}",
            self.bot_token.expose_secret()
        )
    }

    /// POST a Bot API method and return its `result` field.
    async fn call(&self, method: &str, body: &Value) -> Result<Value, ChannelError> {
        let resp = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| send_failed(format!("{method}: {e}")))?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .map_err(|e| send_failed(format!("{method}: invalid response: {e}")))?;

        if !status.is_success() || data.get("ok").and_then(Value::as_bool) != Some(true) {
            let description = data
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("no description");
            return Err(send_failed(format!(
                "{method} failed ({status}): {description}"
            )));
        }

        Ok(data.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Send a text message, splitting long text into several messages.
    /// The keyboard is attached to the last chunk.
    async fn send_text(&self, chat_id: &str, message: &TextMessage) -> Result<(), ChannelError> {
        let chunks = split_message(&message.text, TELEGRAM_MAX_MESSAGE_LENGTH);
        let last = chunks.len().saturating_sub(1);

        for (i, chunk) in chunks.iter().enumerate() {
            let keyboard = if i == last {
                message.keyboard.as_ref()
            } else {
                None
            };
            self.send_text_chunk(chat_id, chunk, keyboard, message.format)
                .await?;
        }
        Ok(())
    }

    /// Send a single chunk; HTML is retried as plain text if the API rejects it.
    async fn send_text_chunk(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<&Keyboard>,
        format: TextFormat,
    ) -> Result<(), ChannelError> {
        let body = text_body(chat_id, text, keyboard, format);
        match self.call("sendMessage", &body).await {
            Ok(_) => Ok(()),
            Err(e) if format == TextFormat::Html => {
                tracing::warn!(
                    chat_id,
                    error = %e,
                    "Telegram sendMessage with HTML failed; retrying without parse_mode"
                );
                let plain = text_body(chat_id, text, keyboard, TextFormat::Plain);
                self.call("sendMessage", &plain).await.map(|_| ())
            }
            Err(e) => Err(e),
        }
    }

    /// Edit a message in place, falling back to a new message on failure.
    async fn edit_text(
        &self,
        chat_id: &str,
        message_id: i64,
        message: &TextMessage,
    ) -> Result<(), ChannelError> {
        if message.text.chars().count() <= TELEGRAM_MAX_MESSAGE_LENGTH {
            let mut body = text_body(chat_id, &message.text, message.keyboard.as_ref(), message.format);
            body["message_id"] = Value::from(message_id);
            match self.call("editMessageText", &body).await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        chat_id,
                        message_id,
                        error = %e,
                        "Telegram editMessageText failed; sending a new message"
                    );
                }
            }
        }
        self.send_text(chat_id, message).await
    }

    async fn send_photo(&self, chat_id: &str, photo: &OutgoingPhoto) -> Result<(), ChannelError> {
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "photo": photo.file_id,
        });
        if let Some(ref caption) = photo.caption {
            body["caption"] = Value::String(truncate_caption(caption));
        }
        self.call("sendPhoto", &body).await?;
        tracing::info!(chat_id, "Telegram photo sent");
        Ok(())
    }

    async fn send_media_group(
        &self,
        chat_id: &str,
        photos: &[OutgoingPhoto],
    ) -> Result<(), ChannelError> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "media": media_group(photos),
        });
        self.call("sendMediaGroup", &body).await?;
        tracing::info!(chat_id, count = photos.len(), "Telegram media group sent");
        Ok(())
    }
}

// ── Channel trait implementation ────────────────────────────────────

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        // Drop whatever piled up while the bot was offline.
        self.call(
            "deleteWebhook",
            &serde_json::json!({ "drop_pending_updates": true }),
        )
        .await
        .map_err(|e| ChannelError::StartupFailed {
            name: "telegram".into(),
            reason: e.to_string(),
        })?;

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let url = self.api_url("getUpdates");
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut offset: i64 = 0;

            tracing::info!("Telegram channel listening for updates...");

            loop {
                let body = serde_json::json!({
                    "offset": offset,
                    "timeout": 30,
                    "allowed_updates": ["message", "callback_query"]
                });

                let resp = match client.post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("Telegram poll error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                let data: Value = match resp.json().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Telegram parse error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                let results = match poll_results(&data) {
                    Ok(results) => results,
                    Err(reason) => {
                        tracing::warn!("Telegram getUpdates rejected: {reason}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                for update in results {
                    if let Some(uid) = update.get("update_id").and_then(Value::as_i64) {
                        offset = uid + 1;
                    }

                    let Some(event) = parse_update(update) else {
                        tracing::debug!("Telegram: skipping update without usable payload");
                        continue;
                    };

                    if tx.send(event).is_err() {
                        tracing::info!("Telegram listener channel closed");
                        return;
                    }
                }
            }
        });

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn deliver(&self, chat_id: &str, outbound: Outbound) -> Result<(), ChannelError> {
        match outbound {
            Outbound::Text(message) => match message.edit_message_id {
                Some(message_id) => self.edit_text(chat_id, message_id, &message).await,
                None => self.send_text(chat_id, &message).await,
            },
            Outbound::Photo(photo) => self.send_photo(chat_id, &photo).await,
            Outbound::Album(photos) => match photos.len() {
                0 => Err(ChannelError::InvalidMessage("empty media group".into())),
                1 => self.send_photo(chat_id, &photos[0]).await,
                _ => self.send_media_group(chat_id, &photos).await,
            },
        }
    }

    async fn acknowledge(&self, callback_id: &str, alert: Option<&str>) -> Result<(), ChannelError> {
        let mut body = serde_json::json!({ "callback_query_id": callback_id });
        if let Some(text) = alert {
            body["text"] = Value::String(text.to_string());
            body["show_alert"] = Value::Bool(true);
        }
        self.call("answerCallbackQuery", &body).await.map(|_| ())
    }

    async fn fetch_file(&self, file_id: &str) -> Result<RemoteFile, ChannelError> {
        let fetch_failed = |reason: String| ChannelError::FetchFailed {
            name: "telegram".into(),
            file_id: file_id.to_string(),
            reason,
        };

        let info = self
            .call("getFile", &serde_json::json!({ "file_id": file_id }))
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;
        let path = info
            .get("file_path")
            .and_then(Value::as_str)
            .ok_or_else(|| fetch_failed("getFile returned no file_path".into()))?
            .to_string();

        let resp = self
            .client
            .get(self.file_url(&path))
            .send()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(fetch_failed(format!("download returned {}", resp.status())));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?
            .to_vec();

        tracing::debug!(file_id, path = %path, size = bytes.len(), "Telegram file downloaded");
        Ok(RemoteFile { path, bytes })
    }

    async fn health_check(&self) -> Result<(), ChannelError> {
        self.call("getMe", &serde_json::json!({}))
            .await
            .map(|_| ())
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        tracing::info!("Telegram channel shutting down");
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn send_failed(reason: String) -> ChannelError {
    ChannelError::SendFailed {
        name: "telegram".into(),
        reason,
    }
}

/// Convert a Bot API update into an inbound event.
/// Updates from a `getUpdates` response, or why there are none.
fn poll_results(data: &Value) -> Result<&Vec<Value>, String> {
    if data.get("ok").and_then(Value::as_bool) != Some(true) {
        return Err(data
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string());
    }
    data.get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| "response has no result list".to_string())
}

fn parse_update(update: &Value) -> Option<IncomingEvent> {
    if let Some(query) = update.get("callback_query") {
        return parse_callback_query(query);
    }
    parse_message(update.get("message")?)
}

fn parse_message(message: &Value) -> Option<IncomingEvent> {
    let from = message.get("from")?;
    let user_id = from.get("id").and_then(Value::as_i64)?;
    let chat_id = message
        .get("chat")
        .and_then(|c| c.get("id"))
        .and_then(Value::as_i64)?;

    let kind = if let Some(text) = message.get("text").and_then(Value::as_str) {
        parse_text(text)
    } else if let Some(location) = message.get("location") {
        EventKind::Location {
            latitude: location.get("latitude").and_then(Value::as_f64)?,
            longitude: location.get("longitude").and_then(Value::as_f64)?,
        }
    } else if let Some(sizes) = message.get("photo").and_then(Value::as_array) {
        // Sizes are ordered smallest first.
        let largest = sizes.last()?;
        EventKind::Photo {
            file_id: largest.get("file_id").and_then(Value::as_str)?.to_string(),
            file_unique_id: largest
                .get("file_unique_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    } else {
        return None;
    };

    Some(with_username(
        IncomingEvent::new("telegram", user_id.to_string(), chat_id.to_string(), kind),
        from,
    ))
}

fn parse_callback_query(query: &Value) -> Option<IncomingEvent> {
    let from = query.get("from")?;
    let user_id = from.get("id").and_then(Value::as_i64)?;
    let callback_id = query.get("id").and_then(Value::as_str)?.to_string();
    let data = query.get("data").and_then(Value::as_str)?.to_string();
    let message = query.get("message");
    let chat_id = message
        .and_then(|m| m.get("chat"))
        .and_then(|c| c.get("id"))
        .and_then(Value::as_i64)
        .unwrap_or(user_id);
    let message_id = message
        .and_then(|m| m.get("message_id"))
        .and_then(Value::as_i64);

    Some(with_username(
        IncomingEvent::new(
            "telegram",
            user_id.to_string(),
            chat_id.to_string(),
            EventKind::Button {
                data,
                callback_id,
                message_id,
            },
        ),
        from,
    ))
}

fn with_username(event: IncomingEvent, from: &Value) -> IncomingEvent {
    match from.get("username").and_then(Value::as_str) {
        Some(username) if !username.is_empty() => event.with_username(username),
        _ => event,
    }
}

/// `/start@my_bot arg` → command "start" with args "arg"; anything else is text.
fn parse_text(text: &str) -> EventKind {
    let Some(rest) = text.strip_prefix('/') else {
        return EventKind::Text(text.to_string());
    };
    let (head, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let name = head.split('@').next().unwrap_or(head);
    if name.is_empty() {
        return EventKind::Text(text.to_string());
    }
    EventKind::Command {
        name: name.to_lowercase(),
        args: args.trim().to_string(),
    }
}

fn keyboard_markup(keyboard: &Keyboard) -> Value {
    let rows: Vec<Value> = keyboard
        .iter()
        .map(|row| {
            Value::Array(
                row.iter()
                    .map(|b| serde_json::json!({ "text": b.label, "callback_data": b.action }))
                    .collect(),
            )
        })
        .collect();
    serde_json::json!({ "inline_keyboard": rows })
}

fn text_body(chat_id: &str, text: &str, keyboard: Option<&Keyboard>, format: TextFormat) -> Value {
    let mut body = serde_json::json!({
        "chat_id": chat_id,
        "text": text,
    });
    if format == TextFormat::Html {
        body["parse_mode"] = Value::String("HTML".into());
    }
    if let Some(keyboard) = keyboard {
        body["reply_markup"] = keyboard_markup(keyboard);
    }
    body
}

fn media_group(photos: &[OutgoingPhoto]) -> Value {
    Value::Array(
        photos
            .iter()
            .map(|p| {
                let mut item = serde_json::json!({ "type": "photo", "media": p.file_id });
                if let Some(ref caption) = p.caption {
                    item["caption"] = Value::String(truncate_caption(caption));
                }
                item
            })
            .collect(),
    )
}

fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= TELEGRAM_MAX_CAPTION_LENGTH {
        return caption.to_string();
    }
    let mut truncated: String = caption
        .chars()
        .take(TELEGRAM_MAX_CAPTION_LENGTH - 1)
        .collect();
    truncated.push('…');
    truncated
}

/// Split a message into chunks that fit Telegram's character limit.
/// Tries to split on newlines, then spaces, then hard-cuts.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.chars().count() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        // Byte offset of the max_len-th char keeps the cut on a char boundary.
        let limit = remaining
            .char_indices()
            .nth(max_len)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        let chunk = &remaining[..limit];
        let split_at = chunk
            .rfind('\n')
            .or_else(|| chunk.rfind(' '))
            .unwrap_or(limit);

        // Don't split at position 0 (infinite loop guard)
        let split_at = if split_at == 0 { limit } else { split_at };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::Button;

    fn channel() -> TelegramChannel {
        TelegramChannel::new(SecretString::from("123:ABC"))
    }

    // ── URLs ────────────────────────────────────────────────────────

    #[test]
    fn telegram_channel_name() {
        assert_eq!(channel().name(), "telegram");
    }

    #[test]
    fn telegram_api_url() {
        assert_eq!(
            channel().api_url("getMe"),
            "https://api.telegram.org/bot123:ABC/getMe"
        );
    }

    #[test]
    fn telegram_file_url() {
        assert_eq!(
            channel().file_url("photos/file_1.jpg"),
            "https://api.telegram.org/file/bot123:ABC/photos/file_1.jpg"
        );
    }

    // ── Polling ─────────────────────────────────────────────────────

    #[test]
    fn poll_results_lists_updates() {
        let data = serde_json::json!({ "ok": true, "result": [{ "update_id": 1 }] });
        assert_eq!(poll_results(&data).unwrap().len(), 1);
    }

    #[test]
    fn poll_results_rejects_error_responses() {
        let conflict = serde_json::json!({
            "ok": false,
            "error_code": 409,
            "description": "Conflict: terminated by other getUpdates request"
        });
        assert!(poll_results(&conflict).unwrap_err().starts_with("Conflict"));

        let bare = serde_json::json!({ "ok": false });
        assert_eq!(poll_results(&bare).unwrap_err(), "unknown error");

        let no_result = serde_json::json!({ "ok": true });
        assert!(poll_results(&no_result).is_err());
    }

    // ── Update parsing ──────────────────────────────────────────────

    #[test]
    fn parses_start_command() {
        let update = serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "from": {"id": 42, "username": "alice"},
                "chat": {"id": 100},
                "text": "/start"
            }
        });
        let event = parse_update(&update).unwrap();
        assert_eq!(event.user_id, "42");
        assert_eq!(event.chat_id, "100");
        assert_eq!(event.username.as_deref(), Some("alice"));
        assert_eq!(
            event.kind,
            EventKind::Command {
                name: "start".into(),
                args: String::new()
            }
        );
    }

    #[test]
    fn command_strips_bot_mention_and_keeps_args() {
        assert_eq!(
            parse_text("/Cancel@pet_bot now please"),
            EventKind::Command {
                name: "cancel".into(),
                args: "now please".into()
            }
        );
    }

    #[test]
    fn lone_slash_is_text() {
        assert_eq!(parse_text("/"), EventKind::Text("/".into()));
    }

    #[test]
    fn parses_plain_text_without_username() {
        let update = serde_json::json!({
            "message": {
                "from": {"id": 7},
                "chat": {"id": 7},
                "text": "Main St 1"
            }
        });
        let event = parse_update(&update).unwrap();
        assert!(event.username.is_none());
        assert_eq!(event.kind, EventKind::Text("Main St 1".into()));
    }

    #[test]
    fn parses_location() {
        let update = serde_json::json!({
            "message": {
                "from": {"id": 7},
                "chat": {"id": 7},
                "location": {"latitude": 55.75, "longitude": 37.62}
            }
        });
        let event = parse_update(&update).unwrap();
        assert_eq!(
            event.kind,
            EventKind::Location {
                latitude: 55.75,
                longitude: 37.62
            }
        );
    }

    #[test]
    fn photo_uses_largest_size() {
        let update = serde_json::json!({
            "message": {
                "from": {"id": 7},
                "chat": {"id": 7},
                "photo": [
                    {"file_id": "small", "file_unique_id": "s"},
                    {"file_id": "large", "file_unique_id": "l"}
                ]
            }
        });
        let event = parse_update(&update).unwrap();
        assert_eq!(
            event.kind,
            EventKind::Photo {
                file_id: "large".into(),
                file_unique_id: "l".into()
            }
        );
    }

    #[test]
    fn parses_callback_query() {
        let update = serde_json::json!({
            "callback_query": {
                "id": "cb-9",
                "from": {"id": 42, "username": "alice"},
                "message": {"message_id": 55, "chat": {"id": 100}},
                "data": "category:dog"
            }
        });
        let event = parse_update(&update).unwrap();
        assert_eq!(event.chat_id, "100");
        assert_eq!(
            event.kind,
            EventKind::Button {
                data: "category:dog".into(),
                callback_id: "cb-9".into(),
                message_id: Some(55)
            }
        );
    }

    #[test]
    fn skips_unsupported_messages() {
        let sticker = serde_json::json!({
            "message": {"from": {"id": 1}, "chat": {"id": 1}, "sticker": {}}
        });
        assert!(parse_update(&sticker).is_none());

        let edited = serde_json::json!({ "edited_message": {} });
        assert!(parse_update(&edited).is_none());
    }

    // ── Payload building ────────────────────────────────────────────

    #[test]
    fn text_body_includes_keyboard_and_parse_mode() {
        let keyboard = vec![
            vec![Button::new("Dog", "category:dog"), Button::new("Cat", "category:cat")],
            vec![Button::new("Cancel", "cancel")],
        ];
        let body = text_body("100", "Pick one", Some(&keyboard), TextFormat::Html);
        assert_eq!(body["parse_mode"], "HTML");
        let rows = body["reply_markup"]["inline_keyboard"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1]["callback_data"], "category:cat");
        assert_eq!(rows[1][0]["text"], "Cancel");
    }

    #[test]
    fn plain_text_body_has_no_parse_mode() {
        let body = text_body("100", "hi", None, TextFormat::Plain);
        assert!(body.get("parse_mode").is_none());
        assert!(body.get("reply_markup").is_none());
    }

    #[test]
    fn media_group_caption_only_where_given() {
        let photos = vec![
            OutgoingPhoto {
                file_id: "p1".into(),
                caption: Some("preview".into()),
            },
            OutgoingPhoto {
                file_id: "p2".into(),
                caption: None,
            },
        ];
        let media = media_group(&photos);
        assert_eq!(media[0]["type"], "photo");
        assert_eq!(media[0]["caption"], "preview");
        assert_eq!(media[1]["media"], "p2");
        assert!(media[1].get("caption").is_none());
    }

    #[test]
    fn captions_are_truncated() {
        let long = "x".repeat(2000);
        let truncated = truncate_caption(&long);
        assert_eq!(truncated.chars().count(), TELEGRAM_MAX_CAPTION_LENGTH);
        assert!(truncated.ends_with('…'));
        assert_eq!(truncate_caption("short"), "short");
    }

    // ── Network error tests (expected to fail with no server) ───────

    #[tokio::test]
    async fn deliver_empty_album_is_rejected() {
        let result = channel().deliver("123", Outbound::Album(vec![])).await;
        assert!(matches!(result, Err(ChannelError::InvalidMessage(_))));
    }

    // ── Message splitting tests ─────────────────────────────────────

    #[test]
    fn split_message_short() {
        let chunks = split_message("Hello", 4096);
        assert_eq!(chunks, vec!["Hello"]);
    }

    #[test]
    fn split_message_exact_limit() {
        let msg = "a".repeat(4096);
        let chunks = split_message(&msg, 4096);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 4096);
    }

    #[test]
    fn split_message_over_limit_on_newline() {
        let msg = format!("{}\n{}", "a".repeat(2000), "b".repeat(3000));
        let chunks = split_message(&msg, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "a".repeat(2000));
        assert_eq!(chunks[1], "b".repeat(3000));
    }

    #[test]
    fn split_message_no_good_split_point() {
        let msg = "a".repeat(5000);
        let chunks = split_message(&msg, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 4096);
        assert_eq!(chunks[1].len(), 904);
    }

    #[test]
    fn split_message_respects_char_boundaries() {
        let msg = "ж".repeat(5000);
        let chunks = split_message(&msg, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 4096);
        assert_eq!(chunks[1].chars().count(), 904);
    }
}
