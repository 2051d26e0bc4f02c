//! Publication of confirmed reports and notifications about saved ones.

use crate::channels::{Channel, OutgoingPhoto, Outbound, TextMessage};
use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::storage::SavedReport;
use crate::wizard::Draft;

/// How many photos accompany a notification.
const NOTIFY_PHOTOS: usize = 3;

/// How much of the snapshot a notification quotes.
const NOTIFY_JSON_CHARS: usize = 500;

/// Where a report ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// Posted to the public channel.
    Channel,
    /// Sent to admins for review; `delivered` of them received it.
    SentToAdmins { delivered: usize },
    /// No channel or admins configured; accepted without broadcast.
    Accepted,
}

/// Build the channel post for a draft.
///
/// One photo → a photo post captioned with the preview. Several → an album
/// with the preview as the caption of the first photo only.
pub fn channel_post(draft: &Draft) -> Result<Outbound, PublishError> {
    let caption = draft.render_preview();
    match draft.photos.as_slice() {
        [] => Err(PublishError::NoPhotos),
        [only] => Ok(Outbound::Photo(OutgoingPhoto {
            file_id: only.file_id.clone(),
            caption: Some(caption),
        })),
        [first, rest @ ..] => {
            let mut album = Vec::with_capacity(rest.len() + 1);
            album.push(OutgoingPhoto {
                file_id: first.file_id.clone(),
                caption: Some(caption),
            });
            album.extend(rest.iter().map(|photo| OutgoingPhoto {
                file_id: photo.file_id.clone(),
                caption: None,
            }));
            Ok(Outbound::Album(album))
        }
    }
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut escaped, c);
    }
    escaped
}

/// Like [`escape_html`], but the result is at most `max_chars` characters.
/// A cut text ends in `...` and never splits an entity.
pub fn escape_html_truncated(text: &str, max_chars: usize) -> String {
    let escaped = escape_html(text);
    if escaped.chars().count() <= max_chars {
        return escaped;
    }

    let budget = max_chars.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    let mut piece = String::new();
    for c in text.chars() {
        piece.clear();
        push_escaped(&mut piece, c);
        let width = piece.chars().count();
        if used + width > budget {
            break;
        }
        out.push_str(&piece);
        used += width;
    }
    out.push_str(&"..."[..max_chars.min(3)]);
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(c),
    }
}

/// Sends reports to their configured destinations.
#[derive(Debug, Clone)]
pub struct Publisher {
    config: PublishConfig,
}

impl Publisher {
    pub fn new(config: PublishConfig) -> Self {
        Self { config }
    }

    /// Publish a confirmed report: to the channel when one is configured,
    /// otherwise to every admin for review.
    pub async fn publish(
        &self,
        channel: &dyn Channel,
        draft: &Draft,
    ) -> Result<PublishStatus, PublishError> {
        if let Some(ref channel_id) = self.config.channel_id {
            let post = channel_post(draft)?;
            channel.deliver(channel_id, post).await?;
            tracing::info!(channel_id = %channel_id, "Report published to channel");
            return Ok(PublishStatus::Channel);
        }

        if self.config.admin_ids.is_empty() {
            tracing::info!(chat_id = %draft.chat_id, "No publication target, report accepted");
            return Ok(PublishStatus::Accepted);
        }

        let text = format!("🆕 New found-pet report!\n\n{}", draft.render_preview());
        let mut delivered = 0;
        for admin_id in &self.config.admin_ids {
            match send_to_admin(channel, admin_id, &text, draft).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(admin_id = %admin_id, error = %e, "Failed to send report to admin");
                }
            }
        }

        if delivered == 0 {
            return Err(PublishError::AllAdminsFailed {
                attempted: self.config.admin_ids.len(),
            });
        }
        Ok(PublishStatus::SentToAdmins { delivered })
    }

    /// Tell the notification chat about a saved report. Failures are logged.
    pub async fn notify(&self, channel: &dyn Channel, draft: &Draft, saved: &SavedReport) {
        let Some(ref chat_id) = self.config.notification_chat_id else {
            return;
        };

        let message = TextMessage::html(notification_text(draft, saved));
        if let Err(e) = channel.deliver(chat_id, message.into()).await {
            tracing::error!(chat_id = %chat_id, error = %e, "Failed to send report notification");
            return;
        }

        for (i, photo) in draft.photos.iter().take(NOTIFY_PHOTOS).enumerate() {
            let outbound = Outbound::Photo(OutgoingPhoto {
                file_id: photo.file_id.clone(),
                caption: Some(format!("Photo {} of the report", i + 1)),
            });
            if let Err(e) = channel.deliver(chat_id, outbound).await {
                tracing::error!(chat_id = %chat_id, error = %e, "Failed to send notification photo");
                return;
            }
        }
    }
}

async fn send_to_admin(
    channel: &dyn Channel,
    admin_id: &str,
    text: &str,
    draft: &Draft,
) -> Result<(), PublishError> {
    channel
        .deliver(admin_id, TextMessage::new(text).into())
        .await?;
    for photo in &draft.photos {
        let outbound = Outbound::Photo(OutgoingPhoto {
            file_id: photo.file_id.clone(),
            caption: None,
        });
        channel.deliver(admin_id, outbound).await?;
    }
    Ok(())
}

fn notification_text(draft: &Draft, saved: &SavedReport) -> String {
    let location = if draft.location.coordinates().is_some() {
        "GPS coordinates".to_string()
    } else {
        draft
            .location
            .address
            .clone()
            .unwrap_or_else(|| "Not given".to_string())
    };
    let excerpt: String = saved.json.chars().take(NOTIFY_JSON_CHARS).collect();

    format!(
        "🆕 NEW PET REPORT!\n\n\
         🐾 Species: {}\n\
         🧬 Sex: {}\n\
         🗺️ Location: {}\n\
         👤 User: {}\n\n\
         📂 Saved in: {}\n\n\
         💾 Data:\n<pre>{}...</pre>",
        escape_html(&saved.report.category_label),
        escape_html(&saved.report.sex_label),
        escape_html(&location),
        escape_html(&draft.contact()),
        escape_html(&saved.dir.display().to_string()),
        escape_html(&excerpt),
    )
}
