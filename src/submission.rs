//! Confirm pipeline: persist → notify → publish → tell the reporter.

use crate::channels::telegram::TELEGRAM_MAX_MESSAGE_LENGTH;
use crate::channels::{Channel, TextMessage};
use crate::error::PublishError;
use crate::publish::{escape_html, escape_html_truncated, PublishStatus, Publisher};
use crate::storage::{ReportStore, SavedReport};
use crate::wizard::Draft;

/// Result of running a confirmed draft through the pipeline.
#[derive(Debug)]
pub struct SubmissionReport {
    pub published: Result<PublishStatus, PublishError>,
    /// `None` when local persistence failed.
    pub saved: Option<SavedReport>,
}

impl SubmissionReport {
    /// The message shown to the reporter.
    ///
    /// Persistence failures only drop the save details; publication
    /// failures get their own message. The quoted snapshot is cut so the
    /// whole message fits in one Telegram message.
    pub fn user_message(&self) -> TextMessage {
        let status = match &self.published {
            Ok(status) => *status,
            Err(PublishError::NoPhotos) => {
                return TextMessage::new(
                    "⚠️ Something went wrong: no photos were found for the report.\n\n\
                     Please create the report again with /start.",
                );
            }
            Err(e) => {
                return TextMessage::new(format!(
                    "⚠️ Failed to publish the report: {e}\n\n\
                     Please try again later or contact an administrator."
                ));
            }
        };

        let mut text = match status {
            PublishStatus::Channel => {
                "✅ Your report has been published in the channel!\n\n\
                 Thank you for helping animals! ❤️\n\n"
                    .to_string()
            }
            PublishStatus::SentToAdmins { .. } => "✅ Your report has been sent!\n\n\
                 It will be published after an administrator reviews it.\n\
                 Thank you for helping animals! ❤️\n\n"
                .to_string(),
            PublishStatus::Accepted => "✅ Your report has been sent!\n\
                 Thank you for helping animals! ❤️\n\n"
                .to_string(),
        };

        const FOOTER: &str = "To create a new report, use /start.";
        const PRE_CLOSE: &str = "</pre>\n\n";

        if let Some(ref saved) = self.saved {
            text.push_str(&format!(
                "📁 Data saved locally in: {}\n\n📋 Collected data:\n<pre>",
                escape_html(&saved.dir.display().to_string()),
            ));
            let budget = TELEGRAM_MAX_MESSAGE_LENGTH.saturating_sub(
                text.chars().count() + PRE_CLOSE.chars().count() + FOOTER.chars().count(),
            );
            text.push_str(&escape_html_truncated(&saved.json, budget));
            text.push_str(PRE_CLOSE);
        }

        text.push_str(FOOTER);
        TextMessage::html(text)
    }
}

/// Runs confirmed drafts through storage, notification and publication.
pub struct Submission {
    publisher: Publisher,
    store: ReportStore,
}

impl Submission {
    pub fn new(publisher: Publisher, store: ReportStore) -> Self {
        Self { publisher, store }
    }

    pub async fn submit(&self, channel: &dyn Channel, draft: &Draft) -> SubmissionReport {
        let saved = match self.store.save(draft, channel).await {
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::error!(chat_id = %draft.chat_id, error = %e, "Failed to save report");
                None
            }
        };

        if let Some(ref saved) = saved {
            self.publisher.notify(channel, draft, saved).await;
        }

        let published = self.publisher.publish(channel, draft).await;
        if let Err(ref e) = published {
            tracing::error!(chat_id = %draft.chat_id, error = %e, "Failed to publish report");
        }

        SubmissionReport { published, saved }
    }
}
