//! Bot run loop — reads events from the channel and dispatches them to the
//! wizard manager.

use std::sync::Arc;

use futures::StreamExt;

use crate::channels::Channel;
use crate::error::Error;
use crate::wizard::WizardManager;

/// Run until the channel's stream ends or Ctrl+C is received.
///
/// Each event is handled on its own task; the manager serialises events
/// that belong to the same conversation.
pub async fn run(channel: Arc<dyn Channel>, manager: Arc<WizardManager>) -> Result<(), Error> {
    let mut events = channel.start().await?;

    tracing::info!(channel = channel.name(), "Bot ready and listening");

    loop {
        let event = tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down...");
                break;
            }
            event = events.next() => {
                match event {
                    Some(e) => e,
                    None => {
                        tracing::info!("Channel stream ended, shutting down...");
                        break;
                    }
                }
            }
        };

        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            let chat_id = event.chat_id.clone();
            if let Err(e) = manager.handle(event).await {
                tracing::error!(chat_id = %chat_id, error = %e, "Error handling event");
            }
        });
    }

    if let Err(e) = channel.shutdown().await {
        tracing::warn!(error = %e, "Channel shutdown failed");
    }
    Ok(())
}
