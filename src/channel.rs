use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::config::Config;
use crate::conversations::{HistoryPage, Message, Status};
use crate::error::{HistoryError, TransportError};
use crate::transport::Transport;

/// Fetches the full history of one channel, oldest message first.
///
/// Slack returns each page newest first, so every page is reversed before it
/// is appended. The next request starts after the newest message seen so far.
pub async fn fetch_history<T>(
    transport: &T,
    config: &Config,
    channel_id: &str,
    channel_name: &str,
    pb: &ProgressBar,
) -> Result<Vec<Message>, HistoryError>
where
    T: Transport + ?Sized,
{
    let mut all_messages = Vec::new();
    let mut oldest = config.oldest.clone();
    let mut page = 1;

    loop {
        debug!(channel = channel_id, page, oldest = %oldest, "requesting history page");

        let url = config
            .history_url(channel_id, &oldest)
            .map_err(TransportError::from)?;
        let body = transport.get(&url).await?;
        let history = decode_page(&body)?;

        // The first element is the newest message on the page
        let Some(newest) = history.messages.first() else {
            if page == 1 {
                return Err(HistoryError::NoHistory);
            }

            warn!(
                channel = channel_id,
                page, "empty history page, treating channel as exhausted"
            );
            break;
        };

        let next_oldest = newest
            .ts()
            .ok_or(HistoryError::MissingTimestamp { page })?
            .to_string();

        all_messages.extend(history.messages.into_iter().rev());
        oldest = next_oldest;

        if !history.has_more {
            break;
        }

        page += 1;
        pb.set_message(format!(": #{channel_name} ({page})"));
    }

    debug!(
        channel = channel_id,
        pages = page,
        messages = all_messages.len(),
        "history complete"
    );

    Ok(all_messages)
}

fn decode_page(body: &str) -> Result<HistoryPage, HistoryError> {
    let status: Status = serde_json::from_str(body)?;
    status.into_result().map_err(HistoryError::Api)?;

    Ok(serde_json::from_str(body)?)
}
