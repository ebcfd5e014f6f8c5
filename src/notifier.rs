use std::future::Future;

use serde::Serialize;

use crate::errors::LogError;
use crate::spotify::response::Track;
use crate::Error;

/// Receiver of track change events.
///
/// Delivery is best effort: implementations report failures through the log and
/// never hand them back to the caller.
pub trait Notify {
    fn notify(&self, track: &Track) -> impl Future<Output = ()> + Send;
}

/// Render milliseconds as `m:ss`. Minutes are not folded into hours.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}

pub fn format_message(track: &Track) -> String {
    format!(
        "🎵 Now playing: **{}**\nArtist: {}\nAlbum: {}\nDuration: {}\nListen: {}",
        track.name,
        track.primary_artist().unwrap_or("Unknown Artist"),
        track.album_name().unwrap_or("Unknown Album"),
        format_duration(track.duration),
        track.listen_url().unwrap_or("No URL"),
    )
}

/// `POST <webhook>`
///
/// ```json
/// { "content": "🎵 Now playing: ..." }
/// ```
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Discord compatible webhook accepting `{"content": ...}` payloads
#[derive(Debug, Clone)]
pub struct Webhook {
    url: String,
    client: reqwest::Client,
}

impl Webhook {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Post the formatted message for `track`
    pub async fn send(&self, track: &Track) -> Result<(), Error> {
        let content = format_message(track);
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { content: &content })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            log::info!("Sent notification for {}", track.identity());
            Ok(())
        } else {
            Err(Error::Failed {
                code: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }
}

impl Notify for Webhook {
    async fn notify(&self, track: &Track) {
        self.send(track).await.log_error("Failed to deliver notification");
    }
}
