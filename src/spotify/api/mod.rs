pub mod response;

use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::Error;
use response::ErrorBody;

/// Turn a pending reqwest call into a typed spotify result.
///
/// Success bodies are parsed into `T`; an empty body is parsed as `null` so that
/// `Option<T>` covers `204 No Content`. Error statuses map onto [`Error`].
pub trait SpotifyResponse<T> {
    fn to_spotify_response(self) -> impl Future<Output = Result<T, Error>> + Send;
}

impl<F, T> SpotifyResponse<T> for F
where
    T: DeserializeOwned + Send,
    F: Future<Output = Result<reqwest::Response, reqwest::Error>> + Send,
{
    async fn to_spotify_response(self) -> Result<T, Error> {
        let response = self.await?;
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => {
                let mut body = response.text().await?;
                if body.trim().is_empty() {
                    body = String::from("null");
                }

                let jd = &mut serde_json::Deserializer::from_str(&body);
                serde_path_to_error::deserialize(jd).map_err(|err| {
                    log::debug!("[{status}] {}", body.replace('\n', ""));
                    Error::from(err)
                })
            }
            StatusCode::UNAUTHORIZED => {
                log_body(status, response).await;
                Err(Error::InvalidToken)
            }
            StatusCode::FORBIDDEN => {
                log_body(status, response).await;
                Err(Error::Forbidden)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                log_body(status, response).await;
                Err(Error::RateLimited)
            }
            code => {
                let body = response.text().await.unwrap_or_default();
                log::debug!("[{code}] {}", body.replace('\n', ""));
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .map(|e| e.message())
                    .unwrap_or_else(|_| {
                        code.canonical_reason().unwrap_or("Unknown spotify response").to_string()
                    });
                Err(Error::Failed {
                    code: code.as_u16(),
                    message,
                })
            }
        }
    }
}

async fn log_body(status: StatusCode, response: reqwest::Response) {
    if let Ok(body) = response.text().await {
        log::debug!("[{status}] {}", body.replace('\n', ""));
    }
}
