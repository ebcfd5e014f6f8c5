use std::convert::Infallible;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::session::Session;
use crate::spotify::OAuth;
use crate::Shared;

#[derive(Debug, Default, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
    state: Option<String>,
}

/// Routes of the local http surface: the two handshake steps and a status page.
#[derive(Debug, Clone)]
pub struct Routes {
    session: Shared<Session>,
    oauth: Shared<OAuth>,
}

impl Routes {
    pub fn new(session: Shared<Session>, oauth: Shared<OAuth>) -> Self {
        Self { session, oauth }
    }

    pub async fn route(&self, method: &Method, path: &str, query: Option<&str>) -> Response<Full<Bytes>> {
        match (method, path) {
            (&Method::GET, "/login") => self.login(),
            (&Method::GET, "/callback") => self.callback(query).await,
            (&Method::GET, "/track-info") => text(
                StatusCode::OK,
                "Authenticated with Spotify. Polling for the currently playing track is active.",
            ),
            _ => text(StatusCode::NOT_FOUND, "404 Page not found"),
        }
    }

    fn login(&self) -> Response<Full<Bytes>> {
        match self.oauth.authorization_url() {
            Ok(url) => redirect(&url),
            Err(err) => {
                log::error!("Failed to build authorization url: {err}");
                text(StatusCode::INTERNAL_SERVER_ERROR, "Failed to build authorization url")
            }
        }
    }

    async fn callback(&self, query: Option<&str>) -> Response<Full<Bytes>> {
        let query: CallbackQuery = match serde_qs::from_str(query.unwrap_or_default()) {
            Ok(query) => query,
            Err(err) => return text(StatusCode::BAD_REQUEST, format!("Malformed callback: {err}")),
        };

        if let Some(err) = query.error {
            log::warn!("Authorization was rejected: {err}");
            return text(StatusCode::BAD_REQUEST, format!("Authorization failed: {err}"));
        }

        // Validate State for cross-site request forgery
        if let Some(state) = query.state.as_deref() {
            if state != self.oauth.state() {
                return text(StatusCode::BAD_REQUEST, "Invalid response state");
            }
        }

        let Some(code) = query.code.filter(|code| !code.is_empty()) else {
            return text(StatusCode::BAD_REQUEST, "Missing authorization code");
        };

        match self.oauth.exchange_code(&code).await {
            Ok(tokens) => {
                self.session.authenticate(tokens);
                log::info!("Authenticated with Spotify");
                redirect("/track-info")
            }
            Err(err) => {
                log::error!("Failed to exchange authorization code: {err}");
                text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to exchange authorization code: {err}"),
                )
            }
        }
    }
}

impl Service<Request<Incoming>> for Routes {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let routes = self.clone();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);

        Box::pin(async move { Ok(routes.route(&method, &path, query.as_deref()).await) })
    }
}

fn text<S: Into<Bytes>>(status: StatusCode, body: S) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

fn redirect(location: &str) -> Response<Full<Bytes>> {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = text(StatusCode::FOUND, "");
            response.headers_mut().insert(LOCATION, value);
            response
        }
        Err(_) => text(StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect location"),
    }
}

/// Accept connections until `cancel` fires, serving each one with `routes`.
pub async fn serve(listener: TcpListener, routes: Routes, cancel: CancellationToken) {
    loop {
        let stream = tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => stream,
                Err(err) => {
                    log::error!("Failed to accept connection: {err}");
                    continue;
                }
            },
        };

        let io = hyper_util::rt::TokioIo::new(stream);
        let handler = routes.clone();
        tokio::spawn(async move {
            if let Err(err) = hyper::server::conn::http1::Builder::new()
                .serve_connection(io, handler)
                .await
            {
                log::error!("Error serving connection: {err:?}");
            }
        });
    }
}
