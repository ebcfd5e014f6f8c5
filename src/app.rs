use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::notifier::Webhook;
use crate::poller::Poller;
use crate::refresher::Refresher;
use crate::server::Routes;
use crate::session::Session;
use crate::spotify::{OAuth, Spotify};
use crate::supervisor::Supervisor;
use crate::token::TokenStore;
use crate::{Error, Shared};

pub struct App {
    config: Config,
    session: Shared<Session>,
    oauth: Shared<OAuth>,
    listener: TcpListener,
}

impl App {
    /// Restore the cached token and bind the http listener.
    ///
    /// Binding is the only step that can fail; everything else degrades to an
    /// unauthenticated session.
    pub async fn new(config: Config) -> Result<Self, Error> {
        let session = Shared::new(Session::restore(TokenStore::new(&config.token_file)));
        let oauth = Shared::new(OAuth::from_config(&config));
        let listener = TcpListener::bind(config.bind_address).await?;

        Ok(Self {
            config,
            session,
            oauth,
            listener,
        })
    }

    /// Address the http listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the refresh and poll loops and the http listener.
    ///
    /// A token restored from the cache is refreshed on the refresher's first tick,
    /// which runs right away, since its access token has most likely expired while
    /// the service was down.
    pub fn start(self) -> Result<Supervisor, Error> {
        let addr = self.local_addr()?;
        let restored = self.session.is_authenticated();
        if !restored {
            log::info!("Not authenticated, visit http://{addr}/login to connect a Spotify account");
        }

        let poller = Poller::new(
            Spotify::new(&self.config.spotify_api_url),
            Webhook::new(self.config.discord_webhook_url.clone()),
        );

        let mut supervisor = Supervisor::new(self.session.clone());
        supervisor.spawn_refresher(
            Refresher::new(self.oauth.clone()),
            self.config.refresh_period(),
            restored,
        );
        supervisor.spawn_poller(poller, self.config.poll_period());
        log::info!("Listening on http://{addr}");
        supervisor.spawn_server(self.listener, Routes::new(self.session, self.oauth));

        Ok(supervisor)
    }

    /// Run until Ctrl-C, then stop every task.
    pub async fn run(self) -> Result<(), Error> {
        let supervisor = self.start()?;
        tokio::signal::ctrl_c().await?;
        log::info!("Shutting down");
        supervisor.shutdown().await;
        Ok(())
    }
}
