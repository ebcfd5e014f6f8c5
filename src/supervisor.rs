use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::notifier::Notify;
use crate::poller::{Playback, Poller};
use crate::refresher::Refresher;
use crate::server::{self, Routes};
use crate::session::Session;
use crate::Shared;

/// Owns the repeating refresh and poll tasks plus the http listener.
///
/// Each task runs until [`Supervisor::shutdown`] is called.
#[derive(Debug)]
pub struct Supervisor {
    session: Shared<Session>,
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl Supervisor {
    pub fn new(session: Shared<Session>) -> Self {
        Self {
            session,
            cancel: CancellationToken::new(),
            handles: Vec::new(),
        }
    }

    /// Refresh the access token every `period`. The first refresh runs right away
    /// when `refresh_now` is set, otherwise one period from now.
    pub fn spawn_refresher(&mut self, refresher: Refresher, period: Duration, refresh_now: bool) {
        let session = self.session.clone();
        let cancel = self.cancel.clone();
        let start = if refresh_now { Instant::now() } else { Instant::now() + period };
        self.handles.push(tokio::spawn(async move {
            let mut tick = tokio::time::interval_at(start, period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = async {
                        tick.tick().await;
                        refresher.refresh(&session).await;
                    } => {}
                }
            }
            log::debug!("Refresher stopped");
        }));
    }

    /// Poll playback every `period`, starting one period from now
    pub fn spawn_poller<P, N>(&mut self, poller: Poller<P, N>, period: Duration)
    where
        P: Playback + Send + Sync + 'static,
        N: Notify + Send + Sync + 'static,
    {
        let session = self.session.clone();
        let cancel = self.cancel.clone();
        self.handles.push(tokio::spawn(async move {
            let mut tick = tokio::time::interval_at(Instant::now() + period, period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = async {
                        tick.tick().await;
                        poller.poll(&session).await;
                    } => {}
                }
            }
            log::debug!("Poller stopped");
        }));
    }

    pub fn spawn_server(&mut self, listener: TcpListener, routes: Routes) {
        let cancel = self.cancel.clone();
        self.handles.push(tokio::spawn(server::serve(listener, routes, cancel)));
    }

    /// Stop every task and wait for them to exit. A cycle still waiting on the
    /// network is abandoned.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for handle in self.handles {
            if let Err(err) = handle.await {
                log::error!("Task ended abnormally: {err}");
            }
        }
    }
}
