//! Connection polling.
//!
//! A create/reconnect/refresh call only kicks off an attempt on the server;
//! the result arrives by polling the connection until its attempt reaches
//! the interactive or finish stage. Each run lives on its own task and
//! reports through a [`ConnectionFetchDelegate`], with a [`PollHandle`] for
//! cancellation.

use std::sync::Arc;
use std::time::Duration;

use ledgerlink_domain::{Connection, StageName};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::routes::Route;
use crate::transport::Transport;

/// Receives the outcome of a polled connection attempt. Exactly one of the
/// three callbacks fires per run, at most once.
#[async_trait::async_trait]
pub trait ConnectionFetchDelegate: Send + Sync {
    /// The attempt failed. The connection is absent when the kick-off
    /// request itself failed or a poll could not be completed.
    async fn failed_to_fetch(&self, connection: Option<Connection>, message: String);

    /// The attempt is waiting for interactive credentials. Polling stops;
    /// submit the credentials to start a new run.
    async fn interactive_input_requested(&self, connection: Connection);

    /// The attempt finished successfully.
    async fn finished_fetching(&self, connection: Connection);
}

/// Handle to a running poll. Dropping the handle detaches the run; call
/// [`PollHandle::cancel`] to stop it.
#[derive(Debug)]
pub struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling. No delegate callback fires after cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to wind down, after completion or cancellation.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Drives kick-off requests and the subsequent poll loop.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionFetcher {
    transport: Arc<Transport>,
    poll_interval: Duration,
}

impl ConnectionFetcher {
    pub fn new(transport: Arc<Transport>, poll_interval: Duration) -> Self {
        Self { transport, poll_interval }
    }

    /// Send the kick-off request, then poll the returned connection. A
    /// kick-off failure reports `failed_to_fetch` with no connection.
    pub fn start(&self, kickoff: Route, delegate: Arc<dyn ConnectionFetchDelegate>) -> PollHandle {
        let transport = Arc::clone(&self.transport);
        let interval = self.poll_interval;
        let token = CancellationToken::new();
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            let kickoff = tokio::select! {
                _ = task_token.cancelled() => {
                    debug!("poll cancelled");
                    return;
                }
                result = transport.send::<Connection>(&kickoff) => result,
            };
            match kickoff {
                Ok(envelope) => {
                    let secret = envelope.data.secret;
                    poll_loop(&transport, interval, &secret, delegate, task_token, true).await;
                }
                Err(err) => {
                    warn!(error = %err, "connection kick-off failed");
                    delegate.failed_to_fetch(None, err.to_string()).await;
                }
            }
        });

        PollHandle { token, task }
    }

    /// Poll an attempt that is already running on the server, e.g. after an
    /// OAuth redirect handed the connection secret back. The first poll is
    /// issued immediately.
    pub fn resume(&self, secret: &str, delegate: Arc<dyn ConnectionFetchDelegate>) -> PollHandle {
        let transport = Arc::clone(&self.transport);
        let interval = self.poll_interval;
        let secret = secret.to_string();
        let token = CancellationToken::new();
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            poll_loop(&transport, interval, &secret, delegate, task_token, false).await;
        });

        PollHandle { token, task }
    }
}

async fn poll_loop(
    transport: &Transport,
    interval: Duration,
    secret: &str,
    delegate: Arc<dyn ConnectionFetchDelegate>,
    token: CancellationToken,
    mut delay_first: bool,
) {
    let route = Route::connection_show(secret);

    loop {
        if delay_first {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("poll cancelled");
                    return;
                }
                _ = sleep(interval) => {}
            }
        }
        delay_first = true;

        // Cancellation must also win against an in-flight request; a
        // response that races the token never reaches the delegate.
        let result = tokio::select! {
            _ = token.cancelled() => {
                debug!("poll cancelled");
                return;
            }
            result = transport.send::<Connection>(&route) => result,
        };
        if token.is_cancelled() {
            debug!("poll cancelled");
            return;
        }

        match result {
            Ok(envelope) => {
                let connection = envelope.data;
                match connection.stage_name() {
                    StageName::Interactive => {
                        delegate.interactive_input_requested(connection).await;
                        return;
                    }
                    StageName::Finish => {
                        match connection.fail_message().map(str::to_string) {
                            Some(message) => {
                                delegate.failed_to_fetch(Some(connection), message).await;
                            }
                            None => delegate.finished_fetching(connection).await,
                        }
                        return;
                    }
                    StageName::Other(stage) => {
                        debug!(stage = %stage, "attempt still in progress");
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "connection poll failed");
                delegate.failed_to_fetch(None, err.to_string()).await;
                return;
            }
        }
    }
}
