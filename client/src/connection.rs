use std::future::Future;
use std::time::Duration;

use anyhow::{Result, bail};
use tokio::sync::mpsc;

use crate::Client;
use crate::settings::ClientSettings;

/// Both halves of a connection: raw frames in, wire commands out
pub type Transport = (mpsc::Receiver<String>, mpsc::Sender<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Reconnects allowed over the client's lifetime; `None` retries forever
    pub max_attempts: Option<usize>,
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::from_secs(10),
        }
    }
}

impl ReconnectPolicy {
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            max_attempts: settings.max_reconnects,
            delay: settings.reconnect_delay(),
        }
    }
}

/// Run `client` over connections from `connect`, reconnecting whenever a
/// connection ends or cannot be made
pub async fn run_with_reconnect<F, Fut>(client: &mut Client, policy: ReconnectPolicy, mut connect: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Transport>>,
{
    let mut attempt = 0;
    loop {
        match connect().await {
            Ok((incoming, outgoing)) => {
                client.reset();
                match client.run(incoming, outgoing).await {
                    Ok(()) => tracing::info!("Connection closed"),
                    Err(e) => tracing::error!(error = %format!("{e:#}"), "Connection failed"),
                }
            }
            Err(e) => tracing::warn!(
                attempt = attempt,
                max_attempts = ?policy.max_attempts,
                error = %e,
                "Connection attempt failed"
            ),
        }

        attempt += 1;
        if let Some(max) = policy.max_attempts {
            if attempt > max {
                bail!("Gave up after {} reconnects", max);
            }
        }
        tokio::time::sleep(policy.delay).await;
    }
}
