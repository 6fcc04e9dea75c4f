use anyhow::{Result, anyhow};
use tactician_protocol::ClientMessage;
use tokio::sync::mpsc;
use tracing::debug;

/// Writes commands to the outgoing half of the transport
#[derive(Debug, Clone)]
pub struct Sender {
    outgoing: mpsc::Sender<String>,
}

impl Sender {
    pub fn new(outgoing: mpsc::Sender<String>) -> Self {
        Self { outgoing }
    }

    pub async fn send_raw(&self, message: String) -> Result<()> {
        self.outgoing
            .send(message)
            .await
            .map_err(|_| anyhow!("Connection closed"))
    }

    pub async fn send(&self, message: &ClientMessage) -> Result<()> {
        let wire = message.to_wire_format();
        debug!("Sending {}", wire);
        self.send_raw(wire).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactician_protocol::ClientCommand;

    #[tokio::test]
    async fn test_send_wire_format() {
        let (outgoing, mut sent) = mpsc::channel(4);
        let sender = Sender::new(outgoing);
        sender
            .send(&ClientMessage::new("battle-gen4ou-1", ClientCommand::Forfeit))
            .await
            .unwrap();
        assert_eq!(sent.recv().await.as_deref(), Some("battle-gen4ou-1|/forfeit"));

        drop(sent);
        let error = sender.send_raw("|/search gen4ou".to_string()).await.unwrap_err();
        assert_eq!(error.to_string(), "Connection closed");
    }
}
