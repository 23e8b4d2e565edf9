use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Domain events emitted after successful writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ProductCreated(i64),
    ProductUpdated(i64),
    ProductDeleted(i64),
}

impl Event {
    pub fn product_id(&self) -> i64 {
        match self {
            Event::ProductCreated(id) | Event::ProductUpdated(id) | Event::ProductDeleted(id) => {
                *id
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Delivery stops when every
/// sender has been dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::ProductCreated(id) => info!(product_id = id, "event: product created"),
            Event::ProductUpdated(id) => info!(product_id = id, "event: product updated"),
            Event::ProductDeleted(id) => info!(product_id = id, "event: product deleted"),
        }
    }
    info!("Event channel closed; processor shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender.send(Event::ProductCreated(7)).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.product_id(), 7);
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        assert!(sender.send(Event::ProductDeleted(1)).await.is_err());
    }
}
