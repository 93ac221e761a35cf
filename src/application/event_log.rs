// Event log - Carries server events to the render task's message pane
use tokio::sync::mpsc;

/// Sending half. Cheap to clone; never blocks.
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<String>,
}

pub type EventReceiver = mpsc::UnboundedReceiver<String>;

impl EventLog {
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a line for the message pane and mirror it to the tracing log.
    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "awareness_board::events", "{}", message);
        if self.tx.send(message).is_err() {
            tracing::debug!("Message pane is gone, event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (log, mut rx) = EventLog::channel();
        log.log("first");
        log.clone().log(String::from("second"));

        assert_eq!(rx.recv().await.as_deref(), Some("first"));
        assert_eq!(rx.recv().await.as_deref(), Some("second"));
    }

    #[test]
    fn test_closed_pane_does_not_panic() {
        let (log, rx) = EventLog::channel();
        drop(rx);
        log.log("nobody listening");
    }
}
