use async_trait::async_trait;

/// Fire-and-forget side-effect port for operator notices.
///
/// Invoked only after the primary response is computed; implementations
/// swallow their own failures (log, never propagate), so a broken sink can
/// not affect the user-facing reply.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, chat_id: i64, text: &str);
}

/// Sink that only logs. Useful offline and as a safe default.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, chat_id: i64, text: &str) {
        log::info!("operator notice for {chat_id}: {text}");
    }
}
