use std::sync::Arc;

use serde_json::Value;

use msearch_core::editor::{self, ReadTicket};
use msearch_core::error::SettingsResult;
use msearch_core::setting::SettingUpdate;
use msearch_core::store::SettingsStore;

/// Result of a request run off the UI loop.
pub enum StoreReply {
    Read {
        ticket: ReadTicket,
        result: SettingsResult<Option<Value>>,
    },
    Write {
        result: SettingsResult<()>,
    },
}

pub type ReplySender = tokio::sync::mpsc::UnboundedSender<StoreReply>;

/// Run the read for `ticket` in a background task.
pub fn spawn_read(
    store: Arc<dyn SettingsStore>,
    key: String,
    ticket: ReadTicket,
    tx: ReplySender,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = editor::fetch(store.as_ref(), &key, ticket.kind()).await;
        let _ = tx.send(StoreReply::Read { ticket, result });
    })
}

/// Send `update` in a background task.
pub fn spawn_write(
    store: Arc<dyn SettingsStore>,
    update: SettingUpdate,
    tx: ReplySender,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = store.put_settings(std::slice::from_ref(&update)).await;
        let _ = tx.send(StoreReply::Write { result });
    })
}
