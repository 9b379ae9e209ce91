//! Settings editor for the allow-list key.
//!
//! Every network exchange is split into a `begin_*` half that produces the
//! request and a `complete_*` half that applies its result. A UI that runs
//! requests on background tasks calls the halves directly; the async
//! wrappers ([`SettingsEditor::activate`], [`SettingsEditor::submit`],
//! [`SettingsEditor::restore_defaults`]) do both in one call.
//!
//! Reads carry a [`ReadTicket`]. A result is applied only if its ticket is
//! newer than the last applied one, so a slow superseded fetch cannot
//! overwrite a later one.

use serde_json::{Map, Value};

use crate::error::SettingsResult;
use crate::notify::{Notification, Notifier};
use crate::setting::{render_optional, SettingUpdate, SettingValue, ALLOWED_KEY};
use crate::store::SettingsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Waiting for the first read to land.
    Loading,
    /// Form populated and interactive.
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadKind {
    /// Current value from the settings list endpoint.
    Current,
    /// Server-computed default from the plugin route.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    seq: u64,
    kind: ReadKind,
}

impl ReadTicket {
    pub fn kind(&self) -> ReadKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Rejected(String),
}

pub struct SettingsEditor {
    key: String,
    phase: EditorPhase,
    allowed: Option<SettingValue>,
    text: String,
    error_message: Option<String>,
    issued: u64,
    applied: u64,
}

impl Default for SettingsEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsEditor {
    pub fn new() -> Self {
        Self::for_key(ALLOWED_KEY)
    }

    pub fn for_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            phase: EditorPhase::Loading,
            allowed: None,
            text: String::new(),
            error_message: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Last fetched or defaulted value.
    pub fn allowed(&self) -> Option<&SettingValue> {
        self.allowed.as_ref()
    }

    /// Current form text, including unsaved edits.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn begin_read(&mut self, kind: ReadKind) -> ReadTicket {
        self.issued += 1;
        tracing::debug!(seq = self.issued, ?kind, "read dispatched");
        ReadTicket {
            seq: self.issued,
            kind,
        }
    }

    /// Apply a read result. Returns `false` when the ticket was superseded
    /// and the value dropped.
    pub fn complete_read(&mut self, ticket: ReadTicket, value: Option<Value>) -> bool {
        if ticket.seq <= self.applied {
            tracing::debug!(
                seq = ticket.seq,
                applied = self.applied,
                "dropping superseded read"
            );
            return false;
        }
        self.applied = ticket.seq;
        self.allowed = value.map(SettingValue::from);
        self.phase = EditorPhase::Editing;
        self.render();
        true
    }

    /// Overwrite the form text from the held value, discarding edits.
    pub fn render(&mut self) {
        self.text = render_optional(self.allowed.as_ref());
    }

    /// Build the write for `raw`. Clears the inline error.
    pub fn begin_submit(&mut self, raw: &str) -> SettingUpdate {
        self.error_message = None;
        SettingUpdate::new(
            self.key.clone(),
            SettingValue::Text(raw.trim().to_string()),
        )
    }

    /// Apply a write result. On success returns the notification to show.
    pub fn complete_submit(&mut self, result: SettingsResult<()>) -> Option<Notification> {
        match result {
            Ok(()) => {
                tracing::info!(key = %self.key, "settings saved");
                self.error_message = None;
                Some(Notification::saved())
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "settings rejected");
                self.error_message = Some(e.display_message());
                None
            }
        }
    }

    /// Fetch the current value and render it.
    pub async fn activate<S>(&mut self, store: &S) -> SettingsResult<()>
    where
        S: SettingsStore + ?Sized,
    {
        let ticket = self.begin_read(ReadKind::Current);
        let value = fetch(store, &self.key, ticket.kind).await?;
        self.complete_read(ticket, value);
        Ok(())
    }

    /// Fetch the server default and render it. Nothing is written.
    pub async fn restore_defaults<S>(&mut self, store: &S) -> SettingsResult<()>
    where
        S: SettingsStore + ?Sized,
    {
        let ticket = self.begin_read(ReadKind::Default);
        let value = fetch(store, &self.key, ticket.kind).await?;
        self.complete_read(ticket, value);
        Ok(())
    }

    /// Send `raw_text`, trimmed, as the new value. Rejections land in the
    /// inline error region rather than the return value's error path.
    pub async fn submit<S, N>(&mut self, raw_text: &str, store: &S, notifier: &N) -> SubmitOutcome
    where
        S: SettingsStore + ?Sized,
        N: Notifier + ?Sized,
    {
        let update = self.begin_submit(raw_text);
        let result = store.put_settings(std::slice::from_ref(&update)).await;
        match self.complete_submit(result) {
            Some(notification) => {
                notifier.notify(notification).await;
                SubmitOutcome::Saved
            }
            None => SubmitOutcome::Rejected(self.error_message.clone().unwrap_or_default()),
        }
    }
}

/// Perform the read for `kind`. `None` means the key has no value.
pub async fn fetch<S>(store: &S, key: &str, kind: ReadKind) -> SettingsResult<Option<Value>>
where
    S: SettingsStore + ?Sized,
{
    match kind {
        ReadKind::Current => {
            let mut values: Map<String, Value> = store.get_settings(&[key]).await?;
            Ok(values.remove(key))
        }
        ReadKind::Default => store.get_default().await.map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ChannelNotifier;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new(json!({"item": ["name", "meta"]}))
            .with_value(ALLOWED_KEY, json!(["a", "b"]))
    }

    #[tokio::test]
    async fn activate_renders_pretty_value() {
        let store = store();
        let mut editor = SettingsEditor::new();
        assert_eq!(editor.phase(), EditorPhase::Loading);

        editor.activate(&store).await.unwrap();

        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.text(), "[\n    \"a\",\n    \"b\"\n]");
        assert_eq!(editor.allowed(), Some(&SettingValue::from(json!(["a", "b"]))));
    }

    #[tokio::test]
    async fn activate_with_unset_key_renders_empty() {
        let store = MemoryStore::new(json!({}));
        let mut editor = SettingsEditor::new();
        editor.activate(&store).await.unwrap();

        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.text(), "");
        assert!(editor.allowed().is_none());
    }

    #[tokio::test]
    async fn submit_sends_trimmed_text_verbatim() {
        let store = store();
        let (notifier, mut rx) = ChannelNotifier::new();
        let mut editor = SettingsEditor::new();
        editor.activate(&store).await.unwrap();

        let raw = "  {\"item\":   [\"name\"] \n\n";
        let outcome = editor.submit(raw, &store, &notifier).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].len(), 1);
        assert_eq!(writes[0][0].key, ALLOWED_KEY);
        assert_eq!(
            writes[0][0].value,
            SettingValue::Text("{\"item\":   [\"name\"]".into())
        );
        assert_eq!(rx.recv().await.unwrap().text, "Settings saved.");
    }

    #[tokio::test]
    async fn malformed_text_is_not_validated_before_sending() {
        let store = store();
        let (notifier, _rx) = ChannelNotifier::new();
        let mut editor = SettingsEditor::new();

        editor.submit("[\"a\",", &store, &notifier).await;

        assert_eq!(store.writes()[0][0].value, SettingValue::Text("[\"a\",".into()));
        assert_eq!(store.value(ALLOWED_KEY), Some(json!("[\"a\",")));
    }

    #[tokio::test]
    async fn rejection_shows_server_message_and_success_clears_it() {
        let store = store();
        let (notifier, mut rx) = ChannelNotifier::new();
        let mut editor = SettingsEditor::new();
        editor.activate(&store).await.unwrap();

        store.reject_writes(Some("X"));
        let outcome = editor.submit("[]", &store, &notifier).await;
        assert_eq!(outcome, SubmitOutcome::Rejected("X".into()));
        assert_eq!(editor.error_message(), Some("X"));
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(rx.try_recv().is_err());

        store.reject_writes(None);
        let outcome = editor.submit("[]", &store, &notifier).await;
        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(editor.error_message(), None);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn saved_text_comes_back_as_a_document() {
        let store = store();
        let (notifier, _rx) = ChannelNotifier::new();
        let mut editor = SettingsEditor::new();

        editor.submit(r#"["c"]"#, &store, &notifier).await;
        editor.activate(&store).await.unwrap();

        assert_eq!(editor.text(), "[\n    \"c\"\n]");
    }

    #[tokio::test]
    async fn activate_keeps_server_key_order() {
        let store = MemoryStore::new(json!({}))
            .with_value(ALLOWED_KEY, json!({"item": ["name"], "folder": ["name"]}));
        let mut editor = SettingsEditor::new();
        editor.activate(&store).await.unwrap();

        let item = editor.text().find("\"item\"").unwrap();
        let folder = editor.text().find("\"folder\"").unwrap();
        assert!(item < folder);
    }

    #[tokio::test]
    async fn restore_defaults_renders_without_writing() {
        let store = store();
        let mut editor = SettingsEditor::new();
        editor.activate(&store).await.unwrap();
        editor.set_text("edited");

        editor.restore_defaults(&store).await.unwrap();

        assert_eq!(editor.text(), "{\n    \"item\": [\n        \"name\",\n        \"meta\"\n    ]\n}");
        assert!(store.writes().is_empty());
        assert_eq!(store.value(ALLOWED_KEY), Some(json!(["a", "b"])));
    }

    #[test]
    fn superseded_read_is_dropped() {
        let mut editor = SettingsEditor::new();
        let first = editor.begin_read(ReadKind::Default);
        let second = editor.begin_read(ReadKind::Default);

        assert!(editor.complete_read(second, Some(json!(["second"]))));
        assert!(!editor.complete_read(first, Some(json!(["first"]))));

        assert_eq!(editor.allowed(), Some(&SettingValue::from(json!(["second"]))));
    }

    #[test]
    fn reads_completing_in_order_all_apply() {
        let mut editor = SettingsEditor::new();
        let first = editor.begin_read(ReadKind::Current);
        let second = editor.begin_read(ReadKind::Default);

        assert!(editor.complete_read(first, Some(json!(1))));
        assert!(editor.complete_read(second, Some(json!(2))));
        assert_eq!(editor.text(), "2");
        assert_eq!(second.kind(), ReadKind::Default);
    }

    #[test]
    fn begin_submit_clears_previous_error() {
        let mut editor = SettingsEditor::new();
        editor.complete_submit(Err(crate::SettingsError::Rejected {
            status: 400,
            message: "bad".into(),
        }));
        assert_eq!(editor.error_message(), Some("bad"));

        let update = editor.begin_submit(" x ");
        assert_eq!(editor.error_message(), None);
        assert_eq!(update.value, SettingValue::Text("x".into()));
    }
}
