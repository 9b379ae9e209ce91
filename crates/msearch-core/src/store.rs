use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::SettingsResult;
use crate::setting::SettingUpdate;

/// Remote key/value settings service.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the current values of `keys`. Keys without a value may be
    /// missing from the result or mapped to `null`.
    async fn get_settings(&self, keys: &[&str]) -> SettingsResult<Map<String, Value>>;

    /// Persist a batch of settings. Rejections carry the server message.
    async fn put_settings(&self, updates: &[SettingUpdate]) -> SettingsResult<()>;

    /// Read the server-computed default allow-list through the plugin's
    /// own route.
    async fn get_default(&self) -> SettingsResult<Value>;
}

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;

#[cfg(any(test, feature = "test-util"))]
mod memory {
    use std::sync::{Mutex, MutexGuard};

    use super::*;
    use crate::error::SettingsError;
    use crate::setting::SettingValue;

    /// The host decodes string values that hold JSON before storing them.
    fn stored_form(value: &SettingValue) -> Value {
        match value {
            SettingValue::Text(text) => {
                serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()))
            }
            SettingValue::Document(doc) => doc.clone(),
        }
    }

    #[derive(Default)]
    struct State {
        values: Map<String, Value>,
        default: Value,
        rejection: Option<String>,
        writes: Vec<Vec<SettingUpdate>>,
    }

    /// In-process store with the same contract as the HTTP one.
    #[derive(Default)]
    pub struct MemoryStore {
        state: Mutex<State>,
    }

    impl MemoryStore {
        pub fn new(default: Value) -> Self {
            Self {
                state: Mutex::new(State {
                    default,
                    ..State::default()
                }),
            }
        }

        pub fn with_value(self, key: &str, value: Value) -> Self {
            self.lock().values.insert(key.to_string(), value);
            self
        }

        /// Make every following write fail with `message` until cleared.
        pub fn reject_writes(&self, message: Option<&str>) {
            self.lock().rejection = message.map(str::to_string);
        }

        pub fn value(&self, key: &str) -> Option<Value> {
            self.lock().values.get(key).cloned()
        }

        /// Every accepted or rejected write batch, in arrival order.
        pub fn writes(&self) -> Vec<Vec<SettingUpdate>> {
            self.lock().writes.clone()
        }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl SettingsStore for MemoryStore {
        async fn get_settings(&self, keys: &[&str]) -> SettingsResult<Map<String, Value>> {
            let state = self.lock();
            Ok(keys
                .iter()
                .filter_map(|k| state.values.get(*k).map(|v| (k.to_string(), v.clone())))
                .collect())
        }

        async fn put_settings(&self, updates: &[SettingUpdate]) -> SettingsResult<()> {
            let mut state = self.lock();
            state.writes.push(updates.to_vec());
            if let Some(message) = state.rejection.clone() {
                return Err(SettingsError::Rejected {
                    status: 400,
                    message,
                });
            }
            for update in updates {
                state.values.insert(update.key.clone(), stored_form(&update.value));
            }
            Ok(())
        }

        async fn get_default(&self) -> SettingsResult<Value> {
            Ok(self.lock().default.clone())
        }
    }
}
