//! Module title storage shared between curriculum and lesson generation.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Title used for lessons whose module has not been seen in any curriculum.
pub const DEFAULT_MODULE_TITLE: &str = "Solar Panel Installation";

/// Maps module identifiers to the titles produced by curriculum generation.
#[async_trait]
pub trait ModuleTitleStore: Send + Sync {
    async fn get(&self, module_id: &str) -> Option<String>;

    /// Records `title` for `module_id`, replacing any previous title.
    async fn set(&self, module_id: &str, title: &str);

    /// The stored title, or [`DEFAULT_MODULE_TITLE`] when none is known.
    async fn title_or_default(&self, module_id: &str) -> String {
        self.get(module_id)
            .await
            .unwrap_or_else(|| DEFAULT_MODULE_TITLE.to_string())
    }
}

/// Unbounded in-process store. Entries live until the process exits.
#[derive(Debug, Default)]
pub struct InMemoryTitleStore {
    titles: RwLock<HashMap<String, String>>,
}

impl InMemoryTitleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModuleTitleStore for InMemoryTitleStore {
    async fn get(&self, module_id: &str) -> Option<String> {
        self.titles.read().await.get(module_id).cloned()
    }

    async fn set(&self, module_id: &str, title: &str) {
        self.titles
            .write()
            .await
            .insert(module_id.to_string(), title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_module_falls_back() {
        let store = InMemoryTitleStore::new();
        assert_eq!(store.get("m9").await, None);
        assert_eq!(store.title_or_default("m9").await, DEFAULT_MODULE_TITLE);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = InMemoryTitleStore::new();
        store.set("m1", "Sunlight Basics").await;
        store.set("m1", "Sunlight and Shade").await;
        assert_eq!(store.title_or_default("m1").await, "Sunlight and Shade");
    }

    #[tokio::test]
    async fn test_concurrent_writers_keep_every_key() {
        let store = Arc::new(InMemoryTitleStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.set(&format!("m{i}"), &format!("Module {i}")).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..32 {
            assert_eq!(
                store.get(&format!("m{i}")).await,
                Some(format!("Module {i}"))
            );
        }
    }
}
