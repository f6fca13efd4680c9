use std::{path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::info;

use crate::errors::ServiceError;

/// Generic JSON file-seeded list store.
///
/// Loads a `Vec<T>` from a JSON file once at construction and keeps it in
/// memory behind a single `RwLock`. Mutations are never written back; the
/// file is a seed, not a durable store. The write guard is the
/// serialization boundary for all mutating operations.
#[derive(Clone)]
pub struct JsonListStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> JsonListStore<T>
where
    T: serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Load the store from a seed file. A missing or malformed file is an
    /// error; callers treat it as fatal at startup.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let bytes = fs::read(&file_path)
            .await
            .map_err(|e| ServiceError::Seed(format!("cannot read {}: {}", file_path.display(), e)))?;
        let items: Vec<T> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Seed(format!("cannot parse {}: {}", file_path.display(), e)))?;
        info!(count = items.len(), path = %file_path.display(), "seed dataset loaded");
        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(items)) }))
    }

    /// List all entries in insertion order.
    pub async fn list(&self) -> Vec<T> {
        let items = self.inner.read().await;
        items.clone()
    }

    /// Linear scan for the first entry matching the predicate.
    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().find(|item| pred(item)).cloned()
    }

    /// Apply a mutation to the underlying list behind the write guard.
    pub async fn update_list<F>(&self, f: F) -> Result<(), ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<(), ServiceError>,
    {
        let mut items = self.inner.write().await;
        f(&mut items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_list_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn loads_lists_and_mutates() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        tokio::fs::write(&tmp, serde_json::to_vec(&["a", "b"])?).await?;
        let store = JsonListStore::<String>::new(&tmp).await?;

        assert_eq!(store.list().await, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.find(|s| s == "b").await, Some("b".to_string()));
        assert_eq!(store.find(|s| s == "z").await, None);

        store
            .update_list(|items| {
                items.push("c".into());
                Ok(())
            })
            .await?;
        assert_eq!(store.list().await.len(), 3);

        // mutations never touch the seed file
        let on_disk: Vec<String> = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(on_disk.len(), 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_or_malformed_seed_is_an_error() {
        let missing = temp_path();
        assert!(matches!(
            JsonListStore::<String>::new(&missing).await,
            Err(ServiceError::Seed(_))
        ));

        let bad = temp_path();
        tokio::fs::write(&bad, b"{not json").await.expect("write");
        assert!(matches!(
            JsonListStore::<String>::new(&bad).await,
            Err(ServiceError::Seed(_))
        ));
        let _ = tokio::fs::remove_file(&bad).await;
    }

    #[tokio::test]
    async fn update_list_error_leaves_list_untouched() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        tokio::fs::write(&tmp, serde_json::to_vec(&["a"])?).await?;
        let store = JsonListStore::<String>::new(&tmp).await?;

        let res = store
            .update_list(|_items| Err(ServiceError::not_found("entry")))
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list().await.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
