//! Environment/runtime helpers
//!
//! Sanity checks to ensure the seed dataset is present at startup.

/// Fail fast when the seed dataset is missing; the service must not come
/// up with an empty collection it cannot rebuild.
pub async fn ensure_env(products_path: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(products_path).await.is_err() {
        anyhow::bail!("seed dataset {products_path} not found; refusing to start without it");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_seed_is_an_error() {
        let path = std::env::temp_dir().join(format!("ensure_env_{}.json", uuid::Uuid::new_v4()));
        assert!(ensure_env(path.to_str().unwrap()).await.is_err());

        tokio::fs::write(&path, b"[]").await.unwrap();
        assert!(ensure_env(path.to_str().unwrap()).await.is_ok());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
