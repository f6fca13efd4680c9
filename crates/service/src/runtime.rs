//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the seed dataset exists before the server starts serving.
pub async fn ensure_env(products_path: &str) -> anyhow::Result<()> {
    common::env::ensure_env(products_path).await
}
