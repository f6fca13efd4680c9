use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_products_path")]
    pub products_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { products_path: default_products_path() }
    }
}

fn default_products_path() -> String {
    "data/products.json".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.data.normalize_from_env();
        self.data.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DataConfig {
    pub fn normalize_from_env(&mut self) {
        // An empty TOML value falls back to the PRODUCTS_PATH env var
        if self.products_path.trim().is_empty() {
            if let Ok(path) = std::env::var("PRODUCTS_PATH") {
                self.products_path = path;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.products_path.trim().is_empty() {
            return Err(anyhow!(
                "data.products_path is empty; provide it in config.toml or via PRODUCTS_PATH"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_process_contract() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.data.products_path, "data/products.json");
    }

    #[test]
    fn parses_and_normalizes_toml() {
        let mut cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = ""
            port = 8080

            [data]
            products_path = "fixtures/products.json"
        "#,
        )
        .expect("parse");
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.data.products_path, "fixtures/products.json");
    }

    #[test]
    fn zero_port_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
