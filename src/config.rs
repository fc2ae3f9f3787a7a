use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds, e.g. "127.0.0.1:42069".
    pub listen_addr: String,
    /// Initial size of each connection's read buffer. Grows on demand.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:42069".to_string(),
            read_buffer_size: 1024,
        }
    }
}

impl Config {
    /// Loads the YAML file named by `CONFIG`, if set, then applies the
    /// `LISTEN` and `READ_BUFFER_SIZE` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_yaml(&raw)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        if let Ok(size) = std::env::var("READ_BUFFER_SIZE") {
            cfg.server.read_buffer_size = size
                .parse()
                .with_context(|| format!("invalid READ_BUFFER_SIZE {:?}", size))?;
        }

        cfg.normalize();
        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = serde_yaml::from_str(raw).context("invalid config")?;
        cfg.normalize();
        Ok(cfg)
    }

    fn normalize(&mut self) {
        // Single-byte reads still make progress.
        self.server.read_buffer_size = self.server.read_buffer_size.max(1);
    }
}
