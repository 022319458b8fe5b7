use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub collectors: CollectorsConfig,
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory of the built dashboard (index.html + assets).
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".into(),
            static_dir: "static".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorsConfig {
    /// CPU usage measurement window per /api/system request. 0 is allowed (tests).
    pub cpu_sample_interval_ms: u64,
}

impl Default for CollectorsConfig {
    fn default() -> Self {
        Self {
            cpu_sample_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Budget shared by the version + list calls of /api/docker.
    pub snapshot_timeout_secs: u64,
    /// Budget for one detailed stats query.
    pub stats_timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            snapshot_timeout_secs: 10,
            stats_timeout_secs: 5,
        }
    }
}

impl CollectorsConfig {
    pub fn cpu_sample_interval(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_interval_ms)
    }
}

impl DockerConfig {
    pub fn snapshot_timeout(&self) -> Duration {
        Duration::from_secs(self.snapshot_timeout_secs)
    }

    pub fn stats_timeout(&self) -> Duration {
        Duration::from_secs(self.stats_timeout_secs)
    }
}

impl AppConfig {
    /// Reads CONFIG_FILE (default config.toml) if present, then applies the PORT override.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(anyhow::anyhow!("reading {}: {}", path, e)),
        };
        let port = std::env::var("PORT").ok();
        Self::load_with_port(&s, port.as_deref())
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        Self::load_with_port(s, None)
    }

    /// Parse, apply an optional PORT value, validate.
    pub fn load_with_port(s: &str, port: Option<&str>) -> anyhow::Result<Self> {
        let mut config: AppConfig = toml::from_str(s)?;
        if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
            config.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {:?}: {}", port, e))?;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.server.static_dir.is_empty(),
            "server.static_dir must be non-empty"
        );
        anyhow::ensure!(
            self.docker.snapshot_timeout_secs > 0,
            "docker.snapshot_timeout_secs must be > 0, got {}",
            self.docker.snapshot_timeout_secs
        );
        anyhow::ensure!(
            self.docker.stats_timeout_secs > 0,
            "docker.stats_timeout_secs must be > 0, got {}",
            self.docker.stats_timeout_secs
        );
        Ok(())
    }
}
