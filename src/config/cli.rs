use crate::config::ServerConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "item-library-api")]
#[command(about = "Read-only HTTP API over the remote game item catalog")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind (overrides [server].host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides [server].port)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Catalog cache TTL in seconds, 0 disables caching (overrides [cache].ttl_seconds)
    #[arg(long)]
    pub cache_ttl: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// 載入設定檔 (若有指定) 並套用命令列覆蓋
    pub fn load_config(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache.ttl_seconds = ttl;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let args = CliArgs::try_parse_from([
            "item-library-api",
            "--host",
            "127.0.0.1",
            "--port",
            "8088",
            "--cache-ttl",
            "60",
        ])
        .unwrap();

        let config = args.load_config().unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8088");
        assert_eq!(config.cache.ttl_seconds, 60);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = CliArgs::try_parse_from([
            "item-library-api",
            "--config",
            "/definitely/not/here.toml",
        ])
        .unwrap();

        assert!(args.load_config().is_err());
    }
}
