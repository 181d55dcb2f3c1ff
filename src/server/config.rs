use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct WebServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub build_dir: PathBuf,
    pub log_level: String,
}

impl WebServerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").and_then(|h| h.parse().ok()).unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000),
            build_dir: lookup("WEB_BUILD_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("web-build")),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
