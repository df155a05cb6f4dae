use std::net::SocketAddr;

use anyhow::Context;

use crate::format::Locale;

pub const ADDR_ENV: &str = "FAMILY_FINANCE_ADDR";
pub const LOCALE_ENV: &str = "FAMILY_FINANCE_DEFAULT_LOCALE";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub default_locale: Locale,
}

impl ServerConfig {
    /// Resolves settings from explicit overrides, then the environment (and
    /// `.env`), then defaults.
    pub fn resolve(addr: Option<&str>, locale: Option<&str>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let env_addr = std::env::var(ADDR_ENV).ok();
        let env_locale = std::env::var(LOCALE_ENV).ok();
        Self::from_sources(
            addr.or(env_addr.as_deref()),
            locale.or(env_locale.as_deref()),
        )
    }

    fn from_sources(addr: Option<&str>, locale: Option<&str>) -> anyhow::Result<Self> {
        let raw_addr = addr.unwrap_or(DEFAULT_ADDR);
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .with_context(|| format!("invalid listen address '{raw_addr}'"))?;
        let default_locale = match locale {
            Some(tag) => tag.parse::<Locale>().map_err(anyhow::Error::msg)?,
            None => Locale::default(),
        };
        Ok(Self {
            listen_addr,
            default_locale,
        })
    }
}
