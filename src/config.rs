// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the typed [`AppConfig`] loaded
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8084` |
//! | `START_TIME` | ID allocator epoch (`YYYY-MM-DD`, UTC midnight) | `2024-01-01` |
//! | `MACHINE_ID` | ID allocator node id (0..=1023) | `1` |
//! | `JWT_SECRET` | HS256 signing secret | Required |
//! | `JWT_EXPIRE_HOURS` | Token lifetime in hours | `24` |
//! | `JWT_ISSUER` | Expected `iss` claim | `bluebell` |
//! | `PASSWORD_PEPPER` | Key for password hashing | Required |
//! | `SEED_COMMUNITIES` | `name:introduction;...` created at startup | empty |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::auth::{SigningSecret, TokenConfig};
use crate::id::AllocatorError;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const START_TIME_ENV: &str = "START_TIME";
pub const MACHINE_ID_ENV: &str = "MACHINE_ID";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_EXPIRE_HOURS_ENV: &str = "JWT_EXPIRE_HOURS";
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";
pub const PASSWORD_PEPPER_ENV: &str = "PASSWORD_PEPPER";
pub const SEED_COMMUNITIES_ENV: &str = "SEED_COMMUNITIES";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_PORT: u16 = 8084;
pub const DEFAULT_START_TIME: &str = "2024-01-01";
pub const DEFAULT_MACHINE_ID: i64 = 1;
pub const DEFAULT_EXPIRE_HOURS: i64 = 24;
pub const DEFAULT_ISSUER: &str = "bluebell";

/// One year. Longer lifetimes are treated as a misconfiguration.
pub const MAX_EXPIRE_HOURS: i64 = 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("ID allocator: {0}")]
    Allocator(#[from] AllocatorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// A community created at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCommunity {
    pub name: String,
    pub introduction: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub start_time: String,
    pub machine_id: i64,
    pub token: TokenConfig,
    pub password_pepper: String,
    pub seed_communities: Vec<SeedCommunity>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host: IpAddr = parse_or(get(HOST_ENV), HOST_ENV, || Ipv4Addr::UNSPECIFIED.into())?;
        let port: u16 = parse_or(get(PORT_ENV), PORT_ENV, || DEFAULT_PORT)?;

        let machine_id = parse_or(get(MACHINE_ID_ENV), MACHINE_ID_ENV, || DEFAULT_MACHINE_ID)?;
        let ttl_hours = parse_or(get(JWT_EXPIRE_HOURS_ENV), JWT_EXPIRE_HOURS_ENV, || {
            DEFAULT_EXPIRE_HOURS
        })?;
        if !(1..=MAX_EXPIRE_HOURS).contains(&ttl_hours) {
            return Err(ConfigError::Invalid {
                var: JWT_EXPIRE_HOURS_ENV,
                reason: format!("expected 1..={MAX_EXPIRE_HOURS}, got {ttl_hours}"),
            });
        }

        let secret = get(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
        let password_pepper =
            get(PASSWORD_PEPPER_ENV).ok_or(ConfigError::Missing(PASSWORD_PEPPER_ENV))?;

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            start_time: get(START_TIME_ENV).unwrap_or_else(|| DEFAULT_START_TIME.to_string()),
            machine_id,
            token: TokenConfig {
                secret: SigningSecret::new(secret),
                ttl_hours,
                issuer: get(JWT_ISSUER_ENV).unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            },
            password_pepper,
            seed_communities: parse_seed_communities(get(SEED_COMMUNITIES_ENV).as_deref())?,
            log_format,
        })
    }
}

fn parse_or<T, D>(raw: Option<String>, var: &'static str, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> T,
{
    match raw {
        None => Ok(default()),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("`{value}`: {e}"),
        }),
    }
}

fn parse_seed_communities(raw: Option<&str>) -> Result<Vec<SeedCommunity>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, introduction) = entry.split_once(':').unwrap_or((entry, ""));
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid {
                    var: SEED_COMMUNITIES_ENV,
                    reason: format!("entry `{entry}` has no name"),
                });
            }
            Ok(SeedCommunity {
                name: name.to_string(),
                introduction: introduction.trim().to_string(),
            })
        })
        .collect()
}
