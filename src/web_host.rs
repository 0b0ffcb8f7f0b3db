//! `--http`, `--httpPassword` and `--httpBearer` handling.

use crate::config::{WebAuth, WebHostSection, WebUser};
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Parse a `[host][:port]` listen address.
///
/// An empty host falls back to [`DEFAULT_HTTP_HOST`]. A missing or zero port
/// means "pick a random port".
pub fn parse_listen(spec: &str) -> Result<(String, Option<u16>)> {
    let (host, port) = spec.split_once(':').unwrap_or((spec, ""));

    let host = if host.trim().is_empty() {
        DEFAULT_HTTP_HOST.to_string()
    } else {
        host.trim().to_string()
    };

    let port = match port.trim() {
        "" => None,
        p => match p.parse::<u16>() {
            Ok(0) => None,
            Ok(n) => Some(n),
            Err(_) => {
                return Err(ConfigError::InvalidOption {
                    option: "--http",
                    message: format!("Invalid port number: {}", p),
                })
            }
        },
    };

    Ok((host, port))
}

/// Split a `user:secret` credential at the first ':'.
fn parse_credential(option: &'static str, value: &str) -> Result<(String, String)> {
    match value.split_once(':') {
        Some((user, secret)) if !user.is_empty() => Ok((user.to_string(), secret.to_string())),
        Some(_) => Err(ConfigError::InvalidOption {
            option,
            message: "user name must not be empty".to_string(),
        }),
        None => Err(ConfigError::InvalidOption {
            option,
            message: format!("expected user:secret, got '{}'", value),
        }),
    }
}

/// Build the web host section from the command line.
///
/// Returns `None` when `--http` was not given; credentials are then ignored.
pub fn from_flags(
    http: Option<&str>,
    password: Option<&str>,
    bearer: Option<&str>,
) -> Result<Option<WebHostSection>> {
    let mut users: BTreeMap<String, WebUser> = BTreeMap::new();

    if let Some(value) = password {
        let (user, secret) = parse_credential("--httpPassword", value)?;
        users.entry(user).or_default().password = Some(secret);
    }
    if let Some(value) = bearer {
        let (user, secret) = parse_credential("--httpBearer", value)?;
        users.entry(user).or_default().bearer_token = Some(secret);
    }

    let Some(listen) = http else {
        if !users.is_empty() {
            warn!("HTTP credentials given without --http, ignoring them");
        }
        return Ok(None);
    };

    let (host, port) = parse_listen(listen)?;
    let auth = (!users.is_empty()).then_some(WebAuth { users });

    Ok(Some(WebHostSection { host, port, auth }))
}
