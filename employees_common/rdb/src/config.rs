/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

//! Database Configuration Module
//! Resolves the connection URL from environment variables

use std::fmt;
use log::{error, info};
use env_config_parse::{load_dotenv, EnvSource, ProcessEnv};
use crate::conn_url::{normalize_scheme, ConnectionParts, CANONICAL_SCHEME, DEFAULT_PORT};
use crate::redact::{redact, RedactedUrl, PASSWORD_MASK};
use crate::DbError;

/// Full URL override, bypasses every component variable
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const EMPLOYEES_HOST: &str = "EMPLOYEES_HOST";
pub const EMPLOYEES_IP: &str = "EMPLOYEES_IP";
pub const EMPLOYEES_PORT: &str = "EMPLOYEES_PORT";

/// Host aliases, first non-empty wins
pub const HOST_VARS: [&str; 2] = [EMPLOYEES_HOST, EMPLOYEES_IP];

/// Name reported when neither host alias is set
pub const HOST_FIELD: &str = "EMPLOYEES_HOST/EMPLOYEES_IP";

/// Every variable included in the startup diagnostic dump
pub const RECOGNIZED_VARS: [&str; 7] = [
    DATABASE_URL,
    DB_USER,
    DB_PASSWORD,
    EMPLOYEES_HOST,
    EMPLOYEES_IP,
    DB_NAME,
    EMPLOYEES_PORT,
];

/// Where the final URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// `DATABASE_URL` was set
    Override,
    /// Assembled from the component variables
    Components,
}

/// The resolved connection target.
///
/// Built once at startup by [`resolve`] and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSpec {
    url: String,
    source: UrlSource,
}

impl ConnectionSpec {
    /// Loads `.env` (if any) and resolves against the process environment.
    pub fn from_env() -> Result<Self, DbError> {
        info!("get db config from env");
        load_dotenv();
        resolve(&ProcessEnv)
    }

    /// Final URL with the scheme normalized. Contains the password.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> UrlSource {
        self.source
    }

    /// Structured view, `None` for an override that is not in the canonical shape.
    pub fn parts(&self) -> Option<ConnectionParts> {
        ConnectionParts::parse(&self.url)
    }

    pub fn redacted(&self) -> RedactedUrl {
        redact(&self.url)
    }
}

impl fmt::Debug for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSpec")
            .field("url", &format_args!("{}", self.redacted()))
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves the connection target from `env`.
///
/// A non-empty `DATABASE_URL` is used verbatim (apart from scheme normalization) and the
/// component variables are not consulted. Otherwise the URL is assembled from
/// `DB_USER`, `DB_PASSWORD`, `EMPLOYEES_HOST` or `EMPLOYEES_IP`, `EMPLOYEES_PORT` and `DB_NAME`.
///
/// # Errors
///
/// * `DbError::MissingConfiguration` - listing every required component that is missing or empty.
pub fn resolve<E: EnvSource + ?Sized>(env: &E) -> Result<ConnectionSpec, DbError> {
    let spec = match env.get_non_empty(DATABASE_URL) {
        Some(url) => {
            info!("using {} override", DATABASE_URL);
            ConnectionSpec {
                url: normalize_scheme(&url).into_owned(),
                source: UrlSource::Override,
            }
        }
        None => match assemble_from_components(env) {
            Ok(url) => ConnectionSpec {
                url,
                source: UrlSource::Components,
            },
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        },
    };

    info!("Database URL: {}", spec.redacted());
    log_environment(env);
    Ok(spec)
}

fn assemble_from_components<E: EnvSource + ?Sized>(env: &E) -> Result<String, DbError> {
    let user = env.get_non_empty(DB_USER);
    let password = env.get_non_empty(DB_PASSWORD);
    let host = env.first_present(&HOST_VARS);
    let database = env.get_non_empty(DB_NAME);
    let port = env.get_non_empty(EMPLOYEES_PORT).unwrap_or_else(|| DEFAULT_PORT.to_string());

    // all four are checked before failing so the message names every gap
    let missing: Vec<String> = [
        (DB_USER, user.is_none()),
        (DB_PASSWORD, password.is_none()),
        (HOST_FIELD, host.is_none()),
        (DB_NAME, database.is_none()),
    ]
    .iter()
    .filter(|(_, absent)| *absent)
    .map(|(name, _)| name.to_string())
    .collect();

    match (user, password, host, database) {
        (Some(user), Some(password), Some(host), Some(database)) => {
            let parts = ConnectionParts {
                scheme: CANONICAL_SCHEME.to_string(),
                user,
                password,
                host,
                port,
                database,
            };
            Ok(parts.to_url())
        }
        _ => Err(DbError::MissingConfiguration(missing)),
    }
}

/// Logs each recognized variable. `DB_PASSWORD` is reported as set or not set only,
/// and `DATABASE_URL` is redacted because it embeds the password.
fn log_environment<E: EnvSource + ?Sized>(env: &E) {
    for (name, value) in describe_environment(env) {
        info!("{}: {}", name, value);
    }
}

pub(crate) fn describe_environment<E: EnvSource + ?Sized>(env: &E) -> Vec<(&'static str, String)> {
    RECOGNIZED_VARS
        .iter()
        .map(|&name| {
            let value = match (name, env.get(name)) {
                (DB_PASSWORD, _) if env.is_set(DB_PASSWORD) => PASSWORD_MASK.to_string(),
                (DB_PASSWORD, _) | (_, None) => "Not set".to_string(),
                (DATABASE_URL, Some(value)) => redact(&value).into_string(),
                (_, Some(value)) => value,
            };
            (name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_describe_environment_never_shows_password() {
        let vars = env(&[
            (DATABASE_URL, "postgres://u:hunter2@h/d"),
            (DB_PASSWORD, "hunter2"),
            (DB_USER, "u"),
        ]);
        let described = describe_environment(&vars);
        assert_eq!(described.len(), RECOGNIZED_VARS.len());
        for (name, value) in &described {
            assert!(!value.contains("hunter2"), "{} leaked the password", name);
        }
        let lookup: HashMap<_, _> = described.into_iter().collect();
        assert_eq!(lookup[DB_PASSWORD], PASSWORD_MASK);
        assert_eq!(lookup[DB_USER], "u");
        assert_eq!(lookup[EMPLOYEES_IP], "Not set");
        assert_eq!(lookup[DATABASE_URL], "postgres://u:********@h/d");
    }

    #[test]
    fn test_describe_environment_empty_password_not_set() {
        let vars = env(&[(DB_PASSWORD, "")]);
        let lookup: HashMap<_, _> = describe_environment(&vars).into_iter().collect();
        assert_eq!(lookup[DB_PASSWORD], "Not set");
    }

    #[test]
    fn test_spec_debug_hides_password() {
        let spec = resolve(&env(&[(DATABASE_URL, "postgresql://u:hunter2@h:5432/d")])).unwrap();
        let debug = format!("{:?}", spec);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("postgresql://u:********@h:5432/d"));
    }
}
