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

use std::collections::HashMap;
use std::env;
use std::path::Path;
use log::{debug, info};

/// A read-only view of key/value configuration, usually the process environment.
pub trait EnvSource {
    /// Raw lookup. `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Lookup that treats an empty value the same as an absent one.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Returns the first key among `keys` with a non-empty value.
    fn first_present(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get_non_empty(key))
    }

    fn is_set(&self, key: &str) -> bool {
        self.get_non_empty(key).is_some()
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // non-unicode values are treated as unset
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|value| value.to_string())
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Loads `.env` from the current directory or one of its parents.
///
/// A missing file is not an error: deployments usually inject the variables directly.
/// Variables already present in the process environment are never overwritten.
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            info!("load .env file: {}", path.display());
            true
        }
        Err(e) => {
            debug!(".env not loaded: {}", e);
            false
        }
    }
}

/// Loads an explicit dotenv file.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<(), String> {
    let path = path.as_ref();
    dotenv::from_path(path).map_err(|e| format!("Failed to load env file {}: {}", path.display(), e))?;
    info!("load env file: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HashMap<&'static str, &'static str> {
        HashMap::from([("PRIMARY", ""), ("SECONDARY", "10.0.0.7"), ("NAME", "employees")])
    }

    #[test]
    fn test_get_non_empty_skips_empty_values() {
        let env = source();
        assert_eq!(EnvSource::get(&env, "PRIMARY"), Some(String::new()));
        assert_eq!(env.get_non_empty("PRIMARY"), None);
        assert_eq!(env.get_non_empty("NAME"), Some("employees".to_string()));
    }

    #[test]
    fn test_first_present_falls_through_empty_and_absent() {
        let env = source();
        assert_eq!(env.first_present(&["MISSING", "PRIMARY", "SECONDARY"]), Some("10.0.0.7".to_string()));
        assert_eq!(env.first_present(&["MISSING", "PRIMARY"]), None);
    }

    #[test]
    fn test_is_set() {
        let env = source();
        assert!(env.is_set("NAME"));
        assert!(!env.is_set("PRIMARY"));
        assert!(!env.is_set("MISSING"));
    }

    #[test]
    fn test_load_env_file_missing_path() {
        let result = load_env_file("/definitely/not/here/.env");
        assert!(result.unwrap_err().contains("/definitely/not/here/.env"));
    }
}
