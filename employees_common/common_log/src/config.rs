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

use serde::Deserialize;
use std::path::PathBuf;
use crate::LogError;

pub const DEFAULT_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S:%3f)} {l} [{M}:{L}] - {m}{n}";

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Root level, used for everything without a more specific logger entry.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default = "default_console")]
    pub console: bool,
    /// Optional rolling file output
    #[serde(default)]
    pub file: Option<FileConfig>,
    /// Per-module overrides, e.g. `rdb: debug`
    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub log_directory: String,
    pub log_file_name: String,
    pub max_file_size: u64,
    pub max_zip_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub path_prefix: String,
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_console() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            pattern: default_pattern(),
            console: default_console(),
            file: None,
            loggers: Vec::new(),
        }
    }
}

impl LogConfig {
    pub fn from_yaml(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path)
            .map_err(|e| LogError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, LogError> {
        serde_yaml::from_str(content).map_err(|e| LogError::Config(e.to_string()))
    }

    pub fn get_logger_config(&self, path_prefix: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| path_prefix.starts_with(&l.path_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_str_defaults() {
        let config = LogConfig::from_yaml_str("level: debug").unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.pattern, DEFAULT_PATTERN);
        assert!(config.console);
        assert!(config.file.is_none());
        assert!(config.loggers.is_empty());
    }

    #[test]
    fn test_from_yaml_str_full() {
        let yaml = r#"
level: warn
console: false
file:
  log_directory: logs
  log_file_name: employees.log
  max_file_size: 10485760
  max_zip_count: 6
loggers:
  - path_prefix: rdb
    level: debug
"#;
        let config = LogConfig::from_yaml_str(yaml).unwrap();
        assert!(!config.console);
        let file = config.file.as_ref().unwrap();
        assert_eq!(file.log_file_name, "employees.log");
        assert_eq!(file.max_zip_count, 6);
        assert_eq!(config.get_logger_config("rdb::config").unwrap().level, "debug");
        assert!(config.get_logger_config("db_probe").is_none());
    }

    #[test]
    fn test_from_yaml_str_invalid() {
        let result = LogConfig::from_yaml_str("loggers: 12");
        assert!(matches!(result, Err(LogError::Config(_))));
    }
}
