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

pub mod config;
pub mod logger;

use std::{path::PathBuf, sync::OnceLock};
use thiserror::Error;
use env_config_parse::find_file;
use crate::config::LogConfig;

// Re-export log macros for convenient use in other modules
pub use log::{debug, error, info, trace, warn};

static LOGGER: OnceLock<logger::Logger> = OnceLock::new();

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Invalid logging configuration: {0}")]
    Config(String),

    #[error("Failed to initialize logger: {0}")]
    Init(String),

    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Logger not initialized")]
    NotInitialized,
}

/// Initialize logging system.
///
/// Uses the first `logging.yaml` found under the current directory, and falls back
/// to console logging at `info` when there is none.
///
/// # Example
/// ```no_run
/// common_log::init().expect("Failed to initialize logger");
/// log::info!("Logger initialized");
/// ```
pub fn init() -> Result<(), LogError> {
    match find_file("logging.yaml") {
        Ok(path) => init_with_yaml(path),
        Err(_) => init_with_config(&LogConfig::default()),
    }
}

/// Initialize logging system
///
/// # Arguments
/// * `config_path` - Path to the logging configuration file
pub fn init_with_yaml(config_path: impl Into<PathBuf>) -> Result<(), LogError> {
    let config = LogConfig::from_yaml(config_path)?;
    init_with_config(&config)
}

/// Initialize logging system with config
///
/// # Example
/// ```no_run
/// use common_log::config::LogConfig;
///
/// let config = LogConfig { level: "debug".to_string(), ..LogConfig::default() };
/// common_log::init_with_config(&config).expect("Failed to initialize logger");
/// ```
pub fn init_with_config(config: &LogConfig) -> Result<(), LogError> {
    if LOGGER.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    let logger = logger::Logger::new_from_config(config)?;
    if LOGGER.set(logger).is_err() {
        return Err(LogError::AlreadyInitialized);
    }
    Ok(())
}

/// Replace the running configuration, e.g. after a config file change.
pub fn reload(config: &LogConfig) -> Result<(), LogError> {
    LOGGER.get().ok_or(LogError::NotInitialized)?.reload(config)
}
