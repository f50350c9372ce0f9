#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use common_log::config::LogConfig;

    fn get_config_path() -> PathBuf {
        let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .parent()
            .unwrap()
            .to_path_buf();
        repo_root.join("db_probe").join("conf").join("logging.yaml")
    }

    #[test]
    fn test_shipped_logging_config_loads() {
        let config = LogConfig::from_yaml(get_config_path());
        assert!(config.is_ok(), "Failed to load logging.yaml: {:?}", config.err());

        let config = config.unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.file.as_ref().unwrap().log_file_name, "db_probe.log");
        assert_eq!(config.get_logger_config("rdb::session").unwrap().level, "debug");
        assert_eq!(config.get_logger_config("sqlx::query").unwrap().level, "warn");
    }
}
