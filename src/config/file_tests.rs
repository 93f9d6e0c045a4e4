//! Tests for configuration file handling.

use tempfile::TempDir;

use super::file::{ConfigFile, ConfigSource, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = ConfigFile::parse(
            r#"
            check_interval = 60
            ip_apis = ["https://a.example/ip", "https://b.example/ip"]
            location_api = "https://geo.example/{ip}"
        "#,
        )
        .unwrap();

        assert_eq!(config.check_interval, 60);
        assert_eq!(
            config.ip_apis,
            vec!["https://a.example/ip", "https://b.example/ip"]
        );
        assert_eq!(config.location_api, "https://geo.example/{ip}");
    }

    #[test]
    fn absent_keys_take_defaults() {
        let config = ConfigFile::parse("check_interval = 30").unwrap();

        assert_eq!(config.check_interval, 30);
        assert_eq!(config.ip_apis, ConfigFile::default().ip_apis);
        assert_eq!(config.location_api, ConfigFile::default().location_api);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = ConfigFile::parse("check_interval = 30\ntheme = \"dark\"").unwrap();
        assert_eq!(config.check_interval, 30);
    }

    #[test]
    fn wrong_type_is_error() {
        assert!(ConfigFile::parse(r#"check_interval = "five minutes""#).is_err());
    }

    #[test]
    fn negative_interval_is_error() {
        assert!(ConfigFile::parse("check_interval = -5").is_err());
    }
}

mod defaults {
    use super::*;

    #[test]
    fn default_values() {
        let config = ConfigFile::default();

        assert_eq!(config.check_interval, 300);
        assert_eq!(config.ip_apis.len(), 3);
        assert_eq!(config.ip_apis[0], "https://api.ipify.org?format=json");
        assert!(config.location_api.contains("{ip}"));
    }

    #[test]
    fn template_parses_to_defaults() {
        let config = ConfigFile::parse(&default_config_template()).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn template_has_comments() {
        let template = default_config_template();
        assert!(template.starts_with("# ipwatch configuration file"));
        assert!(template.contains("{ip} is replaced"));
    }
}

mod load_or_init {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("ipwatch.toml");

        let (config, source) = ConfigFile::load_or_init(&path).unwrap();

        assert_eq!(source, ConfigSource::Created);
        assert_eq!(config, ConfigFile::default());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            default_config_template()
        );
    }

    #[test]
    fn created_file_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ipwatch.toml");

        ConfigFile::load_or_init(&path).unwrap();
        let (config, source) = ConfigFile::load_or_init(&path).unwrap();

        assert_eq!(source, ConfigSource::Loaded);
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn existing_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ipwatch.toml");
        std::fs::write(&path, "check_interval = 42").unwrap();

        let (config, source) = ConfigFile::load_or_init(&path).unwrap();

        assert_eq!(source, ConfigSource::Loaded);
        assert_eq!(config.check_interval, 42);
    }

    #[test]
    fn unparseable_file_falls_back_and_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ipwatch.toml");
        std::fs::write(&path, "check_interval = [[[").unwrap();

        let (config, source) = ConfigFile::load_or_init(&path).unwrap();

        assert!(matches!(source, ConfigSource::Defaulted { .. }));
        assert_eq!(config, ConfigFile::default());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "check_interval = [[["
        );
    }

    #[test]
    fn unwritable_location_is_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let result = ConfigFile::load_or_init(&blocker.join("ipwatch.toml"));

        assert!(result.is_err());
    }
}
