//! Tests for the configuration loader

use super::*;
use std::fs;

// ==================== SETTINGS PARSING TESTS ====================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_load_config_from_toml() {
        let toml = r#"
[validation]
enabled = true
required_attributes = false
suppressed_blocks = ["provider", "backend"]

[schema]
path = "schema/aws.toml"
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert!(settings.validation.enabled);
        assert!(!settings.validation.required_attributes);
        assert_eq!(settings.validation.suppressed_blocks, vec!["provider", "backend"]);
        assert_eq!(settings.schema.path.as_deref(), Some("schema/aws.toml"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings = Settings::from_toml_str("[validation]\nenabled = false\n").unwrap();

        assert!(!settings.validation.enabled);
        // Missing fields use defaults
        assert!(settings.validation.required_attributes);
        assert_eq!(settings.validation.suppressed_blocks, vec!["provider"]);
        assert!(settings.schema.path.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Settings::from_toml_str("[validation]\nenabled = \"sometimes\"\n").is_err());
    }
}

// ==================== LOADING TESTS ====================

mod loading_tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_workspace_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[validation]\nsuppressed_blocks = []\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert!(settings.validation.suppressed_blocks.is_empty());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[validation\n").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_builtin_schema() {
        let dir = tempfile::tempdir().unwrap();
        let schema = Settings::default().load_schema(dir.path()).unwrap();
        assert_eq!(schema, hclsense_validate::BodySchema::builtin().unwrap());
    }

    #[test]
    fn test_load_schema_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("schema")).unwrap();
        fs::write(
            dir.path().join("schema/custom.toml"),
            "[blocks.widget.body.attributes.size]\nrequired = true\n",
        )
        .unwrap();

        let settings =
            Settings::from_toml_str("[schema]\npath = \"schema/custom.toml\"\n").unwrap();
        let schema = settings.load_schema(dir.path()).unwrap();

        assert!(schema.blocks["widget"].body.attributes["size"].is_required);
    }

    #[test]
    fn test_load_schema_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_toml_str("[schema]\npath = \"nope.toml\"\n").unwrap();

        let err = settings.load_schema(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Schema(_)));
    }
}

// ==================== ENGINE TESTS ====================

mod engine_tests {
    use super::*;
    use hclsense_validate::BodySchema;

    fn diagnostics_for(settings: &Settings, source: &str) -> usize {
        let engine = settings.build_engine();
        let mut file = hclsense_core::parse(source, "main.tf").unwrap();
        engine.validate(&mut file, Some(&BodySchema::builtin().unwrap())).len()
    }

    #[test]
    fn test_default_engine() {
        let engine = Settings::default().build_engine();
        assert_eq!(engine.validator_names(), vec!["missing-required-attribute"]);
    }

    #[test]
    fn test_disabled_validation() {
        let settings = Settings::from_toml_str("[validation]\nenabled = false\n").unwrap();
        assert_eq!(settings.build_engine().validator_count(), 0);

        let settings =
            Settings::from_toml_str("[validation]\nrequired_attributes = false\n").unwrap();
        assert_eq!(settings.build_engine().validator_count(), 0);
    }

    #[test]
    fn test_suppressed_blocks_configurable() {
        let source = "module \"net\" {\n}\n";

        assert_eq!(diagnostics_for(&Settings::default(), source), 1);

        let settings =
            Settings::from_toml_str("[validation]\nsuppressed_blocks = [\"module\"]\n").unwrap();
        assert_eq!(diagnostics_for(&settings, source), 0);
    }
}
