use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_defaults() {
    let config = RuntimeConfig::default();
    assert_eq!(config.program_name, "cinder");
    assert!(config.load_path.is_empty());
    assert!(config.builtin_globals);
}

#[test]
fn test_from_lookup_overrides() {
    let config = RuntimeConfig::from_lookup(|key| match key {
        PROGRAM_NAME_VAR => Some(String::from("script.rb")),
        LOAD_PATH_VAR => Some(String::from("lib::vendor/lib:")),
        _ => None,
    });

    assert_eq!(config.program_name, "script.rb");
    assert_eq!(config.load_path, vec!["lib", "vendor/lib"]);
}

#[test]
fn test_from_lookup_ignores_empty_program_name() {
    let config = RuntimeConfig::from_lookup(|key| (key == PROGRAM_NAME_VAR).then(String::new));
    assert_eq!(config.program_name, "cinder");
}

#[test]
fn test_builders() {
    let config = RuntimeConfig::default()
        .with_program_name("main")
        .with_load_path("lib")
        .with_load_path("test")
        .without_builtin_globals();

    assert_eq!(
        config,
        RuntimeConfig {
            program_name: String::from("main"),
            load_path: vec![String::from("lib"), String::from("test")],
            builtin_globals: false,
        }
    );
}
