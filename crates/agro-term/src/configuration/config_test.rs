use std::io::Write;

use clap::Arg;
use clap::Command;

use super::*;

fn command() -> Command {
    return Command::new("agro")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the advisory API"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .help("Interface language")
                .value_parser(["es", "en"]),
        )
        .arg(Arg::new("storage-file").long("storage-file").help("Storage file"))
        .arg(Arg::new("config-file").long("config-file").help("Config file"))
        .arg(
            Arg::new("request-timeout")
                .long("request-timeout")
                .help("Request timeout in seconds, 0 disables it"),
        );
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    return file;
}

#[tokio::test]
async fn it_loads_defaults_without_a_config_file() {
    let cmd = command();
    let matches = cmd
        .clone()
        .get_matches_from(["agro", "--config-file", "/nonexistent/agro/config.toml"]);

    let config = Config::load(&cmd, &[&matches]).await.unwrap();

    assert_eq!(config.api_url(), "http://localhost:3000");
    assert_eq!(config.language(), None);
    assert_eq!(config.request_timeout().unwrap(), None);
    assert_eq!(config.get(ConfigKey::ConfigFile), "/nonexistent/agro/config.toml");
}

#[tokio::test]
async fn it_applies_file_then_arguments() {
    let file = config_file("api-url = \"http://api.agro.test\"\nlanguage = \"en\"\nrequest-timeout = 15\n");
    let cmd = command();
    let path = file.path().to_str().unwrap().to_string();
    let matches = cmd.clone().get_matches_from([
        "agro",
        "--config-file",
        path.as_str(),
        "--api-url",
        "http://localhost:4000",
    ]);

    let config = Config::load(&cmd, &[&matches]).await.unwrap();

    assert_eq!(config.api_url(), "http://localhost:4000");
    assert_eq!(config.language(), Some(Language::En));
    assert_eq!(
        config.request_timeout().unwrap(),
        Some(Duration::from_secs(15))
    );
}

#[tokio::test]
async fn it_rejects_invalid_possible_values() {
    let file = config_file("language = \"fr\"\n");
    let cmd = command();
    let path = file.path().to_str().unwrap().to_string();
    let matches = cmd
        .clone()
        .get_matches_from(["agro", "--config-file", path.as_str()]);

    let err = Config::load(&cmd, &[&matches]).await.unwrap_err();

    assert!(err.to_string().contains("invalid value for key 'language'"));
}

#[test]
fn it_rejects_a_non_numeric_timeout() {
    let mut config = Config::defaults();
    config.set(ConfigKey::RequestTimeout, "soon");
    assert!(config.request_timeout().is_err());
}

#[test]
fn it_serializes_defaults() {
    let toml_str = Config::serialize_default(&command());

    assert!(toml_str.contains("# Base URL of the advisory API\napi-url = \"http://localhost:3000\""));
    assert!(toml_str.contains("[possible values: es, en]\n# language = \"\""));
    assert!(toml_str.contains("request-timeout = 0"));
    assert!(!toml_str.contains("config-file"));
}
