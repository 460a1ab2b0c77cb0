#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Write;

use checkout_server::configs::Config;
use common_utils::consts::Env;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create config file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config file");
    file
}

const BASE: &str = r#"
[server]
host = "127.0.0.1"
port = 9000

[metrics]
host = "127.0.0.1"
port = 9001

[log.console]
enabled = false
level = "WARN"
"#;

#[test]
fn loads_explicit_config_file() {
    let file = config_file(&format!(
        "[common]\nenvironment = \"development\"\n{BASE}\n[gateways]\nenabled = [\"dodo\", \"paypal\"]\n"
    ));

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.gateways.enabled, vec!["dodo", "paypal"]);
}

#[test]
fn gateways_section_is_optional() {
    let file = config_file(&format!(
        "[common]\nenvironment = \"production\"\n{BASE}"
    ));

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();

    assert!(config.gateways.enabled.is_empty());
}

#[test]
fn rejects_unknown_environment() {
    let file = config_file(&format!("[common]\nenvironment = \"staging\"\n{BASE}"));

    let error = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap_err();

    assert!(error.to_string().contains("Invalid environment 'staging'"));
}

#[test]
fn default_path_points_at_workspace_config_directory() {
    let path = Config::default_path(Env::Development);

    assert!(path.ends_with("config/development.toml"));
}

#[test]
fn rejects_metrics_server_on_the_api_address() {
    let file = config_file(
        r#"
[common]
environment = "development"

[server]
host = "127.0.0.1"
port = 9000

[metrics]
host = "127.0.0.1"
port = 9000

[log.console]
enabled = false
level = "WARN"
"#,
    );

    let error = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap_err();

    assert!(error.to_string().contains("cannot share 127.0.0.1:9000"));
}

#[test]
fn server_socket_address_comes_from_config() {
    let file = config_file(&format!("[common]\nenvironment = \"development\"\n{BASE}"));

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(
        config.server.socket_addr().unwrap(),
        "127.0.0.1:9000".parse::<std::net::SocketAddr>().unwrap()
    );
}
