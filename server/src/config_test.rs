use super::*;

fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
}

#[test]
fn from_lookup_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn from_lookup_reads_overrides() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        (ENV_PORT, " 8080 "),
        (ENV_BIND_ADDR, "127.0.0.1"),
        (ENV_API_MESSAGE, "Hello"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.api_message, "Hello");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "  "), (ENV_API_MESSAGE, "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_message, DEFAULT_API_MESSAGE);
}

#[test]
fn invalid_port_is_an_error() {
    let err = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: ENV_PORT, value: "http".to_owned() });
}

#[test]
fn invalid_bind_addr_is_an_error() {
    let err = ServerConfig::from_lookup(lookup(&[(ENV_BIND_ADDR, "localhost")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: ENV_BIND_ADDR, .. }));
}
