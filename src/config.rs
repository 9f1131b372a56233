//! Runtime configuration sourced from the environment.

use crate::defaults;

/// Server settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the HTTP server binds to.
    pub port: u16,
}

impl ServerConfig {
    /// Reads configuration from the environment. `PORT` falls back to the
    /// default when unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok()),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.parse().ok())
        .unwrap_or(defaults::server::PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(Some("3000".to_string())), 3000);
        assert_eq!(parse_port(Some("not a port".to_string())), 8080);
        assert_eq!(parse_port(Some("70000".to_string())), 8080);
        assert_eq!(parse_port(None), 8080);
    }
}
