//! Environment configuration.
//!
//! Everything comes from environment variables, optionally seeded from a
//! `.env.local` / `.env` file at the repository root.

use std::time::Duration;

/// Process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub neo4j_database: String,
    /// `None` disables the per-session timeout.
    pub query_timeout: Option<Duration>,
    pub server_host: String,
    pub server_port: u16,
    /// Comma-separated origins, or `*` for any.
    pub cors_allowed_origins: String,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .map(|raw| {
                raw.parse().unwrap_or_else(|_| {
                    tracing::warn!(value = %raw, "Invalid SERVER_PORT, using 3000");
                    3000
                })
            })
            .unwrap_or(3000);

        let query_timeout = lookup("NEO4J_QUERY_TIMEOUT_MS").and_then(|raw| match raw.parse::<u64>() {
            Ok(0) => None,
            Ok(ms) => Some(Duration::from_millis(ms)),
            Err(_) => {
                tracing::warn!(value = %raw, "Invalid NEO4J_QUERY_TIMEOUT_MS, timeout disabled");
                None
            }
        });

        Self {
            neo4j_uri: var("NEO4J_URI", "bolt://localhost:7687"),
            neo4j_user: var("NEO4J_USER", "neo4j"),
            neo4j_password: var("NEO4J_PASSWORD", "password"),
            neo4j_database: var("NEO4J_DATABASE", "neo4j"),
            query_timeout,
            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS", "*"),
        }
    }
}

/// Load `.env.local` then `.env` from the repository root, if present.
/// Variables already set in the process environment win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.neo4j_uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j_user, "neo4j");
        assert_eq!(config.neo4j_database, "neo4j");
        assert_eq!(config.query_timeout, None);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cors_allowed_origins, "*");
    }

    #[test]
    fn port_falls_back_to_port_var() {
        assert_eq!(config_from(&[("PORT", "8080")]).server_port, 8080);
        assert_eq!(
            config_from(&[("PORT", "8080"), ("SERVER_PORT", "9000")]).server_port,
            9000
        );
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[("SERVER_PORT", "http"), ("NEO4J_QUERY_TIMEOUT_MS", "soon")]);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.query_timeout, None);
    }

    #[test]
    fn zero_timeout_disables_and_positive_enables() {
        assert_eq!(config_from(&[("NEO4J_QUERY_TIMEOUT_MS", "0")]).query_timeout, None);
        assert_eq!(
            config_from(&[("NEO4J_QUERY_TIMEOUT_MS", "2500")]).query_timeout,
            Some(Duration::from_millis(2500))
        );
    }
}
