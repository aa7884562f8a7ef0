//! Environment variable names and secret resolution.
//!
//! Plain settings are overridden with `STOREFRONT__SECTION__KEY`, which the
//! `config` crate reads directly. Secrets stay out of config files: a value
//! of `"secret_from_env"` is replaced with `STOREFRONT_SECRET_SECTION_KEY`,
//! e.g. `chat.auth_token` comes from `STOREFRONT_SECRET_CHAT_AUTH_TOKEN`.

use serde_json::Value;
use std::env;
use tracing::{debug, warn};

use crate::models::SECRET_FROM_ENV;

pub const DEFAULT_PREFIX: &str = "STOREFRONT";

pub const SECRET_PREFIX: &str = "STOREFRONT_SECRET";

/// Separator between prefix, section and key of plain overrides.
pub const CONFIG_SEPARATOR: &str = "__";

/// Prefix of plain overrides, `PREFIX` when set.
pub fn config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// `["chat", "auth_token"]` -> `STOREFRONT_SECRET_CHAT_AUTH_TOKEN`.
pub fn secret_env_var(path: &[String]) -> String {
    let mut name = SECRET_PREFIX.to_string();
    for segment in path {
        name.push('_');
        name.push_str(&segment.to_uppercase());
    }
    name
}

/// Replaces every `"secret_from_env"` marker in `value` using `lookup`.
/// Markers without a value are left in place, so consumers see the feature
/// as unconfigured. Returns the number of replaced markers.
pub fn inject_secrets<F>(value: &mut Value, lookup: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    fn walk<F: Fn(&str) -> Option<String>>(path: &mut Vec<String>, node: &mut Value, lookup: &F) -> usize {
        match node {
            Value::Object(map) => map
                .iter_mut()
                .map(|(key, child)| {
                    path.push(key.clone());
                    let replaced = walk(path, child, lookup);
                    path.pop();
                    replaced
                })
                .sum(),
            Value::String(s) if s == SECRET_FROM_ENV => {
                let name = secret_env_var(path);
                match lookup(&name) {
                    Some(secret) => {
                        debug!("Resolved {} from {}", path.join("."), name);
                        *s = secret;
                        1
                    }
                    None => {
                        warn!("{} is set to {} but {} is not defined", path.join("."), SECRET_FROM_ENV, name);
                        0
                    }
                }
            }
            _ => 0,
        }
    }

    walk(&mut Vec::new(), value, &lookup)
}

/// [`inject_secrets`] against the process environment.
pub fn inject_env_vars(value: &mut Value) -> usize {
    inject_secrets(value, |name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_secret_env_var() {
        assert_eq!(
            secret_env_var(&path(&["chat", "auth_token"])),
            "STOREFRONT_SECRET_CHAT_AUTH_TOKEN"
        );
        assert_eq!(
            secret_env_var(&path(&["api", "api_key"])),
            "STOREFRONT_SECRET_API_API_KEY"
        );
    }

    #[test]
    fn test_inject_secrets_replaces_markers_only() {
        let mut value = json!({
            "server": { "host": "127.0.0.1" },
            "api": { "base_url": "http://h", "api_key": "secret_from_env" },
            "chat": { "auth_token": "secret_from_env" }
        });
        let replaced = inject_secrets(&mut value, |name| {
            (name == "STOREFRONT_SECRET_API_API_KEY").then(|| "k-123".to_string())
        });

        assert_eq!(replaced, 1);
        assert_eq!(value["api"]["api_key"], "k-123");
        assert_eq!(value["api"]["base_url"], "http://h");
        assert_eq!(value["server"]["host"], "127.0.0.1");
        // Unresolved markers stay as they are
        assert_eq!(value["chat"]["auth_token"], "secret_from_env");
    }

    #[test]
    fn test_bare_names_are_not_consulted() {
        let mut value = json!({ "chat": { "auth_token": "secret_from_env" } });
        let replaced = inject_secrets(&mut value, |name| {
            (name == "CHAT_AUTH_TOKEN").then(|| "old-style".to_string())
        });
        assert_eq!(replaced, 0);
        assert_eq!(value["chat"]["auth_token"], "secret_from_env");
    }
}
