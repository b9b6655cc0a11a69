//! Configuration for the Crisp client.
//!
//! All configuration comes from the process environment. Credentials are read
//! once at startup and passed by reference to everything that needs them.

use std::env;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Environment variable holding the plugin identifier.
pub const IDENTIFIER_VAR: &str = "CRISP_IDENTIFIER";

/// Environment variable holding the plugin secret key.
pub const KEY_VAR: &str = "CRISP_KEY";

/// Environment variable holding the website identifier.
pub const WEBSITE_ID_VAR: &str = "CRISP_WEBSITE_ID";

/// Optional environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "CRISP_API_URL";

/// Optional environment variable holding the log filter.
pub const LOG_VAR: &str = "CRISP_LOG";

/// Every environment variable that must be set, in display order.
pub const REQUIRED_ENV_VARS: [&str; 3] = [IDENTIFIER_VAR, KEY_VAR, WEBSITE_ID_VAR];

/// Default scheme and host of the Crisp REST API.
pub const DEFAULT_API_URL: &str = "https://api.crisp.chat";

/// Plugin credentials for the Crisp REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Plugin token identifier.
    pub identifier: String,
    /// Plugin token key.
    pub key: String,
    /// Website the plugin operates on.
    pub website_id: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    pub fn new(
        identifier: impl Into<String>,
        key: impl Into<String>,
        website_id: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            key: key.into(),
            website_id: website_id.into(),
        }
    }

    /// Reads the credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the credentials through `lookup`.
    ///
    /// Unset and empty values both count as missing. When anything is missing
    /// the error lists every missing name at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let identifier = fetch(IDENTIFIER_VAR);
        let key = fetch(KEY_VAR);
        let website_id = fetch(WEBSITE_ID_VAR);

        match (identifier, key, website_id) {
            (Some(identifier), Some(key), Some(website_id)) => Ok(Self {
                identifier,
                key,
                website_id,
            }),
            (identifier, key, website_id) => {
                let missing = [
                    (IDENTIFIER_VAR, identifier.is_none()),
                    (KEY_VAR, key.is_none()),
                    (WEBSITE_ID_VAR, website_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name));
                Err(Error::configuration(missing))
            }
        }
    }

    /// The HTTP Basic token: base64 of `identifier:key`.
    pub fn basic_token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.identifier, self.key))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("key", &"<redacted>")
            .field("website_id", &self.website_id)
            .finish()
    }
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct CrispConfig {
    /// Plugin credentials.
    pub credentials: Credentials,

    /// Scheme and host (and optional port) of the API.
    pub api_url: String,
}

impl CrispConfig {
    /// Creates a configuration pointing at the public API.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Reads credentials and the optional base URL override from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`CrispConfig::from_env`], but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;
        let api_url = lookup(API_URL_VAR).filter(|url| !url.is_empty());
        Ok(Self::new(credentials).with_api_url(api_url))
    }

    /// Overrides the API base URL; `None` keeps the current one.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        self
    }

    /// The website every request is scoped to.
    pub fn website_id(&self) -> &str {
        &self.credentials.website_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn loads_all_three_values() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (IDENTIFIER_VAR, "ident"),
            (KEY_VAR, "secret"),
            (WEBSITE_ID_VAR, "site-1"),
        ]))
        .unwrap();
        assert_eq!(creds, Credentials::new("ident", "secret", "site-1"));
    }

    #[test]
    fn every_missing_combination_is_a_configuration_error() {
        let all = [
            (IDENTIFIER_VAR, "ident"),
            (KEY_VAR, "secret"),
            (WEBSITE_ID_VAR, "site-1"),
        ];
        for skip in 0..all.len() {
            let present: Vec<_> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, kv)| *kv)
                .collect();
            let err = Credentials::from_lookup(lookup_from(&present)).unwrap_err();
            match &err {
                Error::Configuration { missing } => assert_eq!(missing, &vec![all[skip].0]),
                other => panic!("unexpected error: {other:?}"),
            }
            let text = err.to_string();
            for name in REQUIRED_ENV_VARS {
                assert!(text.contains(name), "{text} should mention {name}");
            }
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            (IDENTIFIER_VAR, ""),
            (KEY_VAR, "secret"),
        ]))
        .unwrap_err();
        match err {
            Error::Configuration { missing } => {
                assert_eq!(missing, vec![IDENTIFIER_VAR, WEBSITE_ID_VAR]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn basic_token_encodes_identifier_and_key() {
        let creds = Credentials::new("ident", "secret", "site-1");
        assert_eq!(creds.basic_token(), "aWRlbnQ6c2VjcmV0");
    }

    #[test]
    fn debug_redacts_key() {
        let creds = Credentials::new("ident", "secret", "site-1");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("ident"));
    }

    #[test]
    fn api_url_defaults_and_overrides() {
        let base = [
            (IDENTIFIER_VAR, "ident"),
            (KEY_VAR, "secret"),
            (WEBSITE_ID_VAR, "site-1"),
        ];
        let config = CrispConfig::from_lookup(lookup_from(&base)).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.website_id(), "site-1");

        let mut with_override = base.to_vec();
        with_override.push((API_URL_VAR, "http://127.0.0.1:9000"));
        let config = CrispConfig::from_lookup(lookup_from(&with_override)).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
    }
}
