use std::env;

use dotenv::dotenv;
use thiserror::Error;

use crate::{facebook, twitter};

pub const FACEBOOK_ACCESS_TOKEN: &str = "FACEBOOK_ACCESS_TOKEN";
pub const TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
pub const TWITTER_USERNAME: &str = "TWITTER_USERNAME";
pub const FACEBOOK_GRAPH_URL: &str = "FACEBOOK_GRAPH_URL";
pub const TWITTER_API_URL: &str = "TWITTER_API_URL";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Everything the two fetches need. Tokens are opaque and may be empty.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub facebook_access_token: String,
    pub twitter_bearer_token: String,
    pub twitter_username: String,
    pub facebook_base_url: Option<String>,
    pub twitter_base_url: Option<String>,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment once.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        return Self::from_lookup(|key| env::var(key).ok());
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let twitter_username = lookup(TWITTER_USERNAME)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar(TWITTER_USERNAME))?;

        return Ok(Self {
            facebook_access_token: lookup(FACEBOOK_ACCESS_TOKEN).unwrap_or_default(),
            twitter_bearer_token: lookup(TWITTER_BEARER_TOKEN).unwrap_or_default(),
            twitter_username,
            facebook_base_url: lookup(FACEBOOK_GRAPH_URL).filter(|v| !v.is_empty()),
            twitter_base_url: lookup(TWITTER_API_URL).filter(|v| !v.is_empty()),
        });
    }

    pub fn facebook_client(&self) -> facebook::client::Client {
        let token = self.facebook_access_token.clone();
        return match &self.facebook_base_url {
            Some(url) => facebook::client::Client::with_base_url(token, url.clone()),
            None => facebook::client::Client::new(token),
        };
    }

    pub fn twitter_client(&self) -> twitter::client::Client {
        let token = self.twitter_bearer_token.clone();
        let username = self.twitter_username.clone();
        return match &self.twitter_base_url {
            Some(url) => twitter::client::Client::with_base_url(token, username, url.clone()),
            None => twitter::client::Client::new(token, username),
        };
    }
}

#[cfg(test)]
fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| {
        vars.iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.clone())
    }
}

#[test]
fn test_from_lookup() {
    let config = Config::from_lookup(lookup_from(&[
        (FACEBOOK_ACCESS_TOKEN, "fb-token"),
        (TWITTER_BEARER_TOKEN, "tw-token"),
        (TWITTER_USERNAME, "jack"),
    ]))
    .unwrap();
    assert_eq!(config.facebook_access_token, "fb-token");
    assert_eq!(config.twitter_bearer_token, "tw-token");
    assert_eq!(config.twitter_username, "jack");
    assert_eq!(config.facebook_base_url, None);
    assert_eq!(config.twitter_base_url, None);
}

#[test]
fn test_from_lookup_tokens_not_validated() {
    let config = Config::from_lookup(lookup_from(&[
        (FACEBOOK_ACCESS_TOKEN, ""),
        (TWITTER_USERNAME, "jack"),
    ]))
    .unwrap();
    assert_eq!(config.facebook_access_token, "");
    assert_eq!(config.twitter_bearer_token, "");
}

#[test]
fn test_from_lookup_requires_username() {
    let err = Config::from_lookup(lookup_from(&[(FACEBOOK_ACCESS_TOKEN, "fb-token")])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar(TWITTER_USERNAME));

    let err = Config::from_lookup(lookup_from(&[(TWITTER_USERNAME, "  ")])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar(TWITTER_USERNAME));
}

#[test]
fn test_from_lookup_base_urls() {
    let config = Config::from_lookup(lookup_from(&[
        (TWITTER_USERNAME, "jack"),
        (FACEBOOK_GRAPH_URL, "http://127.0.0.1:9000"),
        (TWITTER_API_URL, ""),
    ]))
    .unwrap();
    assert_eq!(config.facebook_base_url.as_deref(), Some("http://127.0.0.1:9000"));
    assert_eq!(config.twitter_base_url, None);
}
