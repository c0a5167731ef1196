use serde::Deserialize;
use thiserror::Error;

use crate::utils::{decode_object, describe_transport, to_count};

const BASE_URL: &str = "https://graph.facebook.com";

pub struct Client {
    access_token: String,
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Error)]
pub enum FacebookApiError {
    #[error("HTTP request error: {}", describe_transport(.0))]
    RequestError(ureq::Transport),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("could not parse friends count from Facebook API response: {0}")]
    ParseError(String),
}

#[derive(Debug, Deserialize)]
struct FriendsResponse {
    #[serde(rename = "summary")]
    summary: FriendsSummary,
}

#[derive(Debug, Deserialize)]
struct FriendsSummary {
    #[serde(rename = "total_count")]
    total_count: f64,
}

impl Client {
    pub fn new(access_token: String) -> Self {
        return Self::with_base_url(access_token, BASE_URL.to_string());
    }

    pub fn with_base_url(access_token: String, base_url: String) -> Self {
        return Self {
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::agent(),
        };
    }

    /// Returns `summary.total_count` of the token owner's friends edge.
    /// The token travels in the query string, not in a header.
    pub fn get_friends_count(&self) -> Result<u64, FacebookApiError> {
        let url = format!("{}/me/friends", self.base_url);
        log::debug!("GET {}", url);

        let res = self
            .agent
            .get(url.as_str())
            .query("access_token", self.access_token.as_str())
            .call();
        let res = match res {
            Ok(res) => res,
            // error statuses still carry a JSON body worth decoding
            Err(ureq::Error::Status(code, res)) => {
                log::debug!("{} answered with status {}", url, code);
                res
            }
            Err(ureq::Error::Transport(err)) => return Err(FacebookApiError::RequestError(err)),
        };
        let body = decode_object(res.into_reader())?;
        return parse_friends_count(serde_json::Value::Object(body));
    }
}

fn parse_friends_count(body: serde_json::Value) -> Result<u64, FacebookApiError> {
    let friends: FriendsResponse =
        serde_json::from_value(body).map_err(|e| FacebookApiError::ParseError(e.to_string()))?;
    let total = friends.summary.total_count;
    return to_count(total).ok_or_else(|| {
        FacebookApiError::ParseError(format!("total_count {} is not a count", total))
    });
}

#[test]
fn test_parse_friends_count() {
    let body = serde_json::json!({
        "data": [],
        "summary": { "total_count": 137 }
    });
    assert_eq!(parse_friends_count(body).unwrap(), 137);
}

#[test]
fn test_parse_friends_count_float() {
    let body = serde_json::json!({ "summary": { "total_count": 137.0 } });
    assert_eq!(parse_friends_count(body).unwrap(), 137);
}

#[test]
fn test_parse_friends_count_missing_summary() {
    let body = serde_json::json!({ "data": [] });
    let err = parse_friends_count(body).unwrap_err();
    assert!(matches!(err, FacebookApiError::ParseError(_)));
    let msg = err.to_string();
    assert!(msg.starts_with("could not parse friends count from Facebook API response"));
    assert!(msg.contains("`summary`"), "{}", msg);
}

#[test]
fn test_parse_friends_count_string_total() {
    let body = serde_json::json!({ "summary": { "total_count": "137" } });
    let err = parse_friends_count(body).unwrap_err();
    assert!(matches!(err, FacebookApiError::ParseError(_)));
    let msg = err.to_string();
    assert!(msg.starts_with("could not parse friends count from Facebook API response"));
    assert!(msg.contains("invalid type"), "{}", msg);
}

#[test]
fn test_parse_friends_count_summary_not_object() {
    let body = serde_json::json!({ "summary": 137 });
    assert!(matches!(
        parse_friends_count(body),
        Err(FacebookApiError::ParseError(_))
    ));
}
