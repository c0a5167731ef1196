use serde::Deserialize;
use thiserror::Error;

use crate::utils::{decode_object, describe_transport, encode, to_count};

const BASE_URL: &str = "https://api.twitter.com";
const USER_FIELDS: &str = "public_metrics";

pub struct Client {
    bearer_token: String,
    username: String,
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Error)]
pub enum TwitterApiError {
    #[error("HTTP request error: {}", describe_transport(.0))]
    RequestError(ureq::Transport),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("could not parse followers count from Twitter API response: {0}")]
    ParseError(String),
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(rename = "data")]
    data: UserData,
}

#[derive(Debug, Deserialize)]
struct UserData {
    #[serde(rename = "public_metrics")]
    public_metrics: PublicMetrics,
}

#[derive(Debug, Deserialize)]
struct PublicMetrics {
    #[serde(rename = "followers_count")]
    followers_count: f64,
}

impl Client {
    pub fn new(bearer_token: String, username: String) -> Self {
        return Self::with_base_url(bearer_token, username, BASE_URL.to_string());
    }

    pub fn with_base_url(bearer_token: String, username: String, base_url: String) -> Self {
        return Self {
            bearer_token,
            username,
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::agent(),
        };
    }

    /// Looks up the configured user and returns `public_metrics.followers_count`.
    pub fn get_followers_count(&self) -> Result<u64, TwitterApiError> {
        let url = format!(
            "{}/2/users/by/username/{}",
            self.base_url,
            encode(self.username.as_str())
        );
        log::debug!("GET {}?user.fields={}", url, USER_FIELDS);

        let res = self
            .agent
            .get(url.as_str())
            .set(
                "Authorization",
                format!("Bearer {}", self.bearer_token).as_str(),
            )
            .query("user.fields", USER_FIELDS)
            .call();
        let res = match res {
            Ok(res) => res,
            // error statuses still carry a JSON body worth decoding
            Err(ureq::Error::Status(code, res)) => {
                log::debug!("{} answered with status {}", url, code);
                res
            }
            Err(ureq::Error::Transport(err)) => return Err(TwitterApiError::RequestError(err)),
        };
        let body = decode_object(res.into_reader())?;
        return parse_followers_count(serde_json::Value::Object(body));
    }
}

fn parse_followers_count(body: serde_json::Value) -> Result<u64, TwitterApiError> {
    let user: UserResponse =
        serde_json::from_value(body).map_err(|e| TwitterApiError::ParseError(e.to_string()))?;
    let followers = user.data.public_metrics.followers_count;
    return to_count(followers).ok_or_else(|| {
        TwitterApiError::ParseError(format!("followers_count {} is not a count", followers))
    });
}

#[test]
fn test_parse_followers_count() {
    let body = serde_json::json!({
        "data": {
            "id": "2244994945",
            "name": "Developers",
            "username": "XDevelopers",
            "public_metrics": {
                "followers_count": 42,
                "following_count": 1,
                "tweet_count": 3,
                "listed_count": 0
            }
        }
    });
    assert_eq!(parse_followers_count(body).unwrap(), 42);
}

#[test]
fn test_parse_followers_count_missing_metrics() {
    let body = serde_json::json!({ "data": { "id": "1", "username": "jack" } });
    let err = parse_followers_count(body).unwrap_err();
    assert!(matches!(err, TwitterApiError::ParseError(_)));
    let msg = err.to_string();
    assert!(msg.starts_with("could not parse followers count from Twitter API response"));
    assert!(msg.contains("public_metrics"), "{}", msg);
}

#[test]
fn test_parse_followers_count_error_body() {
    // unknown usernames come back as 200 with an `errors` array and no `data`
    let body = serde_json::json!({
        "errors": [{ "title": "Not Found Error", "detail": "Could not find user" }]
    });
    let err = parse_followers_count(body).unwrap_err();
    assert!(err.to_string().contains("`data`"), "{}", err);
}

#[test]
fn test_parse_followers_count_wrong_type() {
    let body = serde_json::json!({
        "data": { "public_metrics": { "followers_count": "42" } }
    });
    let err = parse_followers_count(body).unwrap_err();
    assert!(matches!(err, TwitterApiError::ParseError(_)));
    assert!(err.to_string().contains("invalid type"), "{}", err);
}

#[test]
fn test_parse_followers_count_negative() {
    let body = serde_json::json!({
        "data": { "public_metrics": { "followers_count": -3 } }
    });
    assert!(matches!(
        parse_followers_count(body),
        Err(TwitterApiError::ParseError(_))
    ));
}

#[test]
fn test_base_url_trailing_slash() {
    let client = Client::with_base_url(
        "t".to_string(),
        "jack".to_string(),
        "http://localhost:8080/".to_string(),
    );
    assert_eq!(client.base_url, "http://localhost:8080");
    assert_eq!(Client::new("t".to_string(), "jack".to_string()).base_url, BASE_URL);
}
