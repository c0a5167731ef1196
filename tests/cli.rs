use std::process::{Command, Output};

use mockito::{Matcher, Server};

fn social_counts(vars: &[(&str, String)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_social-counts"));
    cmd.env_clear();
    for (key, value) in vars {
        cmd.env(key, value);
    }
    return cmd.output().unwrap();
}

#[test]
fn prints_counts_and_exits_zero() {
    let mut facebook = Server::new();
    let mut twitter = Server::new();
    facebook
        .mock("GET", "/me/friends")
        .match_query(Matcher::UrlEncoded(
            "access_token".to_string(),
            "fb-token".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"summary":{"total_count":137}}"#)
        .create();
    twitter
        .mock("GET", "/2/users/by/username/jack")
        .match_header("authorization", "Bearer tw-token")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data":{"public_metrics":{"followers_count":42}}}"#)
        .create();

    let output = social_counts(&[
        ("FACEBOOK_ACCESS_TOKEN", "fb-token".to_string()),
        ("TWITTER_BEARER_TOKEN", "tw-token".to_string()),
        ("TWITTER_USERNAME", "jack".to_string()),
        ("FACEBOOK_GRAPH_URL", facebook.url()),
        ("TWITTER_API_URL", twitter.url()),
    ]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "You have 137 friends on Facebook.\nYou have 42 followers on Twitter.\n"
    );
}

#[test]
fn fatal_error_is_logged_and_exits_nonzero() {
    let mut facebook = Server::new();
    facebook
        .mock("GET", "/me/friends")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create();

    let output = social_counts(&[
        ("TWITTER_USERNAME", "jack".to_string()),
        ("FACEBOOK_GRAPH_URL", facebook.url()),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("Error getting Facebook friends count"),
        "{}",
        stderr
    );
}

#[test]
fn missing_username_exits_nonzero() {
    let output = social_counts(&[("FACEBOOK_ACCESS_TOKEN", "fb-token".to_string())]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TWITTER_USERNAME"), "{}", stderr);
}
