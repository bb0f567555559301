use eduflexcli::utils::*;
use serde_json::json;

#[test]
fn test_discover_endpoint_without_search() {
    assert_eq!(discover_endpoint(None), "/playlists/discover/");

    // Blank terms are treated as no search at all
    assert_eq!(discover_endpoint(Some("   ")), "/playlists/discover/");
}

#[test]
fn test_discover_endpoint_encodes_search() {
    assert_eq!(
        discover_endpoint(Some("rust basics")),
        "/playlists/discover/?search=rust%20basics"
    );
    assert_eq!(
        discover_endpoint(Some(" c++ ")),
        "/playlists/discover/?search=c%2B%2B"
    );
    assert_eq!(
        discover_endpoint(Some("a&b=c")),
        "/playlists/discover/?search=a%26b%3Dc"
    );
}

#[test]
fn test_format_minutes() {
    assert_eq!(format_minutes(0), "0m");
    assert_eq!(format_minutes(45), "45m");
    assert_eq!(format_minutes(60), "1h 00m");
    assert_eq!(format_minutes(125), "2h 05m");
    assert_eq!(format_minutes(24 * 60 + 1), "24h 01m");
}

#[test]
fn test_format_timestamp() {
    assert_eq!(format_timestamp(0), "0:00");
    assert_eq!(format_timestamp(83), "1:23");
    assert_eq!(format_timestamp(3599), "59:59");
    assert_eq!(format_timestamp(3723), "1:02:03");
}

#[test]
fn test_parse_timestamp_accepts_all_forms() {
    assert_eq!(parse_timestamp("83"), Ok(83));
    assert_eq!(parse_timestamp("1:23"), Ok(83));
    assert_eq!(parse_timestamp("1:02:03"), Ok(3723));
    assert_eq!(parse_timestamp(" 0:05 "), Ok(5));
}

#[test]
fn test_parse_timestamp_rejects_invalid_input() {
    assert!(parse_timestamp("").is_err());
    assert!(parse_timestamp("abc").is_err());
    assert!(parse_timestamp("1:60").is_err());
    assert!(parse_timestamp("1:2:3:4").is_err());
    assert!(parse_timestamp("-5").is_err());
}

#[test]
fn test_timestamp_format_and_parse_agree() {
    for seconds in [0, 9, 61, 3600, 7384] {
        assert_eq!(parse_timestamp(&format_timestamp(seconds)), Ok(seconds));
    }
}

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(50.0, 10), "[#####-----]  50.0%");
    assert_eq!(progress_bar(100.0, 10), "[##########] 100.0%");
    assert_eq!(progress_bar(0.0, 4), "[----]   0.0%");
}

#[test]
fn test_progress_bar_clamps_out_of_range() {
    assert_eq!(progress_bar(-5.0, 4), "[----]   0.0%");
    assert_eq!(progress_bar(250.0, 4), "[####] 100.0%");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("line one\nline two", 40), "line one line two");

    // Counts characters, not bytes
    assert_eq!(truncate("ёжик в тумане", 5), "ёжик…");
}

#[test]
fn test_describe_field_errors() {
    let data = json!({
        "email": ["Enter a valid email address."],
        "password": ["This password is too short.", "This password is too common."],
        "detail": "Validation failed"
    });

    assert_eq!(
        describe_field_errors(&data),
        vec![
            "email: Enter a valid email address.".to_string(),
            "password: This password is too short. This password is too common.".to_string(),
        ]
    );
}

#[test]
fn test_describe_field_errors_ignores_non_objects() {
    assert!(describe_field_errors(&json!(null)).is_empty());
    assert!(describe_field_errors(&json!(["oops"])).is_empty());
    assert!(describe_field_errors(&json!({"error": "Invalid credentials"})).is_empty());
    assert_eq!(
        describe_field_errors(&json!({"username": "Taken", "count": 3})),
        vec!["username: Taken".to_string()]
    );
}
