//! Integration tests for the weather-mood CLI

use std::io::Write;
use std::process::{Command, Output, Stdio};

const UNREACHABLE_PROXY: &str = "http://127.0.0.1:9/api/weather";

fn weather_mood(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weather-mood"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = weather_mood(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weather-mood"));
    assert!(stdout.contains("weather"));
    assert!(stdout.contains("suggest"));
    assert!(stdout.contains("interactive"));
}

/// Test that the CLI fails without a subcommand
#[test]
fn test_cli_requires_subcommand() {
    let output = weather_mood(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_weather_requires_location_arguments() {
    let output = weather_mood(&["weather"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--city") || stderr.contains("--lat"));
}

#[test]
fn test_weather_with_unreachable_proxy_reports_service_error() {
    let output = weather_mood(&["--proxy-url", UNREACHABLE_PROXY, "weather", "--city", "Paris"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Weather service temporarily unavailable"), "got: {stdout}");
}

#[test]
fn test_weather_with_blank_city_asks_for_one() {
    let output = weather_mood(&["--proxy-url", UNREACHABLE_PROXY, "weather", "--city", "   "]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter a city name"), "got: {stdout}");
}

#[test]
fn test_suggest_with_unreachable_proxy_shows_nothing() {
    let output = weather_mood(&["--proxy-url", UNREACHABLE_PROXY, "suggest", "Lon", "--near", "51.5,-0.1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No suggestions for 'Lon'"), "got: {stdout}");
}

#[test]
fn test_suggest_rejects_bad_near() {
    let output = weather_mood(&["--proxy-url", UNREACHABLE_PROXY, "suggest", "Lon", "--near", "north"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_proxy_url_is_rejected() {
    let output = weather_mood(&["--proxy-url", "ftp://example.com", "weather", "--city", "Paris"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "got: {stderr}");
}

#[test]
fn test_interactive_quits_on_command() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_weather-mood"))
        .args(["--proxy-url", UNREACHABLE_PROXY, "interactive"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"/search\n/select 1\n/quit\n")
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter a city name"), "got: {stdout}");
    assert!(stdout.contains("No suggestion matches '1'"), "got: {stdout}");
}
