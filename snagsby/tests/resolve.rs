//! End-to-end resolution through file sources, sinks, and formatters.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::io::Write;
use std::sync::Mutex;

use serde_json::json;
use tempfile::NamedTempFile;

use snagsby::formatters::get_formatter;
use snagsby::{ConfigSink, ProcessEnv, SOURCE_ENV_VAR};

// Tests that touch the process environment take this lock so `set_var` never
// runs alongside a concurrent read on another test thread.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn json_file(content: &str) -> (NamedTempFile, String) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    let url = format!("file://{}", file.path().display());
    (file, url)
}

#[tokio::test]
async fn merges_sources_with_later_wins_precedence() {
    let (_a, url_a) = json_file(r#"{"foo":"first","only_a":"a"}"#);
    let (_b, url_b) = json_file(r#"{"foo":"second","only_b":"b"}"#);

    let merged = snagsby::get(Some(&format!("{url_a},{url_b}"))).await;

    assert_eq!(merged.get("FOO").map(String::as_str), Some("second"));
    assert_eq!(merged.get("ONLY_A").map(String::as_str), Some("a"));
    assert_eq!(merged.get("ONLY_B").map(String::as_str), Some("b"));
}

#[tokio::test]
async fn failing_sources_contribute_nothing() {
    let (_a, url_a) = json_file(r#"{"kept":"yes"}"#);

    let merged = snagsby::get(Some(&format!(
        "file:///nope/missing.json,{url_a},vault://ignored/scheme"
    )))
    .await;

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.get("KEPT").map(String::as_str), Some("yes"));
}

#[tokio::test]
async fn reserved_key_never_survives_resolution() {
    let (_a, url_a) = json_file(r#"{"snagsby_source":"s3://evil/loop.json","app":"ok"}"#);

    let merged = snagsby::get(Some(&url_a)).await;

    assert!(!merged.contains_key("SNAGSBY_SOURCE"));
    assert_eq!(merged.get("APP").map(String::as_str), Some("ok"));
}

#[tokio::test]
async fn empty_source_string_resolves_to_nothing() {
    assert!(snagsby::get(Some("")).await.is_empty());
}

#[tokio::test]
async fn get_falls_back_to_the_source_env_var() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_a, url_a) = json_file(r#"{"from_env_var":"1"}"#);
    ProcessEnv.set(SOURCE_ENV_VAR, &url_a);

    let merged = snagsby::get(None).await;

    assert_eq!(merged.get("FROM_ENV_VAR").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn load_writes_into_a_map_sink() {
    let (_a, url_a) = json_file(r#"{"db_host":"localhost","db_port":5432}"#);

    let mut dest: BTreeMap<String, String> = BTreeMap::new();
    snagsby::load(Some(&url_a), &mut dest).await;

    assert_eq!(dest.get("DB_HOST").map(String::as_str), Some("localhost"));
    assert_eq!(dest.get("DB_PORT").map(String::as_str), Some("5432"));
}

#[tokio::test]
async fn load_writes_into_the_process_environment() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_a, url_a) = json_file(r#"{"snagsby_it_loaded":"via-env"}"#);

    let mut sink = ProcessEnv;
    snagsby::load(Some(&url_a), &mut sink).await;

    assert_eq!(env::var("SNAGSBY_IT_LOADED").as_deref(), Ok("via-env"));
}

#[test]
fn load_object_bypasses_source_resolution() {
    let mut dest: HashMap<String, String> = HashMap::new();
    snagsby::load_object(
        &json!({"direct": true, "nested": {"dropped": 1}}),
        &mut dest,
    );

    assert_eq!(dest.get("DIRECT").map(String::as_str), Some("1"));
    assert!(!dest.contains_key("NESTED"));
}

#[tokio::test]
async fn resolved_mapping_renders_through_formatters() {
    let (_a, url_a) = json_file(r#"{"greeting":"say \"hi\"","count":2}"#);

    let merged = snagsby::get(Some(&url_a)).await;

    let env_out = get_formatter("env", merged.clone()).unwrap().render().unwrap();
    assert_eq!(
        env_out,
        "export COUNT=\"2\"\nexport GREETING=\"say \\\"hi\\\"\""
    );

    let json_out = get_formatter("json", merged).unwrap().render().unwrap();
    assert_eq!(json_out, r#"{"COUNT":"2","GREETING":"say \"hi\""}"#);
}
