use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use moodwatch_config::{Config, Error, OutOfRangePolicy};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("moodwatch_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> moodwatch_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = moodwatch_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_message(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error variant: {err:?}");

	let message = err.to_string();

	assert!(message.starts_with("Invalid moodwatch config: "), "Unexpected prefix: {message}");
	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config must be valid.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.schedule.generation_check_interval_ms, 10_000);
	assert_eq!(cfg.schedule.summary_window_ms, 120_000);
	assert_eq!(cfg.schedule.display_refresh_interval_ms, 5_000);
	assert_eq!(cfg.ingest.out_of_range, OutOfRangePolicy::Clamp);
	assert_eq!(cfg.display.sink, "terminal");
	assert!(cfg.display.refresh_on_ingest);
	assert_eq!(cfg.display.history_limit, 16);
}

#[test]
fn omitted_sections_fall_back_to_defaults() {
	let cfg = load_payload("[service]\nlog_level = \"debug\"\n".to_string())
		.expect("Minimal config must be valid.");

	assert_eq!(cfg.schedule.generation_check_interval_ms, 10_000);
	assert_eq!(cfg.schedule.summary_window_ms, 120_000);
	assert_eq!(cfg.schedule.display_refresh_interval_ms, 5_000);
	assert_eq!(cfg.ingest.out_of_range, OutOfRangePolicy::Clamp);
	assert_eq!(cfg.display.sink, "terminal");
	assert_eq!(cfg.display.history_limit, moodwatch_config::DEFAULT_HISTORY_LIMIT);
}

#[test]
fn reject_policy_parses() {
	let payload = sample_toml_with("ingest", "out_of_range", Value::String("reject".to_string()));
	let cfg = load_payload(payload).expect("Reject policy must be valid.");

	assert_eq!(cfg.ingest.out_of_range, OutOfRangePolicy::Reject);
}

#[test]
fn unknown_policy_fails_to_parse() {
	let payload = sample_toml_with("ingest", "out_of_range", Value::String("wrap".to_string()));
	let err = load_payload(payload).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error variant: {err:?}");
	assert!(err.to_string().starts_with("Invalid TOML in moodwatch config "));
}

#[test]
fn periods_must_be_positive() {
	for key in
		["generation_check_interval_ms", "summary_window_ms", "display_refresh_interval_ms"]
	{
		let payload = sample_toml_with("schedule", key, Value::Integer(0));

		expect_validation_message(payload, &format!("schedule.{key} must be greater than zero."));
	}
}

#[test]
fn check_interval_must_not_exceed_window() {
	let payload = sample_toml_with("schedule", "generation_check_interval_ms", Value::Integer(120_001));

	expect_validation_message(
		payload,
		"schedule.generation_check_interval_ms must not exceed schedule.summary_window_ms.",
	);
}

#[test]
fn sink_must_be_known() {
	let payload = sample_toml_with("display", "sink", Value::String("browser".to_string()));

	expect_validation_message(payload, "display.sink must be one of terminal or log.");
}

#[test]
fn sink_is_normalized_before_validation() {
	let payload = sample_toml_with("display", "sink", Value::String(" LOG ".to_string()));
	let cfg = load_payload(payload).expect("Normalized sink must be valid.");

	assert_eq!(cfg.display.sink, "log");
}

#[test]
fn history_limit_must_be_positive() {
	let payload = sample_toml_with("display", "history_limit", Value::Integer(0));

	expect_validation_message(payload, "display.history_limit must be greater than zero.");
}

#[test]
fn log_level_must_be_non_empty() {
	let payload = sample_toml_with("service", "log_level", Value::String("   ".to_string()));

	expect_validation_message(payload, "service.log_level must be non-empty.");
}

#[test]
fn missing_file_reports_path() {
	let mut path = env::temp_dir();

	path.push("moodwatch_config_test_missing.toml");

	let err = moodwatch_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error variant: {err:?}");
	assert!(err.to_string().contains("moodwatch_config_test_missing.toml"));
}
