//! Config load validation tests for netcheck-config.
// crates/netcheck-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, sections).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use netcheck_config::ConfigError;
use netcheck_config::EventSinkKind;
use netcheck_config::NetcheckConfig;
use netcheck_core::RunEvent;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<NetcheckConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(NetcheckConfig::load(Some(path)), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(NetcheckConfig::load(Some(path)), "config path component too long")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(NetcheckConfig::load(Some(&path)), "config io error")
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let file = write_config("[logging]\nsink = \"stderr\"\nlevel = \"debug\"\n")?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_rejects_unknown_sink() -> TestResult {
    let file = write_config("[logging]\nsink = \"syslog\"\n")?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn file_sink_requires_path() -> TestResult {
    let file = write_config("[logging]\nsink = \"file\"\n")?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "logging.path required for file sink")
}

#[test]
fn path_without_file_sink_is_rejected() -> TestResult {
    let file = write_config("[logging]\nsink = \"none\"\npath = \"events.jsonl\"\n")?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "only applies to the file sink")
}

#[test]
fn zero_limit_is_rejected() -> TestResult {
    let file = write_config("[limits]\nmax_bundle_bytes = 0\n")?;
    assert_invalid(
        NetcheckConfig::load(Some(file.path())),
        "limits.max_bundle_bytes must be between",
    )
}

#[test]
fn empty_index_entry_is_rejected() -> TestResult {
    let file = write_config("[index]\nreplace = { TestNapalmUsers = \"\" }\n")?;
    assert_invalid(NetcheckConfig::load(Some(file.path())), "module location must be non-empty")
}

#[test]
fn full_config_loads() -> TestResult {
    let file = write_config(
        r#"
[index]
replace = { TestNapalmUsers = "site.checks.users" }

[logging]
sink = "none"

[backend]
fixture = "fixtures/lab.json"
inventory = ["R1", "R2"]

[limits]
max_bundle_bytes = 4096
"#,
    )?;
    let config = NetcheckConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.logging.sink != EventSinkKind::None {
        return Err("sink not parsed".to_string());
    }
    if config.backend.inventory != ["R1", "R2"] {
        return Err(format!("inventory mismatch: {}", config.backend.inventory.join(",")));
    }
    if config.limits.max_bundle_bytes != 4096
        || config.limits.max_fixture_bytes != 8 * 1024 * 1024
    {
        return Err("limits not applied".to_string());
    }
    let index = config.index.module_index(netcheck_core::ModuleIndex::empty());
    if index.resolve("TestNapalmUsers").map(|path| path.as_str()) != Some("site.checks.users") {
        return Err("index replacement not applied".to_string());
    }
    Ok(())
}

#[test]
fn file_sink_appends_events() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let events = dir.path().join("events.jsonl");
    let file = write_config(&format!(
        "[logging]\nsink = \"file\"\npath = \"{}\"\n",
        events.display().to_string().replace('\\', "\\\\")
    ))?;
    let config = NetcheckConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let sink = config.logging.build_sink().map_err(|err| err.to_string())?;
    sink.record(&RunEvent::bundle_loaded(
        "TestNapalmUsers".to_string(),
        "netcheck.checks.napalm_get_users".to_string(),
        2,
    ));
    let written = std::fs::read_to_string(&events).map_err(|err| err.to_string())?;
    if !written.contains("\"event\":\"bundle_loaded\"") {
        return Err(format!("unexpected event log: {written}"));
    }
    Ok(())
}
