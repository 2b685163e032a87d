use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["directoriesToScan"], serde_json::json!(["."]));
    assert!(
        parsed["whiteList"]
            .as_array()
            .is_some_and(|list| list.iter().any(|v| v == "*.cshtml")),
        "Config should whitelist Razor views"
    );
    assert_eq!(parsed["nuggetBeginToken"], "[[[");
    assert_eq!(parsed["nuggetEndToken"], "]]]");
    assert!(
        parsed.get("jobs").is_none(),
        "Unset jobs should not be written"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created .nuggetrc.json"));
    let content = test.read_file(".nuggetrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".nuggetrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .nuggetrc.json already exists
    ");
    assert_eq!(test.read_file(".nuggetrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("Views/Index.cshtml", "<h1>[[[Welcome]]]</h1>")?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"Welcome\""));
    assert!(test.root().join(".nuggetrc.json").exists());

    Ok(())
}
