use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["locales"], serde_json::json!(["en"]));
    assert_eq!(parsed["localesDir"], "i18n");
    assert_eq!(parsed["importSource"], "i18n-bake");
    assert_eq!(parsed["addMissing"], true);

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .i18nbakerc.json"));

    let content = test.read_file(".i18nbakerc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nbakerc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: .i18nbakerc.json already exists"));
    assert_eq!(test.read_file(".i18nbakerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.ts", "export const answer = 42;\n")?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join("i18n/en.json").exists());

    Ok(())
}
