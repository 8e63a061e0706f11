use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const CONFIG: &str = r#"{ "locales": ["en", "nl"], "addMissing": false }"#;

const APP: &str = r#"import {_} from 'i18n-bake';
export const greet = (name) => _`Hello ${name}`;
"#;

fn project(nl_translations: &str) -> Result<CliTest> {
    let test = CliTest::with_locales(CONFIG, nl_translations)?;
    test.write_file("src/app.ts", APP)?;
    test.write_file(
        "i18n/en.json",
        r#"{"locale": "en", "translations": {"Hello $1": "Hello $1"}}"#,
    )?;
    Ok(test)
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = project(r#"{"Hello $1": "Hallo $1"}"#)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 source file, 2 locale files - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_missing_and_unused_keys_are_warnings() -> Result<()> {
    let test = project(r#"{"Goodbye": "Dag"}"#)?;

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", out);
    assert!(out.contains("warning: nl: missing 1 keys  missing-keys"));
    assert!(out.contains("warning: nl: unused 1 keys  unused-keys"));
    assert!(out.contains("= note: \"Goodbye\""));
    assert!(out.contains("2 problems (0 errors, 2 warnings)"));

    Ok(())
}

#[test]
fn test_untranslated_keys_are_not_missing() -> Result<()> {
    let test = project(r#"{"Hello $1": ""}"#)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("no issues found"));

    Ok(())
}

#[test]
fn test_plural_without_fallback_tag() -> Result<()> {
    let test = project(r#"{"Hello $1": "Hallo $1", "$1 items": {"1": "one item"}}"#)?;

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert!(out.contains("warning: $1 items  plural-fallback"));
    assert!(out.contains("add a \"*\" entry"));

    Ok(())
}

#[test]
fn test_multiline_key_is_an_error() -> Result<()> {
    let test = project(r#"{"Hello $1": "Hallo $1"}"#)?;
    test.write_file(
        "src/long.ts",
        "import {_} from 'i18n-bake';\nexport const s = _`first line\nsecond line`;\n",
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1), "stdout: {}", out);
    assert!(out.contains("error: keys cannot contain newlines  multiline-key"));
    assert!(out.contains("src/long.ts:2:"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = project(r#"{"Hello $1": "Hallo $1"}"#)?;
    test.write_file("src/broken.ts", "import {_} from 'i18n-bake';\nconst = ;\n")?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("parse-error"));
    assert!(stderr(&output).contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nbakerc.json", r#"{ "locales": [] }"#)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: "));

    Ok(())
}

#[test]
fn test_fallback_outside_locales_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nbakerc.json", CONFIG)?;
    test.write_file(
        "i18n/nl.json",
        r#"{"locale": "nl", "fallback": "de", "translations": {}}"#,
    )?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("i18n/nl.json"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().arg("--help").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("--locales-dir"));

    Ok(())
}
