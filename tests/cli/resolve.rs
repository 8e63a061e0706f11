use anyhow::Result;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    CliTest::with_locales(
        r#"{ "locales": ["en", "nl"], "addMissing": false }"#,
        r#"{"Hello $1": "Hallo $1", "$1 items": {"1": "one item", "*": "$1 items"}}"#,
    )
}

fn resolve(test: &CliTest, args: &[&str]) -> Result<String> {
    let output = test.resolve_command().args(args).output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    Ok(stdout(&output))
}

#[test]
fn test_resolve_in_locale() -> Result<()> {
    let test = project()?;
    assert_eq!(resolve(&test, &["Hello $1", "World", "--locale", "nl"])?, "Hallo World\n");
    Ok(())
}

#[test]
fn test_resolve_falls_back_to_key() -> Result<()> {
    let test = project()?;
    assert_eq!(resolve(&test, &["Hello $1", "World"])?, "Hello World\n");
    assert_eq!(resolve(&test, &["Price: $$$1", "5"])?, "Price: $5\n");
    Ok(())
}

#[test]
fn test_resolve_plural() -> Result<()> {
    let test = project()?;
    assert_eq!(resolve(&test, &["$1 items", "1", "--locale", "nl"])?, "one item\n");
    assert_eq!(resolve(&test, &["$1 items", "7", "--locale", "nl"])?, "7 items\n");
    Ok(())
}

#[test]
fn test_resolve_unknown_locale() -> Result<()> {
    let test = project()?;
    let output = test
        .resolve_command()
        .args(["Hello $1", "--locale", "fr"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
