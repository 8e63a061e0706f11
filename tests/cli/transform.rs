use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const APP: &str = r#"import {_, plural} from 'i18n-bake';
export const greet = (name) => _`Hello ${name}`;
export const count = (n) => plural`${n} items`;
"#;

fn project(config: &str) -> Result<CliTest> {
    let test = CliTest::with_locales(
        config,
        r#"{"Hello $1": "Hallo $1", "$1 items": {"1": "one item", "*": "$1 items"}}"#,
    )?;
    test.write_file("src/app.js", APP)?;
    test.write_file("src/util/plain.js", "export const answer = 42;\n")?;
    Ok(test)
}

#[test]
fn test_transform_rewrites_sources() -> Result<()> {
    let test = project(r#"{ "locales": ["en", "nl"], "addMissing": false }"#)?;

    let output = test.transform_command().args(["--out-dir", "out"]).output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Rewrote 2 template(s) in 1 file(s), copied 1 file(s) to out"));

    assert_eq!(
        test.read_file("out/src/app.js")?,
        r#"import {_, plural} from 'i18n-bake'; import {interpolate as __interpolate__} from "i18n-bake";
export const greet = (name) => __$LOCALIZE$__("Hello $1", [name]);
export const count = (n) => __interpolate__(__$LOCALIZE$__("$1 items"), [n]);
"#
    );
    assert_eq!(test.read_file("out/src/util/plain.js")?, "export const answer = 42;\n");
    assert_eq!(test.read_file("src/app.js")?, APP);

    Ok(())
}

#[test]
fn test_transform_adds_missing_keys() -> Result<()> {
    let test = project(r#"{ "locales": ["en", "nl"] }"#)?;

    let output = test.transform_command().args(["-o", "out"]).output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("en: missing 2 keys"));
    assert!(out.contains("added 2 missing key(s) to locale files"));

    let en = test.read_file("i18n/en.json")?;
    assert!(en.contains(r#""$1 items": """#));
    assert!(en.contains(r#""Hello $1": """#));
    assert!(en.ends_with("}\n"));

    // A second run finds nothing left to add.
    let output = test.transform_command().args(["-o", "out"]).output()?;
    assert!(!stdout(&output).contains("missing"));

    Ok(())
}

#[test]
fn test_transform_aborts_on_multiline_key() -> Result<()> {
    let test = project(r#"{ "locales": ["en", "nl"], "addMissing": false }"#)?;
    test.write_file(
        "src/long.js",
        "import {_} from 'i18n-bake';\nexport const s = _`first line\nsecond line`;\n",
    )?;

    let output = test.transform_command().args(["-o", "out"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("keys cannot contain newlines"));
    assert!(!test.root().join("out").exists());

    Ok(())
}

#[test]
fn test_transform_requires_out_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.transform_command().output()?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--out-dir"));

    Ok(())
}
