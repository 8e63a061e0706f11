use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const CONFIG: &str = r#"{ "locales": ["en", "nl"], "addMissing": false }"#;

const BUNDLE: &str = r#"const lang = "__$LOCALE$__";
console.log(__$LOCALIZE$__("Hello $1", [user.name]), lang);
"#;

fn project(config: &str) -> Result<CliTest> {
    let test = CliTest::with_locales(config, r#"{"Hello $1": "Hallo $1!"}"#)?;
    test.write_file(
        "i18n/en.json",
        r#"{"locale": "en", "translations": {"Hello $1": "Hello $1!"}}"#,
    )?;
    Ok(test)
}

#[test]
fn test_bake_writes_one_tree_per_locale() -> Result<()> {
    let test = project(CONFIG)?;
    test.write_file("dist/app.js", BUNDLE)?;
    test.write_file("dist/style.css", "body {}\n")?;

    let output = test.bake_command().args(["dist", "-o", "out"]).output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Baked 2 locale(s) (en, nl)"));

    assert_eq!(
        test.read_file("out/nl/app.js")?,
        "const lang = \"nl\";\nconsole.log(`Hallo ${user.name}!`, lang);\n"
    );
    assert_eq!(
        test.read_file("out/en/app.js")?,
        "const lang = \"en\";\nconsole.log(`Hello ${user.name}!`, lang);\n"
    );
    assert_eq!(test.read_file("out/nl/style.css")?, "body {}\n");
    assert_eq!(test.read_file("out/en/style.css")?, "body {}\n");

    Ok(())
}

#[test]
fn test_bake_selected_locale_with_assets_dir() -> Result<()> {
    let test = project(r#"{ "locales": ["en", "nl"], "addMissing": false, "assetsDir": "assets" }"#)?;
    test.write_file("dist/index.html", "<script src=\"assets/app.js\"></script>\n")?;
    test.write_file("dist/assets/app.js", BUNDLE)?;

    let output = test
        .bake_command()
        .args(["dist", "-o", "out", "--locale", "nl"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert!(test.read_file("out/assets/nl/app.js")?.contains("`Hallo ${user.name}!`"));
    assert!(!test.root().join("out/assets/en").exists());
    assert_eq!(
        test.read_file("out/index.html")?,
        "<script src=\"assets/app.js\"></script>\n"
    );

    Ok(())
}

#[test]
fn test_bake_reports_keys_missing_from_bundle() -> Result<()> {
    let test = project(CONFIG)?;
    test.write_file("dist/app.js", "__$LOCALIZE$__(\"Bye\", []);\n")?;

    let output = test.bake_command().args(["dist", "-o", "out"]).output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("nl: missing 1 keys"));
    assert!(out.contains("nl: unused 1 keys"));
    // Untranslated keys fall back to the key text.
    assert_eq!(test.read_file("out/nl/app.js")?, "`Bye`;\n");

    Ok(())
}

#[test]
fn test_bake_unknown_locale_is_fatal() -> Result<()> {
    let test = project(CONFIG)?;
    test.write_file("dist/app.js", BUNDLE)?;

    let output = test
        .bake_command()
        .args(["dist", "-o", "out", "--locale", "fr"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown locale fr"));

    Ok(())
}

#[test]
fn test_bake_malformed_marker_is_fatal() -> Result<()> {
    let test = project(CONFIG)?;
    test.write_file("dist/app.js", "__$LOCALIZE$__(\"Hello $1\", [a);\n")?;

    let output = test.bake_command().args(["dist", "-o", "out"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Malformed marker call"));

    Ok(())
}
