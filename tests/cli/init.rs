use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["root"], "./homeassistant");
    assert_eq!(parsed["componentsDir"], "components");
    assert_eq!(parsed["stringsFile"], "strings.json");
    assert_eq!(parsed["coreStrings"], "strings.json");
    assert_eq!(parsed["maxDepth"], 10);
    assert_eq!(parsed["ignores"], Value::Array(Vec::new()));

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .keyrefrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".keyrefrc.json").exists());

    let content = test.read_file(".keyrefrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyrefrc.json", "{}")?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stderr, "Error: .keyrefrc.json already exists\n");
    assert_eq!(test.read_file(".keyrefrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_picked_up_by_check() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(output.code, Some(0));

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "✓ Checked 3 resource files - no issues found\n"
    );

    Ok(())
}
