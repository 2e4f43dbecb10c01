use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_render_resolves_every_leaf() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.render_command("group"))?;
    assert_eq!(output.code, Some(0), "{}", output.stderr);

    let rendered: Value =
        serde_json::from_str(&output.stdout).context("Rendered output should be valid JSON")?;

    assert_eq!(rendered["config"]["step"]["cover"]["title"], "Add Group");
    assert_eq!(
        rendered["options"]["step"]["sensor"]["data"]["entities"],
        "Members"
    );
    assert_eq!(rendered["entity_component"]["_"]["name"], "Group");
    assert_eq!(
        rendered["entity_component"]["_"]["state"]["home"],
        "Home"
    );
    assert!(!output.stdout.contains("[%key:"));

    Ok(())
}

#[test]
fn test_render_keeps_key_order() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.render_command("group"))?;
    let rendered: Value = serde_json::from_str(&output.stdout)?;

    let keys: Vec<&String> = rendered
        .as_object()
        .context("Rendered output should be an object")?
        .keys()
        .collect();
    assert_eq!(keys, vec!["title", "config", "options", "entity_component"]);

    Ok(())
}

#[test]
fn test_render_to_file() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let mut cmd = test.render_command("device_tracker");
    cmd.args(["--output", "rendered.json"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "✓ Rendered 'device_tracker' to rendered.json\n"
    );

    let rendered: Value = serde_json::from_str(&test.read_file("rendered.json")?)?;
    assert_eq!(
        rendered["entity_component"]["_"]["state"]["not_home"],
        "Away"
    );

    Ok(())
}

#[test]
fn test_render_reports_broken_references() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "homeassistant/components/demo/strings.json",
        r#"{
  "title": "Demo",
  "config": {
    "step": {
      "user": {
        "title": "[%key:component::demo::config::step::init::title%]"
      }
    }
  }
}"#,
    )?;

    let mut cmd = test.render_command("demo");
    cmd.args(["--output", "rendered.json"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains(r#"error: "config::step::user::title"  unresolved-reference"#)
    );
    assert!(!test.root().join("rendered.json").exists());

    Ok(())
}

#[test]
fn test_render_unknown_component() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.render_command("light"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Component 'light' not found"));

    Ok(())
}
