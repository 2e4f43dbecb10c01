use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, run};

const DEMO_STRINGS: &str = "homeassistant/components/demo/strings.json";

#[test]
fn test_fixture_tree_is_clean() -> Result<()> {
    let test = CliTest::with_fixture()?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 3 resource files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_dangling_reference() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "Demo",
  "config": {
    "step": {
      "user": {
        "title": "[%key:component::group::config::step::missing::title%]"
      }
    }
  }
}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains(r#"error: "config::step::user::title"  unresolved-reference"#),
        "{}",
        output.stdout
    );
    assert!(
        output
            .stdout
            .contains("--> homeassistant/components/demo/strings.json:6:9"),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains(
        "= note: key 'component::group::config::step::missing::title' does not exist"
    ));
    assert!(output.stdout.contains("✘ 1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_cyclic_reference() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "[%key:component::demo::entity_component::_::name%]",
  "entity_component": {
    "_": {
      "name": "[%key:component::demo::title%]"
    }
  }
}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"error: "title"  cyclic-reference"#));
    assert!(output.stdout.contains(
        "cyclic reference: component::demo::title -> component::demo::entity_component::_::name -> component::demo::title"
    ), "{}", output.stdout);
    assert!(output.stdout.contains("✘ 2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_malformed_reference() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "[%key:Component::Demo%]"
}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"error: "title"  malformed-reference"#));
    assert!(output.stdout.contains("= hint: references look like"));

    Ok(())
}

#[test]
fn test_max_depth_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "Demo",
  "config": {
    "step": {
      "user": {
        "title": "[%key:component::demo::config::step::init::title%]"
      },
      "init": {
        "title": "[%key:component::demo::title%]"
      }
    }
  }
}"#,
    )?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(0), "{}", output.stdout);

    let mut cmd = test.check_command();
    cmd.args(["--max-depth", "1"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"error: "config::step::user::title"  cyclic-reference"#));
    assert!(output.stdout.contains("= hint: raise 'maxDepth'"));

    Ok(())
}

#[test]
fn test_structure_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "Demo",
  "config": {
    "stepz": {
      "user": {
        "title": "Set up"
      }
    }
  }
}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains(r#"warning: "config::stepz"  unknown-section"#));
    assert!(output.stdout.contains("= note: 'stepz' is not a known config section"));
    assert!(output.stdout.contains("✘ 1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_invalid_structure() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "Demo",
  "config": {
    "step": "user"
  }
}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"error: "config::step"  invalid-structure"#));
    assert!(output.stdout.contains("= note: expected an object, found a string"));

    Ok(())
}

#[test]
fn test_parse_error_does_not_hide_other_files() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file("homeassistant/components/broken/strings.json", "{ not json")?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "[%key:component::group::nope%]"
}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("parse-error"));
    assert!(
        output
            .stdout
            .contains("--> homeassistant/components/broken/strings.json\n")
    );
    assert!(output.stdout.contains(r#"error: "title"  unresolved-reference"#));

    Ok(())
}

#[test]
fn test_component_filter() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(
        DEMO_STRINGS,
        r#"{
  "title": "[%key:component::group::nope%]"
}"#,
    )?;

    let mut cmd = test.check_command();
    cmd.args(["group", "device_tracker"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "✓ Checked 2 resource files - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_unknown_component_is_an_error() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let mut cmd = test.check_command();
    cmd.arg("nope");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(
        output
            .stderr
            .contains("Error: Component 'nope' not found under homeassistant")
    );

    Ok(())
}

#[test]
fn test_missing_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(
        output
            .stderr
            .contains("Error: Resource root 'homeassistant' does not exist.")
    );

    Ok(())
}

#[test]
fn test_config_root_and_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".keyrefrc.json",
        r#"{
  "root": "./core",
  "ignores": ["legacy_*"]
}"#,
    )?;
    test.write_file("core/strings.json", r#"{"common": {"state": {"on": "On"}}}"#)?;
    test.write_file(
        "core/components/switch/strings.json",
        r#"{"title": "Switch", "entity_component": {"_": {"state": {"on": "[%key:common::state::on%]"}}}}"#,
    )?;
    test.write_file(
        "core/components/legacy_switch/strings.json",
        r#"{"title": "[%key:component::gone::title%]"}"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(0), "{}", output.stdout);
    assert_eq!(
        output.stdout,
        "✓ Checked 2 resource files - no issues found\n"
    );

    let mut cmd = test.check_command();
    cmd.arg("-v");
    let output = run(cmd)?;
    assert!(
        output
            .stderr
            .contains("Note: Ignored 1 component(s) matching 'ignores': legacy_switch"),
        "{}",
        output.stderr
    );

    Ok(())
}

#[test]
fn test_root_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(".keyrefrc.json", r#"{"root": "./missing"}"#)?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(2));

    let mut cmd = test.check_command();
    cmd.args(["--root", "homeassistant"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(".keyrefrc.json", r#"{"maxDepth": 0}"#)?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error:"), "{}", output.stderr);

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("--help");
        cmd
    })?;

    assert_eq!(output.code, Some(0));
    for command in ["check", "resolve", "render", "init"] {
        assert!(output.stdout.contains(command), "{}", output.stdout);
    }
    assert!(test.root().exists());

    Ok(())
}
