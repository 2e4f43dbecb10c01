use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, run};

#[test]
fn test_resolve_step_title() -> Result<()> {
    let test = CliTest::with_fixture()?;

    assert_cmd_snapshot!(
        test.resolve_command("[%key:component::group::config::step::user::title%]"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Add Group

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_resolve_literal_unchanged() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.resolve_command("Members"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Members\n");

    Ok(())
}

#[test]
fn test_resolve_chain_by_key() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let mut cmd = test.resolve_command("component::group::options::step::sensor::data::entities");
    cmd.arg("--key");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Members\n");

    Ok(())
}

#[test]
fn test_resolve_embedded_references() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.resolve_command(
        "[%key:component::group::title%] is [%key:common::state::on%]",
    ))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Group is On\n");

    Ok(())
}

#[test]
fn test_resolve_across_components() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let mut cmd = test.resolve_command("component::group::entity_component::_::state::not_home");
    cmd.arg("--key");
    let output = run(cmd)?;

    assert_eq!(output.stdout, "Away\n");

    Ok(())
}

#[test]
fn test_resolve_missing_key() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.resolve_command("[%key:component::group::nope%]"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        output
            .stderr
            .contains("error: key 'component::group::nope' does not exist"),
        "{}",
        output.stderr
    );

    Ok(())
}

#[test]
fn test_resolve_unknown_component() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let output = run(test.resolve_command("[%key:component::light::title%]"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("unknown component 'light'"), "{}", output.stderr);

    Ok(())
}

#[test]
fn test_resolve_cycle() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "homeassistant/components/demo/strings.json",
        r#"{"a": "[%key:component::demo::b%]", "b": "[%key:component::demo::a%]"}"#,
    )?;

    let output = run(test.resolve_command("[%key:component::demo::a%]"))?;

    assert_eq!(output.code, Some(1));
    assert!(
        output.stderr.contains(
            "cyclic reference: component::demo::a -> component::demo::b -> component::demo::a"
        ),
        "{}",
        output.stderr
    );

    Ok(())
}

#[test]
fn test_resolve_warns_about_unparsed_files() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file("homeassistant/components/broken/strings.json", "[1, 2]")?;

    let output = run(test.resolve_command("[%key:component::group::title%]"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Group\n");
    assert!(output.stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_resolve_key_with_invalid_segment() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let mut cmd = test.resolve_command("Component::Group::title");
    cmd.arg("--key");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(
        output.stderr.contains("invalid path segment"),
        "{}",
        output.stderr
    );

    Ok(())
}
