use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let result = run(cmd)?;

    assert_eq!(result.code, Some(0));
    assert_snapshot!(result.stdout.trim_end(), @"✓ Created .unwrappedrc.json");
    assert!(test.root().join(".unwrappedrc.json").exists());

    let content = test.read_file(".unwrappedrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["wrapperFunction"], "i18n");
    assert_eq!(parsed["translationModule"], "./i18n");
    assert_eq!(parsed["ignoreTestFiles"], true);
    assert!(parsed.get("targetScript").is_some());
    assert!(parsed.get("translationModulePattern").is_some());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".unwrappedrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let result = run(cmd)?;

    assert_eq!(result.code, Some(2));
    assert_snapshot!(result.stderr.trim_end(), @"Error: .unwrappedrc.json already exists");
    assert_eq!(test.read_file(".unwrappedrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_check() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "export const a = 'ok';\n")?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_eq!(run(cmd)?.code, Some(0));

    let mut cmd = test.check_command();
    cmd.arg("-v");
    let result = run(cmd)?;
    assert_eq!(result.code, Some(0));
    assert!(result.stderr.contains("using configuration from"));

    Ok(())
}
