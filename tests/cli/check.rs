use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, run};

#[test]
fn test_unwrapped_string() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "const a = 'строка';\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert_eq!(
        result.stdout,
        "error: \"строка\"  unwrapped-string\n\
         \x20 --> ./src/app.ts:1:11\n\
         \x20 |\n\
         1 | const a = 'строка';\n\
         \x20 |           ^\n\
         \x20 = note: The string `строка` is not wrapped in i18n call\n\
         \x20 = help: replace with `i18n('строка')`\n\
         \n\
         ✘ 1 problem (1 error, 0 warnings)\n"
    );

    Ok(())
}

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"import { i18n } from './module.i18n';

export const Title = () => <h1 title={i18n("Заголовок")}>{i18n('строка', { context: 'куку' })}</h1>;
export const label = `Hello`;
"#,
    )?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0));
    assert_snapshot!(result.stdout.trim_end(), @"✓ Checked 1 source file - no issues found");

    Ok(())
}

#[test]
fn test_jsx_text_and_attributes() -> Result<()> {
    let test = CliTest::with_file(
        "src/card.tsx",
        r#"export function Card() {
  return (
    <div title="Карточка">
      строка
      строка
    </div>
  );
}
"#,
    )?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("error: \"Карточка\"  unwrapped-string"));
    assert!(result.stdout.contains("--> ./src/card.tsx:3:16"));
    assert!(result.stdout.contains("replace with `{i18n(\"Карточка\")}`"));
    assert!(result.stdout.contains("error: \"строка строка\"  unwrapped-string"));
    assert!(result.stdout.contains("--> ./src/card.tsx:4:7"));
    assert!(result.stdout.contains("✘ 2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_unimported_wrapper_is_flagged() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "const a = i18n('строка');\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("error: \"строка\""));

    Ok(())
}

#[test]
fn test_parse_error() -> Result<()> {
    let test = CliTest::with_file("src/broken.ts", "const = ;\n")?;
    test.write_file("src/ok.ts", "export const a = 1;\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(2));
    assert!(result.stdout.contains("parse-error"));
    assert!(result.stdout.contains("--> ./src/broken.ts"));

    Ok(())
}

#[test]
fn test_test_files_ignored_by_default() -> Result<()> {
    let test = CliTest::with_file("src/app.test.ts", "const a = 'строка';\n")?;
    test.write_file("node_modules/lib/index.js", "const a = 'строка';\n")?;
    test.write_file("src/app.ts", "export const a = 1;\n")?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(0));

    test.write_file(".unwrappedrc.json", r#"{ "ignoreTestFiles": false }"#)?;
    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("./src/app.test.ts:1:11"));
    assert!(!result.stdout.contains("node_modules"));

    Ok(())
}

#[test]
fn test_includes_and_source_root() -> Result<()> {
    let test = CliTest::with_file("web/src/app.ts", "const a = 'строка';\n")?;
    test.write_file("web/scripts/build.ts", "const b = 'скрипт';\n")?;
    test.write_file("web/.unwrappedrc.json", r#"{ "includes": ["src"] }"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--source-root", "web"]);
    let result = run(cmd)?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("web/src/app.ts:1:11"));
    assert!(!result.stdout.contains("скрипт"));

    Ok(())
}

#[test]
fn test_custom_target_script() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "const a = 'Привет';\nconst b = 'Grüße';\n")?;
    test.write_file(".unwrappedrc.json", r#"{ "targetScript": "[äöüß]" }"#)?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("error: \"Grüße\""));
    assert!(!result.stdout.contains("Привет\""));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".unwrappedrc.json", r#"{ "targetScript": "[" }"#)?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.starts_with("Error: Invalid config file"));
    assert!(result.stderr.contains("targetScript"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let result = run(test.command())?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("check"));
    assert!(result.stdout.contains("fix"));
    assert!(result.stdout.contains("init"));

    Ok(())
}
