use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_fix_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "const a = 'строка';\n")?;

    let result = run(test.fix_command())?;

    assert_eq!(result.code, Some(1));
    assert_eq!(
        result.stdout,
        "  --> ./src/app.ts:1:1\n\
         \x20    |\n\
         \x20  1 - const a = 'строка';\n\
         \x20    + import { i18n } from './i18n';\n\
         \x20    + \n\
         \x20    + const a = i18n('строка');\n\
         \n\
         Would rewrite 1 string(s) in 1 file(s).\n\
         Run with --apply to rewrite these files.\n"
    );
    assert_eq!(test.read_file("src/app.ts")?, "const a = 'строка';\n");

    Ok(())
}

#[test]
fn test_fix_apply() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "const a = 'строка';\n")?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let result = run(cmd)?;

    assert_eq!(result.code, Some(0));
    assert_eq!(result.stdout, "Rewrote 1 string(s) in 1 file(s).\n");
    assert_eq!(
        test.read_file("src/app.ts")?,
        "import { i18n } from './i18n';\n\nconst a = i18n('строка');\n"
    );

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(0));

    Ok(())
}

#[test]
fn test_fix_apply_jsx() -> Result<()> {
    let test = CliTest::with_file(
        "src/card.tsx",
        r#"import React from 'react';

export function Card({ name }: { name: string }) {
  return (
    <div title="Карточка">
      строка
      строка
      <span>{`Привет, ${name}!`}</span>
    </div>
  );
}
"#,
    )?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let result = run(cmd)?;

    assert_eq!(result.code, Some(0));
    assert_eq!(result.stdout, "Rewrote 3 string(s) in 1 file(s).\n");
    assert_eq!(
        test.read_file("src/card.tsx")?,
        r#"import React from 'react';
import { i18n } from './i18n';

export function Card({ name }: { name: string }) {
  return (
    <div title={i18n("Карточка")}>
      {i18n('строка строка')}
      <span>{`${i18n('Привет,')} ${name}!`}</span>
    </div>
  );
}
"#
    );

    // Running again finds nothing left to do.
    let result = run(test.fix_command())?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_fix_uses_existing_import_alias() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        "import { i18n as tr } from '@/lib/i18n';\n\nexport const a = 'строка';\n",
    )?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    assert_eq!(run(cmd)?.code, Some(0));

    assert_eq!(
        test.read_file("src/app.ts")?,
        "import { i18n as tr } from '@/lib/i18n';\n\nexport const a = tr('строка');\n"
    );

    Ok(())
}

#[test]
fn test_fix_wrapper_function_override() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "export const a = 'строка';\n")?;
    test.write_file(".unwrappedrc.json", r#"{ "translationModule": "@/i18n" }"#)?;

    let mut cmd = test.fix_command();
    cmd.args(["--apply", "--wrapper-function", "t"]);
    assert_eq!(run(cmd)?.code, Some(0));

    assert_eq!(
        test.read_file("src/app.ts")?,
        "import { t } from '@/i18n';\n\nexport const a = t('строка');\n"
    );

    Ok(())
}

#[test]
fn test_fix_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "export const a = 'hello';\n")?;

    let result = run(test.fix_command())?;

    assert_eq!(result.code, Some(0));
    assert_eq!(result.stdout, "✓ Checked 1 source file - no issues found\n");

    Ok(())
}

#[test]
fn test_fix_reports_parse_errors() -> Result<()> {
    let test = CliTest::with_file("src/broken.ts", "const = ;\n")?;
    test.write_file("src/app.ts", "const a = 'строка';\n")?;

    let mut cmd = test.fix_command();
    cmd.arg("--apply");
    let result = run(cmd)?;

    assert_eq!(result.code, Some(2));
    assert!(result.stdout.contains("Rewrote 1 string(s) in 1 file(s)."));
    assert!(
        result
            .stderr
            .contains("warning: 1 file(s) could not be parsed (use -v for details)")
    );

    Ok(())
}
