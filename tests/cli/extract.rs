use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const INBOX: &str = r#"import { useLocalization } from "fluent-react";

export function Inbox({ count, status }) {
    const { l10n } = useLocalization();
    return (
        <div title={l10n.createMessage("Inbox")}>
            {l10n.createMessage(`You have ${count} messages`)}
            {l10n.createMessage(status, { ok: "Fine", other: "Unknown" })}
        </div>
    );
}
"#;

fn setup_config(test: &CliTest) -> Result<()> {
    test.write_file(
        ".fluentextractrc.json",
        r#"{
            "output": "./locales/en/messages.ftl",
            "includes": ["src"]
        }"#,
    )
}

#[test]
fn test_extract_writes_resource() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file("src/inbox.tsx", INBOX)?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Extracted 3 messages from 1 module"));

    let ftl = test.read_file("locales/en/messages.ftl")?;
    let lines: Vec<&str> = ftl.lines().collect();
    assert!(lines[0].starts_with("message-") && lines[0].ends_with(" = Inbox"));
    assert!(lines[1].contains(" = You have { $expression-"));
    assert!(ftl.contains("    { $status ->\n        [ok] Fine\n       *[other] Unknown\n    }\n"));

    Ok(())
}

#[test]
fn test_extract_is_deterministic() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file("src/inbox.tsx", INBOX)?;

    test.extract_command().output()?;
    let first = test.read_file("locales/en/messages.ftl")?;

    // Formatting-only change
    test.write_file(
        "src/inbox.tsx",
        &INBOX.replace("createMessage(\"Inbox\")", "createMessage( \"Inbox\" )"),
    )?;
    test.extract_command().output()?;
    let second = test.read_file("locales/en/messages.ftl")?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_extract_requires_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/inbox.tsx", INBOX)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("output option is required"));

    Ok(())
}

#[test]
fn test_extract_output_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file("src/inbox.tsx", INBOX)?;

    let output = test
        .extract_command()
        .args(["--output", "custom.ftl"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("custom.ftl").exists());
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_ignores_modules_without_hook() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file(
        "src/other.tsx",
        r#"const l10n = { createMessage: (s) => s };
l10n.createMessage("Not extracted");
"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("no messages found"));
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_error_aborts_run() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file("src/inbox.tsx", INBOX)?;
    test.write_file(
        "src/status.tsx",
        r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { ok: "Fine" });
"#,
    )?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains(
        "error: Selector must provide explicit default variant, or a variant named `other`"
    ));
    assert!(out.contains("--> ./src/status.tsx:2:1"));
    assert!(out.contains("was not written"));
    assert!(!test.root().join("locales/en/messages.ftl").exists());

    Ok(())
}

#[test]
fn test_extract_skip_errors_writes_remaining_modules() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file("src/inbox.tsx", INBOX)?;
    test.write_file(
        "src/status.tsx",
        r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { ok: "Fine" }, 42);
"#,
    )?;

    let output = test.extract_command().arg("--skip-errors").output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: default variant must be string literal"));
    assert!(out.contains("skipped: 1 module"));

    let ftl = test.read_file("locales/en/messages.ftl")?;
    assert_eq!(ftl.lines().filter(|line| line.starts_with("message-")).count(), 3);

    Ok(())
}

#[test]
fn test_extract_merges_modules_without_duplicates() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    let save = r#"import { useLocalization } from "fluent-react";
l10n.createMessage("Save");
"#;
    test.write_file("src/a.tsx", save)?;
    test.write_file("src/b.tsx", save)?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let ftl = test.read_file("locales/en/messages.ftl")?;
    assert_eq!(ftl.lines().count(), 1);
    assert!(ftl.ends_with(" = Save\n"));

    Ok(())
}

#[test]
fn test_extract_reports_parse_errors() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file("src/broken.ts", "const = ;")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("parse-error"));

    Ok(())
}

#[test]
fn test_extract_rejects_conflicting_messages() -> Result<()> {
    let test = CliTest::new()?;
    setup_config(&test)?;
    test.write_file(
        "src/a.tsx",
        r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { ok: "Saved", other: "Not saved" });
"#,
    )?;
    test.write_file(
        "src/b.tsx",
        r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { ok: "Deleted", other: "Not deleted" });
"#,
    )?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("conflicting-message"));
    assert!(out.contains("--> ./src/b.tsx:2:1"));
    assert!(out.contains("first defined at ./src/a.tsx:2:1"));
    assert!(!test.root().join("locales/en/messages.ftl").exists());

    let output = test.extract_command().arg("--skip-errors").output()?;
    assert_eq!(output.status.code(), Some(1));
    let ftl = test.read_file("locales/en/messages.ftl")?;
    assert!(ftl.contains("[ok] Saved"));
    assert!(!ftl.contains("Deleted"));

    Ok(())
}
