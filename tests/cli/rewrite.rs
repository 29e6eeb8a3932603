use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const APP: &str = r#"import { useLocalization } from "fluent-react";

export function App({ name, status }) {
    const { l10n } = useLocalization();
    const greeting = l10n.createMessage(`Hello ${name}`);
    const state = l10n.createMessage(status, { ok: "Fine", other: "Unknown" });
    return <p>{greeting} {state}</p>;
}
"#;

#[test]
fn test_rewrite_dry_run_leaves_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.tsx", APP)?;

    let output = test.rewrite_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("- l10n.createMessage(`Hello ${name}`)"));
    assert!(out.contains("+ l10n.getString(\"message-"));
    assert!(out.contains("Would rewrite 2 calls in 1 file."));
    assert_eq!(test.read_file("src/app.tsx")?, APP);

    Ok(())
}

#[test]
fn test_rewrite_apply() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.tsx", APP)?;

    let output = test.rewrite_command().arg("--apply").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Rewrote 2 calls in 1 file."));

    let content = test.read_file("src/app.tsx")?;
    assert!(!content.contains("createMessage"));
    assert!(content.contains(": name }, `Hello ${name}`);"));
    assert!(content.contains("{ status }, \"Unknown\");"));

    Ok(())
}

#[test]
fn test_rewrite_ids_match_extracted_messages() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.tsx", APP)?;

    test.extract_command()
        .args(["--output", "messages.ftl"])
        .output()?;
    let ftl = test.read_file("messages.ftl")?;

    test.rewrite_command().arg("--apply").output()?;
    let content = test.read_file("src/app.tsx")?;

    for line in ftl.lines().filter(|line| line.starts_with("message-")) {
        let id = line.split(' ').next().unwrap_or_default();
        assert!(
            content.contains(&format!("getString(\"{}\"", id)),
            "missing lookup for {}",
            id
        );
    }

    Ok(())
}

#[test]
fn test_rewrite_reports_nested_calls() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/app.tsx",
        r#"import { useLocalization } from "fluent-react";
l10n.createMessage(`Outer ${l10n.createMessage("Inner")}`);
"#,
    )?;

    let output = test.rewrite_command().arg("--apply").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("warning: call nested inside another rewritten call"));
    assert!(stdout(&output).contains("nested-call"));

    let content = test.read_file("src/app.tsx")?;
    assert!(content.contains("l10n.createMessage(\"Inner\")"));

    Ok(())
}

#[test]
fn test_rewrite_keeps_byte_order_mark() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/app.tsx",
        "\u{feff}import { useLocalization } from \"fluent-react\";\nl10n.createMessage(\"Hi\");\n",
    )?;

    let output = test.rewrite_command().arg("--apply").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = test.read_file("src/app.tsx")?;
    assert!(content.starts_with("\u{feff}import { useLocalization }"));
    assert!(content.contains("\nl10n.getString(\"message-"));
    assert!(content.ends_with(", {}, \"Hi\");\n"));

    Ok(())
}

#[test]
fn test_rewrite_leaves_conflicting_module() -> Result<()> {
    let test = CliTest::new()?;
    let saved = r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { ok: "Saved", other: "Not saved" });
"#;
    let deleted = r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { ok: "Deleted", other: "Not deleted" });
"#;
    test.write_file("src/a.tsx", saved)?;
    test.write_file("src/b.tsx", deleted)?;

    let output = test.rewrite_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("conflicting-message"));

    assert!(test.read_file("src/a.tsx")?.contains("l10n.getString(\"message-"));
    assert_eq!(test.read_file("src/b.tsx")?, deleted);

    Ok(())
}
