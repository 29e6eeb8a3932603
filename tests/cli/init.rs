use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created .fluentextractrc.json"));

    let content = test.read_file(".fluentextractrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["output"], "./messages.ftl");
    assert_eq!(parsed["importSource"], "fluent-react");
    assert_eq!(parsed["hookName"], "useLocalization");
    assert_eq!(parsed["triggerMethod"], "createMessage");
    assert_eq!(parsed["lookupMethod"], "getString");
    assert!(content.contains("  \"output\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".fluentextractrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".fluentextractrc.json already exists"));

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_file(
        "src/app.tsx",
        r#"import { useLocalization } from "fluent-react";

export function App() {
    const { l10n } = useLocalization();
    return <div>{l10n.createMessage("Welcome")}</div>;
}
"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("messages.ftl").exists());

    Ok(())
}
