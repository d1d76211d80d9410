//! Rofi picker collaborator: fuzzy menu selection and error display.

use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Show a fuzzy-select menu and return the chosen index, or `None` when
/// the user cancelled. `default_index` is the pre-highlighted row.
pub fn select(prompt: &str, labels: &[String], default_index: usize) -> Result<Option<usize>> {
    let mut child = Command::new("rofi")
        .args([
            "-dmenu",
            "-i",
            "-p",
            prompt,
            "-format",
            "i",
            "-selected-row",
            &default_index.to_string(),
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .context("Failed to spawn rofi. Is rofi installed?")?;

    let mut stdin = child.stdin.take().context("rofi stdin unavailable")?;
    stdin
        .write_all(labels.join("\n").as_bytes())
        .context("Failed to write menu entries to rofi")?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .context("Failed to read rofi selection")?;

    // Non-zero exit means the menu was dismissed or a custom key fired.
    if !output.status.success() {
        debug!("rofi exited with {:?}, treating as cancelled", output.status.code());
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.trim().parse::<usize>() {
        Ok(index) if index < labels.len() => Ok(Some(index)),
        _ => Ok(None),
    }
}

/// Display a user-visible error through rofi's own error surface.
pub fn error(message: &str) -> Result<()> {
    let status = Command::new("rofi")
        .args(["-e", message])
        .status()
        .context("Failed to spawn rofi. Is rofi installed?")?;

    if !status.success() {
        anyhow::bail!("rofi -e failed for message: {}", message);
    }

    Ok(())
}
