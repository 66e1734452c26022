use anyhow::{bail, Result};
use std::process::Command;

/// The tmux pane this process runs in, if any.
pub fn current_pane() -> Option<String> {
    std::env::var("TMUX").ok()?;
    std::env::var("TMUX_PANE").ok().filter(|p| !p.is_empty())
}

/// Bring the player's pane (and its window) to the front.
pub fn focus_pane(pane: &str) -> Result<()> {
    let status = Command::new("tmux")
        .arg("select-window")
        .arg("-t")
        .arg(pane)
        .status()?;
    if !status.success() {
        bail!("tmux select-window exited with {}", status);
    }

    let status = Command::new("tmux")
        .arg("select-pane")
        .arg("-t")
        .arg(pane)
        .status()?;
    if !status.success() {
        bail!("tmux select-pane exited with {}", status);
    }
    Ok(())
}
