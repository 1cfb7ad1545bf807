use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;

/// Somewhere to put text for the user to paste.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The platform clipboard, driven through the usual command-line helper (`pbcopy` on macOS,
/// `xsel` elsewhere).
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut cmd = clipboard_cmd();
        let program = cmd.get_program().to_string_lossy().into_owned();
        let mut child = cmd
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start the clipboard helper (`{program}`)"))?;
        {
            let mut stdin = child
                .stdin
                .take()
                .context("the clipboard helper's stdin was not captured")?;
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("failed to write to `{program}`"))?;
        }
        let exit_status = child
            .wait()
            .with_context(|| format!("failed to wait for `{program}` to finish"))?;
        if !exit_status.success() {
            anyhow::bail!("the clipboard helper (`{program}`) exited with {exit_status}");
        }
        tracing::debug!(%program, "wrote text to the clipboard");
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}
