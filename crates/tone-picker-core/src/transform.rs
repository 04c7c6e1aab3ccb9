//! The text-transform collaborator.
//!
//! The editor only needs "text + tone in, rewritten text out". How the
//! rewrite is produced is up to the implementation.
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::tone::Tone;

/// Rewrites text in a given tone.
pub trait ToneTransform {
    /// Returns the rewritten text, or a descriptive error.
    fn transform(&self, text: &str, tone: &Tone) -> Result<String>;
}

impl<F> ToneTransform for F
where
    F: Fn(&str, &Tone) -> Result<String>,
{
    fn transform(&self, text: &str, tone: &Tone) -> Result<String> {
        self(text, tone)
    }
}

/// Runs an external program for each rewrite.
///
/// The tone name is appended as the last argument and the text is written to
/// the program's stdin. Its trimmed stdout is the rewritten text.
#[derive(Debug, Clone)]
pub struct CommandTransform {
    program: String,
    args: Vec<String>,
}

impl CommandTransform {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds a transform from `[program, args...]`. Returns `None` when empty.
    pub fn from_command_line(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ToneTransform for CommandTransform {
    fn transform(&self, text: &str, tone: &Tone) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(tone.name())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start transform program '{}'", self.program))?;

        // Stdin is fed from its own thread while wait_with_output drains stdout
        let mut stdin = child
            .stdin
            .take()
            .context("Transform program stdin unavailable")?;
        let input = text.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .context("Failed to wait for transform program")?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                // The child may legitimately exit without reading all input
                tracing::debug!("Transform program closed stdin early: {e}");
            }
            Err(_) => bail!("Transform input writer panicked"),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("Transform program exited with {}", output.status);
            }
            bail!("Transform program exited with {}: {stderr}", output.status);
        }

        let rewritten = String::from_utf8(output.stdout)
            .context("Transform program produced invalid UTF-8")?;
        let rewritten = rewritten.trim();
        if rewritten.is_empty() {
            bail!("Transform returned no text");
        }
        Ok(rewritten.to_string())
    }
}
