//! Line-oriented front end for an editor session.
//!
//! Each input line either replaces the text or, when it starts with `:`, runs
//! a command. A leading `::` escapes a literal colon.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tone_picker_core::{EditorSession, Tone, ToneOutcome, ToneTransform};

const HELP: &str = "\
Type a line to replace the text. Commands:
  :tone <row> <col>   rewrite in the tone at that grid cell (0-2, 0-2)
  :tone <name>        rewrite in a named tone, e.g. :tone Casual + Concise
  :tones              show the tone grid
  :undo  :redo        walk the history
  :reset              clear the text and the history
  :show               print the text and history state
  :help               this message
  :quit               exit
Start a line with :: to enter text beginning with ':'.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Edit(String),
    Tone(Tone),
    Tones,
    Undo,
    Redo,
    Reset,
    Show,
    Help,
    Quit,
    /// A `:` command that could not be understood, with the reason.
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        if let Some(literal) = line.strip_prefix("::") {
            return Self::Edit(format!(":{literal}"));
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Edit(line.to_string());
        };

        let command = command.trim();
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((command, ""));

        match name {
            "tone" | "t" => parse_tone(rest),
            "tones" => Self::Tones,
            "undo" | "u" => Self::Undo,
            "redo" | "r" => Self::Redo,
            "reset" => Self::Reset,
            "show" | "s" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Invalid(format!("Unknown command ':{other}'. Try :help")),
        }
    }
}

fn parse_tone(args: &str) -> ReplCommand {
    if args.is_empty() {
        return ReplCommand::Invalid("Usage: :tone <row> <col> or :tone <name>".to_string());
    }

    let coords: Vec<&str> = args.split_whitespace().collect();
    if let [row, col] = coords.as_slice() {
        if let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) {
            return match Tone::at(row, col) {
                Some(tone) => ReplCommand::Tone(tone),
                None => ReplCommand::Invalid(format!("No tone at ({row}, {col}); rows and columns are 0-2")),
            };
        }
    }

    match Tone::from_name(args) {
        Some(tone) => ReplCommand::Tone(tone),
        None => ReplCommand::Invalid(format!("Unknown tone '{args}'. Try :tones")),
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command against the session, writing feedback to `out`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn execute<T: ToneTransform>(
    session: &mut EditorSession<T>,
    command: ReplCommand,
    out: &mut impl Write,
) -> Result<Flow> {
    match command {
        ReplCommand::Edit(text) => session.edit(text),
        ReplCommand::Tone(tone) => match session.apply_tone(tone) {
            ToneOutcome::Applied => writeln!(out, "{}", session.text())?,
            ToneOutcome::Unchanged => writeln!(out, "(no change) {}", session.text())?,
            ToneOutcome::Skipped => writeln!(out, "Nothing to rewrite. Type some text first.")?,
            ToneOutcome::Failed(message) => writeln!(out, "error: {message}")?,
        },
        ReplCommand::Tones => write_grid(session.selected_tone(), out)?,
        ReplCommand::Undo => {
            if session.can_undo() {
                session.undo();
                writeln!(out, "{}", session.text())?;
            } else {
                writeln!(out, "Nothing to undo.")?;
            }
        }
        ReplCommand::Redo => {
            if session.can_redo() {
                session.redo();
                writeln!(out, "{}", session.text())?;
            } else {
                writeln!(out, "Nothing to redo.")?;
            }
        }
        ReplCommand::Reset => {
            session.reset();
            writeln!(out, "Cleared.")?;
        }
        ReplCommand::Show => write_status(session, out)?,
        ReplCommand::Help => writeln!(out, "{HELP}")?,
        ReplCommand::Quit => return Ok(Flow::Quit),
        ReplCommand::Invalid(message) => writeln!(out, "{message}")?,
    }
    Ok(Flow::Continue)
}

/// Reads lines from `input` until EOF or `:quit`.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run<T: ToneTransform>(
    session: &mut EditorSession<T>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = ReplCommand::parse(&line);
        tracing::debug!("Command: {command:?}");
        if execute(session, command, &mut out)? == Flow::Quit {
            break;
        }
        out.flush().context("Failed to flush output")?;
    }
    Ok(())
}

fn write_status<T: ToneTransform>(session: &EditorSession<T>, out: &mut impl Write) -> Result<()> {
    let history = session.history();
    writeln!(out, "text: {:?}", session.text())?;
    writeln!(
        out,
        "undo: {} step(s), redo: {} step(s)",
        history.undo_depth(),
        history.redo_depth()
    )?;
    if let Some(tone) = session.selected_tone() {
        writeln!(out, "tone: {tone}")?;
    }
    if let Some(error) = session.last_error() {
        writeln!(out, "last error: {error}")?;
    }
    Ok(())
}

fn write_grid(selected: Option<Tone>, out: &mut impl Write) -> Result<()> {
    for tone in Tone::all() {
        let marker = if Some(tone) == selected { '*' } else { ' ' };
        writeln!(out, "{marker} {} {}  {}", tone.row(), tone.col(), tone.name())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use anyhow::anyhow;
    use tone_picker_core::HistoryStore;

    fn shout(text: &str, _tone: &Tone) -> Result<String> {
        Ok(text.to_uppercase())
    }

    fn session() -> EditorSession<fn(&str, &Tone) -> Result<String>> {
        let transform: fn(&str, &Tone) -> Result<String> = shout;
        EditorSession::new(HistoryStore::in_memory(""), transform)
    }

    fn run_script<T: ToneTransform>(session: &mut EditorSession<T>, script: &str) -> String {
        let mut out = Vec::new();
        run(session, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_plain_text_is_edit() {
        assert_eq!(
            ReplCommand::parse("hello world"),
            ReplCommand::Edit("hello world".to_string())
        );
        assert_eq!(ReplCommand::parse(""), ReplCommand::Edit(String::new()));
    }

    #[test]
    fn test_parse_escaped_colon() {
        assert_eq!(
            ReplCommand::parse("::) smile"),
            ReplCommand::Edit(":) smile".to_string())
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(ReplCommand::parse(":undo"), ReplCommand::Undo);
        assert_eq!(ReplCommand::parse(":r"), ReplCommand::Redo);
        assert_eq!(ReplCommand::parse(" :reset"), ReplCommand::Edit(" :reset".to_string()));
        assert_eq!(ReplCommand::parse(":reset "), ReplCommand::Reset);
        assert_eq!(ReplCommand::parse(":q"), ReplCommand::Quit);
        assert!(matches!(ReplCommand::parse(":bogus"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_tone_by_coordinates() {
        assert_eq!(
            ReplCommand::parse(":tone 0 2"),
            ReplCommand::Tone(Tone::at(0, 2).unwrap())
        );
        assert!(matches!(ReplCommand::parse(":tone 3 3"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse(":tone"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_tone_by_name() {
        assert_eq!(
            ReplCommand::parse(":tone casual + concise"),
            ReplCommand::Tone(Tone::at(2, 0).unwrap())
        );
        assert_eq!(
            ReplCommand::parse(":t Neutral"),
            ReplCommand::Tone(Tone::at(1, 1).unwrap())
        );
        assert!(matches!(ReplCommand::parse(":tone Snarky"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_script_edit_tone_undo_redo() {
        let mut s = session();
        let output = run_script(&mut s, "hello\n:tone 1 1\n:undo\n:redo\n");
        assert_eq!(output, "HELLO\nhello\nHELLO\n");
        assert_eq!(s.text(), "HELLO");
    }

    #[test]
    fn test_script_reports_empty_stacks() {
        let mut s = session();
        let output = run_script(&mut s, ":undo\n:redo\n:tone 0 0\n");
        assert_eq!(
            output,
            "Nothing to undo.\nNothing to redo.\nNothing to rewrite. Type some text first.\n"
        );
    }

    #[test]
    fn test_script_stops_at_quit() {
        let mut s = session();
        run_script(&mut s, "first\n:quit\nsecond\n");
        assert_eq!(s.text(), "first");
    }

    #[test]
    fn test_script_reset_and_show() {
        let mut s = session();
        let output = run_script(&mut s, "one\ntwo\n:reset\n:show\n");
        assert_eq!(
            output,
            "Cleared.\ntext: \"\"\nundo: 0 step(s), redo: 0 step(s)\n"
        );
    }

    #[test]
    fn test_failed_tone_is_reported() {
        let failing = |_text: &str, _tone: &Tone| -> Result<String> { Err(anyhow!("service down")) };
        let mut s = EditorSession::new(HistoryStore::in_memory(""), failing);
        let output = run_script(&mut s, "hi\n:tone 2 2\n:show\n");
        assert!(output.starts_with("error: service down\n"));
        assert!(output.contains("tone: Casual + Expanded\n"));
        assert!(output.contains("last error: service down\n"));
        assert_eq!(s.text(), "hi");
    }

    #[test]
    fn test_grid_marks_selected_tone() {
        let mut out = Vec::new();
        write_grid(Tone::at(0, 1), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "* 0 1  Professional + Neutral");
        assert_eq!(lines[4], "  1 1  Neutral");
    }
}
