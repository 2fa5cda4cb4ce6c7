//! Interactive translation loop.
//!
//! Lines accumulate until a blank line, then the whole buffer is translated.
//! `exit` or `quit` on an empty buffer ends the session, as do Ctrl-C and Ctrl-D.

use crate::config::PyjsConfig;
use pyjs_translate::Transpiler;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const PROMPT: &str = ">>> ";
const CONTINUATION_PROMPT: &str = "... ";

/// What the loop should do after a line was fed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplEvent {
    /// Keep reading.
    Continue,
    /// The buffer was translated.
    Translated(String),
    Quit,
}

/// Line buffer between translations.
#[derive(Debug, Default)]
pub struct ReplSession {
    buffer: Vec<String>,
    transpiler: Transpiler,
}

impl ReplSession {
    pub fn new(transpiler: Transpiler) -> Self {
        Self {
            buffer: Vec::new(),
            transpiler,
        }
    }

    pub fn feed(&mut self, line: &str) -> ReplEvent {
        let trimmed = line.trim();

        if self.buffer.is_empty() && matches!(trimmed, "exit" | "quit") {
            return ReplEvent::Quit;
        }

        if trimmed.is_empty() {
            if self.buffer.is_empty() {
                return ReplEvent::Continue;
            }
            let source = std::mem::take(&mut self.buffer).join("\n");
            return ReplEvent::Translated(self.transpiler.transpile(&source));
        }

        // Indentation is significant, so keep the line as typed.
        self.buffer.push(line.trim_end().to_string());
        ReplEvent::Continue
    }

    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn prompt(&self) -> &'static str {
        if self.is_pending() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        }
    }
}

/// Run the repl command
pub fn run(config: &PyjsConfig) -> i32 {
    match run_repl(Transpiler::new(config.translate_options())) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e:#}");
            1
        }
    }
}

fn run_repl(transpiler: Transpiler) -> anyhow::Result<()> {
    println!("pyjs REPL - Python to JavaScript");
    println!("enter Python, finish with an empty line; exit or quit to leave");
    let mut editor = DefaultEditor::new()?;
    let mut session = ReplSession::new(transpiler);

    loop {
        match editor.readline(session.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match session.feed(&line) {
                    ReplEvent::Continue => {}
                    ReplEvent::Translated(js) => println!("{js}\n"),
                    ReplEvent::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                // Ctrl-D with pending input still translates it.
                if let ReplEvent::Translated(js) = session.feed("") {
                    println!("{js}");
                }
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("bye");
    Ok(())
}
