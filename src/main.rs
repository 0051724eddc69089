use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use texpad::cli::{CliArgs, CliCommand, CompileInput};
use texpad::compiler::{CompileState, LogSink, OutputStream, PreviewSink};
use texpad::preview::SystemViewer;
use texpad::{Document, EditorConfig, Highlighter, Session};

/// Streams compiler output straight to the terminal
struct TerminalLog;

impl LogSink for TerminalLog {
    fn clear(&mut self) {}

    fn append(&mut self, stream: OutputStream, text: &str) {
        // Write errors (e.g. a closed pipe) are ignored
        let _ = match stream {
            OutputStream::Stdout => io::stdout().write_all(text.as_bytes()),
            OutputStream::Stderr | OutputStream::Notice => {
                io::stderr().write_all(text.as_bytes())
            }
        };
    }
}

/// Hands results to the platform viewer, or just prints where they are.
///
/// Disarmed while a file is being opened so a stale result from an earlier
/// run isn't launched right before the fresh one.
struct Viewer {
    system: Option<SystemViewer>,
    armed: bool,
}

impl Viewer {
    fn new(open_externally: bool) -> Self {
        Self {
            system: open_externally.then(SystemViewer::new),
            armed: false,
        }
    }
}

impl PreviewSink for Viewer {
    fn show(&mut self, result: &Path) {
        if !self.armed {
            println!("Existing result: {}", result.display());
            return;
        }
        match &mut self.system {
            Some(viewer) => viewer.show(result),
            None => println!("Result: {}", result.display()),
        }
    }
}

fn main() -> Result<()> {
    texpad::tracing::init();

    let args = CliArgs::parse();
    let config = EditorConfig::load();

    match &args.command {
        CliCommand::Highlight { path } => highlight(&config, path),
        CliCommand::Config => {
            print!("{}", config.to_yaml().map_err(anyhow::Error::msg)?);
            Ok(())
        }
        CliCommand::Compile {
            engine,
            no_preview,
            output,
            ..
        } => {
            let mut config = config.clone();
            if let Some(engine) = engine {
                config.engine = engine.clone();
            }
            if *no_preview {
                config.open_preview = false;
            }
            match args.command.compile_input() {
                Some(CompileInput::File(path)) => compile_file(&config, &path),
                _ => compile_stdin(&config, output.as_deref()),
            }
        }
    }
}

fn highlight(config: &EditorConfig, path: &Path) -> Result<()> {
    let highlighter = Highlighter::latex(config.highlight_theme())?;
    let document = Document::from_file(path)?;

    let mut stdout = io::stdout().lock();
    for (idx, highlights) in highlighter.highlight_document(&document).iter().enumerate() {
        let line = document.line_text(idx).unwrap_or_default();
        writeln!(stdout, "{}", highlighter.render_ansi(&line, highlights))?;
    }
    Ok(())
}

fn compile_file(config: &EditorConfig, path: &Path) -> Result<()> {
    let mut session = Session::new(config, TerminalLog, Viewer::new(config.open_preview))?;
    session
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    session.preview_mut().armed = true;
    let outcome = session.compile();
    session.close();
    report(outcome?)
}

fn compile_stdin(config: &EditorConfig, output: Option<&Path>) -> Result<()> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read document from stdin")?;

    // The result lives in the scratch directory; only a copy is ever opened
    let mut viewer = Viewer::new(false);
    viewer.armed = true;
    let mut session = Session::new(config, TerminalLog, viewer)?;
    session.document_mut().set_text(&text);
    let outcome = session.compile();

    // Copy out before close() removes the scratch directory
    let copied = match (&outcome, output) {
        (Ok(CompileState::Succeeded { result: Some(result) }), Some(dest)) => {
            std::fs::copy(result, dest).with_context(|| {
                format!("Failed to copy {} to {}", result.display(), dest.display())
            })?;
            Some(dest.to_path_buf())
        }
        _ => None,
    };
    session.close();

    if let Some(dest) = copied {
        if config.open_preview {
            SystemViewer::new().show(&dest);
        } else {
            println!("Copied result to {}", dest.display());
        }
    }
    report(outcome?)
}

fn report(state: CompileState) -> Result<()> {
    if let CompileState::Succeeded { result: None } = state {
        anyhow::bail!("Compilation finished but produced no result file");
    }
    Ok(())
}
