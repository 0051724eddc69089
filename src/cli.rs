//! Command-line argument parsing
//!
//! Supports:
//! - Printing a file with LaTeX highlighting
//! - Compiling a file, or stdin via the scratch directory
//! - Showing the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A minimal LaTeX editor
#[derive(Parser, Debug)]
#[command(name = "texpad", version, about = "A minimal LaTeX editor")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print a LaTeX file with syntax highlighting
    Highlight {
        /// File to highlight
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Compile a LaTeX file (or stdin when no file is given)
    Compile {
        /// Source file; omit to read the document from stdin
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Typesetting binary to run instead of the configured one
        #[arg(long, value_name = "NAME")]
        engine: Option<String>,

        /// Don't open the result in the system viewer
        #[arg(long)]
        no_preview: bool,

        /// Where to copy the result when compiling stdin
        /// (the scratch directory is removed on exit)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML
    Config,
}

/// What the compile subcommand should feed the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileInput {
    /// Open and compile a file in place
    File(PathBuf),
    /// Compile text read from stdin through the scratch directory
    Stdin,
}

impl CliCommand {
    /// Input for the compile subcommand, `None` for other subcommands
    pub fn compile_input(&self) -> Option<CompileInput> {
        match self {
            Self::Compile { path: Some(p), .. } if p.as_os_str() != "-" => {
                Some(CompileInput::File(p.clone()))
            }
            Self::Compile { .. } => Some(CompileInput::Stdin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        CliArgs::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_highlight_requires_file() {
        assert!(CliArgs::try_parse_from(["texpad", "highlight"]).is_err());
        assert_eq!(
            parse(&["texpad", "highlight", "paper.tex"]),
            CliCommand::Highlight {
                path: PathBuf::from("paper.tex")
            }
        );
    }

    #[test]
    fn test_compile_file() {
        let cmd = parse(&["texpad", "compile", "paper.tex", "--engine", "xelatex"]);
        assert_eq!(
            cmd.compile_input(),
            Some(CompileInput::File(PathBuf::from("paper.tex")))
        );
        assert!(matches!(
            cmd,
            CliCommand::Compile {
                engine: Some(ref e),
                no_preview: false,
                ..
            } if e == "xelatex"
        ));
    }

    #[test]
    fn test_compile_without_file_reads_stdin() {
        assert_eq!(
            parse(&["texpad", "compile", "--no-preview"]).compile_input(),
            Some(CompileInput::Stdin)
        );
        assert_eq!(
            parse(&["texpad", "compile", "-"]).compile_input(),
            Some(CompileInput::Stdin)
        );
    }

    #[test]
    fn test_config_has_no_compile_input() {
        assert_eq!(parse(&["texpad", "config"]).compile_input(), None);
    }
}
