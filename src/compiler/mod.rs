//! Compile pipeline: run the typesetting tool on a source file
//!
//! ## States
//!
//! ```text
//! Idle → Running → Succeeded { result }
//!                → Failed { exit_code }
//! ```
//!
//! A compile blocks the caller until the tool exits. There is no timeout and
//! no cancellation; `&mut self` keeps it to one job at a time.

mod process;
pub mod scratch;
pub mod sink;

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::config::EditorConfig;
use crate::error::{Error, Result};
use process::ChildGuard;
pub use scratch::{ScratchDir, SCRATCH_FILE_NAME};
pub use sink::{CompileLog, LogLine, LogSink, OutputStream, PreviewSink, PreviewSlot};

/// Flags for a non-interactive, fail-fast run with file:line error prefixes
pub const ENGINE_FLAGS: &[&str] = &[
    "-interaction=nonstopmode",
    "-halt-on-error",
    "-file-line-error",
];

/// Appended to the log when the tool exits unsuccessfully
pub const FAILURE_NOTICE: &str = "Compilation failed. Check the log for details.\n";

/// Where the runner is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompileState {
    #[default]
    Idle,
    Running,
    /// Exit status zero; `result` is `None` if no result file was found
    Succeeded { result: Option<PathBuf> },
    Failed { exit_code: Option<i32> },
}

/// Which tool to run and what it produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Binary name, resolved through PATH
    pub engine: String,
    /// Extension of the result file, e.g. "pdf"
    pub result_extension: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            engine: "pdflatex".to_string(),
            result_extension: "pdf".to_string(),
        }
    }
}

impl From<&EditorConfig> for CompilerSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            engine: config.engine.clone(),
            result_extension: config.result_extension.clone(),
        }
    }
}

/// A single in-flight compile, discarded once the log and preview are updated
#[derive(Debug, Clone)]
pub struct CompileJob {
    pub source: PathBuf,
    pub working_dir: PathBuf,
    pub status: Option<ExitStatus>,
}

impl CompileJob {
    fn new(source: &Path) -> Self {
        let working_dir = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            source: source.to_path_buf(),
            working_dir,
            status: None,
        }
    }

    /// The source as the tool sees it from inside `working_dir`
    fn source_arg(&self) -> &std::ffi::OsStr {
        self.source
            .file_name()
            .unwrap_or(self.source.as_os_str())
    }

    /// Same base name, result extension, same directory
    pub fn result_path(&self, extension: &str) -> PathBuf {
        result_path_for(&self.source, extension)
    }
}

/// Path of the result file a source would produce
pub fn result_path_for(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

/// Runs the typesetting tool and routes its output
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    settings: CompilerSettings,
    state: CompileState,
}

impl Compiler {
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
            state: CompileState::Idle,
        }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// State after the most recent compile
    pub fn state(&self) -> &CompileState {
        &self.state
    }

    fn command(&self, job: &CompileJob) -> Command {
        let mut command = Command::new(&self.settings.engine);
        command
            .args(ENGINE_FLAGS)
            .arg(job.source_arg())
            .current_dir(&job.working_dir);
        command
    }

    /// Compile `source`, blocking until the tool exits.
    ///
    /// Output chunks go to `log` as they arrive. On success the result file is
    /// handed to `preview` exactly once; on failure the preview is untouched.
    pub fn compile(
        &mut self,
        source: &Path,
        log: &mut dyn LogSink,
        preview: &mut dyn PreviewSink,
    ) -> Result<CompileState> {
        let mut job = CompileJob::new(source);
        let mut command = self.command(&job);

        tracing::info!(
            "Compiling {} with {} in {}",
            job.source.display(),
            self.settings.engine,
            job.working_dir.display()
        );

        let guard = match ChildGuard::spawn(&mut command) {
            Ok(guard) => guard,
            Err(e) => {
                let err = Error::Startup {
                    program: self.settings.engine.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!("{}", err);
                log.append(OutputStream::Notice, &format!("{}\n", err.user_message()));
                self.state = CompileState::Idle;
                return Err(err);
            }
        };
        self.state = CompileState::Running;

        let status = match guard.stream_to(log) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Lost track of typesetting process: {}", e);
                log.append(OutputStream::Notice, FAILURE_NOTICE);
                self.state = CompileState::Failed { exit_code: None };
                return Err(Error::CompileFailure { exit_code: None });
            }
        };
        job.status = Some(status);

        if !status.success() {
            tracing::info!("Compile of {} failed: {}", job.source.display(), status);
            log.append(OutputStream::Notice, FAILURE_NOTICE);
            self.state = CompileState::Failed {
                exit_code: status.code(),
            };
            return Err(Error::CompileFailure {
                exit_code: status.code(),
            });
        }

        let result = job.result_path(&self.settings.result_extension);
        let located = if result.is_file() {
            tracing::info!("Compiled {}", result.display());
            preview.show(&result);
            Some(result)
        } else {
            tracing::warn!("Compile succeeded but {} is missing", result.display());
            log.append(
                OutputStream::Notice,
                &format!("No result file found at {}\n", result.display()),
            );
            None
        };

        self.state = CompileState::Succeeded { result: located };
        Ok(self.state.clone())
    }
}
