//! Child process handling for the typesetting tool
//!
//! The child lives in a [`ChildGuard`]: whichever way the compile exits, the
//! process is reaped and its pipes are closed. Output is read line by line on
//! two scoped threads and delivered to the log sink on the calling thread.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;

use super::sink::{LogSink, OutputStream};

/// Owns a spawned child until its exit status has been collected
pub(crate) struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    /// Spawn with piped stdout/stderr and no stdin, so the tool can never
    /// block waiting for input.
    pub(crate) fn spawn(command: &mut Command) -> io::Result<Self> {
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        Ok(Self { child: Some(child) })
    }

    /// Forward all output to `log`, then wait for the exit status
    pub(crate) fn stream_to(mut self, log: &mut dyn LogSink) -> io::Result<ExitStatus> {
        let Some(child) = self.child.as_mut() else {
            return Err(io::Error::other("child already reaped"));
        };
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (tx, rx) = mpsc::channel::<(OutputStream, String)>();
        thread::scope(|scope| {
            if let Some(out) = stdout {
                let tx = tx.clone();
                scope.spawn(move || forward_lines(out, OutputStream::Stdout, tx));
            }
            if let Some(err) = stderr {
                let tx = tx.clone();
                scope.spawn(move || forward_lines(err, OutputStream::Stderr, tx));
            }
            // Receiver ends once both readers hit EOF and drop their senders
            drop(tx);
            for (stream, chunk) in rx {
                log.append(stream, &chunk);
            }
        });

        self.wait()
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| io::Error::other("child already reaped"))?;
        child.wait()
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Err(e) = child.kill() {
            tracing::debug!("Failed to kill typesetting process {}: {}", child.id(), e);
        }
        if let Err(e) = child.wait() {
            tracing::warn!("Failed to reap typesetting process {}: {}", child.id(), e);
        }
    }
}

fn forward_lines(reader: impl Read, stream: OutputStream, tx: Sender<(OutputStream, String)>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let chunk = String::from_utf8_lossy(&buf).into_owned();
                if tx.send((stream, chunk)).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Error reading {:?} of typesetting process: {}", stream, e);
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::compiler::sink::CompileLog;

    #[test]
    fn test_streams_both_pipes_in_per_stream_order() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg("echo out1; echo err1 1>&2; echo out2; echo err2 1>&2; exit 3");
        let mut log = CompileLog::new();

        let status = ChildGuard::spawn(&mut cmd)
            .unwrap()
            .stream_to(&mut log)
            .unwrap();

        assert_eq!(status.code(), Some(3));
        let stdout: Vec<&str> = log.stream(OutputStream::Stdout).collect();
        let stderr: Vec<&str> = log.stream(OutputStream::Stderr).collect();
        assert_eq!(stdout, vec!["out1\n", "out2\n"]);
        assert_eq!(stderr, vec!["err1\n", "err2\n"]);
    }

    #[test]
    fn test_partial_last_line_is_delivered() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("printf 'no newline'");
        let mut log = CompileLog::new();

        let status = ChildGuard::spawn(&mut cmd)
            .unwrap()
            .stream_to(&mut log)
            .unwrap();

        assert!(status.success());
        assert_eq!(log.text(), "no newline");
    }

    #[test]
    fn test_dropped_guard_reaps_child() {
        let mut cmd = Command::new("sleep");
        cmd.arg("30");
        let guard = ChildGuard::spawn(&mut cmd).unwrap();
        // Must return promptly: the guard kills before waiting
        drop(guard);
    }
}
