//! # External Pretty-Printer Boundary
//!
//! Pretty-printing is delegated to an external program (`xmllint --format -`
//! by default), fed the fragment on stdin and read back from stdout. The
//! boundary is deliberately narrow: [`XmlFormatter::format`] either returns
//! the formatted text or a [`FormatError`] that distinguishes a missing
//! executable from a failing one. The decision to fall back to unformatted
//! output lives in the caller ([`crate::sync`]), where it is an explicit,
//! tested branch rather than an incidental catch-all.

use std::io::{ErrorKind, Write};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Failure modes of the external formatter. None of these abort the run;
/// the sync pipeline falls back to the unformatted fragment.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The formatter executable was not found on the search path.
    #[error("formatter '{program}' not found on PATH")]
    Unavailable { program: String },

    /// The formatter ran but exited with a non-zero status.
    #[error("formatter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// An I/O error while talking to the formatter process.
    #[error("formatter I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The formatter produced output that is not valid UTF-8.
    #[error("formatter produced non-UTF-8 output")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

/// Handle to the external pretty-printing program.
#[derive(Debug, Clone)]
pub struct XmlFormatter {
    program: String,
    args: Vec<String>,
}

impl XmlFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The standard `xmllint --format -` invocation.
    pub fn xmllint() -> Self {
        Self::new("xmllint", vec!["--format".to_string(), "-".to_string()])
    }

    /// Run the formatter over `fragment`, returning its stdout.
    pub fn format(&self, fragment: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    FormatError::Unavailable {
                        program: self.program.clone(),
                    }
                } else {
                    FormatError::Io(e)
                }
            })?;

        // Write the fragment and close stdin so the formatter sees EOF. A
        // broken pipe means the formatter exited without reading; its exit
        // status is the more useful diagnostic.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(fragment.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(FormatError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
