//! External conversion tools: `xsltproc` and Apache FOP.
//!
//! Both are started with an explicit argument vector (no shell), are killed if
//! they outlive their timeout, and report their stderr on failure.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use super::common::tool_diagnostics;
use super::traits::ConversionTool;
use super::{DocumentError, Stage};

/// A command-line program run once per conversion.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
    leading_args: Vec<OsString>,
    timeout: Duration,
}

impl ExternalTool {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout,
        }
    }

    /// Arguments placed before the stage's own ones, e.g. `-c fop.xconf`.
    pub fn with_leading_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Run the program to completion and map its outcome to a pipeline result.
    pub async fn execute(&self, stage: Stage, args: Vec<OsString>) -> Result<(), DocumentError> {
        log::debug!(
            "{}: running {} {:?} {:?}",
            stage,
            self.program,
            self.leading_args,
            args
        );

        let child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(result) => result.map_err(|source| DocumentError::Spawn {
                stage,
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(DocumentError::Timeout {
                    stage,
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            return Err(DocumentError::Exit {
                stage,
                code,
                diagnostics: tool_diagnostics(&output),
            });
        }

        Ok(())
    }
}

/// Stage 1: applies the bundled stylesheet with `xsltproc -o <out> <xsl> <in>`.
pub struct XsltProcessor {
    tool: ExternalTool,
    stylesheet: PathBuf,
}

impl XsltProcessor {
    /// Create the processor, checking that the stylesheet is where we expect it.
    pub fn new(tool: ExternalTool, stylesheet: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let stylesheet = stylesheet.into();
        if !stylesheet.is_file() {
            return Err(DocumentError::StylesheetMissing(stylesheet));
        }
        Ok(Self { tool, stylesheet })
    }

    pub fn stylesheet(&self) -> &Path {
        &self.stylesheet
    }
}

#[async_trait]
impl ConversionTool for XsltProcessor {
    fn stage(&self) -> Stage {
        Stage::Transform
    }

    async fn run(&self, input: &Path, output: &Path) -> Result<(), DocumentError> {
        let args = vec![
            OsString::from("-o"),
            output.as_os_str().to_owned(),
            self.stylesheet.as_os_str().to_owned(),
            input.as_os_str().to_owned(),
        ];
        self.tool.execute(self.stage(), args).await
    }
}

/// Stage 2: renders XSL-FO to PDF with `fop <in> <out>`.
pub struct FopRenderer {
    tool: ExternalTool,
}

impl FopRenderer {
    pub fn new(tool: ExternalTool) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl ConversionTool for FopRenderer {
    fn stage(&self) -> Stage {
        Stage::Render
    }

    async fn run(&self, input: &Path, output: &Path) -> Result<(), DocumentError> {
        let args = vec![input.as_os_str().to_owned(), output.as_os_str().to_owned()];
        self.tool.execute(self.stage(), args).await
    }
}
