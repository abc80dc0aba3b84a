//! Document module - turns an enrollment submission into a PDF.
//!
//! The work is split in three steps:
//! - `xml` - renders the submission as the `<matricula>` XML document
//! - `engine` - runs the XSLT transform and the FO renderer in a private
//!   temporary directory
//! - `generator` - glues both together for the HTTP handlers

pub mod common;
pub mod engine;
pub mod generator;
pub mod tools;
pub mod traits;
pub mod xml;

pub use engine::ConversionPipeline;
pub use generator::MatriculaGenerator;
pub use tools::{FopRenderer, XsltProcessor};
pub use traits::ConversionTool;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fixed name of the PDF handed back to the student.
pub const OUTPUT_FILENAME: &str = "matricula.pdf";

/// The two external conversion steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// XML -> XSL-FO through the bundled stylesheet.
    Transform,
    /// XSL-FO -> PDF.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Transform => write!(f, "XSLT transform"),
            Stage::Render => write!(f, "PDF render"),
        }
    }
}

/// Errors that can occur while producing the enrollment PDF.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XSLT stylesheet not found at {0}")]
    StylesheetMissing(PathBuf),
    #[error("failed to prepare working directory: {0}")]
    WorkDir(#[source] std::io::Error),
    #[error("failed to write XML document: {0}")]
    WriteMarkup(#[source] std::io::Error),
    #[error("{stage} failed: could not execute '{program}': {source}")]
    Spawn {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} failed with exit status {code}: {diagnostics}")]
    Exit {
        stage: Stage,
        code: i32,
        diagnostics: String,
    },
    #[error("{stage} timed out after {timeout:?}")]
    Timeout { stage: Stage, timeout: Duration },
    /// `file` is the bare file name; the working directory stays in the logs.
    #[error("{stage} produced no {file}")]
    MissingOutput { stage: Stage, file: &'static str },
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

impl DocumentError {
    /// The conversion stage that failed, if the error came from an external tool.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Spawn { stage, .. }
            | Self::Exit { stage, .. }
            | Self::Timeout { stage, .. }
            | Self::MissingOutput { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}
