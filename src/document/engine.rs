//! Conversion pipeline: XML -> XSL-FO -> PDF.
//!
//! Every run works inside its own temporary directory under the configured
//! work root, so simultaneous submissions never see each other's files. The
//! directory is removed when the run ends, successfully or not.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use super::traits::ConversionTool;
use super::{DocumentError, Stage};

const XML_FILENAME: &str = "matricula.xml";
const FO_FILENAME: &str = "matricula.fo";
const PDF_FILENAME: &str = "matricula.pdf";

/// Two-stage conversion over the filesystem.
#[derive(Clone)]
pub struct ConversionPipeline {
    work_root: PathBuf,
    transform: Arc<dyn ConversionTool>,
    render: Arc<dyn ConversionTool>,
}

impl ConversionPipeline {
    pub fn new(
        work_root: impl Into<PathBuf>,
        transform: Arc<dyn ConversionTool>,
        render: Arc<dyn ConversionTool>,
    ) -> Self {
        Self {
            work_root: work_root.into(),
            transform,
            render,
        }
    }

    /// Convert an XML document to PDF bytes.
    ///
    /// The render stage only starts after the transform stage succeeded.
    pub async fn run(&self, markup: &str) -> Result<Vec<u8>, DocumentError> {
        let workspace = self.create_workspace().await?;
        let dir = workspace.path().to_path_buf();

        let xml_path = dir.join(XML_FILENAME);
        let pdf_path = dir.join(PDF_FILENAME);

        tokio::fs::write(&xml_path, markup)
            .await
            .map_err(DocumentError::WriteMarkup)?;

        self.run_stage(self.transform.as_ref(), &dir, XML_FILENAME, FO_FILENAME)
            .await?;
        self.run_stage(self.render.as_ref(), &dir, FO_FILENAME, PDF_FILENAME)
            .await?;

        let pdf = tokio::fs::read(&pdf_path)
            .await
            .map_err(DocumentError::ReadPdf)?;
        if pdf.is_empty() {
            log::warn!("{} wrote an empty {}", Stage::Render, pdf_path.display());
            return Err(DocumentError::MissingOutput {
                stage: Stage::Render,
                file: PDF_FILENAME,
            });
        }

        log::debug!("Removing working directory {}", dir.display());
        drop(workspace);

        Ok(pdf)
    }

    async fn create_workspace(&self) -> Result<TempDir, DocumentError> {
        tokio::fs::create_dir_all(&self.work_root)
            .await
            .map_err(DocumentError::WorkDir)?;

        let root = self.work_root.clone();
        tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("matricula-")
                .tempdir_in(root)
        })
        .await
        .map_err(|e| DocumentError::WorkDir(std::io::Error::other(e)))?
        .map_err(DocumentError::WorkDir)
    }

    async fn run_stage(
        &self,
        tool: &dyn ConversionTool,
        dir: &Path,
        input: &str,
        output: &'static str,
    ) -> Result<(), DocumentError> {
        let stage = tool.stage();
        let input_path = dir.join(input);
        let output_path = dir.join(output);
        log::debug!("{} started: {}", stage, input_path.display());

        tool.run(&input_path, &output_path).await?;

        match tokio::fs::metadata(&output_path).await {
            Ok(meta) if meta.is_file() => {
                log::debug!("{} finished: {} bytes", stage, meta.len());
                Ok(())
            }
            _ => {
                log::warn!("{} produced no output at {}", stage, output_path.display());
                Err(DocumentError::MissingOutput {
                    stage,
                    file: output,
                })
            }
        }
    }
}
