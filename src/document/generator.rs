//! Generator for the enrollment PDF ("matrícula").

use std::sync::Arc;

use super::engine::ConversionPipeline;
use super::tools::{ExternalTool, FopRenderer, XsltProcessor};
use super::xml::render_matricula_xml;
use super::{DocumentError, GeneratedDocument, OUTPUT_FILENAME};
use crate::config::AppConfig;
use crate::enrollment::models::Submission;

/// Renders a submission to XML and converts it to PDF.
#[derive(Clone)]
pub struct MatriculaGenerator {
    pipeline: ConversionPipeline,
}

impl MatriculaGenerator {
    pub fn new(pipeline: ConversionPipeline) -> Self {
        Self { pipeline }
    }

    /// Build the generator with the real `xsltproc` and `fop` tools.
    pub fn from_config(config: &AppConfig) -> Result<Self, DocumentError> {
        let transform = XsltProcessor::new(
            ExternalTool::new(&config.xsltproc_bin, config.tool_timeout)
                .with_leading_args(&config.xsltproc_args),
            &config.stylesheet_path,
        )?;
        let render = FopRenderer::new(
            ExternalTool::new(&config.fop_bin, config.tool_timeout)
                .with_leading_args(&config.fop_args),
        );

        Ok(Self::new(ConversionPipeline::new(
            &config.work_dir,
            Arc::new(transform),
            Arc::new(render),
        )))
    }

    /// Generate the document from the submission.
    pub async fn generate(&self, submission: &Submission) -> Result<GeneratedDocument, DocumentError> {
        let xml = render_matricula_xml(submission);
        let pdf = self.pipeline.run(&xml).await?;

        Ok(GeneratedDocument {
            filename: OUTPUT_FILENAME.to_string(),
            pdf,
        })
    }
}
