//! Trait for the external conversion steps.

use async_trait::async_trait;
use std::path::Path;

use super::{DocumentError, Stage};

/// One external conversion step reading `input` and producing `output`.
///
/// Implementations must either leave a complete file at `output` and return
/// `Ok(())`, or return an error describing why they could not.
#[async_trait]
pub trait ConversionTool: Send + Sync {
    /// Which pipeline stage this tool implements.
    fn stage(&self) -> Stage;

    async fn run(&self, input: &Path, output: &Path) -> Result<(), DocumentError>;
}
