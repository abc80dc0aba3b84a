//! Shared helpers for the integration tests: sample submissions and fake
//! conversion tools.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use matricula_server::document::common::get_static_dir;
use matricula_server::document::tools::ExternalTool;
use matricula_server::document::{
    ConversionPipeline, ConversionTool, DocumentError, FopRenderer, MatriculaGenerator, Stage,
    XsltProcessor,
};
use matricula_server::enrollment::models::Submission;

/// The enrollment used throughout the examples: Anna Puig, DAM first year.
pub fn anna_json() -> Value {
    json!({
        "nom": "Anna",
        "cognoms": "Puig",
        "email": "a@x.com",
        "adreca": "C/ Major 1",
        "telefon": "600111222",
        "cicle": "DAM",
        "curs": "1",
        "moduls": ["Programació", "Bases de Dades"]
    })
}

pub fn anna() -> Submission {
    Submission {
        nom: "Anna".to_string(),
        cognoms: "Puig".to_string(),
        email: "a@x.com".to_string(),
        adreca: "C/ Major 1".to_string(),
        telefon: "600111222".to_string(),
        cicle: "DAM".to_string(),
        curs: "1".to_string(),
        moduls: vec!["Programació".to_string(), "Bases de Dades".to_string()],
    }
}

/// What a [`FakeTool`] does when it runs.
pub enum Behavior {
    /// Write `prefix` followed by the input file to the output file.
    Copy { prefix: &'static [u8], delay: Duration },
    /// Fail like a tool exiting with status 1.
    Fail(&'static str),
}

/// In-process stand-in for `xsltproc` or `fop` that counts its runs.
pub struct FakeTool {
    stage: Stage,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeTool {
    pub fn copying(stage: Stage, prefix: &'static [u8]) -> Arc<Self> {
        Self::new(
            stage,
            Behavior::Copy {
                prefix,
                delay: Duration::ZERO,
            },
        )
    }

    pub fn slow(stage: Stage, prefix: &'static [u8], delay: Duration) -> Arc<Self> {
        Self::new(stage, Behavior::Copy { prefix, delay })
    }

    pub fn failing(stage: Stage, diagnostics: &'static str) -> Arc<Self> {
        Self::new(stage, Behavior::Fail(diagnostics))
    }

    fn new(stage: Stage, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            stage,
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConversionTool for FakeTool {
    fn stage(&self) -> Stage {
        self.stage
    }

    async fn run(&self, input: &Path, output: &Path) -> Result<(), DocumentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Copy { prefix, delay } => {
                let content = tokio::fs::read(input).await.expect("read fake tool input");
                tokio::time::sleep(*delay).await;
                let mut out = prefix.to_vec();
                out.extend_from_slice(&content);
                tokio::fs::write(output, out)
                    .await
                    .expect("write fake tool output");
                Ok(())
            }
            Behavior::Fail(diagnostics) => Err(DocumentError::Exit {
                stage: self.stage,
                code: 1,
                diagnostics: diagnostics.to_string(),
            }),
        }
    }
}

/// Generator whose transform copies the XML and whose render prefixes `%PDF-`.
pub fn fake_generator(work_root: &Path) -> MatriculaGenerator {
    MatriculaGenerator::new(ConversionPipeline::new(
        work_root,
        FakeTool::copying(Stage::Transform, b""),
        FakeTool::copying(Stage::Render, b"%PDF-1.4\n"),
    ))
}

/// Shell scripts imitating the command-line contract of `xsltproc` and `fop`.
pub struct FakeScripts {
    pub xsltproc: PathBuf,
    pub fop: PathBuf,
    pub broken_xsltproc: PathBuf,
    pub broken_fop: PathBuf,
}

impl FakeScripts {
    pub fn write_to(dir: &Path) -> Self {
        let write = |name: &str, body: &str| {
            let path = dir.join(name);
            std::fs::write(&path, body).expect("write fake script");
            path
        };

        Self {
            // xsltproc -o <out> <stylesheet> <in>
            xsltproc: write(
                "xsltproc.sh",
                "[ \"$1\" = \"-o\" ] || exit 64\n[ -f \"$3\" ] || exit 65\ncp \"$4\" \"$2\"\n",
            ),
            // fop <in> <out>
            fop: write(
                "fop.sh",
                "{ printf '%%PDF-1.4\\n'; cat \"$1\"; } > \"$2\"\n",
            ),
            broken_xsltproc: write(
                "broken-xsltproc.sh",
                "echo \"matricula.xsl:3: parser error : Opening and ending tag mismatch\" >&2\nexit 5\n",
            ),
            broken_fop: write(
                "broken-fop.sh",
                "echo \"SEVERE: Exception org.apache.fop.fo.ValidationException\" >&2\nexit 1\n",
            ),
        }
    }

    /// A tool running `script` through `sh`, so the script needs no exec bit.
    pub fn tool(script: &Path) -> ExternalTool {
        ExternalTool::new("sh", Duration::from_secs(10)).with_leading_args([script])
    }

    pub fn generator(&self, work_root: &Path, xsltproc: &Path, fop: &Path) -> MatriculaGenerator {
        let stylesheet = get_static_dir().join("matricula.xsl");
        let transform =
            XsltProcessor::new(Self::tool(xsltproc), stylesheet).expect("bundled stylesheet");
        let render = FopRenderer::new(Self::tool(fop));
        MatriculaGenerator::new(ConversionPipeline::new(
            work_root,
            Arc::new(transform),
            Arc::new(render),
        ))
    }
}

/// Number of entries left in a directory.
pub fn entries_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
