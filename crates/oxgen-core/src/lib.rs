pub mod config;
pub mod error;
pub mod resolve;
pub mod rules;
pub mod spec;

use config::GenOptions;
use error::GenerateError;
use resolve::FormatRegistry;
use spec::SpecDocument;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a spec document.
///
/// Generation is single-pass and deterministic: the same (document,
/// registry, options) input must produce byte-identical output, since
/// downstream consumers diff regenerated trees.
pub trait CodeGenerator {
    fn generate(
        &self,
        doc: &SpecDocument,
        registry: &FormatRegistry,
        options: &GenOptions,
    ) -> Result<Vec<GeneratedFile>, GenerateError>;
}
