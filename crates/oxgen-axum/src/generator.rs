use log::info;

use oxgen_core::config::GenOptions;
use oxgen_core::error::GenerateError;
use oxgen_core::resolve::{FormatRegistry, resolve_definitions};
use oxgen_core::spec::SpecDocument;
use oxgen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;
use crate::naming::snake;

/// axum service generator: one model file per definition, an operations
/// file of stubs, a server file with the route table and handlers, and an
/// optional runnable scaffold.
pub struct AxumServerGenerator;

impl CodeGenerator for AxumServerGenerator {
    fn generate(
        &self,
        doc: &SpecDocument,
        registry: &FormatRegistry,
        options: &GenOptions,
    ) -> Result<Vec<GeneratedFile>, GenerateError> {
        let mut files = Vec::new();

        if !options.skip_models {
            let defs = resolve_definitions(
                doc,
                registry,
                &options.model_module,
                &options.include.models,
            )?;
            for def in &defs {
                files.push(GeneratedFile {
                    path: format!("src/{}/{}.rs", options.model_module, snake(&def.name)),
                    content: emitters::models::emit_model(def, registry),
                });
            }
            files.push(GeneratedFile {
                path: format!("src/{}/mod.rs", options.model_module),
                content: emitters::scaffold::emit_models_mod(&defs),
            });
            info!("generated {} model files", defs.len());
        }

        if !options.skip_operations {
            files.push(GeneratedFile {
                path: format!("src/{}.rs", options.operations_module),
                content: emitters::operations::emit_operations(doc, options)?,
            });
            files.push(GeneratedFile {
                path: format!("src/{}.rs", options.server_module),
                content: emitters::server::emit_server(doc, options)?,
            });
        }

        if options.scaffold {
            files.extend(emitters::scaffold::emit_scaffold(doc, options));
        }

        Ok(files)
    }
}
