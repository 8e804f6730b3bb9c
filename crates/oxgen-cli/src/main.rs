mod loader;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use oxgen_axum::AxumServerGenerator;
use oxgen_core::config::{self, CONFIG_FILE_NAME, GenOptions};
use oxgen_core::resolve::{self, FormatRegistry};
use oxgen_core::spec::{self, SpecDocument};
use oxgen_core::{CodeGenerator, GeneratedFile};

#[derive(Parser)]
#[command(name = "oxgen", about = "Swagger to axum service generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate service source from a spec document
    Generate {
        /// Path or URL of the spec document (YAML or JSON)
        #[arg(short, long)]
        spec: Option<String>,

        /// Directory generated files are written under
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Skip model generation
        #[arg(long)]
        skip_models: bool,

        /// Skip operations and server generation
        #[arg(long)]
        skip_operations: bool,

        /// Also emit a runnable service scaffold (Cargo.toml + main.rs)
        #[arg(long)]
        scaffold: bool,
    },

    /// Validate a spec document
    Validate {
        /// Path or URL of the spec document
        #[arg(short, long)]
        spec: String,
    },

    /// Initialize an oxgen configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            spec,
            target,
            skip_models,
            skip_operations,
            scaffold,
        } => cmd_generate(spec, target, skip_models, skip_operations, scaffold),

        Commands::Validate { spec } => cmd_validate(&spec),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oxgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<GenOptions>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &str) -> Result<SpecDocument> {
    let content = loader::load_document(path)?;
    let doc = if loader::is_json(path) {
        spec::from_json(&content)?
    } else {
        spec::from_yaml(&content)?
    };
    Ok(doc)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    spec: Option<String>,
    target: Option<PathBuf>,
    skip_models: bool,
    skip_operations: bool,
    scaffold: bool,
) -> Result<()> {
    let mut options = try_load_config()?.unwrap_or_default();
    if let Some(spec) = spec {
        options.spec = spec;
    }
    if let Some(target) = target {
        options.target = target.display().to_string();
    }
    options.skip_models |= skip_models;
    options.skip_operations |= skip_operations;
    options.scaffold |= scaffold;

    let doc = load_spec(&options.spec)?;
    let registry = FormatRegistry::with_defaults();

    let files = AxumServerGenerator.generate(&doc, &registry, &options)?;

    let output_dir = PathBuf::from(&options.target);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    write_files(&output_dir, &files)?;

    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    eprintln!("The generated files should not be edited manually — changes will be overwritten.");
    Ok(())
}

fn cmd_validate(spec: &str) -> Result<()> {
    let doc = load_spec(spec)?;

    eprintln!("Valid swagger {} spec: {}", doc.swagger, doc.info.title);
    eprintln!("  Version: {}", doc.info.version);
    eprintln!("  Paths: {}", doc.paths.len());
    eprintln!("  Definitions: {}", doc.definitions.len());

    // Also check that everything resolves and groups.
    let registry = FormatRegistry::with_defaults();
    let options = GenOptions::default();
    let defs = resolve::resolve_definitions(&doc, &registry, &options.model_module, &[])?;
    let files = AxumServerGenerator.generate(&doc, &registry, &options)?;
    eprintln!("  Resolved definitions: {}", defs.len());
    eprintln!("  Generated files: {}", files.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
