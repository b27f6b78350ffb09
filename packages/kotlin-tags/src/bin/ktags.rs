//! ktags - tags generator for Kotlin sources
//!
//! # Usage
//!
//! ```bash
//! # Tag a source tree into ./tags
//! ktags -o tags src/
//!
//! # JSON lines, classes and methods only
//! ktags --format json --kinds cm src/main/kotlin
//!
//! # Drop variables from the default kind set
//! ktags --kinds=-v Main.kt
//! ```
//!
//! Exit status: 0 on success, 1 when some files failed, 2 on fatal errors.

use clap::Parser;
use kotlin_tags::features::parsing::LanguagePlugin;
use kotlin_tags::shared::logging::init_cli_logger;
use kotlin_tags::{
    ExtractTagsUseCase, KotlinPlugin, OutputFormat, Result, TagsConfig, TagsError, TagsOutput,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "ktags", version)]
#[command(about = "Generate ctags-compatible tags for Kotlin sources", long_about = None)]
struct Cli {
    /// Files or directories to tag
    #[arg(required_unless_present = "list_kinds")]
    paths: Vec<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kind letters: `cm` replaces the set, `+T-v` edits it
    #[arg(long, allow_hyphen_values = true)]
    kinds: Option<String>,

    /// Tag declarations inside function bodies
    #[arg(long)]
    locals: bool,

    /// Keep source order instead of sorting by name
    #[arg(long)]
    no_sort: bool,

    /// Fail files with syntax errors
    #[arg(long)]
    strict: bool,

    /// Also emit fully qualified tags
    #[arg(long)]
    qualified: bool,

    /// Skip the grammar check
    #[arg(long)]
    no_validate: bool,

    /// Print the kind table and exit
    #[arg(long)]
    list_kinds: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every file was tagged
fn run(cli: &Cli) -> Result<bool> {
    if cli.list_kinds {
        list_kinds();
        return Ok(true);
    }

    let config = build_config(cli)?;
    let use_case = ExtractTagsUseCase::new(config)?;
    let batch = use_case.extract_paths(&cli.paths);

    let output = TagsOutput::from_config(use_case.config());
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| TagsError::file(path.display().to_string(), e))?;
            output.write(&mut BufWriter::new(file), &batch.results)?;
        }
        None => output.write(&mut io::stdout().lock(), &batch.results)?,
    }

    for (path, err) in &batch.failures {
        error!(path = %path.display(), "{}", err);
    }
    Ok(batch.is_success())
}

/// Config file first, then flags on top
fn build_config(cli: &Cli) -> Result<TagsConfig> {
    let mut config = match &cli.config {
        Some(path) => TagsConfig::from_yaml(path)?,
        None => TagsConfig::default(),
    };

    if let Some(spec) = &cli.kinds {
        config.apply_kind_spec(spec)?;
    }
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }
    if cli.locals {
        config = config.with_locals(true);
    }
    if cli.no_sort {
        config = config.with_sort(false);
    }
    if cli.strict {
        config = config.with_strict(true);
    }
    if cli.qualified {
        config = config.with_qualified_tags(true);
    }
    if cli.no_validate {
        config = config.with_validation(false);
    }
    debug!(
        format = %config.format,
        kinds = %config.kinds,
        locals = config.include_locals,
        strict = config.strict,
        "Resolved configuration"
    );
    Ok(config)
}

fn list_kinds() {
    for kind in KotlinPlugin::new().kinds() {
        println!("{}  {}", kind.letter(), kind.plural());
    }
}
