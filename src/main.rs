use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use runway::config::{self, GeneratorConfig, LoadMethod};
use runway::cypher_generator::{IngestionGenerator, PyIngestSettings};
use runway::models::{format_diagnostics, DataModel, SourceColumns};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Constraint DDL only
    Constraints,
    /// Constraints followed by batched LOAD CSV statements
    LoadCsv,
    /// `$dict.rows` statements, one per element
    Standard,
    /// PyIngest YAML configuration
    Pyingest,
    /// Report data model diagnostics and exit
    Validate,
}

/// Runway - compile a graph data model into Neo4j ingestion Cypher
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data model file (YAML, or JSON with a .json extension)
    model: PathBuf,

    /// YAML mapping of source file name to its column names
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Generator configuration file; environment variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "load-csv")]
    output: Output,

    /// Write output to a file instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Emit bare row values without type casts
    #[arg(long)]
    no_strict_typing: bool,

    /// How LOAD CSV statements will be submitted (api or browser)
    #[arg(long)]
    method: Option<LoadMethod>,

    /// Rows per transaction in LOAD CSV statements
    #[arg(long)]
    batch_size: Option<u32>,

    /// File for elements that declare no source_name
    #[arg(long)]
    source_name: Option<String>,

    /// Directory prefix inside file:/// URLs
    #[arg(long)]
    file_directory: Option<String>,

    #[arg(long, default_value = "bolt://localhost:7687")]
    server_uri: String,

    #[arg(long, default_value = "neo4j")]
    admin_user: String,

    #[arg(long)]
    database: Option<String>,

    /// PyIngest basepath substituted for $BASE in file urls
    #[arg(long, default_value = "./")]
    basepath: String,
}

impl Cli {
    fn cli_config(&self) -> config::CliConfig {
        config::CliConfig {
            strict_typing: self.no_strict_typing.then_some(false),
            method: self.method,
            batch_size: self.batch_size,
            source_name: self.source_name.clone(),
            file_directory: self.file_directory.clone(),
        }
    }

    fn pyingest_settings(&self) -> PyIngestSettings {
        PyIngestSettings {
            server_uri: self.server_uri.clone(),
            admin_user: self.admin_user.clone(),
            database: self.database.clone(),
            basepath: self.basepath.clone(),
        }
    }
}

fn load_source_columns(path: &Path) -> Result<SourceColumns> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read columns file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse columns file {}", path.display()))
}

fn report_diagnostics(generator: &IngestionGenerator) -> Result<()> {
    let diagnostics = generator.diagnostics();
    if diagnostics.is_empty() {
        println!("Data model is valid");
        return Ok(());
    }

    println!("{}", format_diagnostics(&diagnostics));
    if diagnostics.iter().any(IngestionGenerator::blocks_generation) {
        bail!("Data model has {} problems", diagnostics.len());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut generator_config = match &cli.config {
        Some(path) => GeneratorConfig::from_yaml_file(path)?,
        None => GeneratorConfig::from_env()?,
    };
    generator_config.merge(cli.cli_config())?;

    let data_model = DataModel::from_file(&cli.model)?;
    let source_columns = cli
        .columns
        .as_deref()
        .map(load_source_columns)
        .transpose()?;
    info!(
        "Loaded data model with {} nodes and {} relationships",
        data_model.nodes.len(),
        data_model.relationships.len()
    );

    let mut generator = IngestionGenerator::new(&data_model, generator_config)?;
    if let Some(columns) = source_columns {
        generator = generator.with_source_columns(columns);
    }

    let rendered = match cli.output {
        Output::Constraints => generator.constraints()?.join("\n") + "\n",
        Output::LoadCsv => generator.generate_load_csv_script()?,
        Output::Standard => {
            let statements = generator
                .standard_statements()?
                .into_iter()
                .map(|s| format!("// {} ({})\n{}", s.element, s.source_name, s.cypher))
                .collect::<Vec<_>>();
            statements.join("\n\n") + "\n"
        }
        Output::Pyingest => generator.generate_pyingest_yaml(&cli.pyingest_settings())?,
        Output::Validate => return report_diagnostics(&generator),
    };

    match &cli.out {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {:?} output to {}", cli.output, path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(Cli::parse())
}
