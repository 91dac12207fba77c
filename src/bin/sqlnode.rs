//! sqlnode: compile operation-node trees from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Compile a JSON node tree, qualifying tables with a schema
//! sqlnode compile query.json --schema app
//!
//! # Read the tree from stdin, emit the compiled artifact as JSON
//! cat query.json | sqlnode compile - --format json
//!
//! # Wrap literal SQL
//! sqlnode raw "select 1"
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sqlnode::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlnode")]
#[command(version)]
#[command(about = "Compile SQL operation-node trees", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlnode compile query.json --schema app
    sqlnode compile - --dialect sqlite --format json < query.json
    sqlnode raw 'select now()'")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON operation-node tree
    Compile {
        /// Path to the JSON tree, or `-` for stdin
        file: String,

        /// Qualify unqualified tables with this schema
        #[arg(short, long, env = "SQLNODE_SCHEMA")]
        schema: Option<String>,

        /// SQL dialect (postgres, sqlite)
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Wrap literal SQL in a compiled query
    Raw {
        sql: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List node kinds
    Kinds,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sqlnode=debug" } else { "sqlnode=warn" };
    let filter = EnvFilter::try_from_env("SQLNODE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compile {
            file,
            schema,
            dialect,
            format,
        } => {
            let mut config = PipelineConfig::load().context("Failed to load config")?;
            if let Some(dialect) = dialect {
                config.dialect = dialect;
            }
            if schema.is_some() {
                config.schema = schema;
            }

            let json = read_input(&file)?;
            let node = OperationNode::from_json(&json).with_context(|| format!("Failed to load tree from {}", file))?;
            let root = RootOperationNode::try_from(node)?;

            if cli.verbose {
                eprintln!("{} {} ({})", "Compiling:".dimmed(), root.kind().to_string().yellow(), config.dialect);
            }

            let compiled = QueryPipeline::from_config(&config).compile(&root)?;
            print_compiled(&compiled, format)
        }
        Commands::Raw { sql, format } => print_compiled(&CompiledQuery::raw(sql), format),
        Commands::Kinds => {
            for kind in NodeKind::ALL {
                if kind.is_root() {
                    println!("{} {}", kind.name().cyan().bold(), "(root)".dimmed());
                } else {
                    println!("{}", kind.name());
                }
            }
            Ok(())
        }
    }
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
}

fn print_compiled(compiled: &CompiledQuery, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(compiled)?);
        }
        OutputFormat::Text => {
            println!("{}", "Generated SQL:".green().bold());
            println!("{}", compiled.sql.white());

            if !compiled.parameters.is_empty() {
                println!();
                println!("{}", "Parameters:".cyan());
                for (i, value) in compiled.parameters.iter().enumerate() {
                    println!("  {} = {}", i + 1, value.to_string().yellow());
                }
            }
            println!();
            println!("{} {}", "Query id:".dimmed(), compiled.query_id);
        }
    }
    Ok(())
}
