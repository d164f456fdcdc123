//! School Config Compiler CLI
//!
//! Entry point for the `school-configs` command-line tool.

use clap::{Args, Parser, Subcommand};
use school_config_compiler::{
    AssessmentConfigs, CompileError, CompileOptions, PairSources, PairingPolicy, WetlPathTable,
};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::process;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "school-configs")]
#[command(about = "Compile school and module assessment configs", version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TreeArgs {
    /// Directory holding schoolLists/ and moduleConfigs/
    dir: PathBuf,

    /// Only include these assessments (repeatable)
    #[arg(long, short = 'a')]
    assessment: Vec<String>,

    /// How files are paired across the two directories (shorter, intersection)
    #[arg(long, default_value = "shorter")]
    pairing: PairingPolicy,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled configs as JSON
    Compile {
        #[command(flatten)]
        tree: TreeArgs,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the unique WETL names as JSON
    WetlNames {
        #[command(flatten)]
        tree: TreeArgs,

        /// TOML file with a [paths] table replacing the built-in WETL paths
        #[arg(long)]
        wetl_paths: Option<PathBuf>,
    },

    /// Print the source files (with digests) behind each assessment
    Sources {
        #[command(flatten)]
        tree: TreeArgs,
    },
}

#[derive(Serialize)]
struct SourcesReport<'a> {
    compiled_at: String,
    configs: usize,
    sources: &'a [PairSources],
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compile { tree, pretty } => run_compile(tree, pretty),
        Commands::WetlNames { tree, wetl_paths } => run_wetl_names(tree, wetl_paths),
        Commands::Sources { tree } => run_sources(tree),
    };

    if let Err(e) = result {
        // Missing directories were already reported through the log sink.
        if !matches!(e, CompileError::MissingDirectory(_)) {
            eprintln!("{}", e);
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn compile_tree(
    tree: &TreeArgs,
    wetl_paths: Option<WetlPathTable>,
) -> Result<AssessmentConfigs, CompileError> {
    let mut options = CompileOptions::new(&tree.dir).pairing(tree.pairing);
    if let Some(table) = wetl_paths {
        options = options.wetl_paths(table);
    }
    AssessmentConfigs::load(options)
}

fn assessment_filter(assessments: &[String]) -> impl Fn(&Value) -> bool + '_ {
    move |config: &Value| {
        assessments.is_empty()
            || config
                .get("assessmentName")
                .and_then(Value::as_str)
                .map(|name| assessments.iter().any(|a| a == name))
                .unwrap_or(false)
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_compile(tree: TreeArgs, pretty: bool) -> Result<(), CompileError> {
    let compiled = compile_tree(&tree, None)?;
    let configs = compiled.get_config(assessment_filter(&tree.assessment));
    print_json(&configs, pretty);
    Ok(())
}

fn run_wetl_names(tree: TreeArgs, wetl_paths: Option<PathBuf>) -> Result<(), CompileError> {
    let table = match wetl_paths {
        Some(path) => Some(WetlPathTable::load(&path)?),
        None => None,
    };
    let compiled = compile_tree(&tree, table)?;
    let names = compiled.unique_wetl_names(assessment_filter(&tree.assessment));
    print_json(&names, false);
    Ok(())
}

fn run_sources(tree: TreeArgs) -> Result<(), CompileError> {
    let compiled = compile_tree(&tree, None)?;
    let sources: Vec<PairSources> = compiled
        .sources()
        .iter()
        .filter(|s| tree.assessment.is_empty() || tree.assessment.contains(&s.assessment_name))
        .cloned()
        .collect();

    let report = SourcesReport {
        compiled_at: compiled.compiled_at().to_rfc3339(),
        configs: compiled.len(),
        sources: &sources,
    };
    print_json(&report, true);
    Ok(())
}
