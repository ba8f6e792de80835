use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use ionconform_core::TextRecognizer;
use ionconform_harness::{check_file, run_suite, SkipSet};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Ion text conformance harness.
#[derive(Parser)]
#[command(name = "ionconform", version, about = "Ion text conformance harness")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single Ion text file and report its diagnostics
    Check {
        /// Path to the .ion file
        file: PathBuf,
    },

    /// Run the conformance suite against a corpus root
    Test {
        /// Corpus root containing good/ and bad/ subtrees
        root: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Check { file } => cmd_check(&file, cli.output),
        Commands::Test { root } => cmd_test(&root),
    };
    process::exit(code);
}

/// Exit codes: 0 clean, 1 diagnostics reported, 2 configuration error.
fn cmd_check(file: &Path, output: OutputFormat) -> i32 {
    if !file.is_file() {
        eprintln!("error: no such file: {}", file.display());
        return 2;
    }
    let outcome = check_file(file, &TextRecognizer::new());
    match output {
        OutputFormat::Text => {
            for error in &outcome.errors {
                println!("{}: {}", file.display(), error);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&outcome.errors) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize diagnostics: {}", e);
                return 2;
            }
        },
    }
    if outcome.is_clean() {
        0
    } else {
        1
    }
}

/// Exit codes: 0 all cases pass, 1 any case fails, 2 configuration error.
fn cmd_test(root: &Path) -> i32 {
    let skip = SkipSet::standard();
    match run_suite(root, &skip, &TextRecognizer::new()) {
        Ok(result) => {
            if result.failed > 0 {
                eprintln!("{} of {} conformance cases failed", result.failed, result.total);
                1
            } else {
                0
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            2
        }
    }
}
