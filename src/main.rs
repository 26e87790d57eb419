use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use swagger_ts_generator::walker::default_output_path;
use swagger_ts_generator::{generate_all, translate_file, GenError, GenOptions, IdPolicy};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "swagger-ts-gen")]
#[command(version = "0.1.0")]
#[command(about = "Generates TypeScript types and request functions from swagger schema files")]
struct Args {
    /// Root directory whose subdirectories are scanned for *.swagger.json (default: current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Module path the customFetch request function is imported from
    #[arg(short = 'p', long)]
    request_path: String,

    /// Directory name to skip, on top of node_modules/.DS_Store/.vscode/.idea (repeatable)
    #[arg(short, long = "exclude")]
    exclude: Vec<String>,

    /// Translate a single schema file instead of scanning a directory
    #[arg(short, long, conflicts_with = "root")]
    input: Option<PathBuf>,

    /// Output file for --input (default: the sibling .ts file)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Type integer fields named like ids as number instead of string
    #[arg(long)]
    numeric_ids: bool,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,swagger_ts_generator=info".to_string(),
            2 => "info,swagger_ts_generator=debug".to_string(),
            _ => "debug,swagger_ts_generator=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(args: Args) -> Result<Vec<PathBuf>, GenError> {
    let options = GenOptions {
        root: args.root,
        request_path: args.request_path,
        exclude_dirs: args.exclude,
        id_policy: if args.numeric_ids {
            IdPolicy::AsNumber
        } else {
            IdPolicy::AsString
        },
        dry_run: args.dry_run,
    };

    match args.input {
        Some(input) => {
            let output = args.output.unwrap_or_else(|| default_output_path(&input));
            translate_file(&input, &output, &options)?;
            Ok(vec![output])
        }
        None => Ok(generate_all(&options)?.generated),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    let dry_run = args.dry_run;

    match run(args) {
        Ok(files) => {
            if !dry_run {
                println!("Successfully generated {} file(s)", files.len());
                for file in &files {
                    println!("  {}", file.display());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
