//! tdlc - TDLang compiler frontend
//!
//! Reads a .tdl source file, runs the compilation pipeline and writes the
//! output artifact. Phase progress goes to stderr via tracing; stdout is
//! reserved for the --ir dumps.

use clap::Parser;
use std::path::PathBuf;
use tdlang_compiler::{compile, Options, OutputMode};
use tdlang_ir::to_lines;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tdlc")]
#[command(about = "Compile TDL tower-defense configuration files")]
struct Cli {
    /// Path to the .tdl source file
    input: PathBuf,

    /// Output file
    #[arg(short = 'o', long, default_value = "output.json")]
    output: PathBuf,

    /// Dump pre- and post-optimization IR to stdout
    #[arg(long)]
    ir: bool,

    /// Write the readable dump instead of JSON
    #[arg(long)]
    readable: bool,

    /// Skip the optimizer
    #[arg(long = "no-opt")]
    no_opt: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tdlc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Every failure exits 1; clap's default error code is 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    info!("compiling {}", cli.input.display());

    let source = match std::fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(e) => {
            error!("could not read {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let options = Options {
        optimize: !cli.no_opt,
        mode: if cli.readable {
            OutputMode::Readable
        } else {
            OutputMode::Json
        },
    };

    let compilation = match compile(&source, &options) {
        Ok(compilation) => compilation,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("generated {} IR instructions", compilation.ir.len());
    if let Some(optimized) = &compilation.optimized {
        info!("optimized to {} instructions", optimized.len());
    }

    if cli.ir {
        println!("--- Unoptimized IR ---");
        for line in to_lines(&compilation.ir) {
            println!("{}", line);
        }
        if let Some(optimized) = &compilation.optimized {
            println!();
            println!("--- Optimized IR ---");
            for line in to_lines(optimized) {
                println!("{}", line);
            }
        }
    }

    if let Err(e) = std::fs::write(&cli.output, &compilation.output) {
        error!("could not write {}: {}", cli.output.display(), e);
        std::process::exit(1);
    }

    info!("output written to {}", cli.output.display());
}
