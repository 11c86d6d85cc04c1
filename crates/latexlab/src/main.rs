mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut ctx = Context::new(cli)?;
    let result = match &cli.command {
        Commands::Outdir { tex, json } => commands::paths::outdir(&ctx, tex.clone(), *json),
        Commands::Pdf { tex, json } => commands::paths::pdf(&ctx, tex, *json),
        Commands::Fls { tex, json } => commands::paths::fls(&ctx, tex, *json),
        Commands::Jobname { tex, json } => commands::paths::jobname(&ctx, tex, *json),
        Commands::Bib {
            name,
            base_dir,
            json,
        } => commands::paths::bib(&ctx, name, base_dir.clone(), *json),
        Commands::Kpsewhich { name, bib, json } => {
            commands::kpsewhich::run(&ctx, name, *bib, *json)
        }
        Commands::Tmpdir { json } => commands::tmpdir::run(&ctx, *json),
        Commands::Build { recipe, json } => commands::build::run(&mut ctx, recipe.clone(), *json),
        Commands::Lang { file, json } => commands::lang::run(file, *json),
    };

    let closed = ctx.close();
    result?;
    closed
}

/// Log to stderr; `--verbose` forces debug, otherwise RUST_LOG or warn
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
