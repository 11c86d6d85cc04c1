//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "latexlab")]
#[command(version, about = "Resolve LaTeX build paths and run build recipes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./latexlab.toml when present)
    #[arg(long, global = true, env = "LATEXLAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root document of the project
    #[arg(long, global = true, env = "LATEXLAB_ROOT")]
    pub root: Option<PathBuf>,

    /// Sub-file of the root document
    #[arg(long, global = true)]
    pub subfile: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the output directory of a document (the root by default)
    Outdir {
        tex: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// Show where the PDF of a document is written
    Pdf {
        tex: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Locate the .fls recorder file of a document
    Fls {
        tex: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Show the job name of a document
    Jobname {
        tex: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Locate a bibliography file; `*` matches several
    Bib {
        name: String,

        /// Directory of the referencing document (defaults to the current directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Resolve a file through kpsewhich
    Kpsewhich {
        name: String,

        /// Look the name up as a BibTeX database
        #[arg(long)]
        bib: bool,

        #[arg(long)]
        json: bool,
    },

    /// Classify a file by extension
    Lang {
        file: String,
        #[arg(long)]
        json: bool,
    },

    /// Create a session temporary directory and show its path
    Tmpdir {
        #[arg(long)]
        json: bool,
    },

    /// Build the root document with a recipe
    Build {
        /// Recipe name (defaults to latex.recipe.default)
        #[arg(long)]
        recipe: Option<String>,

        #[arg(long)]
        json: bool,
    },
}
