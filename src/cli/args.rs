use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-api")]
#[command(about = "Read-only JSON API over station climate observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the JSON API over an existing observations database
    Serve {
        #[arg(short, long, help = "Configuration file [default: climate-api.toml if present]")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "SQLite database URL, e.g. sqlite://Resources/hawaii.sqlite")]
        database: Option<String>,

        #[arg(short, long, help = "Socket address to listen on")]
        bind: Option<String>,
    },

    /// Build an observations database from a measurement CSV file
    Import {
        #[arg(short, long, help = "Input CSV with header station,date,prcp,tobs")]
        input: PathBuf,

        #[arg(short, long, help = "SQLite database URL to create or append to")]
        database: String,

        #[arg(long, default_value = "false", help = "Skip rows that fail validation")]
        skip_invalid: bool,
    },

    /// Display a summary of an observations database
    Info {
        #[arg(short, long, help = "Configuration file [default: climate-api.toml if present]")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "SQLite database URL")]
        database: Option<String>,
    },
}
