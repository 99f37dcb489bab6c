use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(
    display_name = "Guild MMR",
    long_about = "Validates guild rating formulas and calculates guild MMR for players"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        global = true,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Checks a custom formula without evaluating it
    Validate {
        #[arg(help = "Formula source, e.g. \"(ones + twos) / 2\"")]
        formula: String
    },

    /// Validates a formula and evaluates it against sample or given inputs
    TestFormula {
        formula: String,

        #[arg(
            short,
            long,
            help = "JSON file with player inputs",
            long_help = "JSON file with player inputs. A representative sample player is used when omitted."
        )]
        inputs: Option<PathBuf>
    },

    /// Calculates one player's rating with a guild configuration
    Calculate {
        #[arg(short, long, help = "JSON file with the guild rating configuration")]
        config: PathBuf,

        #[arg(short, long, help = "JSON file with player inputs")]
        inputs: PathBuf
    },

    /// Rates every player of every guild in a batch file
    Batch {
        #[arg(short, long, help = "JSON file with guilds, their configurations and players")]
        input: PathBuf,

        #[arg(short, long, help = "Where to write the report. Printed to stdout when omitted.")]
        output: Option<PathBuf>
    },

    /// Prints the variables, operators and functions formulas may use
    Reference
}
