mod commands;
mod corpus_args;
mod input_output;
mod logging;
mod model_args;

use clap::Parser;
use commands::Commands;

/// wordstream: word-level corpus pipeline and reference model.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
