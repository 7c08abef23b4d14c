mod evaluate;
mod generate;
mod stats;
mod vocab;

/// Subcommands for wordstream
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build the corpus vocabulary and write it, one word per line.
    Vocab(vocab::VocabArgs),

    /// Report split sizes, batch shapes, and window counts.
    Stats(stats::StatsArgs),

    /// Fit the reference model and sample text from it.
    Generate(generate::GenerateArgs),

    /// Fit the reference model and measure perplexity.
    Evaluate(evaluate::EvaluateArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Vocab(cmd) => cmd.run(),
            Commands::Stats(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Evaluate(cmd) => cmd.run(),
        }
    }
}
