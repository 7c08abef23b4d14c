use wordstream::{
    batching::batchify,
    corpus::CorpusSplit,
    evaluation::DEFAULT_MAX_WINDOW,
};

use crate::{corpus_args::CorpusArgs, logging::LogArgs};

/// Args for the stats command.
#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    /// Parallel streams per batch.
    #[arg(long, default_value_t = 20)]
    batch_size: usize,

    /// Maximum rows per window.
    #[arg(long, default_value_t = DEFAULT_MAX_WINDOW)]
    max_window: usize,
}

impl StatsArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let corpus = self.corpus.load_corpus()?;

        println!("vocab: {} words", corpus.vocab().len());
        println!(
            "{:<6} {:>10} {:>8} {:>8} {:>8}",
            "split", "ids", "rows", "dropped", "windows"
        );
        for split in CorpusSplit::ALL {
            let ids = corpus.split(split).as_slice();
            let matrix = batchify(ids, self.batch_size)?;
            let windows = matrix.windows(self.max_window)?.len();
            println!(
                "{:<6} {:>10} {:>8} {:>8} {:>8}",
                split.name(),
                ids.len(),
                matrix.rows(),
                ids.len() - matrix.len(),
                windows,
            );
        }

        Ok(())
    }
}
