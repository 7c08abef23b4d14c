use std::io::Write;

use wordstream::vocab::io::write_word_vocab;

use crate::{corpus_args::CorpusArgs, input_output::OutputArgs, logging::LogArgs};

/// Args for the vocab command.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl VocabArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let corpus = self.corpus.load_corpus()?;

        if let Some(path) = self.output.path() {
            log::info!("output: {path}");
        }
        let mut writer = self.output.open_writer()?;
        write_word_vocab(corpus.vocab(), &mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
