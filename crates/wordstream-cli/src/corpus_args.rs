use wordstream::{
    corpus::{Corpus, CorpusOptions, CorpusTokenizerOptions, DEFAULT_EOS_TOKEN},
    utility::timeit,
};
use wordstream_paths::{CorpusLocation, DEFAULT_CORPUS, WORDSTREAM_PATHS};

/// Corpus selection arg group.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Corpus directory holding `train.txt`, `valid.txt`, and `test.txt`.
    ///
    /// Defaults to `<data dir>/<corpus>`; see `$WORDSTREAM_DATA_DIR`.
    #[arg(long, default_value = None)]
    data_dir: Option<String>,

    /// Corpus name under the data directory.
    #[arg(long, default_value = DEFAULT_CORPUS)]
    corpus: String,

    /// End-of-line marker word.
    #[arg(long, default_value = DEFAULT_EOS_TOKEN)]
    eos_token: String,
}

impl CorpusArgs {
    /// Resolve the corpus directory.
    pub fn corpus_dir(&self) -> Result<CorpusLocation, Box<dyn std::error::Error>> {
        Ok(WORDSTREAM_PATHS.resolve_corpus_dir(self.data_dir.as_deref(), &self.corpus)?)
    }

    /// Load and tokenize the corpus.
    pub fn load_corpus(&self) -> Result<Corpus<u32>, Box<dyn std::error::Error>> {
        let CorpusLocation { dir, source } = self.corpus_dir()?;
        log::info!("Loading corpus: {} (from {source})", dir.display());

        let options = CorpusOptions::default().with_tokenizer(
            CorpusTokenizerOptions::default().with_eos_token(self.eos_token.clone()),
        );
        let (elapsed, corpus) = timeit(|| Corpus::load(&dir, options));
        let corpus = corpus?;

        log::info!(
            "Tokenized corpus in {elapsed:.2?}: {} words; train/valid/test = {}/{}/{} ids",
            corpus.vocab().len(),
            corpus.train().len(),
            corpus.valid().len(),
            corpus.test().len(),
        );
        Ok(corpus)
    }
}
