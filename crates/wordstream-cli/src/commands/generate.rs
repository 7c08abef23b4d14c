use rand::{SeedableRng, rngs::StdRng};
use wordstream::generation::{GenerationOptions, generate, write_generated};

use crate::{
    corpus_args::CorpusArgs,
    input_output::OutputArgs,
    logging::LogArgs,
    model_args::ModelArgs,
};

/// Args for the generate command.
#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    model: ModelArgs,

    /// Number of words to generate.
    #[arg(long, default_value_t = 1000)]
    num_words: usize,

    /// Sampling temperature; higher is more diverse.
    #[arg(long, default_value_t = 1.0)]
    temperature: f32,

    /// Words per output line.
    #[arg(long, default_value_t = 20)]
    words_per_line: usize,

    /// Random seed; seeded from the OS when absent.
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    #[command(flatten)]
    output: OutputArgs,
}

impl GenerateArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let corpus = self.corpus.load_corpus()?;
        let model = self.model.fit(&corpus)?;

        let options = GenerationOptions::default()
            .with_num_words(self.num_words)
            .with_temperature(self.temperature)
            .with_words_per_line(self.words_per_line);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let tokens = generate(&model, &mut rng, &options)?;

        if let Some(path) = self.output.path() {
            log::info!("output: {path}");
        }
        let mut writer = self.output.open_writer()?;
        write_generated(corpus.vocab(), &tokens, options.words_per_line, &mut writer)?;

        Ok(())
    }
}
