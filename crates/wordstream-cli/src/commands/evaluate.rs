use wordstream::{
    batching::{BatchMatrix, batchify},
    corpus::CorpusSplit,
    evaluation::{DEFAULT_MAX_WINDOW, EvaluationOptions, evaluate},
    model::{DynamicQuantize, LayerKind, QuantPrecision, SequenceModel, quantize_dynamic},
    utility::timeit,
};

use crate::{corpus_args::CorpusArgs, logging::LogArgs, model_args::ModelArgs};

/// Evaluation streams per batch; one stream keeps the whole split in order.
const DEFAULT_EVAL_BATCH_SIZE: usize = 1;

/// Held-out splits for the evaluate command.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EvalSplit {
    /// The validation split.
    Valid,

    /// The test split.
    Test,
}

impl From<EvalSplit> for CorpusSplit {
    fn from(split: EvalSplit) -> Self {
        match split {
            EvalSplit::Valid => CorpusSplit::Valid,
            EvalSplit::Test => CorpusSplit::Test,
        }
    }
}

/// Args for the evaluate command.
#[derive(clap::Args, Debug)]
pub struct EvaluateArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    model: ModelArgs,

    /// The split to evaluate.
    #[arg(long, default_value = "test")]
    split: EvalSplit,

    /// Parallel streams per batch.
    #[arg(long, default_value_t = DEFAULT_EVAL_BATCH_SIZE)]
    batch_size: usize,

    /// Maximum rows per window.
    #[arg(long, default_value_t = DEFAULT_MAX_WINDOW)]
    max_window: usize,

    /// Stop after this many windows.
    #[arg(long, default_value = None)]
    max_windows: Option<usize>,

    /// Also evaluate an int8 dynamically quantized copy of the model.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    quantize: bool,
}

impl EvaluateArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let corpus = self.corpus.load_corpus()?;
        let model = self.model.fit(&corpus)?;

        let split = CorpusSplit::from(self.split);
        let data = batchify(corpus.split(split).as_slice(), self.batch_size)?;
        log::info!(
            "{} split: {} rows x {} streams",
            split.name(),
            data.rows(),
            data.batch_size()
        );

        let options = EvaluationOptions::default()
            .with_max_window(self.max_window)
            .with_max_windows(self.max_windows);

        run_and_print("f32", &model, &data, &options)?;

        if self.quantize {
            let quantized = quantize_dynamic(
                &model,
                &[LayerKind::Linear, LayerKind::Recurrent],
                QuantPrecision::QInt8,
            )?;
            run_and_print("qint8", &quantized, &data, &options)?;
        }

        Ok(())
    }
}

fn run_and_print<M>(
    label: &str,
    model: &M,
    data: &BatchMatrix<u32>,
    options: &EvaluationOptions,
) -> Result<(), Box<dyn std::error::Error>>
where
    M: SequenceModel<u32> + DynamicQuantize,
{
    let (elapsed, report) = timeit(|| evaluate(model, data, options));
    let report = report?;

    println!(
        "| {label:<6} | weights {:>10} bytes | loss {:5.2} | ppl {:8.2} | {:>6} windows | {elapsed:.2?}",
        model.weight_bytes(),
        report.mean_loss,
        report.perplexity,
        report.windows,
    );
    Ok(())
}
