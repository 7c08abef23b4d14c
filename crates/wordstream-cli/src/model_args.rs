use wordstream::{
    corpus::Corpus,
    model::{NgramModel, NgramModelOptions},
    utility::timeit,
};

/// Reference model arg group.
#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Additive smoothing of the unigram estimate.
    #[arg(long, default_value_t = 0.1)]
    unigram_alpha: f32,

    /// Interpolation weight of the bigram estimate.
    #[arg(long, default_value_t = 0.4)]
    bigram_weight: f32,

    /// Interpolation weight of the trigram estimate.
    #[arg(long, default_value_t = 0.4)]
    trigram_weight: f32,
}

impl ModelArgs {
    /// The model options.
    pub fn options(&self) -> NgramModelOptions {
        NgramModelOptions::default()
            .with_unigram_alpha(self.unigram_alpha)
            .with_weights(self.bigram_weight, self.trigram_weight)
    }

    /// Fit the reference model on the training split.
    pub fn fit(
        &self,
        corpus: &Corpus<u32>,
    ) -> Result<NgramModel<u32>, Box<dyn std::error::Error>> {
        log::info!("Fitting model: {:?}", self.options());
        let (elapsed, model) = timeit(|| {
            NgramModel::fit(
                corpus.train().as_slice(),
                corpus.vocab().len(),
                self.options(),
            )
        });
        let model = model?;
        log::info!("Fit model in {elapsed:.2?}");
        Ok(model)
    }
}
