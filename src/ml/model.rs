use burn::nn::loss::CrossEntropyLossConfig;
use burn::nn::{Embedding, EmbeddingConfig, Initializer, Linear, LinearConfig};
use burn::prelude::*;

/// Both layers start from uniform(-0.5, 0.5) weights.
const INIT_RANGE: f64 = 0.5;

#[derive(Config, Debug)]
pub struct TextClassifierConfig {
    pub vocab_size: usize,
    pub num_classes: usize,
    /// Width of the embedding vectors
    #[config(default = 32)]
    pub embed_dim: usize,
}

impl TextClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TextClassifier<B> {
        let initializer = Initializer::Uniform { min: -INIT_RANGE, max: INIT_RANGE };
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_dim)
            .with_initializer(initializer.clone())
            .init(device);
        let fc = LinearConfig::new(self.embed_dim, self.num_classes)
            .with_initializer(initializer)
            .init(device);
        TextClassifier { embedding, fc, embed_dim: self.embed_dim }
    }
}

/// Bag-of-embeddings classifier: a variable-length token
/// sequence is reduced to one fixed-size vector by averaging
/// its embedding vectors (order is ignored), then classified
/// by a single linear layer.
#[derive(Module, Debug)]
pub struct TextClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub fc: Linear<B>,
    pub embed_dim: usize,
}

impl<B: Backend> TextClassifier<B> {
    /// tokens: [total_tokens] flat ids, offsets: per-example
    /// segment starts → logits: [batch_size, num_classes].
    ///
    /// Example i owns tokens [offsets[i], offsets[i+1]) — the
    /// last example runs to the end of the flat buffer. An
    /// empty segment reduces to the zero vector.
    pub fn forward(&self, tokens: Tensor<B, 1, Int>, offsets: &[usize]) -> Tensor<B, 2> {
        let device = tokens.device();
        let total = tokens.dims()[0];

        // [total_tokens, embed_dim]; skipped entirely when the
        // whole batch is empty reviews
        let embedded = if total > 0 {
            Some(self.embedding.forward(tokens.reshape([1, total])).squeeze::<2>(0))
        } else {
            None
        };

        let mut bags = Vec::with_capacity(offsets.len());
        for (i, &start) in offsets.iter().enumerate() {
            let end = offsets.get(i + 1).copied().unwrap_or(total);
            match &embedded {
                Some(table) if start < end => {
                    bags.push(table.clone().slice([start..end]).mean_dim(0));
                }
                _ => bags.push(Tensor::zeros([1, self.embed_dim], &device)),
            }
        }

        let pooled = Tensor::cat(bags, 0); // [batch_size, embed_dim]
        self.fc.forward(pooled)
    }

    /// Forward pass plus cross-entropy loss against the labels.
    pub fn forward_loss(
        &self,
        tokens: Tensor<B, 1, Int>,
        offsets: &[usize],
        labels: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(tokens, offsets);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), labels);
        (loss, logits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;
    use burn::backend::Autodiff;
    use burn::optim::{GradientsParams, Optimizer, SgdConfig};

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<TestBackend>;

    fn device() -> <TestBackend as Backend>::Device {
        Default::default()
    }

    #[test]
    fn test_forward_logit_shape() {
        let device = device();
        let model = TextClassifierConfig::new(20, 5).init::<TestBackend>(&device);

        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([5, 9, 2].as_slice(), &device);
        let logits = model.forward(tokens, &[0, 2]);
        assert_eq!(logits.dims(), [2, 5]);
    }

    #[test]
    fn test_empty_segment_yields_zero_logits_plus_bias() {
        let device = device();
        let model = TextClassifierConfig::new(10, 3).init::<TestBackend>(&device);

        // second example has no tokens; its bag is the zero
        // vector so its logits equal the linear layer's bias
        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([1].as_slice(), &device);
        let logits = model.forward(tokens, &[0, 1]);
        assert_eq!(logits.dims(), [2, 3]);

        let row: Vec<f32> = logits
            .slice([1..2])
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        assert!(row.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_forward_loss_is_finite_scalar() {
        let device = device();
        let model = TextClassifierConfig::new(10, 5).init::<TestBackend>(&device);

        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([2, 3, 4].as_slice(), &device);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([4, 0].as_slice(), &device);
        let (loss, logits) = model.forward_loss(tokens, &[0, 2], labels);

        assert_eq!(logits.dims(), [2, 5]);
        let value: f32 = loss.into_scalar().elem();
        assert!(value.is_finite());
    }

    // Monotonic-learning sanity check: a handful of SGD steps on
    // trivially separable data must reduce the loss relative to
    // the untrained model. Not a strict guarantee in general,
    // but disjoint token sets make it reliable.
    #[test]
    fn test_sgd_steps_reduce_loss() {
        let device = device();
        <TestAutodiffBackend as Backend>::seed(42);

        let mut model = TextClassifierConfig::new(8, 2)
            .init::<TestAutodiffBackend>(&device);
        let mut optim = SgdConfig::new().init();

        // class 0 → tokens {2,3}, class 1 → tokens {4,5}
        let tokens: Vec<i32> = vec![2, 3, 4, 5, 2, 3, 4, 5];
        let offsets = [0, 2, 4, 6];
        let label_ids: Vec<i32> = vec![0, 1, 0, 1];

        let make_tokens = || {
            Tensor::<TestAutodiffBackend, 1, Int>::from_ints(tokens.as_slice(), &device)
        };
        let make_labels = || {
            Tensor::<TestAutodiffBackend, 1, Int>::from_ints(label_ids.as_slice(), &device)
        };

        let (initial, _) = model.forward_loss(make_tokens(), &offsets, make_labels());
        let initial: f32 = initial.into_scalar().elem();

        for _ in 0..30 {
            let (loss, _) = model.forward_loss(make_tokens(), &offsets, make_labels());
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(0.5, model, grads);
        }

        let (trained, _) = model.forward_loss(make_tokens(), &offsets, make_labels());
        let trained: f32 = trained.into_scalar().elem();

        assert!(
            trained < initial,
            "loss did not decrease: initial={initial}, trained={trained}"
        );
    }
}
