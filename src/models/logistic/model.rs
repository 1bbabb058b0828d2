use burn::{
    module::{Module, Param},
    nn::loss::CrossEntropyLossConfig,
    tensor::{activation::softmax, backend::Backend, Int, Tensor},
    train::ClassificationOutput,
};
use derive_new::new;

use super::batcher::Input;

/// Multinomial logistic regression: one weight row per feature column and a bias per class
#[derive(Module, Debug, new)]
pub struct Model<B: Backend> {
    /// Weights, `[width, n_classes]`
    pub weight: Param<Tensor<B, 2>>,

    /// Class biases, `[n_classes]`
    pub bias: Param<Tensor<B, 1>>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Class logits for a batch. Only the weight rows of the batch's active columns take part, so
    /// the cost of a step follows the number of non-zero columns rather than the full width.
    pub fn logits(&self, input: Input<B>) -> Tensor<B, 2> {
        let weight = self.weight.val().select(0, input.columns);

        input.values.matmul(weight) + self.bias.val().unsqueeze()
    }

    /// Defines forward pass for training
    pub fn forward(&self, input: Input<B>, targets: Tensor<B, 1, Int>) -> ClassificationOutput<B> {
        let output = self.logits(input);

        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput {
            loss,
            output,
            targets,
        }
    }

    /// Defines forward pass for inference, returning class probabilities
    pub fn infer(&self, input: Input<B>) -> Tensor<B, 2> {
        softmax(self.logits(input), 1)
    }
}
