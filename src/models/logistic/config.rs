use std::collections::HashMap;

use burn::{
    module::Param,
    tensor::{backend::Backend, Tensor},
    LearningRate,
};

use super::model::Model;

/// Logistic Regression Training Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// Number of rows trained on per optimizer step
    #[config(default = 256)]
    pub batch_size: usize,

    /// Number of passes over the training rows
    #[config(default = 20)]
    pub num_epochs: usize,

    /// Learning rate
    #[config(default = 1e-2)]
    pub learning_rate: LearningRate,

    /// Adam epsilon
    #[config(default = 1e-8)]
    pub adam_epsilon: f32,

    /// L2 penalty applied through AdamW weight decay
    #[config(default = 1e-4)]
    pub weight_decay: f32,
}

/// The fitted shape of a model
#[derive(burn::config::Config)]
pub struct ModelConfig {
    /// The number of feature columns
    pub width: usize,

    /// A map from class ids to class name labels
    pub id2label: HashMap<usize, String>,
}

impl ModelConfig {
    /// Initializes a zero-weight model
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let n_classes = self.id2label.len();

        Model::new(
            Param::from_tensor(Tensor::zeros([self.width, n_classes], device)),
            Param::from_tensor(Tensor::zeros([n_classes], device)),
            n_classes,
        )
    }
}
