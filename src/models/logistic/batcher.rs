use std::collections::{BTreeSet, HashMap};

use burn::{
    data::dataloader,
    tensor::{backend::Backend, Data, Int, Shape, Tensor},
};
use derive_new::new;
use sprs::CsVecView;

/// A batch restricted to the feature columns that are non-zero in at least one of its rows
#[derive(Clone, Debug, new)]
pub struct Input<B: Backend> {
    /// Dense values of the active columns, `[batch_size, columns.len()]`
    pub values: Tensor<B, 2>,

    /// The feature column of each value column, ascending
    pub columns: Tensor<B, 1, Int>,
}

/// A training batch and its class ids
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Active feature values
    pub input: Input<B>,

    /// Class ids for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Gathers sparse feature rows one batch at a time
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// Device on which to perform computation (e.g., CPU or CUDA device)
    device: B::Device,
}

impl<B: Backend> Batcher<B> {
    fn gather(&self, rows: &[CsVecView<'_, f32>]) -> Input<B> {
        let mut columns: Vec<usize> = rows
            .iter()
            .flat_map(|row| row.indices().iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // a batch of empty rows still selects one (all-zero) column
        if columns.is_empty() {
            columns.push(0);
        }

        let position: HashMap<usize, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, &column)| (column, i))
            .collect();

        let active = columns.len();
        let mut values = vec![0.0f32; rows.len() * active];

        for (i, row) in rows.iter().enumerate() {
            for (column, value) in row.iter() {
                values[i * active + position[&column]] = *value;
            }
        }

        Input {
            values: Tensor::from_data(
                Data::new(values, Shape::new([rows.len(), active])).convert(),
                &self.device,
            ),
            columns: Tensor::from_data(
                Data::new(
                    columns.iter().map(|&column| column as i64).collect(),
                    Shape::new([active]),
                )
                .convert(),
                &self.device,
            ),
        }
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<'a, B: Backend> dataloader::batcher::Batcher<CsVecView<'a, f32>, Input<B>> for Batcher<B> {
    /// Batches sparse rows into their active columns
    fn batch(&self, items: Vec<CsVecView<'a, f32>>) -> Input<B> {
        self.gather(&items)
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<'a, B: Backend> dataloader::batcher::Batcher<(CsVecView<'a, f32>, usize), Train<B>>
    for Batcher<B>
{
    /// Batches sparse rows and their class ids into a training batch
    fn batch(&self, items: Vec<(CsVecView<'a, f32>, usize)>) -> Train<B> {
        let (rows, class_ids): (Vec<_>, Vec<_>) = items.into_iter().unzip();

        let targets = Tensor::from_data(
            Data::new(
                class_ids.iter().map(|&id| id as i64).collect(),
                Shape::new([class_ids.len()]),
            )
            .convert(),
            &self.device,
        );

        Train {
            input: self.gather(&rows),
            targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, data::dataloader::batcher::Batcher as _};
    use pretty_assertions::assert_eq;

    use crate::features::FeatureMatrix;

    use super::*;

    fn rows(matrix: &FeatureMatrix) -> Vec<CsVecView<'_, f32>> {
        (0..matrix.rows()).filter_map(|i| matrix.row(i)).collect()
    }

    #[test]
    fn test_gathers_only_active_columns() {
        let matrix = FeatureMatrix::from_sparse_rows(
            1_000_000,
            vec![vec![(999_999, 1.5)], vec![], vec![(7, 2.0)]],
        )
        .unwrap();

        let batcher = Batcher::<NdArray>::new(Default::default());
        let input: Input<NdArray> = batcher.batch(rows(&matrix));

        assert_eq!(input.values.dims(), [3, 2]);
        assert_eq!(
            input.values.into_data().convert::<f32>().value,
            vec![0.0, 1.5, 0.0, 0.0, 2.0, 0.0]
        );
        assert_eq!(
            input.columns.into_data().convert::<i64>().value,
            vec![7, 999_999]
        );
    }

    #[test]
    fn test_empty_rows_select_one_zero_column() {
        let matrix = FeatureMatrix::from_sparse_rows(4, vec![vec![], vec![]]).unwrap();

        let batcher = Batcher::<NdArray>::new(Default::default());
        let input: Input<NdArray> = batcher.batch(rows(&matrix));

        assert_eq!(input.values.dims(), [2, 1]);
        assert_eq!(input.values.into_data().convert::<f32>().value, vec![0.0, 0.0]);
        assert_eq!(input.columns.into_data().convert::<i64>().value, vec![0]);
    }

    #[test]
    fn test_training_batch_carries_targets() {
        let matrix = FeatureMatrix::from_dense_rows(1, vec![[1.0], [0.0]]).unwrap();
        let items = rows(&matrix).into_iter().zip([1, 0]).collect();

        let batcher = Batcher::<NdArray>::new(Default::default());
        let batch: Train<NdArray> = batcher.batch(items);

        assert_eq!(batch.input.values.dims(), [2, 1]);
        assert_eq!(batch.targets.into_data().convert::<i64>().value, vec![1, 0]);
    }
}
