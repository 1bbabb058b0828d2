use std::collections::BTreeMap;

use sprs::{CompressedStorage, CsMat, CsVec, CsVecView};

use super::FeatureError;

/// A sparse, row-major feature matrix with one row per document
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    inner: CsMat<f32>,
}

impl FeatureMatrix {
    /// A matrix with no rows
    pub fn empty(width: usize) -> Self {
        Self {
            inner: CsMat::empty(CompressedStorage::CSR, width),
        }
    }

    /// Build a matrix from `(column, value)` entries per row. Entries may come in any order;
    /// repeated columns are summed and zeros are dropped.
    pub fn from_sparse_rows<I>(width: usize, rows: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = Vec<(usize, f32)>>,
    {
        let mut inner = CsMat::empty(CompressedStorage::CSR, width);

        for (index, entries) in rows.into_iter().enumerate() {
            let mut row = BTreeMap::new();

            for (column, value) in entries {
                if column >= width {
                    return Err(FeatureError::InternalConsistency(format!(
                        "column {column} of row {index} is outside a matrix of width {width}"
                    )));
                }

                *row.entry(column).or_insert(0.0) += value;
            }

            let (indices, data): (Vec<usize>, Vec<f32>) =
                row.into_iter().filter(|(_, value)| *value != 0.0).unzip();

            inner = inner.append_outer_csvec(CsVec::new(width, indices, data).view());
        }

        Ok(Self { inner })
    }

    /// Build a matrix from dense rows, each exactly `width` values long
    pub fn from_dense_rows<I, R>(width: usize, rows: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f32]>,
    {
        let mut inner = CsMat::empty(CompressedStorage::CSR, width);

        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();

            if row.len() != width {
                return Err(FeatureError::InternalConsistency(format!(
                    "row {index} has {} values, expected {width}",
                    row.len()
                )));
            }

            inner = inner.append_outer(row);
        }

        Ok(Self { inner })
    }

    /// Concatenate matrices column-wise, in the given order. Every block must have `rows` rows.
    pub fn hstack(rows: usize, blocks: &[FeatureMatrix]) -> Result<Self, FeatureError> {
        if let Some((i, block)) = blocks.iter().enumerate().find(|(_, b)| b.rows() != rows) {
            return Err(FeatureError::InternalConsistency(format!(
                "block {i} has {} rows, expected {rows}",
                block.rows()
            )));
        }

        let width = blocks.iter().map(FeatureMatrix::width).sum();

        let rows = (0..rows).map(|row| {
            let mut offset = 0;
            let mut entries = Vec::new();

            for block in blocks {
                if let Some(view) = block.inner.outer_view(row) {
                    entries.extend(view.iter().map(|(column, value)| (column + offset, *value)));
                }

                offset += block.width();
            }

            entries
        });

        Self::from_sparse_rows(width, rows)
    }

    /// The number of rows (documents)
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// The number of columns (features)
    pub fn width(&self) -> usize {
        self.inner.cols()
    }

    /// The number of stored non-zero values
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// A single value, zero when not stored
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.inner.get(row, column).copied().unwrap_or(0.0)
    }

    /// A sparse view of one row
    pub fn row(&self, row: usize) -> Option<CsVecView<'_, f32>> {
        self.inner.outer_view(row)
    }

    /// One row as a dense vector
    pub fn dense_row(&self, row: usize) -> Vec<f32> {
        let mut dense = vec![0.0; self.width()];

        if let Some(view) = self.inner.outer_view(row) {
            for (column, value) in view.iter() {
                dense[column] = *value;
            }
        }

        dense
    }

    /// The whole matrix as dense rows
    pub fn to_dense(&self) -> Vec<Vec<f32>> {
        (0..self.rows()).map(|row| self.dense_row(row)).collect()
    }

    /// The underlying CSR matrix
    pub fn as_csr(&self) -> &CsMat<f32> {
        &self.inner
    }
}
