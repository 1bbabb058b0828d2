use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::EvaluationError;

/// Counts of gold (rows) against predicted (columns) labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    /// The sorted union of gold and predicted labels
    pub labels: Vec<String>,

    /// `counts[gold][predicted]`, indexed like `labels`
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Tally gold against predicted labels
    ///
    /// ```
    /// use burn_sentiment::evaluation::ConfusionMatrix;
    ///
    /// let gold = ["pos", "pos", "neg"].map(String::from);
    /// let predicted = ["pos", "neg", "neg"].map(String::from);
    ///
    /// let matrix = ConfusionMatrix::new(&gold, &predicted).unwrap();
    ///
    /// assert_eq!(matrix.labels, vec!["neg", "pos"]);
    /// assert_eq!(matrix.counts, vec![vec![1, 0], vec![1, 1]]);
    /// ```
    pub fn new<S: AsRef<str>>(gold: &[S], predicted: &[S]) -> Result<Self, EvaluationError> {
        if gold.len() != predicted.len() {
            return Err(EvaluationError::LengthMismatch {
                gold: gold.len(),
                predicted: predicted.len(),
            });
        }

        if gold.is_empty() {
            return Err(EvaluationError::Empty);
        }

        let labels: Vec<String> = gold
            .iter()
            .chain(predicted)
            .map(|label| label.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        let mut counts = vec![vec![0; labels.len()]; labels.len()];

        for (g, p) in gold.iter().zip(predicted) {
            counts[index[g.as_ref()]][index[p.as_ref()]] += 1;
        }

        Ok(Self { labels, counts })
    }

    /// Total number of evaluated documents
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Documents whose gold label is `class`
    pub fn support(&self, class: usize) -> usize {
        self.counts[class].iter().sum()
    }

    /// Documents predicted as `class`
    pub fn predicted(&self, class: usize) -> usize {
        self.counts.iter().map(|row| row[class]).sum()
    }

    /// Documents whose predicted label equals the gold label
    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// The share of correct predictions
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }

    /// Precision, recall and F1 for one class; undefined ratios are 0
    pub fn class_scores(&self, class: usize) -> ClassScores {
        let tp = self.counts[class][class];
        let support = self.support(class);

        let precision = ratio(tp, self.predicted(class));
        let recall = ratio(tp, support);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        ClassScores {
            label: self.labels[class].clone(),
            precision,
            recall,
            f1,
            support,
        }
    }

    /// Chance-corrected agreement between gold and predicted labels
    pub fn cohen_kappa(&self) -> f64 {
        let total = self.total() as f64;

        let observed = self.correct() as f64 / total;
        let expected: f64 = (0..self.labels.len())
            .map(|i| (self.support(i) as f64 / total) * (self.predicted(i) as f64 / total))
            .sum();

        if (1.0 - expected).abs() < f64::EPSILON {
            1.0
        } else {
            (observed - expected) / (1.0 - expected)
        }
    }
}

/// Per-class precision, recall, F1 and support
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassScores {
    /// The class label
    pub label: String,

    /// Correct predictions of this class over all predictions of it
    pub precision: f64,

    /// Correct predictions of this class over its gold occurrences
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f1: f64,

    /// Gold occurrences of this class
    pub support: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_counts_gold_rows_and_predicted_columns() {
        let gold = labels(&["a", "a", "b", "c", "c", "c"]);
        let predicted = labels(&["a", "b", "b", "c", "a", "c"]);

        let matrix = ConfusionMatrix::new(&gold, &predicted).unwrap();

        assert_eq!(matrix.labels, vec!["a", "b", "c"]);
        assert_eq!(
            matrix.counts,
            vec![vec![1, 1, 0], vec![0, 1, 0], vec![1, 0, 2]]
        );
        assert_eq!(matrix.total(), 6);
        assert!(close(matrix.accuracy(), 4.0 / 6.0));
    }

    #[test]
    fn test_class_scores() {
        let gold = labels(&["a", "a", "b", "c", "c", "c"]);
        let predicted = labels(&["a", "b", "b", "c", "a", "c"]);
        let matrix = ConfusionMatrix::new(&gold, &predicted).unwrap();

        let a = matrix.class_scores(0);

        assert!(close(a.precision, 0.5));
        assert!(close(a.recall, 0.5));
        assert!(close(a.f1, 0.5));
        assert_eq!(a.support, 2);

        let b = matrix.class_scores(1);

        assert!(close(b.precision, 0.5));
        assert!(close(b.recall, 1.0));
        assert!(close(b.f1, 2.0 / 3.0));
    }

    #[test]
    fn test_label_only_predicted_has_zero_scores() {
        let matrix = ConfusionMatrix::new(&labels(&["a", "a"]), &labels(&["a", "b"])).unwrap();

        let b = matrix.class_scores(1);

        assert_eq!(b.support, 0);
        assert_eq!(b.recall, 0.0);
        assert_eq!(b.f1, 0.0);
    }

    #[test]
    fn test_cohen_kappa() {
        // p_o = 0.7, p_e = 0.5 * 0.6 + 0.5 * 0.4 = 0.5
        let gold = labels(&["y", "y", "y", "y", "y", "n", "n", "n", "n", "n"]);
        let predicted = labels(&["y", "y", "y", "y", "n", "y", "y", "n", "n", "n"]);

        let matrix = ConfusionMatrix::new(&gold, &predicted).unwrap();

        assert!(close(matrix.cohen_kappa(), 0.4));
    }

    #[test]
    fn test_kappa_of_single_label_agreement_is_one() {
        let matrix = ConfusionMatrix::new(&labels(&["a", "a"]), &labels(&["a", "a"])).unwrap();

        assert_eq!(matrix.cohen_kappa(), 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            ConfusionMatrix::new(&labels(&["a"]), &labels(&[])),
            Err(EvaluationError::LengthMismatch { .. })
        ));
        assert!(matches!(
            ConfusionMatrix::new::<String>(&[], &[]),
            Err(EvaluationError::Empty)
        ));
    }
}
