use std::fmt::{self, Display};

use serde::Serialize;

use super::{ClassScores, ConfusionMatrix, EvaluationError};

/// Confusion matrix, per-class scores and summary agreement statistics for one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Gold (rows) against predicted (columns) counts
    pub confusion_matrix: ConfusionMatrix,

    /// Scores per label, in label order
    pub classes: Vec<ClassScores>,

    /// The share of correct predictions
    pub accuracy: f64,

    /// Unweighted mean of the per-class F1 scores
    pub macro_f1: f64,

    /// Mean of the per-class F1 scores weighted by support
    pub weighted_f1: f64,

    /// Cohen's kappa
    pub kappa: f64,

    /// Number of evaluated documents
    pub support: usize,
}

impl Report {
    /// Evaluate predictions against gold labels given in the same order
    pub fn new<S: AsRef<str>>(gold: &[S], predicted: &[S]) -> Result<Self, EvaluationError> {
        let confusion_matrix = ConfusionMatrix::new(gold, predicted)?;

        let classes: Vec<ClassScores> = (0..confusion_matrix.labels.len())
            .map(|class| confusion_matrix.class_scores(class))
            .collect();

        let support = confusion_matrix.total();

        let macro_f1 = classes.iter().map(|c| c.f1).sum::<f64>() / classes.len() as f64;
        let weighted_f1 = classes
            .iter()
            .map(|c| c.f1 * c.support as f64)
            .sum::<f64>()
            / support as f64;

        Ok(Self {
            accuracy: confusion_matrix.accuracy(),
            kappa: confusion_matrix.cohen_kappa(),
            confusion_matrix,
            classes,
            macro_f1,
            weighted_f1,
            support,
        })
    }

    fn averages(&self) -> [(&'static str, f64, f64, f64); 2] {
        let n = self.classes.len() as f64;
        let total = self.support as f64;

        let mean = |score: fn(&ClassScores) -> f64| self.classes.iter().map(score).sum::<f64>() / n;
        let weighted = |score: fn(&ClassScores) -> f64| {
            self.classes
                .iter()
                .map(|c| score(c) * c.support as f64)
                .sum::<f64>()
                / total
        };

        [
            (
                "macro avg",
                mean(|c| c.precision),
                mean(|c| c.recall),
                self.macro_f1,
            ),
            (
                "weighted avg",
                weighted(|c| c.precision),
                weighted(|c| c.recall),
                self.weighted_f1,
            ),
        ]
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = &self.confusion_matrix.labels;
        let width = labels
            .iter()
            .map(String::len)
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or_default();
        let cell = labels.iter().map(String::len).max().unwrap_or_default().max(8);

        writeln!(f, "Confusion matrix (rows: gold, columns: predicted)")?;
        write!(f, "{:width$}", "")?;
        for label in labels {
            write!(f, " {label:>cell$}")?;
        }
        writeln!(f)?;

        for (label, row) in labels.iter().zip(&self.confusion_matrix.counts) {
            write!(f, "{label:<width$}")?;
            for count in row {
                write!(f, " {count:>cell$}")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;

        for class in &self.classes {
            writeln!(
                f,
                "{:<width$} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:<width$} {:>9} {:>9} {:>9.4} {:>9}",
            "accuracy", "", "", self.accuracy, self.support
        )?;

        for (name, precision, recall, f1) in self.averages() {
            writeln!(
                f,
                "{:<width$} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                name, precision, recall, f1, self.support
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Macro F1: {:.4}", self.macro_f1)?;
        write!(f, "Cohen's kappa: {:.4}", self.kappa)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn report() -> Report {
        let gold = ["neg", "neg", "pos", "pos", "pos", "neu"];
        let predicted = ["neg", "pos", "pos", "pos", "neg", "neu"];

        Report::new(&gold, &predicted).unwrap()
    }

    #[test]
    fn test_summary_scores() {
        let report = report();

        // neg: p 0.5 r 0.5, neu: p 1 r 1, pos: p 2/3 r 2/3
        let expected_macro = (0.5 + 1.0 + 2.0 / 3.0) / 3.0;
        let expected_weighted = (0.5 * 2.0 + 1.0 + 2.0 / 3.0 * 3.0) / 6.0;

        assert_eq!(report.support, 6);
        assert!((report.accuracy - 4.0 / 6.0).abs() < 1e-9);
        assert!((report.macro_f1 - expected_macro).abs() < 1e-9);
        assert!((report.weighted_f1 - expected_weighted).abs() < 1e-9);
        assert_eq!(
            report
                .classes
                .iter()
                .map(|c| c.label.as_str())
                .collect::<Vec<_>>(),
            vec!["neg", "neu", "pos"]
        );
    }

    #[test]
    fn test_perfect_predictions() {
        let labels = ["a", "b", "b"];

        let report = Report::new(&labels, &labels).unwrap();

        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.macro_f1, 1.0);
        assert_eq!(report.kappa, 1.0);
    }

    #[test]
    fn test_renders_matrix_and_table() {
        let rendered = report().to_string();

        assert!(rendered.starts_with("Confusion matrix"));
        assert!(rendered.contains("precision"));
        assert!(rendered.contains("weighted avg"));
        assert!(rendered.contains("Macro F1: 0.7222"));
        assert!(rendered.ends_with(&format!("Cohen's kappa: {:.4}", report().kappa)));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(report()).unwrap();

        assert_eq!(json["support"], 6);
        assert_eq!(json["confusion_matrix"]["labels"][2], "pos");
        assert_eq!(json["classes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let result = Report::new(&["a"], &["a", "b"]);

        assert!(matches!(
            result,
            Err(EvaluationError::LengthMismatch {
                gold: 1,
                predicted: 2
            })
        ));
    }
}
