use log::debug;
use snafu::{ensure, Snafu};

/// Colour used for values that did not land in any bin.
pub const FALLBACK_COLOR: &str = "#cccccc";

/// Configuration errors for a [`BinSpec`].
///
/// They are only raised when the spec is built, never while classifying values.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
pub enum BinSpecError {
    #[snafu(display("bin spec {name}: at least two edges and one label are required"))]
    EmptyBins { name: String },

    #[snafu(display("bin spec {name}: {edges} edges cannot delimit {labels} labels"))]
    EdgeLabelMismatch {
        name: String,
        edges: usize,
        labels: usize,
    },

    #[snafu(display("bin spec {name}: {colors} colors for {labels} labels"))]
    ColorLabelMismatch {
        name: String,
        colors: usize,
        labels: usize,
    },

    #[snafu(display("bin spec {name}: edge {index} is not strictly above the previous one"))]
    NonAscendingEdges { name: String, index: usize },

    #[snafu(display("bin spec {name}: label {label:?} appears more than once"))]
    DuplicateLabel { name: String, label: String },
}

/// An ordered set of labelled intervals with one colour per label.
///
/// The N+1 edges delimit N intervals `(edges[i], edges[i+1]]`. The first
/// interval is also closed on the left so that the lowest edge is classified.
/// A value exactly on an inner edge belongs to the interval that ends there.
///
/// ```
/// use county_results::BinSpec;
///
/// let spec = BinSpec::new(
///     "share",
///     &[0.0, 0.5, 1.0],
///     &["Rep", "Dem"],
///     &["red", "blue"],
/// )?;
/// assert_eq!(spec.classify(0.5), Some("Rep"));
/// assert_eq!(spec.classify(0.51), Some("Dem"));
/// assert_eq!(spec.classify(0.0), Some("Rep"));
/// assert_eq!(spec.classify(1.5), None);
/// # Ok::<(), county_results::BinSpecError>(())
/// ```
#[derive(PartialEq, Debug, Clone)]
pub struct BinSpec {
    name: String,
    edges: Vec<f64>,
    labels: Vec<String>,
    colors: Vec<String>,
    fallback_color: String,
}

impl BinSpec {
    pub fn new<L: AsRef<str>, C: AsRef<str>>(
        name: &str,
        edges: &[f64],
        labels: &[L],
        colors: &[C],
    ) -> Result<BinSpec, BinSpecError> {
        ensure!(
            edges.len() >= 2 && !labels.is_empty(),
            EmptyBinsSnafu { name }
        );
        ensure!(
            edges.len() == labels.len() + 1,
            EdgeLabelMismatchSnafu {
                name,
                edges: edges.len(),
                labels: labels.len(),
            }
        );
        ensure!(
            colors.len() == labels.len(),
            ColorLabelMismatchSnafu {
                name,
                colors: colors.len(),
                labels: labels.len(),
            }
        );
        // NaN edges fail the comparison as well.
        for (idx, pair) in edges.windows(2).enumerate() {
            ensure!(
                pair[0] < pair[1],
                NonAscendingEdgesSnafu {
                    name,
                    index: idx + 1
                }
            );
        }
        let labels: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        for (idx, label) in labels.iter().enumerate() {
            ensure!(
                !labels[..idx].contains(label),
                DuplicateLabelSnafu {
                    name,
                    label: label.clone()
                }
            );
        }
        debug!("bin spec {}: {} bins over {:?}", name, labels.len(), edges);
        Ok(BinSpec {
            name: name.to_string(),
            edges: edges.to_vec(),
            labels,
            colors: colors.iter().map(|c| c.as_ref().to_string()).collect(),
            fallback_color: FALLBACK_COLOR.to_string(),
        })
    }

    /// Replaces the colour returned for unclassified values.
    pub fn with_fallback_color(self, color: &str) -> BinSpec {
        BinSpec {
            fallback_color: color.to_string(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// The labels, in legend order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn fallback_color(&self) -> &str {
        &self.fallback_color
    }

    /// Index of the bin containing the value, if any.
    pub fn classify_index(&self, value: f64) -> Option<usize> {
        let first = *self.edges.first()?;
        let last = *self.edges.last()?;
        if value.is_nan() || value < first || value > last {
            return None;
        }
        if value == first {
            return Some(0);
        }
        // First edge at or above the value; the bin ends there.
        let upper = self.edges.partition_point(|e| *e < value);
        Some(upper - 1)
    }

    pub fn classify(&self, value: f64) -> Option<&str> {
        self.classify_index(value).map(|idx| self.labels[idx].as_str())
    }

    /// Labels a whole column. Missing values and values outside the edges
    /// are left unclassified. The output lines up with the input.
    pub fn bin(&self, values: &[Option<f64>]) -> Vec<Option<&str>> {
        let res: Vec<Option<&str>> = values
            .iter()
            .map(|v| v.and_then(|x| self.classify(x)))
            .collect();
        debug!(
            "bin spec {}: binned {} values, {} unclassified",
            self.name,
            res.len(),
            res.iter().filter(|l| l.is_none()).count()
        );
        res
    }

    /// The colour of a label. Unknown labels and unclassified values share
    /// the fallback colour.
    pub fn color(&self, label: Option<&str>) -> &str {
        label
            .and_then(|l| self.labels.iter().position(|x| x == l))
            .map(|idx| self.colors[idx].as_str())
            .unwrap_or(self.fallback_color.as_str())
    }

    /// (label, colour) pairs in display order.
    pub fn legend(&self) -> Vec<(&str, &str)> {
        self.labels
            .iter()
            .zip(self.colors.iter())
            .map(|(l, c)| (l.as_str(), c.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quartiles() -> BinSpec {
        BinSpec::new(
            "quartiles",
            &[0.0, 0.25, 0.5, 0.75, 1.0],
            &["q1", "q2", "q3", "q4"],
            &["c1", "c2", "c3", "c4"],
        )
        .unwrap()
    }

    #[test]
    fn lowest_edge_is_in_first_bin() {
        assert_eq!(quartiles().classify(0.0), Some("q1"));
    }

    #[test]
    fn inner_edge_closes_its_bin() {
        let spec = quartiles();
        assert_eq!(spec.classify(0.25), Some("q1"));
        assert_eq!(spec.classify(0.5), Some("q2"));
        assert_eq!(spec.classify(0.75), Some("q3"));
        assert_eq!(spec.classify(0.2500001), Some("q2"));
    }

    #[test]
    fn top_edge_is_in_last_bin() {
        assert_eq!(quartiles().classify(1.0), Some("q4"));
    }

    #[test]
    fn out_of_range_is_unclassified() {
        let spec = quartiles();
        assert_eq!(spec.classify(-0.0001), None);
        assert_eq!(spec.classify(1.0001), None);
        assert_eq!(spec.classify(f64::NAN), None);
        assert_eq!(spec.classify(f64::INFINITY), None);
    }

    #[test]
    fn bin_keeps_length_and_order() {
        let spec = quartiles();
        let values = vec![Some(0.9), None, Some(0.1), Some(2.0), Some(0.5)];
        let res = spec.bin(&values);
        assert_eq!(res, vec![Some("q4"), None, Some("q1"), None, Some("q2")]);
        assert!(spec.bin(&[]).is_empty());
    }

    #[test]
    fn bin_is_row_independent() {
        let spec = quartiles();
        let alone = spec.bin(&[Some(0.3)]);
        let mixed = spec.bin(&[Some(0.99), Some(0.3), None]);
        assert_eq!(alone[0], mixed[1]);
    }

    #[test]
    fn colors_and_fallback() {
        let spec = quartiles();
        assert_eq!(spec.color(Some("q3")), "c3");
        assert_eq!(spec.color(None), FALLBACK_COLOR);
        assert_eq!(spec.color(Some("not a label")), FALLBACK_COLOR);
        let spec = spec.with_fallback_color("gray");
        assert_eq!(spec.color(None), "gray");
    }

    #[test]
    fn legend_follows_label_order() {
        let spec = quartiles();
        let legend = spec.legend();
        assert_eq!(
            legend,
            vec![("q1", "c1"), ("q2", "c2"), ("q3", "c3"), ("q4", "c4")]
        );
    }

    #[test]
    fn rejects_mismatched_edges() {
        let err = BinSpec::new("bad", &[0.0, 0.5, 1.0], &["a"], &["x"]).unwrap_err();
        assert_eq!(
            err,
            BinSpecError::EdgeLabelMismatch {
                name: "bad".to_string(),
                edges: 3,
                labels: 1
            }
        );
    }

    #[test]
    fn rejects_mismatched_colors() {
        let err = BinSpec::new("bad", &[0.0, 0.5, 1.0], &["a", "b"], &["x"]).unwrap_err();
        assert!(matches!(err, BinSpecError::ColorLabelMismatch { .. }));
    }

    #[test]
    fn rejects_non_ascending_edges() {
        let err = BinSpec::new("bad", &[0.0, 0.5, 0.5], &["a", "b"], &["x", "y"]).unwrap_err();
        assert!(matches!(err, BinSpecError::NonAscendingEdges { index: 2, .. }));
        let err =
            BinSpec::new("bad", &[0.0, f64::NAN, 1.0], &["a", "b"], &["x", "y"]).unwrap_err();
        assert!(matches!(err, BinSpecError::NonAscendingEdges { index: 1, .. }));
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        let no_labels: [&str; 0] = [];
        let err = BinSpec::new("bad", &[0.0], &no_labels, &no_labels).unwrap_err();
        assert!(matches!(err, BinSpecError::EmptyBins { .. }));
        let err = BinSpec::new("bad", &[0.0, 0.5, 1.0], &["a", "a"], &["x", "y"]).unwrap_err();
        assert!(matches!(err, BinSpecError::DuplicateLabel { .. }));
    }
}
