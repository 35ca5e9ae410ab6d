//! Reduction of raw classifier output to canonical probability vectors.
//!
//! A multilabel classifier may report its probabilities in three legal
//! shapes:
//!
//! - [`ProbabilityShape::ListOfPairs`]: one `[n_rows, 2]` array per label,
//!   columns `(negative, positive)`; column 1 is kept.
//! - [`ProbabilityShape::Matrix`]: one `[n_rows, n_labels]` array, used as is.
//! - [`ProbabilityShape::Cube`]: one `[n_rows, n_labels, 2]` array; index 1
//!   of the last axis is kept.
//!
//! Anything else is a [`SkinMatchError::Format`] error. The normalizer never
//! guesses and never reorders labels or rows.

use ndarray::{Array2, ArrayD, Ix2, Ix3, s};

use crate::error::{Result, SkinMatchError};
use crate::ml::classifier::RawProbabilities;
use crate::ml::types::{NUM_LABELS, ProbabilityVector};

/// The recognized layouts of raw classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityShape {
    ListOfPairs,
    Matrix,
    Cube,
}

/// Turns [`RawProbabilities`] into [`ProbabilityVector`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityNormalizer;

impl ProbabilityNormalizer {
    pub fn new() -> Self {
        ProbabilityNormalizer
    }

    /// Work out which legal shape `raw` has for a batch of `n_rows`.
    pub fn detect_shape(&self, raw: &RawProbabilities, n_rows: usize) -> Result<ProbabilityShape> {
        match raw {
            RawProbabilities::PerLabel(tables) => {
                if tables.len() != NUM_LABELS {
                    return Err(SkinMatchError::format(format!(
                        "expected {NUM_LABELS} per-label tables, got {}",
                        tables.len()
                    )));
                }
                for (label, table) in tables.iter().enumerate() {
                    if table.shape() != [n_rows, 2] {
                        return Err(SkinMatchError::format(format!(
                            "per-label table {label} has shape {:?}, expected [{n_rows}, 2]",
                            table.shape()
                        )));
                    }
                }
                Ok(ProbabilityShape::ListOfPairs)
            }
            RawProbabilities::Stacked(array) => match array.shape() {
                [rows, labels] if *rows == n_rows && *labels == NUM_LABELS => {
                    Ok(ProbabilityShape::Matrix)
                }
                [rows, labels, 2] if *rows == n_rows && *labels == NUM_LABELS => {
                    Ok(ProbabilityShape::Cube)
                }
                shape => Err(SkinMatchError::format(format!(
                    "unrecognized probability array of shape {shape:?} for {n_rows} rows \
                     (expected [{n_rows}, {NUM_LABELS}] or [{n_rows}, {NUM_LABELS}, 2])"
                ))),
            },
        }
    }

    /// Reduce a batch result to one vector per row, in row order.
    pub fn normalize_batch(
        &self,
        raw: &RawProbabilities,
        n_rows: usize,
    ) -> Result<Vec<ProbabilityVector>> {
        let matrix = self.to_matrix(raw, n_rows)?;
        matrix
            .rows()
            .into_iter()
            .map(|row| ProbabilityVector::from_slice(&row.to_vec()))
            .collect()
    }

    /// Reduce a single-record result to one vector.
    pub fn normalize_single(&self, raw: &RawProbabilities) -> Result<ProbabilityVector> {
        let mut vectors = self.normalize_batch(raw, 1)?;
        vectors
            .pop()
            .ok_or_else(|| SkinMatchError::format("single-record output produced no row"))
    }

    /// Reduce `raw` to an `[n_rows, n_labels]` matrix of positive-class
    /// probabilities.
    pub fn to_matrix(&self, raw: &RawProbabilities, n_rows: usize) -> Result<Array2<f64>> {
        let shape = self.detect_shape(raw, n_rows)?;
        match (shape, raw) {
            (ProbabilityShape::ListOfPairs, RawProbabilities::PerLabel(tables)) => {
                let tables = tables
                    .iter()
                    .map(as_matrix)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Array2::from_shape_fn((n_rows, NUM_LABELS), |(row, label)| {
                    tables[label][[row, 1]]
                }))
            }
            (ProbabilityShape::Matrix, RawProbabilities::Stacked(array)) => as_matrix(array),
            (ProbabilityShape::Cube, RawProbabilities::Stacked(array)) => {
                let cube = array
                    .view()
                    .into_dimensionality::<Ix3>()
                    .map_err(|e| SkinMatchError::format(format!("invalid cube: {e}")))?;
                Ok(cube.slice(s![.., .., 1]).to_owned())
            }
            (shape, _) => Err(SkinMatchError::format(format!(
                "shape {shape:?} does not match the raw output variant"
            ))),
        }
    }
}

fn as_matrix(array: &ArrayD<f64>) -> Result<Array2<f64>> {
    array
        .view()
        .into_dimensionality::<Ix2>()
        .map(|view| view.to_owned())
        .map_err(|e| SkinMatchError::format(format!("invalid matrix: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    const PROBS: [[f64; NUM_LABELS]; 3] = [
        [0.9, 0.1, 0.3, 0.5, 0.7],
        [0.0, 1.0, 0.25, 0.75, 0.5],
        [0.42, 0.13, 0.66, 0.08, 0.99],
    ];

    fn list_of_pairs(probs: &[[f64; NUM_LABELS]]) -> RawProbabilities {
        let n = probs.len();
        RawProbabilities::PerLabel(
            (0..NUM_LABELS)
                .map(|label| {
                    Array::from_shape_fn(IxDyn(&[n, 2]), |idx| {
                        let p = probs[idx[0]][label];
                        if idx[1] == 1 { p } else { 1.0 - p }
                    })
                })
                .collect(),
        )
    }

    fn matrix(probs: &[[f64; NUM_LABELS]]) -> RawProbabilities {
        let n = probs.len();
        RawProbabilities::Stacked(Array::from_shape_fn(IxDyn(&[n, NUM_LABELS]), |idx| {
            probs[idx[0]][idx[1]]
        }))
    }

    fn cube(probs: &[[f64; NUM_LABELS]]) -> RawProbabilities {
        let n = probs.len();
        RawProbabilities::Stacked(Array::from_shape_fn(IxDyn(&[n, NUM_LABELS, 2]), |idx| {
            let p = probs[idx[0]][idx[1]];
            if idx[2] == 1 { p } else { 1.0 - p }
        }))
    }

    #[test]
    fn test_detect_shapes() {
        let normalizer = ProbabilityNormalizer::new();
        assert_eq!(
            normalizer.detect_shape(&list_of_pairs(&PROBS), 3).unwrap(),
            ProbabilityShape::ListOfPairs
        );
        assert_eq!(
            normalizer.detect_shape(&matrix(&PROBS), 3).unwrap(),
            ProbabilityShape::Matrix
        );
        assert_eq!(
            normalizer.detect_shape(&cube(&PROBS), 3).unwrap(),
            ProbabilityShape::Cube
        );
    }

    #[test]
    fn test_all_shapes_normalize_identically() {
        let normalizer = ProbabilityNormalizer::new();
        let from_list = normalizer.normalize_batch(&list_of_pairs(&PROBS), 3).unwrap();
        let from_matrix = normalizer.normalize_batch(&matrix(&PROBS), 3).unwrap();
        let from_cube = normalizer.normalize_batch(&cube(&PROBS), 3).unwrap();

        assert_eq!(from_list, from_matrix);
        assert_eq!(from_matrix, from_cube);
        for (vector, expected) in from_list.iter().zip(PROBS.iter()) {
            assert_eq!(vector.values(), expected);
        }
    }

    #[test]
    fn test_single_record_all_shapes() {
        let normalizer = ProbabilityNormalizer::new();
        let one = [PROBS[2]];
        let expected = ProbabilityVector::new(PROBS[2]).unwrap();

        assert_eq!(normalizer.normalize_single(&list_of_pairs(&one)).unwrap(), expected);
        assert_eq!(normalizer.normalize_single(&matrix(&one)).unwrap(), expected);
        assert_eq!(normalizer.normalize_single(&cube(&one)).unwrap(), expected);
    }

    #[test]
    fn test_empty_batch() {
        let normalizer = ProbabilityNormalizer::new();
        assert!(normalizer.normalize_batch(&list_of_pairs(&[]), 0).unwrap().is_empty());
        assert!(normalizer.normalize_batch(&matrix(&[]), 0).unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_rank() {
        let normalizer = ProbabilityNormalizer::new();
        let rank1 = RawProbabilities::Stacked(ArrayD::zeros(IxDyn(&[NUM_LABELS])));
        let rank4 = RawProbabilities::Stacked(ArrayD::zeros(IxDyn(&[1, NUM_LABELS, 2, 1])));

        assert!(normalizer.normalize_single(&rank1).unwrap_err().is_format_error());
        assert!(normalizer.normalize_single(&rank4).unwrap_err().is_format_error());
    }

    #[test]
    fn test_wrong_label_or_row_count() {
        let normalizer = ProbabilityNormalizer::new();
        let four_labels = RawProbabilities::Stacked(ArrayD::zeros(IxDyn(&[3, 4])));
        let three_classes = RawProbabilities::Stacked(ArrayD::zeros(IxDyn(&[3, NUM_LABELS, 3])));

        assert!(normalizer.normalize_batch(&four_labels, 3).is_err());
        assert!(normalizer.normalize_batch(&three_classes, 3).is_err());
        assert!(normalizer.normalize_batch(&matrix(&PROBS), 2).is_err());
        assert!(normalizer.normalize_single(&matrix(&PROBS)).is_err());
    }

    #[test]
    fn test_malformed_per_label_list() {
        let normalizer = ProbabilityNormalizer::new();

        let RawProbabilities::PerLabel(mut tables) = list_of_pairs(&PROBS) else {
            unreachable!()
        };
        tables.pop();
        let short = RawProbabilities::PerLabel(tables.clone());
        assert!(normalizer.normalize_batch(&short, 3).unwrap_err().is_format_error());

        tables.push(ArrayD::zeros(IxDyn(&[3])));
        let ragged = RawProbabilities::PerLabel(tables);
        assert!(normalizer.normalize_batch(&ragged, 3).unwrap_err().is_format_error());
    }

    #[test]
    fn test_out_of_range_probability() {
        let normalizer = ProbabilityNormalizer::new();
        let mut bad = PROBS;
        bad[1][2] = 1.2;
        let err = normalizer.normalize_batch(&matrix(&bad), 3).unwrap_err();
        assert!(err.is_format_error());
    }
}
