use ndarray::{Array, ArrayD, IxDyn};

use skinmatch::analysis::TextNormalizer;
use skinmatch::error::{Result, SkinMatchError};
use skinmatch::ml::{
    BatchRunner, Classifier, FeatureExtractor, FeatureRecord, FeatureTable, ProbabilityNormalizer,
    RawProbabilities, SkinType,
};

/// Probability of `label` for a row, derived from its keyword counts so
/// rows with different text get different scores.
fn score(record: &FeatureRecord, label: usize) -> f64 {
    let base = (record.irritant_count * 3 + record.soothing_count * 2 + record.emollient_count)
        as f64;
    ((base + label as f64) % 10.0) / 10.0
}

#[derive(Clone, Copy)]
enum Layout {
    PerLabel,
    Matrix,
    Cube,
}

struct KeywordScoreClassifier {
    layout: Layout,
}

impl Classifier for KeywordScoreClassifier {
    fn predict_probabilities(&self, table: &FeatureTable) -> Result<RawProbabilities> {
        let rows = table.rows();
        let n = rows.len();
        Ok(match self.layout {
            Layout::PerLabel => RawProbabilities::PerLabel(
                (0..SkinType::ALL.len())
                    .map(|label| {
                        Array::from_shape_fn(IxDyn(&[n, 2]), |idx| {
                            let p = score(&rows[idx[0]], label);
                            if idx[1] == 1 { p } else { 1.0 - p }
                        })
                    })
                    .collect(),
            ),
            Layout::Matrix => RawProbabilities::Stacked(Array::from_shape_fn(
                IxDyn(&[n, SkinType::ALL.len()]),
                |idx| score(&rows[idx[0]], idx[1]),
            )),
            Layout::Cube => RawProbabilities::Stacked(Array::from_shape_fn(
                IxDyn(&[n, SkinType::ALL.len(), 2]),
                |idx| {
                    let p = score(&rows[idx[0]], idx[1]);
                    if idx[2] == 1 { p } else { 1.0 - p }
                },
            )),
        })
    }

    fn name(&self) -> &str {
        "keyword_score"
    }
}

struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn predict_probabilities(&self, _table: &FeatureTable) -> Result<RawProbabilities> {
        Err(SkinMatchError::model("feature columns do not match"))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

const TEXTS: [&str; 4] = [
    "Aqua, Glycerin, Niacinamide, Hyaluronic Acid",
    "Alcohol Denat, Fragrance, Salicylic Acid",
    "",
    "Aqua, Glycerin, Niacinamide, Hyaluronic Acid",
];

#[test]
fn moisturizer_features_match_expected_values() {
    let extractor = FeatureExtractor::new().unwrap();
    let record = extractor.extract(TEXTS[0]);

    assert!(
        record
            .normalized_text
            .contains("water, glycerin, niacinamide, hyaluronic acid")
    );
    assert_eq!(record.ingredient_count, 4);
    assert!(record.soothing_count >= 2);
    assert_eq!(record.has_acid, 1);
    assert_eq!(record.has_alcohol, 0);
}

#[test]
fn toner_features_flag_irritants() {
    let extractor = FeatureExtractor::new().unwrap();
    let record = extractor.extract(TEXTS[1]);

    assert_eq!(record.has_alcohol, 1);
    assert_eq!(record.has_fragrance, 1);
    assert_eq!(record.has_acid, 1);
    assert!(record.irritant_count >= 2);
}

#[test]
fn spanish_label_normalizes_to_english() {
    let normalizer = TextNormalizer::new().unwrap();
    let text = normalizer.normalize("Agua, Glicerina, Ácido Hialurónico, Fragancia");
    assert_eq!(text, "water, glycerin, hyaluronic acid, fragrance");
    assert_eq!(normalizer.normalize("Paraguas"), "paraguas");
}

#[test]
fn feature_table_uses_contract_column_names() {
    let extractor = FeatureExtractor::new().unwrap();
    let table = FeatureTable::from_records(extractor.extract_all(&TEXTS));

    assert_eq!(table.columns(), FeatureRecord::COLUMNS);
    let json = serde_json::to_value(&table.rows()[0]).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 12);
    for column in FeatureRecord::COLUMNS {
        assert!(object.contains_key(column), "missing column {column}");
    }
}

#[test]
fn all_output_layouts_give_the_same_probabilities() {
    let runner = BatchRunner::new(FeatureExtractor::new().unwrap());

    let per_label = runner
        .run(&TEXTS, &KeywordScoreClassifier { layout: Layout::PerLabel })
        .unwrap();
    let matrix = runner
        .run(&TEXTS, &KeywordScoreClassifier { layout: Layout::Matrix })
        .unwrap();
    let cube = runner
        .run(&TEXTS, &KeywordScoreClassifier { layout: Layout::Cube })
        .unwrap();

    assert_eq!(per_label.len(), TEXTS.len());
    for ((a, b), c) in per_label.iter().zip(&matrix).zip(&cube) {
        for i in 0..SkinType::ALL.len() {
            assert!((a.values()[i] - b.values()[i]).abs() < 1e-12);
            assert!((b.values()[i] - c.values()[i]).abs() < 1e-12);
        }
    }
}

#[test]
fn batch_rows_stay_aligned_with_input() {
    let runner = BatchRunner::new(FeatureExtractor::new().unwrap());
    let classifier = KeywordScoreClassifier { layout: Layout::Matrix };
    let rows = runner.run(&TEXTS, &classifier).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], rows[3]);
    assert_ne!(rows[0], rows[1]);

    for (text, row) in TEXTS.iter().zip(&rows) {
        assert_eq!(runner.run_single(text, &classifier).unwrap(), *row);
    }
}

#[test]
fn classifier_failure_fails_the_whole_batch() {
    let runner = BatchRunner::new(FeatureExtractor::new().unwrap());
    let err = runner.run(&TEXTS, &BrokenClassifier).unwrap_err();
    assert!(matches!(err, SkinMatchError::BatchPrediction(_)));
}

#[test]
fn unrecognized_output_is_a_format_error() {
    let normalizer = ProbabilityNormalizer::new();

    let raw = RawProbabilities::Stacked(ArrayD::zeros(IxDyn(&[2, 4])));
    assert!(normalizer.normalize_batch(&raw, 2).unwrap_err().is_format_error());

    let raw = RawProbabilities::Stacked(ArrayD::zeros(IxDyn(&[1, 5, 3])));
    assert!(normalizer.normalize_single(&raw).unwrap_err().is_format_error());

    let raw = RawProbabilities::PerLabel(vec![ArrayD::zeros(IxDyn(&[1, 2])); 3]);
    assert!(normalizer.normalize_single(&raw).unwrap_err().is_format_error());
}
