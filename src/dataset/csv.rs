//! CSV tables of ingredient lists.
//!
//! The first row is the header. One column holds the ingredient text; every
//! other column is carried through to the output unchanged:
//! ```csv
//! Brand,Name,Ingredients
//! Acme,Daily Cream,"Aqua, Glycerin, Shea Butter"
//! ```

use std::fs::{self, File};
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim, Writer};
use tracing::{debug, info};

use crate::error::{Result, SkinMatchError};
use crate::ml::features::FeatureRecord;
use crate::ml::skin_classifier::TrainingSample;
use crate::ml::types::{NUM_LABELS, ProbabilityVector, SkinType};

/// A CSV table with a designated ingredient text column.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    text_index: usize,
}

impl IngredientTable {
    /// Read a table from `path`.
    ///
    /// Rows shorter than the header are padded with empty cells. A row
    /// longer than the header is a dataset error.
    pub fn read_csv<P: AsRef<Path>>(path: P, text_column: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let text_index = column_index(&headers, text_column)?;

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(SkinMatchError::dataset(format!(
                    "row {} has {} fields but the header has {}",
                    line + 2,
                    record.len(),
                    headers.len()
                )));
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        info!(path = %path.display(), rows = rows.len(), "read ingredient table");
        Ok(Self {
            headers,
            rows,
            text_index,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ingredient text of every row, in row order.
    pub fn texts(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(self.text_index).map_or("", String::as_str))
            .collect()
    }

    /// Write the original columns followed by one column per skin type.
    pub fn write_with_predictions<P: AsRef<Path>>(
        &self,
        path: P,
        predictions: &[ProbabilityVector],
    ) -> Result<()> {
        self.check_row_count(predictions.len(), "predictions")?;
        let extra: Vec<&str> = SkinType::ALL.iter().map(|t| t.as_str()).collect();
        let cells = predictions
            .iter()
            .map(|p| p.values().iter().map(|v| v.to_string()).collect());
        self.write_extended(path.as_ref(), &extra, cells)
    }

    /// Write the original columns followed by the twelve feature columns.
    pub fn write_with_features<P: AsRef<Path>>(
        &self,
        path: P,
        records: &[FeatureRecord],
    ) -> Result<()> {
        self.check_row_count(records.len(), "feature records")?;
        let cells = records.iter().map(FeatureRecord::to_string_row);
        self.write_extended(path.as_ref(), &FeatureRecord::COLUMNS, cells)
    }

    fn check_row_count(&self, found: usize, what: &str) -> Result<()> {
        if found != self.rows.len() {
            return Err(SkinMatchError::dataset(format!(
                "table has {} rows but {found} {what} were given",
                self.rows.len()
            )));
        }
        Ok(())
    }

    fn write_extended<I>(&self, path: &Path, extra: &[&str], cells: I) -> Result<()>
    where
        I: Iterator<Item = Vec<String>>,
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = Writer::from_writer(File::create(path)?);

        let header = self
            .headers
            .iter()
            .map(String::as_str)
            .chain(extra.iter().copied());
        writer.write_record(header)?;

        for (row, added) in self.rows.iter().zip(cells) {
            writer.write_record(row.iter().chain(added.iter()))?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = self.rows.len(), "wrote table");
        Ok(())
    }
}

/// Read labeled training data.
///
/// The text column and the five skin-type columns are looked up by name,
/// so their order in the file does not matter. Label cells accept `0`/`1`
/// and `true`/`false`.
pub fn load_training_samples<P: AsRef<Path>>(
    path: P,
    text_column: &str,
) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let text_index = column_index(&headers, text_column)?;
    let mut label_indices = [0; NUM_LABELS];
    for label in SkinType::ALL {
        label_indices[label.index()] = column_index(&headers, label.as_str())?;
    }
    debug!(?label_indices, "resolved label columns");

    let mut samples = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let mut labels = [false; NUM_LABELS];
        for (slot, &index) in labels.iter_mut().zip(&label_indices) {
            *slot = parse_label(&record, index).map_err(|e| {
                SkinMatchError::dataset(format!("row {}: {e}", line + 2))
            })?;
        }
        let text = record.get(text_index).unwrap_or_default();
        samples.push(TrainingSample::new(text, labels));
    }

    info!(path = %path.display(), samples = samples.len(), "loaded training samples");
    Ok(samples)
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        SkinMatchError::dataset(format!("missing column '{name}' (found: {})", headers.join(", ")))
    })
}

fn parse_label(record: &StringRecord, index: usize) -> std::result::Result<bool, String> {
    let value = record.get(index).unwrap_or_default();
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        v => Err(format!("invalid label value '{v}' in column {}", index + 1)),
    }
}
