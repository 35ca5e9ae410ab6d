//! Standard scaling of the numeric feature columns.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkinMatchError};

/// Centers each column on its mean and divides by its standard deviation.
/// Constant columns keep a scale of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit the scaler on rows of equal width.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| SkinMatchError::model("cannot fit scaler on zero rows"))?;
        if rows.iter().any(|r| r.len() != width) {
            return Err(SkinMatchError::model("scaler rows have different widths"));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v / n;
            }
        }

        let mut variance = vec![0.0; width];
        for row in rows {
            for ((var, v), m) in variance.iter_mut().zip(row).zip(&mean) {
                *var += (v - m).powi(2) / n;
            }
        }

        let scale = variance
            .into_iter()
            .map(|var| {
                let std = var.sqrt();
                if std > f64::EPSILON { std } else { 1.0 }
            })
            .collect();

        Ok(Self { mean, scale })
    }

    /// Scale one row.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.mean.len() {
            return Err(SkinMatchError::model(format!(
                "scaler expects {} values, got {}",
                self.mean.len(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Check that means and scales line up and every scale is usable.
    pub fn check_consistency(&self) -> Result<()> {
        if self.scale.len() != self.mean.len() {
            return Err(SkinMatchError::model(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().any(|m| !m.is_finite())
            || self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err(SkinMatchError::model("scaler values must be finite with positive scales"));
        }
        Ok(())
    }
}
