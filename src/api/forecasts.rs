//! Saved forecasts
//!
//! Keeps named copies of projection results per owner. Only the numeric
//! projection is kept; insights are recomputed on demand and never saved.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::core::{CalculationInput, ProjectionResult};

pub type ForecastId = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("Forecast not found")]
    NotFound,

    #[error("Unauthorized to access this forecast")]
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub id: ForecastId,
    #[serde(skip)]
    pub owner: String,
    pub forecast_name: String,
    #[serde(flatten)]
    pub input: CalculationInput,
    pub total_retirement_corpus: f64,
    pub lump_sum: f64,
    /// Monthly pension.
    pub pension_amount: f64,
    pub yearly_pension: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: ForecastId,
    forecasts: BTreeMap<ForecastId, Forecast>,
}

#[derive(Debug, Default)]
pub struct ForecastStore {
    inner: RwLock<StoreInner>,
}

impl ForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(
        &self,
        owner: &str,
        forecast_name: String,
        input: CalculationInput,
        projection: &ProjectionResult,
    ) -> Forecast {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let forecast = Forecast {
            id: inner.next_id,
            owner: owner.to_string(),
            forecast_name,
            input,
            total_retirement_corpus: projection.total_retirement_corpus,
            lump_sum: projection.lump_sum,
            pension_amount: projection.monthly_pension,
            yearly_pension: projection.annual_pension,
            created_at: Utc::now(),
        };
        inner.forecasts.insert(forecast.id, forecast.clone());
        forecast
    }

    /// The owner's forecasts, newest first.
    pub fn list(&self, owner: &str) -> Vec<Forecast> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .forecasts
            .values()
            .rev()
            .filter(|f| f.owner == owner)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: ForecastId, owner: &str) -> Result<Forecast, ForecastError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let forecast = inner.forecasts.get(&id).ok_or(ForecastError::NotFound)?;
        if forecast.owner != owner {
            return Err(ForecastError::Forbidden);
        }
        Ok(forecast.clone())
    }

    pub fn delete(&self, id: ForecastId, owner: &str) -> Result<(), ForecastError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.forecasts.get(&id) {
            None => Err(ForecastError::NotFound),
            Some(forecast) if forecast.owner != owner => Err(ForecastError::Forbidden),
            Some(_) => {
                inner.forecasts.remove(&id);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .forecasts
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
