//! Asset records as supplied by the asset/category/community store

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Display label used when an asset has no name
pub const UNNAMED_ASSET: &str = "Unnamed Asset";

/// Depreciation category shared by many assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    /// Expected years in service. `None` falls back to the request's default lifespan.
    #[serde(default)]
    pub lifespan: Option<i32>,

    /// Cost basis for assets without a known purchase price
    #[serde(default)]
    pub avg_replacement_cost: Option<f64>,
}

impl Category {
    pub fn new(name: impl Into<String>, lifespan: i32) -> Self {
        Self {
            name: name.into(),
            lifespan: Some(lifespan),
            avg_replacement_cost: None,
        }
    }

    pub fn with_avg_replacement_cost(mut self, cost: f64) -> Self {
        self.avg_replacement_cost = Some(cost);
        self
    }
}

/// Organizational unit owning a set of assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    /// Number of dwelling units sharing the reserve
    #[serde(default)]
    pub unit_count: Option<u32>,
}

impl Community {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            unit_count: None,
        }
    }

    pub fn with_units(mut self, unit_count: u32) -> Self {
        self.unit_count = Some(unit_count);
        self
    }

    /// Identity used to de-duplicate communities across assets
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// A physical item subject to eventual replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Unit identifier shown in exports
    #[serde(default)]
    pub unit: Option<String>,

    /// Date the asset entered service, kept as supplied so a bad value can be
    /// reported against this asset alone
    #[serde(default)]
    pub install_date: Option<String>,

    #[serde(default)]
    pub purchase_price: Option<f64>,

    pub category: Category,

    pub community: Community,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        install_date: impl Into<String>,
        purchase_price: f64,
        category: Category,
        community: Community,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            unit: None,
            install_date: Some(install_date.into()),
            purchase_price: Some(purchase_price),
            category,
            community,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNNAMED_ASSET,
        }
    }

    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().unwrap_or(&self.id)
    }

    /// Calendar year the asset entered service
    pub fn install_year(&self) -> Result<i32> {
        let raw = self
            .install_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ForecastError::data(&self.id, "missing install date"))?;

        parse_install_date(raw)
            .map(|date| date.year())
            .ok_or_else(|| ForecastError::data(&self.id, format!("unparseable install date '{}'", raw)))
    }

    /// Base amount that gets inflated to a replacement cost.
    /// Zero or absent purchase price falls back to the category average.
    pub fn cost_basis(&self) -> Result<f64> {
        match self.purchase_price {
            Some(price) if !price.is_finite() || price < 0.0 => Err(ForecastError::data(
                &self.id,
                format!("purchase price must be a non-negative amount, got {}", price),
            )),
            Some(price) if price > 0.0 => Ok(price),
            price => match self.category.avg_replacement_cost {
                Some(avg) if avg.is_finite() && avg >= 0.0 => Ok(avg),
                Some(avg) => Err(ForecastError::data(
                    &self.id,
                    format!("category average replacement cost must be non-negative, got {}", avg),
                )),
                None if price.is_some() => Ok(0.0),
                None => Err(ForecastError::data(
                    &self.id,
                    "no purchase price and no category average replacement cost",
                )),
            },
        }
    }
}

/// Parse the date layouts produced by the UI and the spreadsheet import
fn parse_install_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}
