//! Listing query builder.
//!
//! Maps the optional listing parameters onto a [`Filter`] over the laptop
//! collection. Absent parameters impose no constraint.

use serde::Deserialize;

use crate::common::{FieldError, ValidationErrors};
use crate::kernel::{Condition, Filter};

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 200;

/// Optional listing parameters, as read from the query string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LaptopQuery {
    /// Case-insensitive exact brand
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive substring of the name
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl LaptopQuery {
    /// Check parameter bounds, collecting every failure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            match value {
                Some(price) if !price.is_finite() => errors.push(FieldError::new(
                    "query",
                    field,
                    "Input should be a finite number",
                )),
                Some(price) if price < 0.0 => errors.push(FieldError::new(
                    "query",
                    field,
                    "Input should be greater than or equal to 0",
                )),
                _ => {}
            }
        }

        match self.limit {
            Some(0) => errors.push(FieldError::new(
                "query",
                "limit",
                "Input should be greater than or equal to 1",
            )),
            Some(limit) if limit > MAX_LIMIT => errors.push(FieldError::new(
                "query",
                "limit",
                format!("Input should be less than or equal to {MAX_LIMIT}"),
            )),
            _ => {}
        }

        errors.into_result()
    }

    /// Maximum number of records to return
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();

        if let Some(brand) = non_empty(&self.brand) {
            filter = filter.with(
                "brand",
                Condition::Pattern {
                    pattern: format!("^{}$", regex::escape(brand)),
                    case_insensitive: true,
                },
            );
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            filter = filter.with(
                "price",
                Condition::Range {
                    gte: self.min_price,
                    lte: self.max_price,
                },
            );
        }

        if let Some(q) = non_empty(&self.q) {
            filter = filter.with(
                "name",
                Condition::Pattern {
                    pattern: regex::escape(q),
                    case_insensitive: true,
                },
            );
        }

        filter
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
