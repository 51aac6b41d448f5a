//! Laptop endpoints.
//!
//! POST /api/laptops   - create a laptop
//! GET  /api/laptops   - list laptops matching optional filters
//! GET  /api/brands    - laptop counts per brand

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::common::{ApiError, FieldError, ValidationErrors};
use crate::domains::laptops::{BrandList, Laptop, LaptopCreated, LaptopList, LaptopQuery};
use crate::server::app::AppState;

/// Create a laptop from a validated JSON body
pub async fn create_laptop_handler(
    State(state): State<AppState>,
    payload: Result<Json<Laptop>, JsonRejection>,
) -> Result<Json<LaptopCreated>, ApiError> {
    let Json(laptop) = payload.map_err(|rejection| {
        ValidationErrors::single(FieldError::at("body", rejection.body_text()))
    })?;
    laptop.validate()?;

    let store = state.store()?;
    let id = laptop.create(store).await?;
    tracing::info!(laptop_id = %id, "Laptop created");

    Ok(Json(LaptopCreated::new(id)))
}

/// List laptops filtered by brand, price range and name
pub async fn list_laptops_handler(
    State(state): State<AppState>,
    query: Result<Query<LaptopQuery>, QueryRejection>,
) -> Result<Json<LaptopList>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ValidationErrors::single(FieldError::at("query", rejection.body_text()))
    })?;
    query.validate()?;

    let store = state.store()?;
    let items = Laptop::find(&query, store).await?;
    tracing::debug!(count = items.len(), limit = query.limit(), "Listed laptops");

    Ok(Json(LaptopList::from(items)))
}

/// Count laptops per brand
///
/// Without a configured store this returns an empty list rather than an error.
pub async fn list_brands_handler(
    State(state): State<AppState>,
) -> Result<Json<BrandList>, ApiError> {
    let Some(store) = state.store.as_deref() else {
        return Ok(Json(BrandList { items: Vec::new() }));
    };

    let items = Laptop::brand_counts(store).await?;
    Ok(Json(BrandList { items }))
}
