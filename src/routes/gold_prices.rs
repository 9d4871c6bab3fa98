use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{GoldPriceRecord, Instrument};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gold_prices))
        .route("/:gold_type", get(get_gold_price))
        .route("/:gold_type/refresh", post(refresh_gold_price))
}

/// Every instrument that could be served; only fails when none could.
pub async fn list_gold_prices(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<Instrument, GoldPriceRecord>>, AppError> {
    info!("GET /api/gold-price - Getting all gold prices");
    let prices = state.crawler.snapshot().await;

    if prices.is_empty() {
        error!("No gold price could be retrieved for any instrument");
        return Err(AppError::Internal("Could not retrieve any gold prices".to_string()));
    }

    Ok(Json(prices))
}

pub async fn get_gold_price(
    Path(gold_type): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GoldPriceRecord>, AppError> {
    info!("GET /api/gold-price/{} - Getting gold price", gold_type);
    let instrument: Instrument = gold_type.parse()?;

    let record = state.crawler.get_or_crawl(instrument).await
        .map_err(|e| {
            error!("Failed to get gold price for {}: {}", instrument, e);
            e
        })?;
    Ok(Json(record))
}

pub async fn refresh_gold_price(
    Path(gold_type): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GoldPriceRecord>, AppError> {
    info!("POST /api/gold-price/{}/refresh - Crawling fresh data", gold_type);
    let instrument: Instrument = gold_type.parse()?;

    let record = state.crawler.crawl_and_save(instrument).await
        .map_err(|e| {
            error!("Failed to refresh gold price for {}: {}", instrument, e);
            e
        })?;
    Ok(Json(record))
}
