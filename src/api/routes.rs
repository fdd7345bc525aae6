use super::AppState;
use crate::core::images::{image_url, rarity_background_url, ImageKind};
use crate::core::query::query;
use crate::domain::model::{positive_or, FilterQuery, QueryParameters};
use crate::utils::error::{LibraryError, Result};
use axum::{
    extract::{rejection::PathRejection, Path, RawQuery, State},
    http::Uri,
    Json,
};
use serde_json::{json, Value};

pub(super) async fn home() -> Json<Value> {
    Json(json!({
        "message": "Free Fire Item Library API",
        "endpoints": {
            "/api/items": "Get all items (optional ?limit=N)",
            "/api/items/filter": "Filter items with query parameters: search, rarity, type, collection, sort, page, per_page",
            "/api/items/{id}": "Get specific item by ID",
            "/api/image/{type}/{value}": "Get image URL (type: id | icon)",
            "/api/rarity/{rarity}/background": "Get rarity background image URL",
            "/api/health": "Health check"
        }
    }))
}

pub(super) async fn list_items(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>> {
    let catalog = state.source.fetch().await?;

    // limit 只接受正整數，其他值視為未指定
    let limit = url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
        .find(|(key, _)| key == "limit")
        .map(|(_, value)| positive_or(Some(&*value), usize::MAX))
        .unwrap_or(usize::MAX);

    let items: Vec<_> = catalog.items.iter().take(limit).collect();

    Ok(Json(json!({
        "success": true,
        "count": items.len(),
        "total": catalog.len(),
        "items": items,
    })))
}

pub(super) async fn filter_items(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>> {
    let catalog = state.source.fetch().await?;
    let params = QueryParameters::from(FilterQuery::from_query_string(raw.as_deref()));
    tracing::debug!("Filter parameters: {:?}", params);

    let page = query(&catalog, &params);

    Ok(Json(json!({
        "success": true,
        "filters": page.filters,
        "pagination": page.pagination,
        "items": page.items,
    })))
}

pub(super) async fn get_item(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = path?;
    let catalog = state.source.fetch().await?;

    let item = catalog
        .find_by_id(&id)
        .ok_or(LibraryError::NotFound { id })?;

    Ok(Json(json!({
        "success": true,
        "item": item,
    })))
}

pub(super) async fn get_image_url(
    State(state): State<AppState>,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Value>> {
    let Path((image_type, value)) = path?;
    let kind: ImageKind = image_type.parse()?;

    Ok(Json(json!({
        "url": image_url(&state.images.base_url, kind, &value),
    })))
}

pub(super) async fn get_rarity_background(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(rarity) = path?;

    Ok(Json(json!({
        "url": rarity_background_url(&state.images.rarity_background_base, &rarity),
    })))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub(super) async fn not_found(uri: Uri) -> LibraryError {
    LibraryError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
