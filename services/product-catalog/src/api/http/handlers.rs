//! 产品与令牌端点

use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use onyx_auth_core::Policy;
use onyx_errors::AppError;
use tracing::warn;

use super::middleware::AuthClaims;
use super::state::AppState;
use crate::application::dto::{ApiError, CreateProductRequest, PaginationParameters, ProductDto};
use crate::error::CatalogError;

/// GET /auth/{user}
pub async fn issue_token(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<String>, AppError> {
    if user.trim().is_empty() {
        return Err(AppError::validation("Username is required"));
    }

    let token = state.token_issuer.issue(&user)?;
    Ok(Json(token))
}

/// POST /v1/products
pub async fn create_product(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Response {
    if let Err(e) = Policy::Write.authorize(&claims) {
        warn!(user = %claims.sub, "Create product denied");
        return e.into_response();
    }

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return AppError::validation(rejection.body_text()).into_response(),
    };

    let cancel = state.request_token();
    match state.catalog.create(request, &cancel).await {
        Ok(id) => (
            StatusCode::CREATED,
            [(LOCATION, format!("/v1/products/{}", id))],
            Json(id),
        )
            .into_response(),
        Err(e) => catalog_error_response(e),
    }
}

/// GET /v1/products?pageNumber=&pageSize=
pub async fn list_products(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    params: Result<Query<PaginationParameters>, QueryRejection>,
) -> Response {
    if let Err(e) = Policy::Read.authorize(&claims) {
        return e.into_response();
    }

    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return AppError::validation(rejection.body_text()).into_response(),
    };

    let cancel = state.request_token();
    products_response(
        state
            .catalog
            .list(params.page_number, params.page_size, &cancel)
            .await,
    )
}

/// GET /v1/products/colour/{colour}
pub async fn list_products_by_colour(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(colour): Path<String>,
) -> Response {
    if let Err(e) = Policy::Read.authorize(&claims) {
        return e.into_response();
    }

    let cancel = state.request_token();
    products_response(state.catalog.list_by_colour(&colour, &cancel).await)
}

fn products_response(result: Result<Vec<ProductDto>, CatalogError>) -> Response {
    match result {
        Ok(products) => Json(products).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

/// 校验失败返回违规数组，重名返回 `{message}`，其余走 Problem Details
fn catalog_error_response(err: CatalogError) -> Response {
    match err {
        CatalogError::Validation(failures) => {
            (StatusCode::BAD_REQUEST, Json(failures)).into_response()
        }
        CatalogError::DuplicateName(_) => (
            StatusCode::CONFLICT,
            Json(ApiError {
                message: err.to_string(),
            }),
        )
            .into_response(),
        other => AppError::from(other).into_response(),
    }
}
