//! HTTP request handlers for the rental shop API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{RentalRequest, rent, return_unit};
use crate::error::{EngineError, EngineResult};
use crate::models::{BikeCategory, UnitStatus};
use crate::report::SalesReport;

use super::request::{
    InsertRequest, InventoryQuery, RentRequest, ReportQuery, ReturnRequest, validate_contact,
};
use super::response::{
    ApiError, ApiErrorResponse, CategoryAvailability, InsertResponse, InventoryResponse,
    ReportResponse, TransactionsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/inventory", get(list_inventory).post(insert_inventory))
        .route("/rentals", post(create_rental))
        .route("/returns", post(create_return))
        .route("/transactions", get(list_transactions))
        .route("/report", get(get_report))
        .with_state(state)
}

fn error_response(error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn parse_status(status: &str) -> EngineResult<UnitStatus> {
    match status.trim().to_lowercase().as_str() {
        "available" => Ok(UnitStatus::Available),
        "rented" => Ok(UnitStatus::Rented),
        other => Err(EngineError::InvalidRequest {
            field: "status".to_string(),
            message: format!("unknown status '{}'; expected available or rented", other),
        }),
    }
}

/// Handler for GET /inventory.
///
/// Lists units matching the optional category and status filters, along
/// with per-category availability counts.
async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> impl IntoResponse {
    let category = match query.category.as_deref().map(BikeCategory::parse).transpose() {
        Ok(category) => category,
        Err(err) => return error_response(err),
    };
    let status = match query.status.as_deref().map(parse_status).transpose() {
        Ok(status) => status,
        Err(err) => return error_response(err),
    };

    let shop = state.shop().read().await;
    let units = shop
        .inventory
        .list(category, status)
        .into_iter()
        .cloned()
        .collect();
    let availability = BikeCategory::ALL
        .iter()
        .map(|&category| CategoryAvailability {
            category,
            available: shop.inventory.count_available(category),
            rented: shop.inventory.count_rented(category),
            total: shop.inventory.total(category),
        })
        .collect();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(InventoryResponse {
            units,
            availability,
        }),
    )
        .into_response()
}

/// Handler for POST /inventory.
///
/// Adds new bicycles of a category, continuing the serial number
/// sequence, and persists the updated snapshot.
async fn insert_inventory(
    State(state): State<AppState>,
    payload: Result<Json<InsertRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        category = %request.category,
        quantity = request.quantity,
        "Processing inventory insertion"
    );

    let category = match BikeCategory::parse(&request.category) {
        Ok(category) => category,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Insertion rejected");
            return error_response(err);
        }
    };

    let mut shop = state.shop().write().await;
    let unit_ids = match shop
        .inventory
        .insert(category, state.config().pricing(), request.quantity)
    {
        Ok(unit_ids) => unit_ids,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Insertion failed");
            return error_response(err);
        }
    };
    if let Err(err) = state.storage().save(&shop) {
        warn!(correlation_id = %correlation_id, error = %err, "Persisting insertion failed");
        return error_response(err);
    }

    info!(
        correlation_id = %correlation_id,
        unit_ids = ?unit_ids,
        "Inventory insertion completed"
    );
    (
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(InsertResponse { unit_ids }),
    )
        .into_response()
}

/// Handler for POST /rentals.
///
/// Rents out bicycles and returns the fee breakdown. Contact numbers
/// are validated here; the engines treat contact as opaque.
async fn create_rental(
    State(state): State<AppState>,
    payload: Result<Json<RentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        category = %request.category,
        quantity = request.quantity,
        "Processing rental request"
    );

    if let Err(err) = validate_contact(&request.contact) {
        warn!(correlation_id = %correlation_id, error = %err, "Rental rejected");
        return error_response(err);
    }
    let category = match BikeCategory::parse(&request.category) {
        Ok(category) => category,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rental rejected");
            return error_response(err);
        }
    };

    let mut shop = state.shop().write().await;
    if request.time.date() != shop.ledger.date() {
        let err = EngineError::InvalidRequest {
            field: "time".to_string(),
            message: format!("must fall on the open business day {}", shop.ledger.date()),
        };
        warn!(correlation_id = %correlation_id, error = %err, "Rental rejected");
        return error_response(err);
    }

    let rental_request = RentalRequest {
        category,
        requested_hours: request.hours,
        rented_at: request.time,
        contact: request.contact,
        quantity: request.quantity,
    };
    let (inventory, ledger) = shop.split_mut();
    let result = match rent(inventory, ledger, state.config().pricing(), &rental_request) {
        Ok(result) => result,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rental failed");
            return error_response(err);
        }
    };
    if let Err(err) = state.storage().save(&shop) {
        warn!(correlation_id = %correlation_id, error = %err, "Persisting rental failed");
        return error_response(err);
    }

    info!(
        correlation_id = %correlation_id,
        unit_ids = ?result.unit_ids,
        total_fee = %result.total_fee,
        "Rental completed"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Handler for POST /returns.
///
/// Takes a bicycle back and charges any overdue surcharge.
async fn create_return(
    State(state): State<AppState>,
    payload: Result<Json<ReturnRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        unit_id = %request.unit_id,
        "Processing return request"
    );

    let mut shop = state.shop().write().await;
    let (inventory, ledger) = shop.split_mut();
    let result = match return_unit(inventory, ledger, &request.unit_id, request.time) {
        Ok(result) => result,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Return failed");
            return error_response(err);
        }
    };
    if let Err(err) = state.storage().save(&shop) {
        warn!(correlation_id = %correlation_id, error = %err, "Persisting return failed");
        return error_response(err);
    }

    info!(
        correlation_id = %correlation_id,
        unit_id = %result.unit_id,
        excess_fee = %result.excess_fee,
        "Return completed"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Handler for GET /transactions.
///
/// Returns the open day's ledger in append order.
async fn list_transactions(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop().read().await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(TransactionsResponse {
            date: shop.ledger.date(),
            transactions: shop.ledger.transactions().to_vec(),
            total_revenue: shop.ledger.total_revenue(),
        }),
    )
        .into_response()
}

/// Handler for GET /report.
///
/// Renders the day's sales report; with `?save=true` the report is also
/// written to a `SALES_REPORT_<date>.txt` file in the data directory.
async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let shop = state.shop().read().await;
    let report = SalesReport::from_ledger(&shop.ledger, state.config().shop());

    let saved_to = if query.save {
        match report.write_to(state.storage().data_dir()) {
            Ok(path) => Some(path.display().to_string()),
            Err(err) => {
                warn!(error = %err, "Writing report failed");
                return error_response(err);
            }
        }
    } else {
        None
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ReportResponse {
            date: report.date,
            report: report.render(),
            saved_to,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::storage::ShopStorage;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn create_test_state(dir: &tempfile::TempDir) -> AppState {
        let config = ConfigLoader::load("./config/shop").expect("Failed to load config");
        let storage = ShopStorage::new(dir.path()).expect("Failed to open storage");
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        AppState::open(config, storage, date).expect("Failed to open day")
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_list_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_test_state(&dir);
        let router = create_router(state);

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/inventory",
                r#"{"category": "adult", "quantity": 2}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let inserted: InsertResponse = body_json(response).await;
        assert_eq!(inserted.unit_ids, vec!["A001", "A002"]);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/inventory?category=adult&status=available")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: InventoryResponse = body_json(response).await;
        assert_eq!(listed.units.len(), 2);
        let adult = &listed.availability[0];
        assert_eq!(adult.available, 2);
        assert_eq!(adult.rented, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_test_state(&dir);
        let router = create_router(state);

        let response = router
            .oneshot(json_request("POST", "/rentals", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_unknown_category_returns_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_test_state(&dir);
        let router = create_router(state);

        let response = router
            .oneshot(json_request(
                "POST",
                "/inventory",
                r#"{"category": "cargo", "quantity": 1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "UNKNOWN_CATEGORY");
    }

    #[tokio::test]
    async fn test_invalid_contact_returns_400_without_renting() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_test_state(&dir);
        let router = create_router(state.clone());

        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/inventory",
                r#"{"category": "adult", "quantity": 1}"#,
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(json_request(
                "POST",
                "/rentals",
                r#"{"category": "adult", "hours": "2", "time": "2024-06-01T10:00:00", "contact": "12345678"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");

        let shop = state.shop().read().await;
        assert_eq!(shop.inventory.count_rented(BikeCategory::Adult), 0);
        assert!(shop.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_rental_on_wrong_business_day_returns_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_test_state(&dir);
        let router = create_router(state);

        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/inventory",
                r#"{"category": "adult", "quantity": 1}"#,
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(json_request(
                "POST",
                "/rentals",
                r#"{"category": "adult", "hours": "2", "time": "2024-06-02T10:00:00", "contact": "91234567"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("business day"));
    }
}
