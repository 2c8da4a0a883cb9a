pub mod cli;
pub mod config;

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::core::{
    CalculationResult, SCHEMES, SchemeInputs, calculate, calculate_lenient,
    find_scheme, format_compact, format_currency, government_rates,
};

use config::ServerConfig;

#[derive(Copy, Clone, Debug)]
struct AppState {
    strict_dispatch: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatePayload {
    scheme: Option<String>,
    monthly_investment: Option<f64>,
    principal: Option<f64>,
    monthly_deposit: Option<f64>,
    yearly_deposit: Option<f64>,
    rate: Option<f64>,
    years: Option<f64>,
    compounding_frequency: Option<u32>,
}

impl CalculatePayload {
    fn inputs(&self) -> SchemeInputs {
        SchemeInputs {
            monthly_investment: self.monthly_investment,
            principal: self.principal,
            monthly_deposit: self.monthly_deposit,
            yearly_deposit: self.yearly_deposit,
            rate: self.rate,
            years: self.years,
            compounding_frequency: self.compounding_frequency,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedAmounts {
    total_invested: String,
    returns: String,
    maturity_amount: String,
    maturity_compact: String,
}

impl From<&CalculationResult> for FormattedAmounts {
    fn from(result: &CalculationResult) -> Self {
        Self {
            total_invested: format_currency(result.total_invested as f64),
            returns: format_currency(result.returns as f64),
            maturity_amount: format_currency(result.maturity_amount as f64),
            maturity_compact: format_compact(result.maturity_amount as f64),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    scheme: String,
    strict: bool,
    result: CalculationResult,
    formatted: FormattedAmounts,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = router(AppState {
        strict_dispatch: config.strict_dispatch,
    });

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, strict_dispatch = config.strict_dispatch, "investment calculator API listening");
    info!("Local access: http://127.0.0.1:{}/api/schemes", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/schemes", get(schemes_handler))
        .route("/api/schemes/:id", get(scheme_handler))
        .route("/api/rates", get(rates_handler))
        .route(
            "/api/calculate",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn schemes_handler() -> Response {
    json_response(StatusCode::OK, &SCHEMES[..])
}

async fn scheme_handler(Path(id): Path<String>) -> Response {
    match find_scheme(&id) {
        Some(definition) => json_response(StatusCode::OK, definition),
        None => error_response(StatusCode::NOT_FOUND, &format!("unknown scheme '{id}'")),
    }
}

async fn rates_handler() -> Response {
    let rates: BTreeMap<&'static str, f64> = government_rates()
        .map(|(id, rate)| (id.as_str(), rate))
        .collect();
    json_response(StatusCode::OK, rates)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<CalculatePayload>,
) -> Response {
    calculate_handler_impl(state, payload)
}

async fn calculate_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<CalculatePayload>,
) -> Response {
    calculate_handler_impl(state, payload)
}

fn calculate_handler_impl(state: AppState, payload: CalculatePayload) -> Response {
    match calculation_from_payload(&payload, state.strict_dispatch) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn calculation_from_payload(
    payload: &CalculatePayload,
    strict: bool,
) -> Result<CalculateResponse, String> {
    let Some(scheme) = payload.scheme.as_deref() else {
        return Err("scheme is required".to_string());
    };
    let inputs = payload.inputs();

    let result = if strict {
        calculate(scheme, &inputs).map_err(|e| e.to_string())?
    } else {
        calculate_lenient(scheme, &inputs)
    };

    Ok(CalculateResponse {
        scheme: scheme.to_ascii_lowercase(),
        strict,
        formatted: FormattedAmounts::from(&result),
        result,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn payload_from_json(json: &str) -> Result<CalculatePayload, String> {
    serde_json::from_str::<CalculatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))
}
