use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use std::sync::{Arc, Mutex};

use magnetics_advisers::filter::NamedFilter;
use magnetics_advisers::{filters, magnetic_adviser};
use magnetics_core::error::MagneticsError;
use magnetics_core::mas::Mas;
use magnetics_core::registry::{CatalogueKind, Registry};

use crate::schema::{AdviseRequest, ErrorBody, ErrorResponse};

pub struct HttpServerConfig {
    pub bind_addr: String,
}

#[derive(Clone)]
struct ApiState {
    registry: Arc<Mutex<Registry>>,
}

pub async fn run(config: HttpServerConfig) -> Result<(), String> {
    let state = ApiState {
        registry: Arc::new(Mutex::new(Registry::new())),
    };
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|err| format!("bind {} failed: {}", config.bind_addr, err))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))
}

fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/magnetics/evaluate", post(evaluate))
        .route("/v1/magnetics/advise", post(advise))
        .route("/v1/catalogues/:kind", post(load_catalogue))
        .with_state(state)
}

async fn evaluate(Json(mut mas): Json<Mas>) -> impl IntoResponse {
    let frequency = mas
        .inputs
        .operating_points
        .first()
        .and_then(|op| op.excitations.first())
        .map(|e| e.current.frequency)
        .unwrap_or(100_000.0);

    let settings = magnetics_core::settings::Settings::default();

    let mag_output = match magnetics_core::inductance::magnetizing::magnetizing_inductance(
        &mas.magnetic.core,
        mas.magnetic
            .coil
            .functional
            .first()
            .map(|w| w.number_turns)
            .unwrap_or(1),
        &settings,
    ) {
        Ok(v) => v,
        Err(err) => return error_response(&err),
    };

    let mean_turn_length = mas
        .magnetic
        .coil
        .turns
        .first()
        .map(|t| t.length)
        .unwrap_or(mas.magnetic.core.winding_window.width);

    let l_matrix = match magnetics_core::inductance::matrix::inductance_matrix(
        &mas.magnetic.coil,
        frequency,
        mag_output.lm0,
        mas.magnetic
            .coil
            .functional
            .first()
            .map(|w| w.number_turns)
            .unwrap_or(1),
        mean_turn_length,
        mas.magnetic.core.winding_window.width,
    ) {
        Ok(v) => v,
        Err(err) => return error_response(&err),
    };

    let op = match mas.inputs.operating_points.first() {
        Some(op) => op.clone(),
        None => {
            return api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                "at least one operating point is required",
                None,
            )
        }
    };

    let losses = match magnetics_core::losses::winding_losses(&mas.magnetic.coil, &mas.magnetic.wires, &settings, &op) {
        Ok(v) => v,
        Err(err) => return error_response(&err),
    };

    let r_matrix = magnetics_core::resistance::resistance_matrix(
        &mas.magnetic.coil,
        &mas.magnetic.wires,
        &settings,
        frequency,
        op.ambient_temperature,
    )
    .ok();

    let mut winding_losses_map = std::collections::HashMap::new();
    for (name, breakdown) in &losses.per_winding {
        winding_losses_map.insert(name.clone(), breakdown.dc + breakdown.skin + breakdown.proximity);
    }

    mas.outputs = Some(magnetics_core::mas::MagneticOutputs {
        inductance_matrix: vec![l_matrix],
        resistance_matrix: r_matrix.into_iter().collect(),
        coupling_coefficients: std::collections::HashMap::new(),
        winding_losses: winding_losses_map,
        core_losses: None,
        numerical_issues: losses.numerical_issues,
    });

    Json(mas).into_response()
}

async fn advise(State(state): State<ApiState>, Json(payload): Json<AdviseRequest>) -> impl IntoResponse {
    let registry = match state.registry.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "REGISTRY_ERROR",
                "registry is unavailable",
                None,
            )
        }
    };
    let settings = magnetics_core::settings::Settings::default();
    let active_filters: Vec<NamedFilter> = vec![
        filters::turns_ratio_fit(),
        filters::magnetizing_inductance_match(),
        filters::saturation(),
        filters::volume(),
        filters::full_losses(),
        filters::cost(),
    ];
    let top_k = payload.top_k.unwrap_or(5);
    let outcome = magnetic_adviser::search(
        &payload.functional,
        &payload.inputs,
        &registry,
        &settings,
        &active_filters,
        top_k,
        &|| false,
    );
    let mas_list: Vec<Mas> = outcome.candidates.into_iter().map(|(mas, _)| mas).collect();
    Json(mas_list).into_response()
}

async fn load_catalogue(
    State(state): State<ApiState>,
    Path(kind): Path<String>,
    body: String,
) -> impl IntoResponse {
    let catalogue_kind = match kind.as_str() {
        "cores" => CatalogueKind::Core,
        "core-materials" => CatalogueKind::CoreMaterial,
        "wires" => CatalogueKind::Wire,
        "magnetics" => CatalogueKind::Magnetic,
        _ => {
            return api_error(
                StatusCode::BAD_REQUEST,
                "UNKNOWN_CATALOGUE",
                &format!("unknown catalogue kind: {kind}"),
                None,
            )
        }
    };

    let mut registry = match state.registry.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "REGISTRY_ERROR",
                "registry is unavailable",
                None,
            )
        }
    };

    let errors = registry.load_ndjson(catalogue_kind, &body);
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(|(line, err)| format!("line {line}: {err}"))
            .collect();
        return api_error(
            StatusCode::BAD_REQUEST,
            "CATALOGUE_PARSE_ERROR",
            "one or more catalogue lines failed to parse",
            Some(details),
        );
    }

    StatusCode::NO_CONTENT.into_response()
}

fn error_response(err: &MagneticsError) -> axum::response::Response {
    let status = match err {
        MagneticsError::InvalidInput(_) | MagneticsError::InvalidGeometry(_) => StatusCode::BAD_REQUEST,
        MagneticsError::CatalogueMiss(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    api_error(status, err.code(), &err.message(), None)
}

fn api_error(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<Vec<String>>,
) -> axum::response::Response {
    let body = ErrorResponse {
        error: ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
            details,
        },
    };
    (status, Json(body)).into_response()
}
