use crate::Yield;
use agri_derive::api_handler;
use agri_domain::constants::YIELD_TAG;
use agri_inference::{FormFields, Report, StatsSnapshot};
use agri_kernel::server::ApiState;
use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use std::collections::BTreeMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `POST /predict_yield` and `GET /predict_yield/stats`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(predict_yield_handler)).routes(routes!(stats_handler))
}

#[api_handler(
    post,
    path = "/predict_yield",
    request_body(
        content = BTreeMap<String, String>,
        content_type = "application/x-www-form-urlencoded",
        description = "N, P, K, temperature, humidity, ph, rainfall and the crop `label`",
    ),
    responses((status = OK, description = "Estimated yield or an inline error", body = Report)),
    tag = YIELD_TAG,
)]
pub(crate) async fn predict_yield_handler(
    State(state): State<ApiState>,
    form: Result<Form<FormFields>, FormRejection>,
) -> Json<Report> {
    let report = match (state.try_get_slice::<Yield>(), form) {
        (Ok(slice), Ok(Form(fields))) => slice.estimate(&fields),
        (Err(err), _) => Report::error(&err),
        (_, Err(rejection)) => Report::error(&rejection),
    };
    Json(report)
}

#[api_handler(
    get,
    path = "/predict_yield/stats",
    responses(
        (status = OK, description = "Request and degradation counters", body = StatsSnapshot),
        (status = SERVICE_UNAVAILABLE, description = "Slice not registered"),
    ),
    tag = YIELD_TAG,
)]
pub(crate) async fn stats_handler(
    State(state): State<ApiState>,
) -> Result<Json<StatsSnapshot>, StatusCode> {
    state
        .try_get_slice::<Yield>()
        .map(|slice| Json(slice.stats()))
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}
