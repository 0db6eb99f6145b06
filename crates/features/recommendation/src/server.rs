use crate::Recommendation;
use agri_derive::api_handler;
use agri_domain::constants::RECOMMENDATION_TAG;
use agri_inference::{FormFields, Report, StatsSnapshot};
use agri_kernel::server::ApiState;
use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use std::collections::BTreeMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `POST /predict` and `GET /predict/stats`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(predict_handler)).routes(routes!(stats_handler))
}

#[api_handler(
    post,
    path = "/predict",
    request_body(
        content = BTreeMap<String, String>,
        content_type = "application/x-www-form-urlencoded",
        description = "N, P, K, temperature, humidity, ph, rainfall",
    ),
    responses((status = OK, description = "Recommended crop or an inline error", body = Report)),
    tag = RECOMMENDATION_TAG,
)]
pub(crate) async fn predict_handler(
    State(state): State<ApiState>,
    form: Result<Form<FormFields>, FormRejection>,
) -> Json<Report> {
    let report = match (state.try_get_slice::<Recommendation>(), form) {
        (Ok(slice), Ok(Form(fields))) => slice.recommend(&fields),
        (Err(err), _) => Report::error(&err),
        (_, Err(rejection)) => Report::error(&rejection),
    };
    Json(report)
}

#[api_handler(
    get,
    path = "/predict/stats",
    responses(
        (status = OK, description = "Request and degradation counters", body = StatsSnapshot),
        (status = SERVICE_UNAVAILABLE, description = "Slice not registered"),
    ),
    tag = RECOMMENDATION_TAG,
)]
pub(crate) async fn stats_handler(
    State(state): State<ApiState>,
) -> Result<Json<StatsSnapshot>, StatusCode> {
    state
        .try_get_slice::<Recommendation>()
        .map(|slice| Json(slice.stats()))
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}
