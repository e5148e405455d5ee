//! HTTP handlers for the risk gateway.

use axum::{
  extract::{rejection::QueryRejection, Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use supplier_risk::{ConfigError, EngineError, ErrorOutput};

use crate::state::AppState;
use crate::types::RiskQuery;

pub async fn health() -> &'static str {
  "ok"
}

pub async fn supplier_risk(
  State(state): State<Arc<AppState>>,
  Path(supplier_id): Path<String>,
  query: Result<Query<RiskQuery>, QueryRejection>,
) -> Response {
  let request_id = Uuid::new_v4();
  let span = tracing::info_span!("supplier_risk", %request_id, %supplier_id);

  async move {
    let Query(query) = match query {
      Ok(q) => q,
      Err(e) => {
        tracing::warn!(error = %e, "rejected query string");
        return bad_request(ErrorOutput::new(e.body_text()));
      }
    };
    let reference = match query.reference() {
      Ok(r) => r,
      Err(out) => return bad_request(out),
    };
    let weights = query.weights(state.engine.config().weights);

    match state.engine.evaluate_supplier(&supplier_id, reference, weights).await {
      Ok(report) => (StatusCode::OK, Json(report)).into_response(),
      Err(e @ EngineError::NotFound { .. }) => {
        tracing::info!("supplier not found");
        (StatusCode::NOT_FOUND, Json(ErrorOutput::new(e.to_string()))).into_response()
      }
      Err(EngineError::Config(e)) => {
        tracing::warn!(error = %e, "rejected override");
        bad_request(config_error_output(&e))
      }
    }
  }
  .instrument(span)
  .await
}

pub async fn inventory_risk(State(state): State<Arc<AppState>>, Path(item_id): Path<String>) -> Response {
  let request_id = Uuid::new_v4();
  let span = tracing::info_span!("inventory_risk", %request_id, %item_id);

  let result = state.inventory.assess(&item_id).instrument(span).await;
  (StatusCode::OK, Json(result)).into_response()
}

fn bad_request(out: ErrorOutput) -> Response {
  (StatusCode::BAD_REQUEST, Json(out)).into_response()
}

fn config_error_output(e: &ConfigError) -> ErrorOutput {
  let ConfigError::Invalid { field, reason } = e;
  ErrorOutput::new(reason.clone()).with_field(field.clone())
}
