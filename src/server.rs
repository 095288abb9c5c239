use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::predictor::{PredictorError, TennisPredictor, WeatherInput};

/// Shared server state: the predictor built once at startup.
///
/// The predictor is immutable; picking up a changed dataset means building a
/// fresh one and serving that (recompute-then-publish), never mutating this
/// one under live requests.
#[derive(Clone)]
pub struct AppState {
    predictor: Arc<TennisPredictor>,
}

impl AppState {
    pub fn new(predictor: Arc<TennisPredictor>) -> Self {
        Self { predictor }
    }
}

/// Builds the three-page router plus the JSON prediction endpoint.
pub fn router(predictor: Arc<TennisPredictor>) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/predict", get(predict_page).post(predict_submit))
        .route("/about", get(about_page))
        .route("/api/predict", post(api_predict))
        .with_state(AppState::new(predictor))
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    label: String,
    play: bool,
}

fn status_for(err: &PredictorError) -> StatusCode {
    match err {
        // Rejected: bad input, the caller can fix it.
        PredictorError::UnknownCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON endpoint: `{outlook, temp, humidity, wind}` in, label and verdict out.
async fn api_predict(
    State(state): State<AppState>,
    Json(input): Json<WeatherInput>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.predictor.predict(&input) {
        Ok(prediction) => Ok(Json(PredictResponse {
            play: prediction.is_play(),
            label: prediction.label,
        })),
        Err(e) => {
            let status = status_for(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                log::error!("prediction failed: {}", e);
            } else {
                log::warn!("prediction rejected: {}", e);
            }
            Err((status, Json(json!({ "error": e.to_string() }))))
        }
    }
}

async fn home_page() -> Html<String> {
    Html(page(
        "Play Tennis Prediction",
        r#"
<h1>Welcome to the Play Tennis Prediction App</h1>
<p>Curious if today's weather is right for a tennis match? This app predicts
whether you should play tennis based on the weather conditions, using a
decision-tree classifier trained on historical observations.</p>
<h2>How it works</h2>
<ul>
  <li>Go to the <a href="/predict">Predict</a> page.</li>
  <li>Pick the weather conditions (outlook, temperature, humidity, wind).</li>
  <li>Submit and get a recommendation instantly.</li>
</ul>
"#,
    ))
}

/// The form page: one select per feature, options drawn from the fitted
/// category domains, so the UI can only submit known categories.
async fn predict_page(State(state): State<AppState>) -> Html<String> {
    Html(page("Predict", &render_form(&state.predictor, None)))
}

/// Form submission. A known-domain input reaches Done and renders the
/// verdict; an unknown category is Rejected with 422 and the reason.
async fn predict_submit(
    State(state): State<AppState>,
    Form(input): Form<WeatherInput>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match state.predictor.predict(&input) {
        Ok(prediction) => {
            let verdict = if prediction.is_play() {
                "<p><strong>Yes!</strong> You should play tennis today.</p>"
            } else {
                "<p><strong>No.</strong> It's not a great day for tennis.</p>"
            };
            Ok(Html(page(
                "Prediction Result",
                &render_form(&state.predictor, Some(verdict)),
            )))
        }
        Err(e) => {
            let status = status_for(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                log::error!("prediction failed: {}", e);
            } else {
                log::warn!("prediction rejected: {}", e);
            }
            let message = format!("<p>Could not predict: {}</p>", escape(&e.to_string()));
            Err((
                status,
                Html(page(
                    "Prediction Rejected",
                    &render_form(&state.predictor, Some(&message)),
                )),
            ))
        }
    }
}

async fn about_page(State(state): State<AppState>) -> Html<String> {
    let info = state.predictor.info();
    let body = format!(
        r#"
<h1>About This Project</h1>
<p>A machine-learning demo that helps tennis players decide whether to play
based on the weather. A decision tree is trained on {} historical
observations of outlook, temperature, humidity and wind, each labeled with
whether tennis was played.</p>
<p>Labels: {}. Dataset source: {}.</p>
"#,
        info.num_rows,
        escape(&info.labels.join(", ")),
        escape(&info.dataset_source),
    );
    Html(page("About", &body))
}

fn render_form(predictor: &TennisPredictor, result: Option<&str>) -> String {
    let mut selects = String::new();
    for mapping in predictor.encoders().feature_mappings() {
        let options: String = mapping
            .categories()
            .iter()
            .map(|c| format!(r#"<option value="{0}">{0}</option>"#, escape(c)))
            .collect();
        selects.push_str(&format!(
            r#"<label>{0} <select name="{0}">{1}</select></label><br>"#,
            mapping.column(),
            options
        ));
    }
    format!(
        r#"
<h1>Play Tennis Prediction</h1>
<p>Provide the weather conditions to predict whether it's a good day for tennis.</p>
<form method="post" action="/predict">
{}
<button type="submit">Predict</button>
</form>
{}
"#,
        selects,
        result.unwrap_or("")
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{}</title></head>
<body>
<nav><a href="/">Home</a> | <a href="/predict">Predict</a> | <a href="/about">About</a></nav>
{}
</body>
</html>"#,
        escape(title),
        body
    )
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
