//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, warn};

use crate::state::{AppState, Command, Mode};
use super::responses::{
    ApiResponse, DurationRequest, FontRequest, HealthResponse, StatusResponse,
};

type Rejection = (StatusCode, Json<ApiResponse>);

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Apply a command and answer with the frame it produced
fn run_command(state: &AppState, command: Command, message: &str) -> Json<ApiResponse> {
    state.apply(command);
    Json(ApiResponse::ok(message.to_string(), state.display.current()))
}

fn reject(state: &AppState, status: StatusCode, message: String) -> Rejection {
    warn!("Rejected request: {}", message);
    (status, Json(ApiResponse::error(message, state.display.current())))
}

/// Unwrap a JSON body, turning axum's plain-text rejection into an `ApiResponse`
fn json_body<T>(state: &AppState, body: Result<Json<T>, JsonRejection>) -> Result<T, Rejection> {
    body.map(|Json(request)| request)
        .map_err(|e| reject(state, StatusCode::BAD_REQUEST, e.body_text()))
}

/// Handle GET / - Serve the timer page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    run_command(&state, Command::Start, "Timer started")
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    run_command(&state, Command::Stop, "Timer stopped")
}

/// Handle POST /reset - Back to a full Work interval
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    run_command(&state, Command::Reset, "Timer reset")
}

/// Handle POST /mode/:mode - Select Work or Break
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, Rejection> {
    let Some(target) = Mode::from_id(&mode) else {
        return Err(reject(&state, StatusCode::NOT_FOUND, format!("Unknown mode '{}'", mode)));
    };
    let message = format!("Selected {} mode", target.as_str());
    Ok(run_command(&state, Command::SelectMode(target), &message))
}

/// Handle PUT /duration/work - Set the Work length in minutes
pub async fn work_duration_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DurationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, Rejection> {
    let request = json_body(&state, body)?;
    let minutes = request
        .minutes
        .validate()
        .map_err(|e| reject(&state, StatusCode::BAD_REQUEST, e))?;
    let message = format!("Work duration set to {} minutes", minutes.get());
    Ok(run_command(&state, Command::SetWorkDuration(minutes), &message))
}

/// Handle PUT /duration/break - Set the Break length in minutes
pub async fn break_duration_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DurationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, Rejection> {
    let request = json_body(&state, body)?;
    let minutes = request
        .minutes
        .validate()
        .map_err(|e| reject(&state, StatusCode::BAD_REQUEST, e))?;
    let message = format!("Break duration set to {} minutes", minutes.get());
    Ok(run_command(&state, Command::SetBreakDuration(minutes), &message))
}

/// Handle PUT /font - Change the display typeface
pub async fn font_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FontRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, Rejection> {
    let request = json_body(&state, body)?;
    if state.apply(Command::ChangeDisplayFont(request.font.clone())) {
        Ok(Json(ApiResponse::ok(
            format!("Font set to {}", request.font),
            state.display.current(),
        )))
    } else {
        Ok(Json(ApiResponse::unchanged(
            format!("Unknown font '{}', typeface unchanged", request.font),
            state.display.current(),
        )))
    }
}

/// Handle GET /events - Stream display frames as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Display subscriber connected");
    let rx = state.display.subscribe();

    // First frame is sent right away, then one per change
    let frames = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let update = rx.borrow_and_update().clone();
        let event = match serde_json::to_string(&update) {
            Ok(data) => Event::default().event("display").data(data),
            Err(e) => Event::default().event("error").data(e.to_string()),
        };
        Some((Ok::<_, Infallible>(event), (rx, false)))
    });

    Sse::new(frames).keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return the current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.controller.state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: timer.snapshot(),
        work_minutes: timer.work_duration / 60,
        break_minutes: timer.break_duration / 60,
        font: state.display.font(),
        display: state.display.current(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
