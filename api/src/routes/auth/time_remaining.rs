use actix_web::{web, HttpResponse};
use chrono::Duration;

use super::AppState;
use crate::dto::auth::TimeRemainingResponse;

/// Handler for GET /api/v1/auth/time-remaining
///
/// Seconds left on the current code, for display only. Partial seconds
/// count as a full second so the countdown reaches zero only once the code
/// has actually expired.
pub async fn time_remaining(state: web::Data<AppState>) -> HttpResponse {
    let remaining = state.manager.time_remaining().await;
    HttpResponse::Ok().json(TimeRemainingResponse {
        seconds_remaining: ceil_seconds(remaining),
    })
}

fn ceil_seconds(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds().max(0);
    (millis + 999) / 1000
}
