//! Server-Sent Events for game notifications

use super::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events - SSE stream of win/loss and catalog notifications
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    mmg_common::sse::create_event_sse_stream("mmg-server", state.session.events())
}
