use crate::state::RollbookState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SseEvent {
    CrudStudent,
}

impl SseEvent {
    /// Event name, also used as the `HX-Trigger` value for the requesting page.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CrudStudent => "crud_student",
        }
    }
}

pub async fn sse_feed(
    State(state): State<RollbookState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    //lagged receivers just miss a refresh, the next event catches them up
    let stream = BroadcastStream::new(state.subscribe_to_sse_feed())
        .filter_map(|event| event.ok())
        .map(|event| Ok::<_, Infallible>(Event::default().event(event.name()).data("")));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
