use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::db::ItineraryStorage;
use crate::handlers::{
    chat::{chat_handler, debug_content_handler},
    health_handler,
    itinerary::{
        create_itinerary, delete_itinerary, get_itinerary, list_itineraries, update_itinerary,
    },
};
use crate::service::ChatService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct NambiState {
    pub chat: Arc<ChatService>,
    pub itineraries: ItineraryStorage,
}

impl NambiState {
    pub fn new(chat: Arc<ChatService>, itineraries: ItineraryStorage) -> Self {
        Self { chat, itineraries }
    }
}

pub fn nambi_router(state: NambiState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/debug/content", get(debug_content_handler))
        .route(
            "/api/admin/itineraries",
            get(list_itineraries).post(create_itinerary),
        )
        .route(
            "/api/admin/itineraries/",
            get(list_itineraries).post(create_itinerary),
        )
        .route(
            "/api/admin/itineraries/{id}",
            get(get_itinerary)
                .put(update_itinerary)
                .delete(delete_itinerary),
        )
        .with_state(state)
}
