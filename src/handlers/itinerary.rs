use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::info;

use crate::db::{Itinerary, NewItinerary};
use crate::middleware::{ItemId, JsonBody};
use crate::types::itinerary::{CreateItinerary, CreatedResponse, MessageResponse, UpdateItinerary};
use crate::{NambiError, router::NambiState};

/// POST /api/admin/itineraries/
pub async fn create_itinerary(
    State(state): State<NambiState>,
    JsonBody(req): JsonBody<CreateItinerary>,
) -> Result<(StatusCode, Json<CreatedResponse>), NambiError> {
    let new = NewItinerary::try_from(req)?;
    let id = state.itineraries.create(new).await?;
    info!(id, "itinerary created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Itinerary created successfully".to_string(),
            id,
        }),
    ))
}

/// GET /api/admin/itineraries/
pub async fn list_itineraries(
    State(state): State<NambiState>,
) -> Result<Json<Vec<Itinerary>>, NambiError> {
    Ok(Json(state.itineraries.list().await?))
}

/// GET /api/admin/itineraries/{id}
pub async fn get_itinerary(
    State(state): State<NambiState>,
    ItemId(id): ItemId,
) -> Result<Json<Itinerary>, NambiError> {
    Ok(Json(state.itineraries.get_by_id(id).await?))
}

/// PUT /api/admin/itineraries/{id}
pub async fn update_itinerary(
    State(state): State<NambiState>,
    ItemId(id): ItemId,
    JsonBody(patch): JsonBody<UpdateItinerary>,
) -> Result<Json<MessageResponse>, NambiError> {
    let mut itinerary = state.itineraries.get_by_id(id).await?;
    itinerary.apply(patch);
    state.itineraries.update(&itinerary).await?;
    info!(id, "itinerary updated");
    Ok(Json(MessageResponse::new("Itinerary updated successfully")))
}

/// DELETE /api/admin/itineraries/{id}
pub async fn delete_itinerary(
    State(state): State<NambiState>,
    ItemId(id): ItemId,
) -> Result<Json<MessageResponse>, NambiError> {
    state.itineraries.delete(id).await?;
    info!(id, "itinerary deleted");
    Ok(Json(MessageResponse::new("Itinerary deleted successfully")))
}
