use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::debug;

use data_model_hh::models::{AppError, House, HouseInsertResponse};
use data_model_hh::schema::houses;

use crate::routes::AppState;

/// POST /houses
/// Persists the client-supplied listing document exactly as sent.
pub async fn post_house(State(state): State<AppState>, Json(document): Json<Value>) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.get().await?;

    let house = House::from_document(document);

    diesel::insert_into(houses::table)
        .values(&house)
        .execute(&mut conn)
        .await?;

    debug!(id = %house.id, "stored house listing");

    Ok((
        StatusCode::OK,
        Json(HouseInsertResponse { inserted_id: house.id }),
    ))
}
