use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        CreateReservationRequest, CreatedReservationResponse, ReservationResponse,
        ReservationsResponse, UpdateReservationRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId},
    reservation::{
        event::{CancelReservation, CreateReservation, UpdateReservation},
        TimeSlot,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn reserve_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreatedReservationResponse>)> {
    req.validate(&())?;

    let now = Utc::now();
    let slot = TimeSlot::new(req.start_time, req.end_time)?;
    slot.ensure_starts_after(now)?;

    let create_reservation =
        CreateReservation::new(room_id, user.id(), slot, req.purpose, now);

    let reservation_id = registry
        .reservation_repository()
        .create(create_reservation)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedReservationResponse { reservation_id }),
    ))
}

pub async fn show_my_reservations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_all_by_user_id(user.id())
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation ({reservation_id}) was not found"))
        })?;

    // Owners see their own reservations, admins see everything.
    if !user.is_admin() {
        reservation.ensure_owned_by(user.id())?;
    }

    Ok(Json(reservation.into()))
}

pub async fn update_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let slot = TimeSlot::new(req.start_time, req.end_time)?;
    slot.ensure_starts_after(Utc::now())?;

    let update_reservation =
        UpdateReservation::new(reservation_id, user.id(), slot, req.purpose);

    registry
        .reservation_repository()
        .update(update_reservation)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let cancel_reservation = CancelReservation::new(reservation_id, user.id());

    registry
        .reservation_repository()
        .cancel(cancel_reservation)
        .await
        .map(|_| StatusCode::OK)
}
