use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use kernel::model::{
    id::ReservationId,
    reservation::ReservationStatus,
    stats::month_window,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        admin::{DashboardResponse, RoomUsageResponse, StatisticsResponse, StatusCountResponse},
        reservation::{ReservationListQuery, ReservationResponse, ReservationsResponse},
    },
};

const POPULAR_ROOMS_LIMIT: i64 = 5;

fn ensure_admin(user: &AuthorizedUser) -> AppResult<()> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    Ok(())
}

pub async fn dashboard(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardResponse>> {
    ensure_admin(&user)?;

    let reservations = registry.reservation_repository();
    let rooms = registry.room_repository();
    let users = registry.user_repository();

    let pending_reservations = reservations
        .find_pending_all()
        .await?
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    let approved_count = reservations
        .count_by_status(ReservationStatus::Approved)
        .await?;
    let total_rooms = rooms.count().await?;
    let listed_rooms = rooms.count_listed().await?;
    let total_users = users.count().await?;

    Ok(Json(DashboardResponse {
        pending_reservations,
        approved_count,
        total_rooms,
        listed_rooms,
        total_users,
    }))
}

pub async fn show_all_reservations(
    user: AuthorizedUser,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    ensure_admin(&user)?;

    registry
        .reservation_repository()
        .find_all(query.status)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn approve_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    ensure_admin(&user)?;

    registry
        .reservation_repository()
        .approve(reservation_id)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn reject_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    ensure_admin(&user)?;

    registry
        .reservation_repository()
        .reject(reservation_id)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn statistics(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<StatisticsResponse>> {
    ensure_admin(&user)?;

    let (from, until) = month_window(Utc::now());

    let monthly_breakdown = registry
        .reservation_repository()
        .status_breakdown(from, until)
        .await?
        .into_iter()
        .map(StatusCountResponse::from)
        .collect();

    let popular_rooms = registry
        .reservation_repository()
        .most_booked_rooms(POPULAR_ROOMS_LIMIT)
        .await?
        .into_iter()
        .map(RoomUsageResponse::from)
        .collect();

    Ok(Json(StatisticsResponse {
        month: from.format("%Y-%m").to_string(),
        monthly_breakdown,
        popular_rooms,
    }))
}
