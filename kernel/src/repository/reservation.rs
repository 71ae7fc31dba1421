use crate::model::{
    id::{ReservationId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation, UpdateReservation},
        Reservation, ReservationStatus,
    },
    stats::{RoomUsage, StatusCount},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // submit a new request; lands as Pending
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // owner edit; a successful edit always resets status to Pending
    async fn update(&self, event: UpdateReservation) -> AppResult<()>;
    // owner cancel of a pending or approved reservation
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    // admin decision on the pending queue; approval re-checks conflicts
    async fn approve(&self, reservation_id: ReservationId) -> AppResult<()>;
    async fn reject(&self, reservation_id: ReservationId) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // the caller's own reservations, newest first
    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    // every reservation, optionally narrowed to one status
    async fn find_all(&self, status: Option<ReservationStatus>) -> AppResult<Vec<Reservation>>;
    // the pending queue ordered by start time
    async fn find_pending_all(&self) -> AppResult<Vec<Reservation>>;
    async fn count_by_status(&self, status: ReservationStatus) -> AppResult<i64>;
    // per-status counts for reservations created in [from, until)
    async fn status_breakdown(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<StatusCount>>;
    async fn most_booked_rooms(&self, limit: i64) -> AppResult<Vec<RoomUsage>>;
}
