use crate::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::TimeSlot,
};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new)]
pub struct CreateReservation {
    pub room_id: RoomId,
    pub reserved_by: UserId,
    pub slot: TimeSlot,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
}

#[derive(new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub requested_user: UserId,
    pub slot: TimeSlot,
    pub purpose: String,
}

#[derive(new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requested_user: UserId,
}
