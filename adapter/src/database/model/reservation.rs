use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{Reservation, ReservationRoom, ReservationStatus, TimeSlot},
    stats::{RoomUsage, StatusCount},
};
use sqlx::types::chrono::{DateTime, Utc};

/// One reservation joined with its room and the booking user, as listed
/// and inspected through the API.
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub room_name: String,
    pub capacity: i32,
    pub equipment: String,
    pub is_available: bool,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            reservation_id,
            room_id,
            user_id,
            user_name,
            email,
            start_time,
            end_time,
            purpose,
            status,
            created_at,
            room_name,
            capacity,
            equipment,
            is_available,
        } = value;
        Reservation {
            reservation_id,
            reserved_by: user_id,
            user_name,
            email,
            slot: TimeSlot::new_unchecked(start_time, end_time),
            purpose,
            status,
            created_at,
            room: ReservationRoom {
                room_id,
                name: room_name,
                capacity,
                equipment,
                is_available,
            },
        }
    }
}

/// The columns the transition guards need before a mutation is applied.
#[derive(sqlx::FromRow)]
pub struct ReservationStateRow {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub status: ReservationStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ReservationStateRow {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new_unchecked(self.start_time, self.end_time)
    }
}

/// A candidate row for the overlap check: id plus its time range.
#[derive(sqlx::FromRow)]
pub struct BookedSlotRow {
    pub reservation_id: ReservationId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl BookedSlotRow {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new_unchecked(self.start_time, self.end_time)
    }
}

#[derive(sqlx::FromRow)]
pub struct StatusCountRow {
    pub status: ReservationStatus,
    pub count: i64,
}

impl From<StatusCountRow> for StatusCount {
    fn from(value: StatusCountRow) -> Self {
        let StatusCountRow { status, count } = value;
        StatusCount { status, count }
    }
}

#[derive(sqlx::FromRow)]
pub struct RoomUsageRow {
    pub room_id: RoomId,
    pub name: String,
    pub approved_count: i64,
}

impl From<RoomUsageRow> for RoomUsage {
    fn from(value: RoomUsageRow) -> Self {
        let RoomUsageRow {
            room_id,
            name,
            approved_count,
        } = value;
        RoomUsage {
            room_id,
            name,
            approved_count,
        }
    }
}
