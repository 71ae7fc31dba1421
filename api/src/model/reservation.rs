use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{Reservation, ReservationRoom, ReservationStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(length(min = 1, max = 500))]
    pub purpose: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(length(min = 1, max = 500))]
    pub purpose: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub status: Option<ReservationStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReservationResponse {
    pub reservation_id: ReservationId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub user_name: String,
    pub email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub room: ReservationRoomResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            user_name,
            email,
            slot,
            purpose,
            status,
            created_at,
            room,
        } = value;
        Self {
            reservation_id,
            reserved_by,
            user_name,
            email,
            start_time: slot.start(),
            end_time: slot.end(),
            purpose,
            status,
            created_at,
            room: room.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRoomResponse {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub equipment: String,
    pub is_available: bool,
}

impl From<ReservationRoom> for ReservationRoomResponse {
    fn from(value: ReservationRoom) -> Self {
        let ReservationRoom {
            room_id,
            name,
            capacity,
            equipment,
            is_available,
        } = value;
        Self {
            room_id,
            name,
            capacity,
            equipment,
            is_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_is_required_and_bounded() {
        let req: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "startTime": "2026-09-01T10:00:00Z",
            "endTime": "2026-09-01T11:00:00Z",
            "purpose": ""
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());

        let req: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "startTime": "2026-09-01T10:00:00Z",
            "endTime": "2026-09-01T11:00:00Z",
            "purpose": "x".repeat(501)
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());

        let req: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "startTime": "2026-09-01T10:00:00Z",
            "endTime": "2026-09-01T11:00:00Z",
            "purpose": "weekly sync"
        }))
        .unwrap();
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn status_filter_deserializes_from_query_form() {
        let query: ReservationListQuery =
            serde_json::from_value(serde_json::json!({"status": "pending"})).unwrap();
        assert_eq!(query.status, Some(ReservationStatus::Pending));

        let query: ReservationListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.status, None);
    }
}
