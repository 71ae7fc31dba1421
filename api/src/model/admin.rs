use kernel::model::{
    id::RoomId,
    reservation::ReservationStatus,
    stats::{RoomUsage, StatusCount},
};
use serde::Serialize;

use crate::model::reservation::ReservationResponse;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub pending_reservations: Vec<ReservationResponse>,
    pub approved_count: i64,
    pub total_rooms: i64,
    pub listed_rooms: i64,
    pub total_users: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// The month the breakdown covers, e.g. "2026-08".
    pub month: String,
    pub monthly_breakdown: Vec<StatusCountResponse>,
    pub popular_rooms: Vec<RoomUsageResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountResponse {
    pub status: ReservationStatus,
    pub count: i64,
}

impl From<StatusCount> for StatusCountResponse {
    fn from(value: StatusCount) -> Self {
        let StatusCount { status, count } = value;
        Self { status, count }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUsageResponse {
    pub room_id: RoomId,
    pub name: String,
    pub approved_count: i64,
}

impl From<RoomUsage> for RoomUsageResponse {
    fn from(value: RoomUsage) -> Self {
        let RoomUsage {
            room_id,
            name,
            approved_count,
        } = value;
        Self {
            room_id,
            name,
            approved_count,
        }
    }
}
