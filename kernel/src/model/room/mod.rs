use crate::model::id::RoomId;

pub mod event;

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_hour: f64,
    pub equipment: String,
    pub is_available: bool,
}
