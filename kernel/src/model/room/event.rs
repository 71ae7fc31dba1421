use crate::model::id::RoomId;

pub struct CreateRoom {
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_hour: f64,
    pub equipment: String,
    pub is_available: bool,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_hour: f64,
    pub equipment: String,
    pub is_available: bool,
}

#[derive(Debug)]
pub struct DeleteRoom {
    pub room_id: RoomId,
}
