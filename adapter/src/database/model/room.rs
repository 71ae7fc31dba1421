use kernel::model::{id::RoomId, room::Room};

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_hour: f64,
    pub equipment: String,
    pub is_available: bool,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            name,
            description,
            capacity,
            price_per_hour,
            equipment,
            is_available,
        } = value;
        Room {
            room_id,
            name,
            description,
            capacity,
            price_per_hour,
            equipment,
            is_available,
        }
    }
}
