use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(length(max = 500))]
    pub description: String,
    #[garde(range(min = 1, max = 100))]
    pub capacity: i32,
    #[garde(range(min = 0.0))]
    pub price_per_hour: f64,
    #[garde(skip)]
    pub equipment: String,
    #[garde(skip)]
    pub is_available: bool,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            name,
            description,
            capacity,
            price_per_hour,
            equipment,
            is_available,
        } = value;
        CreateRoom {
            name,
            description,
            capacity,
            price_per_hour,
            equipment,
            is_available,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(length(max = 500))]
    pub description: String,
    #[garde(range(min = 1, max = 100))]
    pub capacity: i32,
    #[garde(range(min = 0.0))]
    pub price_per_hour: f64,
    #[garde(skip)]
    pub equipment: String,
    #[garde(skip)]
    pub is_available: bool,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                name,
                description,
                capacity,
                price_per_hour,
                equipment,
                is_available,
            },
        ) = value;
        UpdateRoom {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: RoomId,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_hour: f64,
    pub equipment: String,
    pub is_available: bool,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            name,
            description,
            capacity,
            price_per_hour,
            equipment,
            is_available,
        } = value;
        Self {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(capacity: i32, price: f64) -> CreateRoomRequest {
        CreateRoomRequest {
            name: "Main Conference Room".into(),
            description: "Large room with projector".into(),
            capacity,
            price_per_hour: price,
            equipment: "Projector, Whiteboard".into(),
            is_available: true,
        }
    }

    #[rstest]
    #[case(0, 50.0, false)]
    #[case(101, 50.0, false)]
    #[case(1, -1.0, false)]
    #[case(1, 0.0, true)]
    #[case(100, 50.0, true)]
    fn room_request_bounds(#[case] capacity: i32, #[case] price: f64, #[case] ok: bool) {
        assert_eq!(request(capacity, price).validate(&()).is_ok(), ok);
    }
}
