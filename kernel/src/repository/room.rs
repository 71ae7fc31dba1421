use async_trait::async_trait;

use crate::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId>;
    // rooms currently open for booking
    async fn find_listed(&self) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    async fn update(&self, event: UpdateRoom) -> AppResult<()>;
    // hard delete when the room has no reservations, unlist otherwise
    async fn delete(&self, event: DeleteRoom) -> AppResult<()>;
    async fn count(&self) -> AppResult<i64>;
    async fn count_listed(&self) -> AppResult<i64>;
}
