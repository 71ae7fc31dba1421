use crate::database::{map_query_error, map_transaction_error, model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let room_id = RoomId::new();
        sqlx::query(
            r#"
                INSERT INTO rooms
                (room_id, name, description, capacity, price_per_hour,
                 equipment, is_available)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(room_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.capacity)
        .bind(event.price_per_hour)
        .bind(&event.equipment)
        .bind(event.is_available)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(room_id)
    }

    async fn find_listed(&self) -> AppResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT
                    room_id,
                    name,
                    description,
                    capacity,
                    price_per_hour,
                    equipment,
                    is_available
                FROM rooms
                WHERE is_available = TRUE
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT
                    room_id,
                    name,
                    description,
                    capacity,
                    price_per_hour,
                    equipment,
                    is_available
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET name = $2,
                    description = $3,
                    capacity = $4,
                    price_per_hour = $5,
                    equipment = $6,
                    is_available = $7
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.capacity)
        .bind(event.price_per_hour)
        .bind(&event.equipment)
        .bind(event.is_available)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) was not found",
                event.room_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteRoom) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let reservation_count = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM reservations WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_query_error)?;

        // Rooms with reservation history are retired from the listing
        // instead of deleted, so the audit trail stays intact.
        let res = if reservation_count > 0 {
            sqlx::query(
                r#"
                    UPDATE rooms SET is_available = FALSE WHERE room_id = $1
                "#,
            )
            .bind(event.room_id)
            .execute(&mut *tx)
            .await
            .map_err(map_query_error)?
        } else {
            sqlx::query(
                r#"
                    DELETE FROM rooms WHERE room_id = $1
                "#,
            )
            .bind(event.room_id)
            .execute(&mut *tx)
            .await
            .map_err(map_query_error)?
        };

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) was not found",
                event.room_id
            )));
        }

        tx.commit().await.map_err(map_transaction_error)?;

        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms")
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn count_listed(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM rooms WHERE is_available = TRUE",
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}
