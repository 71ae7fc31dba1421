use crate::database::{
    map_query_error, map_transaction_error,
    model::reservation::{
        BookedSlotRow, ReservationRow, ReservationStateRow, RoomUsageRow, StatusCountRow,
    },
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation, UpdateReservation},
        Reservation, ReservationStatus, TimeSlot,
    },
    stats::{RoomUsage, StatusCount},
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

const RESERVATION_COLUMNS: &str = r#"
    r.reservation_id,
    r.room_id,
    r.user_id,
    u.user_name,
    u.email,
    r.start_time,
    r.end_time,
    r.purpose,
    r.status,
    r.created_at,
    rm.name AS room_name,
    rm.capacity,
    rm.equipment,
    rm.is_available
"#;

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // The availability precheck and the insert must observe the same
        // snapshot, otherwise two concurrent requests can both pass the
        // check and double-book the room.
        self.set_transaction_serializable(&mut tx).await?;

        {
            let room = sqlx::query_as::<_, RoomListingRow>(
                r#"
                    SELECT room_id, is_available
                    FROM rooms
                    WHERE room_id = $1
                "#,
            )
            .bind(event.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_query_error)?;

            let room = match room {
                None => {
                    return Err(AppError::EntityNotFound(format!(
                        "room ({}) was not found",
                        event.room_id
                    )))
                }
                Some(r) => r,
            };

            if !room.is_available {
                return Err(AppError::UnprocessableEntity(format!(
                    "room ({}) is not open for booking",
                    event.room_id
                )));
            }

            self.ensure_slot_free(
                &mut tx,
                event.room_id,
                &event.slot,
                None,
                &ReservationStatus::BLOCKS_BOOKING,
            )
            .await?;
        }

        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, room_id, user_id, start_time, end_time,
                 purpose, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reservation_id)
        .bind(event.room_id)
        .bind(event.reserved_by)
        .bind(event.slot.start())
        .bind(event.slot.end())
        .bind(&event.purpose)
        .bind(ReservationStatus::Pending)
        .bind(event.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(map_transaction_error)?;

        Ok(reservation_id)
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let current = self
            .fetch_state(&mut tx, event.reservation_id)
            .await?;

        // Only the owner may edit, and never once an admin has decided.
        if current.user_id != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !current.status.is_editable() {
            return Err(AppError::UnprocessableEntity(
                "approved or rejected reservations cannot be edited".into(),
            ));
        }

        self.ensure_slot_free(
            &mut tx,
            current.room_id,
            &event.slot,
            Some(event.reservation_id),
            &ReservationStatus::BLOCKS_BOOKING,
        )
        .await?;

        // Any accepted edit invalidates a previous decision, so the row
        // goes back into the pending queue.
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET start_time = $2,
                    end_time = $3,
                    purpose = $4,
                    status = $5
                WHERE reservation_id = $1
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.slot.start())
        .bind(event.slot.end())
        .bind(&event.purpose)
        .bind(ReservationStatus::Pending)
        .execute(&mut *tx)
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(map_transaction_error)?;

        Ok(())
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let current = self
            .fetch_state(&mut tx, event.reservation_id)
            .await?;

        if current.user_id != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !current.status.is_cancellable() {
            return Err(AppError::UnprocessableEntity(format!(
                "a {} reservation cannot be cancelled",
                current.status
            )));
        }

        self.transition(&mut tx, event.reservation_id, ReservationStatus::Cancelled)
            .await?;

        tx.commit().await.map_err(map_transaction_error)?;

        Ok(())
    }

    async fn approve(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Approval is the transition that upholds the approved-set
        // non-overlap invariant, so the conflict re-check and the status
        // write must be one atomic unit per room.
        self.set_transaction_serializable(&mut tx).await?;

        let current = self.fetch_state(&mut tx, reservation_id).await?;

        if !current.status.is_decidable() {
            return Err(AppError::UnprocessableEntity(format!(
                "a {} reservation cannot be approved",
                current.status
            )));
        }

        self.ensure_slot_free(
            &mut tx,
            current.room_id,
            &current.slot(),
            Some(reservation_id),
            &ReservationStatus::BLOCKS_APPROVAL,
        )
        .await?;

        self.transition(&mut tx, reservation_id, ReservationStatus::Approved)
            .await?;

        tx.commit().await.map_err(map_transaction_error)?;

        Ok(())
    }

    async fn reject(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let current = self.fetch_state(&mut tx, reservation_id).await?;

        if !current.status.is_decidable() {
            return Err(AppError::UnprocessableEntity(format!(
                "a {} reservation cannot be rejected",
                current.status
            )));
        }

        self.transition(&mut tx, reservation_id, ReservationStatus::Rejected)
            .await?;

        tx.commit().await.map_err(map_transaction_error)?;

        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.reservation_id = $1
            "#
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Reservation::from))
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.user_id = $1
                ORDER BY r.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Reservation::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self, status: Option<ReservationStatus>) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE ($1::reservation_status IS NULL OR r.status = $1)
                ORDER BY r.created_at DESC
            "#
        ))
        .bind(status)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Reservation::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_pending_all(&self) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.status = $1
                ORDER BY r.start_time ASC
            "#
        ))
        .bind(ReservationStatus::Pending)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Reservation::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn count_by_status(&self, status: ReservationStatus) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM reservations WHERE status = $1
            "#,
        )
        .bind(status)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn status_breakdown(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<StatusCount>> {
        sqlx::query_as::<_, StatusCountRow>(
            r#"
                SELECT status, COUNT(*) AS count
                FROM reservations
                WHERE created_at >= $1 AND created_at < $2
                GROUP BY status
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(StatusCount::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn most_booked_rooms(&self, limit: i64) -> AppResult<Vec<RoomUsage>> {
        sqlx::query_as::<_, RoomUsageRow>(
            r#"
                SELECT rm.room_id, rm.name, COUNT(*) AS approved_count
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                WHERE r.status = $1
                GROUP BY rm.room_id, rm.name
                ORDER BY approved_count DESC, rm.name ASC
                LIMIT $2
            "#,
        )
        .bind(ReservationStatus::Approved)
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(RoomUsage::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}

/// Room columns consulted before accepting a booking.
#[derive(sqlx::FromRow)]
struct RoomListingRow {
    #[allow(dead_code)]
    room_id: RoomId,
    is_available: bool,
}

impl ReservationRepositoryImpl {
    // Raises the isolation level for the check-then-write sequences.
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(map_query_error)?;
        Ok(())
    }

    async fn fetch_state(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reservation_id: ReservationId,
    ) -> AppResult<ReservationStateRow> {
        let row = sqlx::query_as::<_, ReservationStateRow>(
            r#"
                SELECT reservation_id, room_id, user_id, status,
                       start_time, end_time
                FROM reservations
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_query_error)?;

        row.ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation ({reservation_id}) was not found"))
        })
    }

    /// The conflict check. Pulls the room's rows in the considered
    /// statuses (minus the reservation being edited or approved, which
    /// must not collide with itself) and applies the half-open overlap
    /// predicate.
    async fn ensure_slot_free(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
        slot: &TimeSlot,
        exclude: Option<ReservationId>,
        considered: &[ReservationStatus],
    ) -> AppResult<()> {
        let rows = sqlx::query_as::<_, BookedSlotRow>(
            r#"
                SELECT reservation_id, start_time, end_time
                FROM reservations
                WHERE room_id = $1
                  AND status = ANY($2)
                  AND ($3::uuid IS NULL OR reservation_id <> $3)
            "#,
        )
        .bind(room_id)
        .bind(considered.to_vec())
        .bind(exclude.map(ReservationId::raw))
        .fetch_all(&mut **tx)
        .await
        .map_err(map_query_error)?;

        if rows.iter().any(|row| row.slot().overlaps(slot)) {
            return Err(AppError::ReservationConflict(format!(
                "room ({room_id}) is already reserved in the requested time range"
            )));
        }

        Ok(())
    }

    async fn transition(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reservation_id: ReservationId,
        status: ReservationStatus,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET status = $2
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .bind(status)
        .execute(&mut **tx)
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been updated".into(),
            ));
        }

        Ok(())
    }
}
