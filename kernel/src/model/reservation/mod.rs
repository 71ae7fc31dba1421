use crate::model::id::{ReservationId, RoomId, UserId};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use strum::{Display, EnumString};

pub mod event;

/// Half-open time interval `[start, end)`. A slot ending exactly when
/// another begins does not overlap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::UnprocessableEntity(
                "end time must be after start time".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// For rows read back from the store. The `end > start` invariant was
    /// enforced when the row was written.
    pub fn new_unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Bookings are only accepted for the future.
    pub fn ensure_starts_after(&self, now: DateTime<Utc>) -> AppResult<()> {
        if self.start <= now {
            return Err(AppError::UnprocessableEntity(
                "start time must be in the future".into(),
            ));
        }
        Ok(())
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `[s1,e1)` and `[s2,e2)` overlap iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
    Display,
    EnumString,
)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl sqlx::postgres::PgHasArrayType for ReservationStatus {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_reservation_status")
    }
}

impl ReservationStatus {
    /// Statuses that block a new or edited booking for the same slot.
    /// Pending counts too: two pending requests may coexist only when
    /// their slots are disjoint, so they cannot race each other to
    /// approval over the same time range.
    pub const BLOCKS_BOOKING: [ReservationStatus; 2] =
        [ReservationStatus::Pending, ReservationStatus::Approved];

    /// Statuses that block an approval. Pending-vs-pending overlap is
    /// resolved by the approval step itself, one decision at a time.
    pub const BLOCKS_APPROVAL: [ReservationStatus; 1] = [ReservationStatus::Approved];

    pub fn is_editable(self) -> bool {
        !matches!(
            self,
            ReservationStatus::Approved | ReservationStatus::Rejected
        )
    }

    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Approved
        )
    }

    /// Approve and reject both act on the pending queue only.
    pub fn is_decidable(self) -> bool {
        matches!(self, ReservationStatus::Pending)
    }
}

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub user_name: String,
    pub email: String,
    pub slot: TimeSlot,
    pub purpose: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub room: ReservationRoom,
}

impl Reservation {
    pub fn ensure_owned_by(&self, user_id: UserId) -> AppResult<()> {
        if self.reserved_by != user_id {
            return Err(AppError::ForbiddenOperation);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ReservationRoom {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub equipment: String,
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, h, 0, 0).unwrap()
    }

    fn half(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, h, 30, 0).unwrap()
    }

    fn slot(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSlot {
        TimeSlot::new(start, end).unwrap()
    }

    #[test]
    fn slot_rejects_end_before_start() {
        assert!(TimeSlot::new(hour(11), hour(10)).is_err());
    }

    #[test]
    fn slot_rejects_zero_length() {
        assert!(TimeSlot::new(hour(10), hour(10)).is_err());
    }

    #[test]
    fn slot_rejects_start_in_the_past() {
        let s = slot(hour(10), hour(11));
        assert!(s.ensure_starts_after(hour(10)).is_err());
        assert!(s.ensure_starts_after(hour(12)).is_err());
        assert!(s.ensure_starts_after(hour(9)).is_ok());
    }

    #[rstest]
    // back-to-back slots share an endpoint, not time
    #[case(slot(hour(10), hour(11)), slot(hour(11), hour(12)), false)]
    #[case(slot(hour(11), hour(12)), slot(hour(10), hour(11)), false)]
    // fully disjoint
    #[case(slot(hour(8), hour(9)), slot(hour(12), hour(13)), false)]
    // partial overlap from either side
    #[case(slot(hour(10), hour(11)), slot(half(10), half(11)), true)]
    #[case(slot(half(10), half(11)), slot(hour(10), hour(11)), true)]
    // containment either way
    #[case(slot(hour(9), hour(13)), slot(hour(10), hour(11)), true)]
    #[case(slot(hour(10), hour(11)), slot(hour(9), hour(13)), true)]
    // identical slots
    #[case(slot(hour(10), hour(11)), slot(hour(10), hour(11)), true)]
    fn overlap_is_half_open(
        #[case] a: TimeSlot,
        #[case] b: TimeSlot,
        #[case] expected: bool,
    ) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    #[case(ReservationStatus::Pending, true)]
    #[case(ReservationStatus::Approved, false)]
    #[case(ReservationStatus::Rejected, false)]
    #[case(ReservationStatus::Cancelled, true)]
    fn editability_follows_status(#[case] status: ReservationStatus, #[case] editable: bool) {
        assert_eq!(status.is_editable(), editable);
    }

    #[rstest]
    #[case(ReservationStatus::Pending, true)]
    #[case(ReservationStatus::Approved, true)]
    #[case(ReservationStatus::Rejected, false)]
    #[case(ReservationStatus::Cancelled, false)]
    fn cancellability_follows_status(
        #[case] status: ReservationStatus,
        #[case] cancellable: bool,
    ) {
        assert_eq!(status.is_cancellable(), cancellable);
    }

    #[rstest]
    #[case(ReservationStatus::Pending, true)]
    #[case(ReservationStatus::Approved, false)]
    #[case(ReservationStatus::Rejected, false)]
    #[case(ReservationStatus::Cancelled, false)]
    fn only_pending_can_be_decided(#[case] status: ReservationStatus, #[case] decidable: bool) {
        assert_eq!(status.is_decidable(), decidable);
    }

    // The filters the repository applies when it checks a room's existing
    // rows, replayed over an in-memory set. Mirrors the pending/pending
    // overlap scenario: both requests coexist, the first approval wins,
    // the second is blocked.
    #[test]
    fn overlapping_pending_requests_coexist_until_one_is_approved() {
        let r1 = (ReservationStatus::Pending, slot(hour(10), hour(11)));
        let r2 = (ReservationStatus::Pending, slot(half(10), half(11)));

        let blocks_approval = |existing: &[(ReservationStatus, TimeSlot)], candidate: &TimeSlot| {
            existing.iter().any(|(status, s)| {
                ReservationStatus::BLOCKS_APPROVAL.contains(status) && s.overlaps(candidate)
            })
        };

        // both were admitted at creation; at approval time only approved
        // rows count, so R1 goes through
        assert!(!blocks_approval(&[r2], &r1.1));
        let r1 = (ReservationStatus::Approved, r1.1);

        // R2 now collides with the committed approval
        assert!(blocks_approval(&[r1], &r2.1));
    }

    #[test]
    fn booking_check_counts_pending_and_approved_only() {
        let candidate = slot(hour(10), hour(11));
        let existing = [
            (ReservationStatus::Cancelled, slot(hour(10), hour(11))),
            (ReservationStatus::Rejected, slot(hour(10), hour(11))),
        ];
        let blocked = existing.iter().any(|(status, s)| {
            ReservationStatus::BLOCKS_BOOKING.contains(status) && s.overlaps(&candidate)
        });
        assert!(!blocked);

        let existing = [(ReservationStatus::Pending, slot(half(10), half(11)))];
        let blocked = existing.iter().any(|(status, s)| {
            ReservationStatus::BLOCKS_BOOKING.contains(status) && s.overlaps(&candidate)
        });
        assert!(blocked);
    }
}
