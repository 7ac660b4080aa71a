//! Booking lifecycle engine
//!
//! Owns the rules for creating bookings, detecting time overlaps,
//! transitioning booking and equipment status, and keeping usage logs
//! consistent with those transitions. All state-changing operations on one
//! equipment run under that equipment's store lock, so concurrent approvals
//! or checkouts cannot both pass validation before either commits.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::CreateBooking,
        usage_log::CloseUsageLog,
        Booking, BookingDetails, BookingStatus, Condition, Equipment, EquipmentStatus, UsageLog,
        User, UserRole,
    },
    repository::Repository,
};

/// Half-open interval intersection: [s1, e1) and [s2, e2) overlap iff
/// s1 < e2 and s2 < e1. Touching endpoints do not overlap.
pub fn windows_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Derive equipment status from its open log and approved bookings.
///
/// Open log wins (IN_USE); manually held statuses (BROKEN, MAINTENANCE,
/// LIQUIDATED) stick; an APPROVED booking whose window covers `now` makes it
/// BOOKED; otherwise AVAILABLE. Every transition runs this, and the manual
/// override path uses it when clearing a held status, so the stored status
/// never contradicts the booking collection. Callers hold the equipment lock.
pub(crate) async fn reconcile_equipment_status(
    repository: &Repository,
    equipment_id: &str,
) -> AppResult<Equipment> {
    let equipment = repository.equipment.get_by_id(equipment_id).await?;
    let now = Utc::now();

    let derived = if repository
        .usage_logs
        .find_open(equipment_id)
        .await?
        .is_some()
    {
        EquipmentStatus::InUse
    } else if equipment.status.is_manual() {
        equipment.status
    } else {
        let blocking = repository
            .bookings
            .list_blocking_for_equipment(equipment_id)
            .await?;
        if blocking
            .iter()
            .any(|b| b.start_time <= now && now < b.end_time)
        {
            EquipmentStatus::Booked
        } else {
            EquipmentStatus::Available
        }
    };

    if derived == equipment.status {
        Ok(equipment)
    } else {
        repository.equipment.set_status(equipment_id, derived).await
    }
}

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Overlap validator: admit the candidate window only if no APPROVED or
    /// ACTIVE booking on the same equipment intersects it. PENDING bookings
    /// never block; competing requests are resolved at approval time.
    async fn ensure_window_free(
        &self,
        equipment_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude_booking: Option<&str>,
    ) -> AppResult<()> {
        let blocking = self
            .repository
            .bookings
            .list_blocking_for_equipment(equipment_id)
            .await?;

        for existing in &blocking {
            if Some(existing.id.as_str()) == exclude_booking {
                continue;
            }
            if windows_overlap(start_time, end_time, existing.start_time, existing.end_time) {
                return Err(AppError::OverlapConflict(format!(
                    "Equipment {} is no longer available for the requested window",
                    equipment_id
                )));
            }
        }
        Ok(())
    }

    /// Create a booking request (status PENDING).
    pub async fn request_booking(&self, request: CreateBooking) -> AppResult<Booking> {
        request.validate()?;

        if request.start_time >= request.end_time {
            return Err(AppError::Validation(
                "Booking start time must be before end time".to_string(),
            ));
        }

        let equipment = self
            .repository
            .equipment
            .get_by_id(&request.equipment_id)
            .await?;
        if equipment.status == EquipmentStatus::Liquidated {
            return Err(AppError::Validation(format!(
                "Equipment {} has been liquidated and cannot be booked",
                equipment.code
            )));
        }
        if equipment.is_restricted && !request.sop_confirmed {
            return Err(AppError::Validation(format!(
                "Equipment {} is restricted; SOP confirmation is required",
                equipment.code
            )));
        }

        match &request.user_id {
            Some(user_id) => {
                let user = self.repository.users.get_by_id(user_id).await?;
                if user.is_locked {
                    return Err(AppError::Forbidden(format!(
                        "User {} is locked and cannot create bookings",
                        user.id
                    )));
                }
            }
            None => {
                if request.guest_name.as_deref().map_or(true, |n| n.trim().is_empty()) {
                    return Err(AppError::Validation(
                        "Guest bookings require a guest name".to_string(),
                    ));
                }
            }
        }

        let _guard = self.repository.db.lock_equipment(&request.equipment_id).await;

        self.ensure_window_free(
            &request.equipment_id,
            request.start_time,
            request.end_time,
            None,
        )
        .await?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            equipment_id: request.equipment_id,
            user_id: request.user_id,
            guest_name: request.guest_name,
            user_code: request.user_code,
            email: request.email,
            phone: request.phone,
            start_time: request.start_time,
            end_time: request.end_time,
            purpose: request.purpose,
            status: BookingStatus::Pending,
            sop_confirmed: request.sop_confirmed,
            approver_name: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(booking_id = %booking.id, equipment_id = %booking.equipment_id, "Booking requested");
        self.repository.bookings.insert(booking).await
    }

    /// Approve a PENDING booking (STAFF/ADMIN). Re-runs the overlap check so
    /// the first approval of competing requests wins and later ones fail.
    pub async fn approve_booking(&self, actor: &User, booking_id: &str) -> AppResult<Booking> {
        if !actor.role.is_operator() {
            return Err(AppError::Forbidden(
                "Only staff or admins may approve bookings".to_string(),
            ));
        }

        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let _guard = self.repository.db.lock_equipment(&booking.equipment_id).await;
        // Re-read under the lock; a concurrent transition may have landed
        let mut booking = self.repository.bookings.get_by_id(booking_id).await?;

        if booking.status != BookingStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "Booking {} cannot be approved from status {}",
                booking.id, booking.status
            )));
        }

        let equipment = self
            .repository
            .equipment
            .get_by_id(&booking.equipment_id)
            .await?;
        if equipment.status == EquipmentStatus::Liquidated {
            return Err(AppError::Validation(format!(
                "Equipment {} has been liquidated",
                equipment.code
            )));
        }

        self.ensure_window_free(
            &booking.equipment_id,
            booking.start_time,
            booking.end_time,
            Some(&booking.id),
        )
        .await?;

        booking.status = BookingStatus::Approved;
        booking.approver_name = Some(actor.name.clone());
        booking.updated_at = Utc::now();
        let booking = self.repository.bookings.update(booking).await?;

        reconcile_equipment_status(&self.repository, &booking.equipment_id).await?;
        tracing::info!(booking_id = %booking.id, approver = %actor.name, "Booking approved");
        Ok(booking)
    }

    /// Reject a PENDING booking with a reason (STAFF/ADMIN).
    pub async fn reject_booking(
        &self,
        actor: &User,
        booking_id: &str,
        reason: &str,
    ) -> AppResult<Booking> {
        if !actor.role.is_operator() {
            return Err(AppError::Forbidden(
                "Only staff or admins may reject bookings".to_string(),
            ));
        }
        if reason.trim().is_empty() {
            return Err(AppError::Validation(
                "A rejection reason is required".to_string(),
            ));
        }

        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let _guard = self.repository.db.lock_equipment(&booking.equipment_id).await;
        let mut booking = self.repository.bookings.get_by_id(booking_id).await?;

        if booking.status != BookingStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "Booking {} cannot be rejected from status {}",
                booking.id, booking.status
            )));
        }

        booking.status = BookingStatus::Rejected;
        booking.rejection_reason = Some(reason.trim().to_string());
        booking.approver_name = Some(actor.name.clone());
        booking.updated_at = Utc::now();
        let booking = self.repository.bookings.update(booking).await?;

        tracing::info!(booking_id = %booking.id, "Booking rejected");
        Ok(booking)
    }

    /// Check out an APPROVED booking: opens a usage log with the pre-use
    /// condition and puts the equipment IN_USE. Allowed for STAFF/ADMIN, or
    /// for the booking's own user once the window has started.
    pub async fn checkout(
        &self,
        actor: &User,
        booking_id: &str,
        pre_condition: Condition,
        pre_images: Vec<String>,
    ) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let _guard = self.repository.db.lock_equipment(&booking.equipment_id).await;
        let mut booking = self.repository.bookings.get_by_id(booking_id).await?;

        let now = Utc::now();
        if !actor.role.is_operator() {
            if !booking.is_owned_by(&actor.id) {
                return Err(AppError::Forbidden(
                    "Only staff, admins or the booking's own user may check out".to_string(),
                ));
            }
            if now < booking.start_time {
                return Err(AppError::Forbidden(format!(
                    "Booking {} cannot be checked out before its start time",
                    booking.id
                )));
            }
        }

        if booking.status != BookingStatus::Approved {
            return Err(AppError::InvalidTransition(format!(
                "Booking {} cannot be checked out from status {}",
                booking.id, booking.status
            )));
        }

        // One open log per equipment: a late return from a previous window
        // blocks the next checkout until staff check it in.
        if self
            .repository
            .usage_logs
            .find_open(&booking.equipment_id)
            .await?
            .is_some()
        {
            return Err(AppError::InvalidTransition(format!(
                "Equipment {} is already checked out",
                booking.equipment_id
            )));
        }

        let log = UsageLog {
            id: Uuid::new_v4().to_string(),
            booking_id: Some(booking.id.clone()),
            equipment_id: booking.equipment_id.clone(),
            user_id: booking.user_id.clone(),
            guest_name: booking.guest_name.clone(),
            start_time: now,
            end_time: None,
            purpose: booking.purpose.clone(),
            pre_condition,
            post_condition: None,
            pre_images,
            post_images: Vec::new(),
            notes: None,
            is_completed: false,
        };
        self.repository.usage_logs.insert(log).await?;

        booking.status = BookingStatus::Active;
        booking.updated_at = now;
        let booking = self.repository.bookings.update(booking).await?;

        self.repository
            .equipment
            .set_status(&booking.equipment_id, EquipmentStatus::InUse)
            .await?;

        tracing::info!(booking_id = %booking.id, equipment_id = %booking.equipment_id, "Checked out");
        Ok(booking)
    }

    /// Check in an ACTIVE booking (STAFF/ADMIN): closes the equipment's open
    /// usage log, completes the booking, and restores the equipment status.
    /// A DAMAGED post-condition marks the equipment BROKEN and counts a
    /// violation against the borrower.
    pub async fn checkin(
        &self,
        actor: &User,
        booking_id: &str,
        post_condition: Condition,
        post_images: Vec<String>,
        notes: Option<String>,
    ) -> AppResult<Booking> {
        if !actor.role.is_operator() {
            return Err(AppError::Forbidden(
                "Only staff or admins may check equipment back in".to_string(),
            ));
        }

        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let _guard = self.repository.db.lock_equipment(&booking.equipment_id).await;
        let mut booking = self.repository.bookings.get_by_id(booking_id).await?;

        match booking.status {
            BookingStatus::Active => {}
            // No checkout ever happened, so there is nothing to close.
            BookingStatus::Approved => {
                return Err(AppError::NoOpenUsageLog(format!(
                    "Booking {} has not been checked out",
                    booking.id
                )));
            }
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "Booking {} cannot be checked in from status {}",
                    booking.id, other
                )));
            }
        }

        let open_log = self
            .repository
            .usage_logs
            .find_open(&booking.equipment_id)
            .await?
            .ok_or_else(|| {
                AppError::NoOpenUsageLog(format!(
                    "No open usage log for equipment {}",
                    booking.equipment_id
                ))
            })?;
        if open_log.booking_id.as_deref() != Some(booking_id) {
            return Err(AppError::NoOpenUsageLog(format!(
                "Open usage log for equipment {} belongs to another booking",
                booking.equipment_id
            )));
        }

        let now = Utc::now();
        self.repository
            .usage_logs
            .close(
                &open_log.id,
                CloseUsageLog {
                    end_time: now,
                    post_condition,
                    post_images,
                    notes,
                },
            )
            .await?;

        booking.status = BookingStatus::Completed;
        booking.updated_at = now;
        let booking = self.repository.bookings.update(booking).await?;

        if post_condition.is_damage() {
            self.repository
                .equipment
                .set_status(&booking.equipment_id, EquipmentStatus::Broken)
                .await?;
            if let Some(user_id) = &booking.user_id {
                let user = self.repository.users.increment_violations(user_id).await?;
                tracing::warn!(
                    booking_id = %booking.id,
                    user_id = %user.id,
                    violations = user.violation_count,
                    "Equipment returned damaged"
                );
            }
        } else {
            reconcile_equipment_status(&self.repository, &booking.equipment_id).await?;
        }

        tracing::info!(booking_id = %booking.id, "Checked in");
        Ok(booking)
    }

    /// Cancel a PENDING or APPROVED booking (its own user, or ADMIN).
    pub async fn cancel_booking(&self, actor: &User, booking_id: &str) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        let is_owner = booking.is_owned_by(&actor.id);
        if !is_owner && actor.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Only the booking's own user or an admin may cancel it".to_string(),
            ));
        }

        let _guard = self.repository.db.lock_equipment(&booking.equipment_id).await;
        let mut booking = self.repository.bookings.get_by_id(booking_id).await?;

        match booking.status {
            BookingStatus::Pending | BookingStatus::Approved => {}
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "Booking {} cannot be cancelled from status {}",
                    booking.id, other
                )));
            }
        }

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Utc::now();
        let booking = self.repository.bookings.update(booking).await?;

        reconcile_equipment_status(&self.repository, &booking.equipment_id).await?;
        tracing::info!(booking_id = %booking.id, "Booking cancelled");
        Ok(booking)
    }

    /// List bookings visible to the actor: staff and admins see everything,
    /// students only their own. Sorted by start time, most recent first.
    pub async fn list_for_actor(&self, actor: &User) -> AppResult<Vec<BookingDetails>> {
        let bookings = if actor.role.is_operator() {
            self.repository.bookings.list_all().await?
        } else {
            self.repository.bookings.list_for_user(&actor.id).await?
        };

        let mut details = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let (name, code) = match self
                .repository
                .equipment
                .get_by_id(&booking.equipment_id)
                .await
            {
                Ok(equipment) => (equipment.name, equipment.code),
                Err(_) => ("Unknown".to_string(), String::new()),
            };
            details.push(BookingDetails {
                booking,
                equipment_name: name,
                equipment_code: code,
            });
        }
        Ok(details)
    }

    /// Get one booking (its own user, or STAFF/ADMIN).
    pub async fn get(&self, actor: &User, booking_id: &str) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        if !actor.role.is_operator() && !booking.is_owned_by(&actor.id) {
            return Err(AppError::Forbidden(
                "Not allowed to view this booking".to_string(),
            ));
        }
        Ok(booking)
    }
}
