use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, warn};
use umroh_core::repository::{find_one_as, insert_as, to_document};
use umroh_core::{Collection, CoreError, CoreResult, DocumentStore, Filter, User};
use uuid::Uuid;

use crate::booking::BookingService;
use crate::models::{transaction_reference, NewPayment, Payment, PaymentStatus};

/// Mock payment flow: no gateway, completion is an explicit call.
///
/// Completion writes the payment and then the booking as two separate documents.
/// If the second write fails the payment reads `completed` while the booking still
/// reads `pending`; completing the same payment again repairs the booking.
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn DocumentStore>,
    bookings: BookingService,
}

impl PaymentService {
    pub fn new(store: Arc<dyn DocumentStore>, bookings: BookingService) -> Self {
        Self { store, bookings }
    }

    /// Several payments may exist for one booking.
    pub async fn create_payment(&self, user: &User, request: NewPayment) -> CoreResult<Payment> {
        let booking = self.bookings.get_booking(user, request.booking_id).await?;

        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            user_id: user.id.clone(),
            amount: booking.total_price,
            payment_method: request.payment_method,
            payment_status: PaymentStatus::Pending,
            transaction_id: transaction_reference(),
            created_at: Utc::now(),
            completed_at: None,
        };

        insert_as(&*self.store, Collection::Payments, &payment).await?;
        info!("Payment {} created for booking {} ({})", payment.id, booking.id, payment.transaction_id);
        Ok(payment)
    }

    /// Marks the payment and its booking completed. A repeated call keeps the
    /// first `completed_at` and only re-applies the booking update.
    pub async fn complete_payment(&self, user: &User, id: Uuid) -> CoreResult<Payment> {
        let mut payment = self.get_payment(user, id).await?;

        if payment.payment_status != PaymentStatus::Completed {
            let now = Utc::now();
            let mut changes = Map::new();
            changes.insert("payment_status".to_string(), Value::from(PaymentStatus::Completed.as_str()));
            changes.insert("completed_at".to_string(), to_document(Collection::Payments, &now)?);
            self.store
                .update_one(Collection::Payments, &Filter::new().eq("id", id.to_string()), changes)
                .await?;

            payment.payment_status = PaymentStatus::Completed;
            payment.completed_at = Some(now);
        }

        let mut booking_changes = Map::new();
        booking_changes.insert("payment_status".to_string(), Value::from(PaymentStatus::Completed.as_str()));
        let matched = self
            .store
            .update_one(
                Collection::Bookings,
                &Filter::new().eq("id", payment.booking_id.to_string()),
                booking_changes,
            )
            .await?;
        if matched == 0 {
            warn!("Payment {} completed but booking {} no longer exists", payment.id, payment.booking_id);
        }

        info!("Payment completed: {} (booking {})", payment.id, payment.booking_id);
        Ok(payment)
    }

    pub async fn get_payment(&self, user: &User, id: Uuid) -> CoreResult<Payment> {
        let filter = Filter::new().eq("id", id.to_string()).eq("user_id", user.id.as_str());
        find_one_as(&*self.store, Collection::Payments, &filter)
            .await?
            .ok_or_else(|| CoreError::NotFound("Payment not found".to_string()))
    }
}
