use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use umroh_core::{CoreError, CoreResult};
use umroh_shared::Masked;

/// Upper bound on passengers in a single booking.
pub const MAX_PASSENGERS: i32 = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    CreditCard,
    EWallet,
}

/// A reservation against a package. `total_price` is fixed when the booking is made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub package_id: Uuid,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub num_passengers: i32,
    pub total_price: i64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub package_id: Uuid,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub num_passengers: i32,
}

impl NewBooking {
    pub fn validate(&self) -> CoreResult<()> {
        if !(1..=MAX_PASSENGERS).contains(&self.num_passengers) {
            return Err(CoreError::ValidationError(format!(
                "num_passengers must be between 1 and {}",
                MAX_PASSENGERS
            )));
        }
        if self.customer_name.trim().is_empty() {
            return Err(CoreError::ValidationError("customer_name must not be empty".to_string()));
        }
        if !self.customer_email.inner().contains('@') {
            return Err(CoreError::ValidationError("customer_email is not a valid email".to_string()));
        }
        if self.customer_phone.inner().trim().is_empty() {
            return Err(CoreError::ValidationError("customer_phone must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Mock payment against a booking. `amount` is copied from the booking at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: String,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub booking_id: Uuid,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub user_id: String,
    pub package_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Human-readable transaction reference: `TRX-` and 12 uppercase hex digits.
pub fn transaction_reference() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("TRX-{}", &hex[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(num_passengers: i32) -> NewBooking {
        NewBooking {
            package_id: Uuid::new_v4(),
            customer_name: "Ahmad Fauzi".to_string(),
            customer_email: Masked::from("ahmad@example.com"),
            customer_phone: Masked::from("081234567890"),
            num_passengers,
        }
    }

    #[test]
    fn test_passenger_bounds() {
        assert!(request(1).validate().is_ok());
        assert!(request(MAX_PASSENGERS).validate().is_ok());
        assert!(request(0).validate().is_err());
        assert!(request(MAX_PASSENGERS + 1).validate().is_err());
    }

    #[test]
    fn test_contact_fields_required() {
        let mut req = request(2);
        req.customer_email = Masked::from("not-an-email");
        assert!(req.validate().is_err());

        let mut req = request(2);
        req.customer_phone = Masked::from("  ");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_transaction_reference_format() {
        let reference = transaction_reference();
        assert_eq!(reference.len(), 16);
        assert!(reference.starts_with("TRX-"));
        assert!(reference[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_ne!(reference, transaction_reference());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(PaymentMethod::EWallet).unwrap(), "e_wallet");
        assert_eq!(serde_json::to_value(PaymentStatus::Completed).unwrap(), "completed");
        assert_eq!(serde_json::to_value(BookingStatus::Confirmed).unwrap(), "confirmed");
    }
}
