use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use umroh_catalog::CatalogService;
use umroh_core::repository::{find_many_as, find_one_as, insert_as};
use umroh_core::{Collection, CoreError, CoreResult, DocumentStore, Filter, User, LIST_LIMIT};
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, NewBooking, PaymentStatus};

/// Creates and reads bookings. Every read is scoped to the requesting user.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn DocumentStore>,
    catalog: CatalogService,
}

impl BookingService {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: CatalogService) -> Self {
        Self { store, catalog }
    }

    pub async fn create_booking(&self, user: &User, request: NewBooking) -> CoreResult<Booking> {
        request.validate()?;
        let package = self.catalog.get_package(request.package_id).await?;

        let total_price = package
            .price
            .checked_mul(i64::from(request.num_passengers))
            .ok_or_else(|| CoreError::ValidationError("total price out of range".to_string()))?;

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: user.id.clone(),
            package_id: package.id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            num_passengers: request.num_passengers,
            total_price,
            payment_status: PaymentStatus::Pending,
            booking_status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        insert_as(&*self.store, Collection::Bookings, &booking).await?;
        info!(
            "Booking created: {} for package {} by {} (contact {:?})",
            booking.id, booking.package_id, user.id, booking.customer_email
        );
        Ok(booking)
    }

    pub async fn list_user_bookings(&self, user: &User) -> CoreResult<Vec<Booking>> {
        let filter = Filter::new().eq("user_id", user.id.as_str());
        Ok(find_many_as(&*self.store, Collection::Bookings, &filter, LIST_LIMIT).await?)
    }

    /// Foreign and missing bookings are indistinguishable to the caller.
    pub async fn get_booking(&self, user: &User, id: Uuid) -> CoreResult<Booking> {
        let filter = Filter::new().eq("id", id.to_string()).eq("user_id", user.id.as_str());
        find_one_as(&*self.store, Collection::Bookings, &filter)
            .await?
            .ok_or_else(|| CoreError::NotFound("Booking not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use umroh_catalog::{seed, NewPackage};
    use umroh_shared::Masked;
    use umroh_store::MemoryStore;

    fn user(email: &str) -> User {
        User {
            id: email.to_string(),
            email: email.to_string(),
            name: "Jamaah".to_string(),
            picture: None,
            created_at: Utc::now(),
        }
    }

    fn request(package_id: Uuid, num_passengers: i32) -> NewBooking {
        NewBooking {
            package_id,
            customer_name: "Ahmad Fauzi".to_string(),
            customer_email: Masked::from("ahmad@example.com"),
            customer_phone: Masked::from("081234567890"),
            num_passengers,
        }
    }

    async fn setup() -> (Arc<MemoryStore>, BookingService, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(store.clone());
        let dieng: NewPackage = seed::demo_packages().remove(3);
        let package = catalog.create_package(dieng).await.unwrap();
        (store.clone(), BookingService::new(store, catalog), package.id)
    }

    #[tokio::test]
    async fn test_total_price_is_a_snapshot() {
        let (store, bookings, package_id) = setup().await;
        let alice = user("alice@example.com");

        let booking = bookings.create_booking(&alice, request(package_id, 2)).await.unwrap();
        assert_eq!(booking.total_price, 3_000_000);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.booking_status, BookingStatus::Confirmed);

        let mut changes = Map::new();
        changes.insert("price".to_string(), 9_999_999.into());
        let filter = Filter::new().eq("id", package_id.to_string());
        store.update_one(Collection::Packages, &filter, changes).await.unwrap();

        let fetched = bookings.get_booking(&alice, booking.id).await.unwrap();
        assert_eq!(fetched.total_price, 3_000_000);
    }

    #[tokio::test]
    async fn test_unknown_package_is_not_found() {
        let (_, bookings, _) = setup().await;
        let result = bookings.create_booking(&user("a@example.com"), request(Uuid::new_v4(), 1)).await;
        assert!(matches!(result, Err(CoreError::NotFound(msg)) if msg == "Package not found"));
    }

    #[tokio::test]
    async fn test_bookings_are_scoped_to_owner() {
        let (_, bookings, package_id) = setup().await;
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");

        let alices = bookings.create_booking(&alice, request(package_id, 1)).await.unwrap();
        bookings.create_booking(&bob, request(package_id, 3)).await.unwrap();
        bookings.create_booking(&bob, request(package_id, 4)).await.unwrap();

        let listed = bookings.list_user_bookings(&alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|b| b.user_id == alice.id));
        assert_eq!(bookings.list_user_bookings(&bob).await.unwrap().len(), 2);

        let foreign = bookings.get_booking(&bob, alices.id).await;
        assert!(matches!(foreign, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_passenger_count_is_rejected() {
        let (_, bookings, package_id) = setup().await;
        let result = bookings.create_booking(&user("a@example.com"), request(package_id, 0)).await;
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }
}
