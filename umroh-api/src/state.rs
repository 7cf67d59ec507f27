use std::sync::Arc;

use chrono::Duration;
use umroh_catalog::CatalogService;
use umroh_core::{DocumentStore, IdentityVerifier};
use umroh_order::{BookingService, PaymentService, WishlistService};

use crate::session::SessionManager;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub catalog: CatalogService,
    pub bookings: BookingService,
    pub payments: PaymentService,
    pub wishlist: WishlistService,
}

impl AppState {
    /// Wires every service onto one shared store handle.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        verifier: Arc<dyn IdentityVerifier>,
        session_ttl: Duration,
    ) -> Self {
        let catalog = CatalogService::new(store.clone());
        let bookings = BookingService::new(store.clone(), catalog.clone());
        let payments = PaymentService::new(store.clone(), bookings.clone());

        Self {
            sessions: SessionManager::new(store.clone(), verifier, session_ttl),
            wishlist: WishlistService::new(store),
            catalog,
            bookings,
            payments,
        }
    }
}
