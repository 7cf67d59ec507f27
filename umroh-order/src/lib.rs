pub mod models;
pub mod booking;
pub mod payment;
pub mod wishlist;

pub use models::{Booking, BookingStatus, NewBooking, NewPayment, Payment, PaymentMethod, PaymentStatus, WishlistEntry};
pub use booking::BookingService;
pub use payment::PaymentService;
pub use wishlist::WishlistService;
