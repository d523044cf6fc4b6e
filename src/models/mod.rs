pub mod booking;

pub use booking::{BookedService, BookingRequest, BookingResponse};
