pub mod booking;
pub mod event;
pub mod payment;
pub mod transition;

pub use booking::{Booking, BookingStatus, CreateBooking, UpdateBooking};
pub use event::{CreateEvent, Event, EventStatus, UpdateEvent};
pub use payment::PaymentStatus;
pub use transition::{StatusAction, TransitionError};
