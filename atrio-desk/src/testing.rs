//! In-memory doubles for controller tests: a HashMap-backed bookings
//! gateway and a toast recorder.

use crate::notify::{Notifier, Toast, ToastLevel};
use async_trait::async_trait;
use atrio_core::{GatewayError, GatewayResult, ListParams, ResourceGateway};
use atrio_lifecycle::{Booking, BookingStatus, CreateBooking, PaymentStatus, UpdateBooking};
use chrono::{Duration, TimeZone, Utc};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub(crate) fn booking_on(name: &str, day: u32, status: BookingStatus) -> Booking {
    let check_in = Utc.with_ymd_and_hms(2025, 3, day, 14, 0, 0).unwrap();
    Booking {
        id: Uuid::new_v4(),
        reference_code: format!("BK-{:06}", day),
        guest_name: name.to_string(),
        guest_email: "guest@example.com".to_string(),
        room_number: "101".to_string(),
        check_in,
        check_out: check_in + Duration::days(2),
        adults: 2,
        children: 0,
        status,
        payment_status: PaymentStatus::Unpaid,
        total_amount: 240.0,
        special_requests: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[derive(Default)]
pub(crate) struct FakeBookings {
    rows: Mutex<Vec<Booking>>,
    sequence: AtomicU64,
    fail_list: AtomicBool,
    create_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    set_status_calls: AtomicUsize,
    reject_create: Mutex<Option<GatewayError>>,
    reject_status: Mutex<Option<GatewayError>>,
}

impl FakeBookings {
    pub fn insert(&self, booking: Booking) {
        self.rows.lock().unwrap().push(booking);
    }

    pub fn fail_lists(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn reject_create_with(&self, err: GatewayError) {
        *self.reject_create.lock().unwrap() = Some(err);
    }

    pub fn reject_status_with(&self, err: GatewayError) {
        *self.reject_status.lock().unwrap() = Some(err);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn set_status_calls(&self) -> usize {
        self.set_status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceGateway<Booking, CreateBooking, UpdateBooking> for FakeBookings {
    async fn list(&self, _params: &ListParams) -> GatewayResult<Vec<Booking>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(GatewayError::Status {
                code: 500,
                message: "internal server error".to_string(),
            });
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> GatewayResult<Booking> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn create(&self, payload: &CreateBooking) -> GatewayResult<Booking> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.reject_create.lock().unwrap().clone() {
            return Err(err);
        }
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let booking = Booking {
            id: Uuid::new_v4(),
            reference_code: format!("BK-{:06}", seq),
            guest_name: payload.guest_name.clone(),
            guest_email: payload.guest_email.clone(),
            room_number: payload.room_number.clone(),
            check_in: payload.check_in,
            check_out: payload.check_out,
            adults: payload.adults,
            children: payload.children,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            total_amount: payload.total_amount,
            special_requests: payload.special_requests.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn update(&self, id: Uuid, payload: &UpdateBooking) -> GatewayResult<Booking> {
        let mut rows = self.rows.lock().unwrap();
        let booking = rows
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(GatewayError::NotFound)?;
        booking.apply_update(payload);
        Ok(booking.clone())
    }

    async fn remove(&self, id: Uuid) -> GatewayResult<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| b.id != id);
        if rows.len() == before {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: &str) -> GatewayResult<Booking> {
        self.set_status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.reject_status.lock().unwrap().clone() {
            return Err(err);
        }
        let parsed = BookingStatus::from_str(status).map_err(|e| GatewayError::Status {
            code: 400,
            message: e.to_string(),
        })?;
        let mut rows = self.rows.lock().unwrap();
        let booking = rows
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(GatewayError::NotFound)?;
        booking.update_status(parsed);
        Ok(booking.clone())
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn has_error(&self) -> bool {
        self.toasts
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.level == ToastLevel::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.toasts
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.level == ToastLevel::Success)
            .map(|t| t.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}
