use crate::notify::{Notifier, Toast};
use atrio_calendar::nights_between;
use atrio_core::{collect_field_errors, GatewayError, ResourceGateway};
use atrio_lifecycle::{
    Booking, CreateBooking, CreateEvent, Event, PaymentStatus, UpdateBooking, UpdateEvent,
};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// Booking create/edit dialog. Holds the operator's draft and the
/// per-field error map; validation failures never leave the process,
/// and the row list is only touched after the gateway confirms.
pub struct BookingForm {
    pub mode: FormMode,
    pub draft: CreateBooking,
    pub payment_status: Option<PaymentStatus>,
    pub field_errors: HashMap<String, Vec<String>>,
}

impl BookingForm {
    pub fn create(draft: CreateBooking) -> Self {
        Self {
            mode: FormMode::Create,
            draft,
            payment_status: None,
            field_errors: HashMap::new(),
        }
    }

    /// Prefill the edit dialog from an existing row.
    pub fn edit(booking: &Booking) -> Self {
        Self {
            mode: FormMode::Edit(booking.id),
            draft: CreateBooking {
                guest_name: booking.guest_name.clone(),
                guest_email: booking.guest_email.clone(),
                room_number: booking.room_number.clone(),
                check_in: booking.check_in,
                check_out: booking.check_out,
                adults: booking.adults,
                children: booking.children,
                total_amount: booking.total_amount,
                special_requests: booking.special_requests.clone(),
            },
            payment_status: Some(booking.payment_status),
            field_errors: HashMap::new(),
        }
    }

    /// Stay length shown in the dialog footer; `None` while the drafted
    /// range is inverted.
    pub fn nights(&self) -> Option<i64> {
        nights_between(self.draft.check_in, self.draft.check_out).ok()
    }

    /// Field checks plus the date-order rule: check-out must fall
    /// strictly after check-in, surfaced on the `check_out` field.
    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();
        if let Err(errors) = self.draft.validate() {
            self.field_errors = collect_field_errors(&errors);
        }
        if self.draft.check_out <= self.draft.check_in {
            self.field_errors
                .entry("check_out".to_string())
                .or_default()
                .push("check-out must be after check-in".to_string());
        }
        self.field_errors.is_empty()
    }

    fn to_update(&self) -> UpdateBooking {
        UpdateBooking {
            guest_name: Some(self.draft.guest_name.clone()),
            guest_email: Some(self.draft.guest_email.clone()),
            room_number: Some(self.draft.room_number.clone()),
            check_in: Some(self.draft.check_in),
            check_out: Some(self.draft.check_out),
            adults: Some(self.draft.adults),
            children: Some(self.draft.children),
            payment_status: self.payment_status,
            total_amount: Some(self.draft.total_amount),
            special_requests: self.draft.special_requests.clone(),
        }
    }

    pub async fn submit<G>(&mut self, gateway: &G, notifier: &dyn Notifier) -> Option<Booking>
    where
        G: ResourceGateway<Booking, CreateBooking, UpdateBooking>,
    {
        if !self.validate() {
            return None;
        }
        let result = match self.mode {
            FormMode::Create => gateway.create(&self.draft).await,
            FormMode::Edit(id) => gateway.update(id, &self.to_update()).await,
        };
        match result {
            Ok(saved) => {
                let message = match self.mode {
                    FormMode::Create => "Booking created",
                    FormMode::Edit(_) => "Booking updated",
                };
                notifier.notify(Toast::success(message));
                Some(saved)
            }
            Err(GatewayError::Validation {
                message,
                field_errors,
            }) => {
                // Server-side field map lands inline, same as local checks
                for (field, messages) in field_errors {
                    self.field_errors.entry(field).or_default().extend(messages);
                }
                notifier.notify(Toast::error(message));
                None
            }
            Err(err) => {
                notifier.notify(Toast::error(err.to_string()));
                None
            }
        }
    }
}

/// Event create/edit dialog.
pub struct EventForm {
    pub mode: FormMode,
    pub draft: CreateEvent,
    pub field_errors: HashMap<String, Vec<String>>,
}

impl EventForm {
    pub fn create(draft: CreateEvent) -> Self {
        Self {
            mode: FormMode::Create,
            draft,
            field_errors: HashMap::new(),
        }
    }

    pub fn edit(event: &Event) -> Self {
        Self {
            mode: FormMode::Edit(event.id),
            draft: CreateEvent {
                client_name: event.client_name.clone(),
                venue: event.venue.clone(),
                date: event.date,
                start_time: event.start_time,
                end_time: event.end_time,
                guest_count: event.guest_count,
                total_amount: event.total_amount,
                notes: event.notes.clone(),
            },
            field_errors: HashMap::new(),
        }
    }

    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();
        if let Err(errors) = self.draft.validate() {
            self.field_errors = collect_field_errors(&errors);
        }
        if !self.draft.times_ordered() {
            self.field_errors
                .entry("end_time".to_string())
                .or_default()
                .push("end time must be after start time".to_string());
        }
        self.field_errors.is_empty()
    }

    fn to_update(&self) -> UpdateEvent {
        UpdateEvent {
            client_name: Some(self.draft.client_name.clone()),
            venue: Some(self.draft.venue.clone()),
            date: Some(self.draft.date),
            start_time: Some(self.draft.start_time),
            end_time: Some(self.draft.end_time),
            guest_count: Some(self.draft.guest_count),
            total_amount: Some(self.draft.total_amount),
            notes: self.draft.notes.clone(),
        }
    }

    pub async fn submit<G>(&mut self, gateway: &G, notifier: &dyn Notifier) -> Option<Event>
    where
        G: ResourceGateway<Event, CreateEvent, UpdateEvent>,
    {
        if !self.validate() {
            return None;
        }
        let result = match self.mode {
            FormMode::Create => gateway.create(&self.draft).await,
            FormMode::Edit(id) => gateway.update(id, &self.to_update()).await,
        };
        match result {
            Ok(saved) => {
                let message = match self.mode {
                    FormMode::Create => "Event created",
                    FormMode::Edit(_) => "Event updated",
                };
                notifier.notify(Toast::success(message));
                Some(saved)
            }
            Err(GatewayError::Validation {
                message,
                field_errors,
            }) => {
                for (field, messages) in field_errors {
                    self.field_errors.entry(field).or_default().extend(messages);
                }
                notifier.notify(Toast::error(message));
                None
            }
            Err(err) => {
                notifier.notify(Toast::error(err.to_string()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBookings, RecordingNotifier};
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn draft() -> CreateBooking {
        let check_in = Utc.with_ymd_and_hms(2025, 3, 20, 14, 0, 0).unwrap();
        CreateBooking {
            guest_name: "John Smith".to_string(),
            guest_email: "john.smith@example.com".to_string(),
            room_number: "101".to_string(),
            check_in,
            check_out: check_in + Duration::days(5),
            adults: 2,
            children: 1,
            total_amount: 1200.0,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_the_gateway() {
        let gateway = Arc::new(FakeBookings::default());
        let notifier = RecordingNotifier::default();
        let mut form = BookingForm::create(CreateBooking {
            guest_name: String::new(),
            ..draft()
        });

        assert!(form.submit(&gateway, &notifier).await.is_none());
        assert_eq!(gateway.create_calls(), 0);
        assert!(form.field_errors.contains_key("guest_name"));
    }

    #[test]
    fn test_nights_footer() {
        let form = BookingForm::create(draft());
        assert_eq!(form.nights(), Some(5));
        let base = draft();
        let inverted = BookingForm::create(CreateBooking {
            check_out: base.check_in - Duration::days(1),
            ..base
        });
        assert_eq!(inverted.nights(), None);
    }

    #[tokio::test]
    async fn test_inverted_dates_land_on_check_out_field() {
        let gateway = Arc::new(FakeBookings::default());
        let notifier = RecordingNotifier::default();
        let base = draft();
        let mut form = BookingForm::create(CreateBooking {
            check_out: base.check_in - Duration::days(1),
            ..base
        });

        assert!(form.submit(&gateway, &notifier).await.is_none());
        assert_eq!(gateway.create_calls(), 0);
        assert!(form.field_errors.contains_key("check_out"));
    }

    #[tokio::test]
    async fn test_successful_create_toasts_and_returns_row() {
        let gateway = Arc::new(FakeBookings::default());
        let notifier = RecordingNotifier::default();
        let mut form = BookingForm::create(draft());

        let saved = form.submit(&gateway, &notifier).await.unwrap();
        assert_eq!(saved.reference_code, "BK-000001");
        assert_eq!(saved.status.as_str(), "pending");
        assert_eq!(notifier.successes(), vec!["Booking created".to_string()]);
    }

    #[tokio::test]
    async fn test_server_field_errors_merge_inline() {
        let gateway = Arc::new(FakeBookings::default());
        let mut fields = HashMap::new();
        fields.insert(
            "room_number".to_string(),
            vec!["room does not exist".to_string()],
        );
        gateway.reject_create_with(atrio_core::GatewayError::Validation {
            message: "validation failed".to_string(),
            field_errors: fields,
        });
        let notifier = RecordingNotifier::default();
        let mut form = BookingForm::create(draft());

        assert!(form.submit(&gateway, &notifier).await.is_none());
        assert_eq!(
            form.field_errors["room_number"],
            vec!["room does not exist".to_string()]
        );
        assert!(notifier.has_error());
    }

    #[tokio::test]
    async fn test_edit_submits_full_update() {
        let gateway = Arc::new(FakeBookings::default());
        let notifier = RecordingNotifier::default();
        let mut form = BookingForm::create(draft());
        let saved = form.submit(&gateway, &notifier).await.unwrap();

        let mut edit = BookingForm::edit(&saved);
        edit.draft.guest_name = "John A. Smith".to_string();
        edit.payment_status = Some(PaymentStatus::Paid);
        let updated = edit.submit(&gateway, &notifier).await.unwrap();
        assert_eq!(updated.guest_name, "John A. Smith");
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.id, saved.id);
    }

    #[test]
    fn test_event_form_time_order() {
        use atrio_lifecycle::CreateEvent;
        use chrono::{NaiveDate, NaiveTime};

        let mut form = EventForm::create(CreateEvent {
            client_name: "Garcia Wedding".to_string(),
            venue: "Terrace Hall".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            guest_count: 120,
            total_amount: 8400.0,
            notes: None,
        });
        assert!(!form.validate());
        assert!(form.field_errors.contains_key("end_time"));
    }
}
