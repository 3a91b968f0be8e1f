use crate::filter::FilterState;
use crate::notify::{Notifier, Toast};
use atrio_calendar::{aggregate, days_from, CalendarBucket, CalendarError, StatusFilter};
use chrono::NaiveDate;
use atrio_catalog::{
    CreateInventoryItem, CreateMenuItem, CreateRoom, InventoryItem, MenuItem, Room,
    UpdateInventoryItem, UpdateMenuItem, UpdateRoom,
};
use atrio_core::{GatewayResult, ResourceGateway};
use atrio_gateway::{BookingsClient, EventsClient, RestClient};
use atrio_lifecycle::{
    Booking, BookingStatus, CreateBooking, CreateEvent, Event, EventStatus, StatusAction,
    TransitionError, UpdateBooking, UpdateEvent,
};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// List page over one REST collection. Owns the fetched rows and the
/// page's filter state; the gateway owns nothing.
///
/// Fetches are stamped with a monotonically increasing token so a slow
/// response from a superseded filter state is discarded instead of
/// overwriting a fresher list. On a failed fetch the previous rows are
/// retained and the failure surfaces as a toast.
pub struct PageController<T, C, U, G> {
    gateway: G,
    notifier: Arc<dyn Notifier>,
    pub filter: FilterState,
    items: Vec<T>,
    fetch_seq: u64,
    _marker: PhantomData<fn() -> (C, U)>,
}

impl<T, C, U, G> PageController<T, C, U, G>
where
    G: ResourceGateway<T, C, U>,
{
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>, filter: FilterState) -> Self {
        Self {
            gateway,
            notifier,
            filter,
            items: Vec::new(),
            fetch_seq: 0,
            _marker: PhantomData,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub async fn refresh(&mut self) {
        let token = self.begin_fetch();
        let result = self.gateway.list(&self.filter.to_params()).await;
        self.finish_fetch(token, result);
    }

    pub async fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
        self.refresh().await;
    }

    pub async fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.refresh().await;
    }

    pub async fn set_month(&mut self, year: i32, month: u32) {
        self.filter.selected_month = (year, month);
        self.refresh().await;
    }

    /// Switch a row's stored status (rooms, menu). Bookings and events go
    /// through their lifecycle-checked wrappers instead.
    pub async fn set_item_status(&mut self, id: Uuid, status: &str) -> bool {
        match self.gateway.set_status(id, status).await {
            Ok(_) => {
                self.notifier.notify(Toast::success("Status updated"));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.notifier.notify(Toast::error(err.to_string()));
                false
            }
        }
    }

    /// Unguarded delete for catalog rows; the reservation pages wrap this
    /// with their lifecycle guard.
    pub async fn remove_item(&mut self, id: Uuid) -> bool {
        match self.gateway.remove(id).await {
            Ok(()) => {
                self.notifier.notify(Toast::success("Deleted"));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.notifier.notify(Toast::error(err.to_string()));
                false
            }
        }
    }

    fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    fn finish_fetch(&mut self, token: u64, result: GatewayResult<Vec<T>>) {
        if token != self.fetch_seq {
            tracing::debug!(token, current = self.fetch_seq, "discarding stale list response");
            return;
        }
        match result {
            Ok(items) => self.items = items,
            Err(err) => {
                // Previous rows stay on screen
                self.notifier.notify(Toast::error(err.to_string()));
            }
        }
    }
}

/// Status-banner subtext for a booking row, e.g. "in 3 days" or "today".
pub fn arrival_phrase(booking: &Booking, today: NaiveDate) -> String {
    days_from(booking.check_in.date_naive(), today)
}

pub type RoomsPage<G> = PageController<Room, CreateRoom, UpdateRoom, G>;
pub type InventoryPage<G> = PageController<InventoryItem, CreateInventoryItem, UpdateInventoryItem, G>;
pub type MenuPage<G> = PageController<MenuItem, CreateMenuItem, UpdateMenuItem, G>;

/// Bookings list with the month grid and the lifecycle action surface.
pub struct BookingsPage<G> {
    pub page: PageController<Booking, CreateBooking, UpdateBooking, G>,
}

impl<G> BookingsPage<G>
where
    G: ResourceGateway<Booking, CreateBooking, UpdateBooking>,
{
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>, filter: FilterState) -> Self {
        Self {
            page: PageController::new(gateway, notifier, filter),
        }
    }

    /// The action buttons rendered for a row: exactly the legal next
    /// transitions for its current status, empty for terminal rows.
    pub fn available_actions(&self, id: Uuid) -> &'static [StatusAction<BookingStatus>] {
        self.page
            .items
            .iter()
            .find(|booking| booking.id == id)
            .map(|booking| booking.status.actions())
            .unwrap_or(&[])
    }

    /// Run a lifecycle action. The transition is re-checked locally before
    /// the call (the service enforces it again); local state only changes
    /// after a successful response.
    pub async fn perform(&mut self, id: Uuid, action: StatusAction<BookingStatus>) -> bool {
        let current = match self.page.items.iter().find(|booking| booking.id == id) {
            Some(booking) => booking.status,
            None => {
                self.page
                    .notifier
                    .notify(Toast::error("booking is no longer loaded"));
                return false;
            }
        };
        if let Err(err) = current.validate_transition(action.to) {
            self.page.notifier.notify(Toast::error(err.to_string()));
            return false;
        }
        match self.page.gateway.set_status(id, action.to.as_str()).await {
            Ok(_) => {
                self.page
                    .notifier
                    .notify(Toast::success(format!("{} complete", action.label)));
                self.page.refresh().await;
                true
            }
            Err(err) => {
                self.page.notifier.notify(Toast::error(err.to_string()));
                false
            }
        }
    }

    /// Delete is only offered before arrival; past check-in the record is
    /// part of the stay history.
    pub async fn delete(&mut self, id: Uuid) -> bool {
        let status = match self.page.items.iter().find(|booking| booking.id == id) {
            Some(booking) => booking.status,
            None => {
                self.page
                    .notifier
                    .notify(Toast::error("booking is no longer loaded"));
                return false;
            }
        };
        if !status.can_delete() {
            let err = TransitionError::DeleteForbidden {
                status: status.as_str(),
            };
            self.page.notifier.notify(Toast::error(err.to_string()));
            return false;
        }
        self.page.remove_item(id).await
    }

    /// Month grid over the currently loaded rows, re-applying the page
    /// filter locally.
    pub fn calendar(&self) -> Result<Vec<CalendarBucket<'_, Booking>>, CalendarError> {
        let (year, month) = self.page.filter.selected_month;
        aggregate(
            self.page.items(),
            year,
            month,
            &self.page.filter.calendar_filter(),
        )
    }
}

impl BookingsPage<BookingsClient> {
    pub fn over_http(
        client: Arc<RestClient>,
        notifier: Arc<dyn Notifier>,
        filter: FilterState,
    ) -> Self {
        Self::new(atrio_gateway::bookings(client), notifier, filter)
    }
}

/// Events list, same surface as the bookings page over the event
/// lifecycle.
pub struct EventsPage<G> {
    pub page: PageController<Event, CreateEvent, UpdateEvent, G>,
}

impl<G> EventsPage<G>
where
    G: ResourceGateway<Event, CreateEvent, UpdateEvent>,
{
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>, filter: FilterState) -> Self {
        Self {
            page: PageController::new(gateway, notifier, filter),
        }
    }

    pub fn available_actions(&self, id: Uuid) -> &'static [StatusAction<EventStatus>] {
        self.page
            .items
            .iter()
            .find(|event| event.id == id)
            .map(|event| event.status.actions())
            .unwrap_or(&[])
    }

    pub async fn perform(&mut self, id: Uuid, action: StatusAction<EventStatus>) -> bool {
        let current = match self.page.items.iter().find(|event| event.id == id) {
            Some(event) => event.status,
            None => {
                self.page
                    .notifier
                    .notify(Toast::error("event is no longer loaded"));
                return false;
            }
        };
        if let Err(err) = current.validate_transition(action.to) {
            self.page.notifier.notify(Toast::error(err.to_string()));
            return false;
        }
        match self.page.gateway.set_status(id, action.to.as_str()).await {
            Ok(_) => {
                self.page
                    .notifier
                    .notify(Toast::success(format!("{} complete", action.label)));
                self.page.refresh().await;
                true
            }
            Err(err) => {
                self.page.notifier.notify(Toast::error(err.to_string()));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> bool {
        let status = match self.page.items.iter().find(|event| event.id == id) {
            Some(event) => event.status,
            None => {
                self.page
                    .notifier
                    .notify(Toast::error("event is no longer loaded"));
                return false;
            }
        };
        if !status.can_delete() {
            let err = TransitionError::DeleteForbidden {
                status: status.as_str(),
            };
            self.page.notifier.notify(Toast::error(err.to_string()));
            return false;
        }
        self.page.remove_item(id).await
    }

    pub fn calendar(&self) -> Result<Vec<CalendarBucket<'_, Event>>, CalendarError> {
        let (year, month) = self.page.filter.selected_month;
        aggregate(
            self.page.items(),
            year,
            month,
            &self.page.filter.calendar_filter(),
        )
    }
}

impl EventsPage<EventsClient> {
    pub fn over_http(
        client: Arc<RestClient>,
        notifier: Arc<dyn Notifier>,
        filter: FilterState,
    ) -> Self {
        Self::new(atrio_gateway::events(client), notifier, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{booking_on, FakeBookings, RecordingNotifier};
    use atrio_core::GatewayError;
    use chrono::NaiveDate;

    fn page_with(
        gateway: Arc<FakeBookings>,
        notifier: Arc<RecordingNotifier>,
    ) -> BookingsPage<Arc<FakeBookings>> {
        BookingsPage::new(gateway, notifier, FilterState::new(2025, 3))
    }

    #[tokio::test]
    async fn test_refresh_populates_rows() {
        let gateway = Arc::new(FakeBookings::default());
        gateway.insert(booking_on("John Smith", 20, BookingStatus::Pending));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway, notifier);

        page.page.refresh().await;
        assert_eq!(page.page.items().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_rows_and_toasts() {
        let gateway = Arc::new(FakeBookings::default());
        gateway.insert(booking_on("John Smith", 20, BookingStatus::Pending));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway.clone(), notifier.clone());

        page.page.refresh().await;
        assert_eq!(page.page.items().len(), 1);

        gateway.fail_lists();
        page.page.refresh().await;
        assert_eq!(page.page.items().len(), 1, "previous list retained");
        assert!(notifier.has_error());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let gateway = Arc::new(FakeBookings::default());
        let stale = booking_on("Stale Row", 10, BookingStatus::Pending);
        let fresh = booking_on("Fresh Row", 11, BookingStatus::Pending);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway, notifier);

        // Two overlapping fetches: the earlier response lands last
        let first = page.page.begin_fetch();
        let second = page.page.begin_fetch();
        page.page.finish_fetch(second, Ok(vec![fresh.clone()]));
        page.page.finish_fetch(first, Ok(vec![stale]));

        assert_eq!(page.page.items().len(), 1);
        assert_eq!(page.page.items()[0].guest_name, "Fresh Row");
    }

    #[tokio::test]
    async fn test_full_lifecycle_through_actions() {
        let gateway = Arc::new(FakeBookings::default());
        let booking = booking_on("John Smith", 20, BookingStatus::Pending);
        let id = booking.id;
        gateway.insert(booking);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway, notifier);
        page.page.refresh().await;

        for expected in ["confirmed", "checked_in", "checked_out"] {
            let actions = page.available_actions(id);
            let action = actions
                .iter()
                .find(|a| a.to.as_str() == expected)
                .copied()
                .unwrap();
            assert!(page.perform(id, action).await);
            assert_eq!(page.page.items()[0].status.as_str(), expected);
        }
        // Checked out: nothing left to offer
        assert!(page.available_actions(id).is_empty());
    }

    #[tokio::test]
    async fn test_illegal_action_never_reaches_the_gateway() {
        let gateway = Arc::new(FakeBookings::default());
        let booking = booking_on("John Smith", 20, BookingStatus::Pending);
        let id = booking.id;
        gateway.insert(booking);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway.clone(), notifier);
        page.page.refresh().await;

        let skip_ahead = StatusAction {
            to: BookingStatus::CheckedIn,
            label: "Check-In",
        };
        assert!(!page.perform(id, skip_ahead).await);
        assert_eq!(gateway.set_status_calls(), 0);
        assert_eq!(page.page.items()[0].status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_guard_blocks_checked_in_rows() {
        let gateway = Arc::new(FakeBookings::default());
        let booking = booking_on("John Smith", 20, BookingStatus::CheckedIn);
        let id = booking.id;
        gateway.insert(booking);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway.clone(), notifier.clone());
        page.page.refresh().await;

        assert!(!page.delete(id).await);
        assert_eq!(gateway.remove_calls(), 0);
        assert!(notifier.has_error());
    }

    #[tokio::test]
    async fn test_delete_pending_row() {
        let gateway = Arc::new(FakeBookings::default());
        let booking = booking_on("John Smith", 20, BookingStatus::Pending);
        let id = booking.id;
        gateway.insert(booking);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway.clone(), notifier);
        page.page.refresh().await;

        assert!(page.delete(id).await);
        assert_eq!(gateway.remove_calls(), 1);
        assert!(page.page.items().is_empty());
    }

    #[tokio::test]
    async fn test_calendar_buckets_follow_the_filter() {
        let gateway = Arc::new(FakeBookings::default());
        gateway.insert(booking_on("John Smith", 14, BookingStatus::Pending));
        gateway.insert(booking_on("Maria Garcia", 18, BookingStatus::Pending));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway, notifier);
        page.page.refresh().await;
        page.page.filter.search_query = "smith".to_string();

        let buckets = page.calendar().unwrap();
        assert_eq!(buckets.len(), 42);
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let total_for = |d: NaiveDate| buckets.iter().find(|b| b.date == d).unwrap().total;
        assert_eq!(total_for(day(14)), 1);
        assert_eq!(total_for(day(18)), 0);
    }

    #[test]
    fn test_arrival_phrase() {
        let booking = booking_on("John Smith", 23, BookingStatus::Confirmed);
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(arrival_phrase(&booking, today), "in 3 days");
        assert_eq!(
            arrival_phrase(&booking, booking.check_in.date_naive()),
            "today"
        );
    }

    #[tokio::test]
    async fn test_gateway_conflict_leaves_state_untouched() {
        let gateway = Arc::new(FakeBookings::default());
        let booking = booking_on("John Smith", 20, BookingStatus::Pending);
        let id = booking.id;
        gateway.insert(booking);
        gateway.reject_status_with(GatewayError::Status {
            code: 409,
            message: "invalid status transition".to_string(),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let mut page = page_with(gateway, notifier.clone());
        page.page.refresh().await;

        let confirm = StatusAction {
            to: BookingStatus::Confirmed,
            label: "Confirm Booking",
        };
        assert!(!page.perform(id, confirm).await);
        assert_eq!(page.page.items()[0].status, BookingStatus::Pending);
        assert!(notifier.has_error());
    }
}
