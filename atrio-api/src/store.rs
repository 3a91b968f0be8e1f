use atrio_catalog::{
    CreateInventoryItem, CreateMenuItem, CreateRoom, InventoryItem, MenuItem, MenuStatus, Room,
    RoomStatus, UpdateInventoryItem, UpdateMenuItem, UpdateRoom,
};
use atrio_lifecycle::{
    Booking, BookingStatus, CreateBooking, CreateEvent, Event, EventStatus, PaymentStatus,
    TransitionError, UpdateBooking, UpdateEvent,
};
use atrio_shared::reference_code;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory directory behind the REST surface; durable storage lives in
/// the external persistence service. Invariant checks that must hold
/// regardless of the client happen under the write lock, so two tabs
/// racing a transition cannot both win.
pub struct Directory {
    bookings: RwLock<HashMap<Uuid, Booking>>,
    events: RwLock<HashMap<Uuid, Event>>,
    rooms: RwLock<HashMap<Uuid, Room>>,
    inventory: RwLock<HashMap<Uuid, InventoryItem>>,
    menu: RwLock<HashMap<Uuid, MenuItem>>,
    booking_seq: AtomicU64,
    event_seq: AtomicU64,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(HashMap::new()),
            events: RwLock::new(HashMap::new()),
            rooms: RwLock::new(HashMap::new()),
            inventory: RwLock::new(HashMap::new()),
            menu: RwLock::new(HashMap::new()),
            booking_seq: AtomicU64::new(0),
            event_seq: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    pub async fn list_bookings(&self) -> Vec<Booking> {
        let mut rows: Vec<Booking> = self.bookings.read().await.values().cloned().collect();
        rows.sort_by_key(|b| b.check_in);
        rows
    }

    pub async fn get_booking(&self, id: Uuid) -> Option<Booking> {
        self.bookings.read().await.get(&id).cloned()
    }

    pub async fn create_booking(&self, payload: &CreateBooking) -> Booking {
        let now = Utc::now();
        let seq = self.booking_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let booking = Booking {
            id: Uuid::new_v4(),
            reference_code: reference_code("BK", seq),
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
            created_at: now,
            updated_at: now,
        };
        self.bookings
            .write()
            .await
            .insert(booking.id, booking.clone());
        booking
    }

    pub async fn update_booking(&self, id: Uuid, update: &UpdateBooking) -> Option<Booking> {
        let mut rows = self.bookings.write().await;
        let booking = rows.get_mut(&id)?;
        booking.apply_update(update);
        Some(booking.clone())
    }

    /// Validate and apply a lifecycle transition under one write lock.
    pub async fn transition_booking(
        &self,
        id: Uuid,
        to: BookingStatus,
    ) -> Option<Result<Booking, TransitionError>> {
        let mut rows = self.bookings.write().await;
        let booking = rows.get_mut(&id)?;
        Some(match booking.status.validate_transition(to) {
            Ok(()) => {
                booking.update_status(to);
                Ok(booking.clone())
            }
            Err(err) => Err(err),
        })
    }

    /// Delete only while the stay has not begun.
    pub async fn delete_booking(&self, id: Uuid) -> Option<Result<(), TransitionError>> {
        let mut rows = self.bookings.write().await;
        let booking = rows.get(&id)?;
        if !booking.status.can_delete() {
            return Some(Err(TransitionError::DeleteForbidden {
                status: booking.status.as_str(),
            }));
        }
        rows.remove(&id);
        Some(Ok(()))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub async fn list_events(&self) -> Vec<Event> {
        let mut rows: Vec<Event> = self.events.read().await.values().cloned().collect();
        rows.sort_by_key(|e| (e.date, e.start_time));
        rows
    }

    pub async fn get_event(&self, id: Uuid) -> Option<Event> {
        self.events.read().await.get(&id).cloned()
    }

    pub async fn create_event(&self, payload: &CreateEvent) -> Event {
        let now = Utc::now();
        let seq = self.event_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let event = Event {
            id: Uuid::new_v4(),
            reference_code: reference_code("EV", seq),
            client_name: payload.client_name.clone(),
            venue: payload.venue.clone(),
            date: payload.date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            guest_count: payload.guest_count,
            status: EventStatus::Pending,
            total_amount: payload.total_amount,
            notes: payload.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.events.write().await.insert(event.id, event.clone());
        event
    }

    pub async fn update_event(&self, id: Uuid, update: &UpdateEvent) -> Option<Event> {
        let mut rows = self.events.write().await;
        let event = rows.get_mut(&id)?;
        event.apply_update(update);
        Some(event.clone())
    }

    pub async fn transition_event(
        &self,
        id: Uuid,
        to: EventStatus,
    ) -> Option<Result<Event, TransitionError>> {
        let mut rows = self.events.write().await;
        let event = rows.get_mut(&id)?;
        Some(match event.status.validate_transition(to) {
            Ok(()) => {
                event.update_status(to);
                Ok(event.clone())
            }
            Err(err) => Err(err),
        })
    }

    pub async fn delete_event(&self, id: Uuid) -> Option<Result<(), TransitionError>> {
        let mut rows = self.events.write().await;
        let event = rows.get(&id)?;
        if !event.status.can_delete() {
            return Some(Err(TransitionError::DeleteForbidden {
                status: event.status.as_str(),
            }));
        }
        rows.remove(&id);
        Some(Ok(()))
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    pub async fn list_rooms(&self) -> Vec<Room> {
        let mut rows: Vec<Room> = self.rooms.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.number.cmp(&b.number));
        rows
    }

    pub async fn get_room(&self, id: Uuid) -> Option<Room> {
        self.rooms.read().await.get(&id).cloned()
    }

    pub async fn create_room(&self, payload: &CreateRoom) -> Room {
        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4(),
            number: payload.number.clone(),
            room_type: payload.room_type.clone(),
            capacity: payload.capacity,
            nightly_rate: payload.nightly_rate,
            status: RoomStatus::Available,
            created_at: now,
            updated_at: now,
        };
        self.rooms.write().await.insert(room.id, room.clone());
        room
    }

    pub async fn update_room(&self, id: Uuid, update: &UpdateRoom) -> Option<Room> {
        let mut rows = self.rooms.write().await;
        let room = rows.get_mut(&id)?;
        room.apply_update(update);
        Some(room.clone())
    }

    pub async fn set_room_status(&self, id: Uuid, status: RoomStatus) -> Option<Room> {
        let mut rows = self.rooms.write().await;
        let room = rows.get_mut(&id)?;
        room.update_status(status);
        Some(room.clone())
    }

    pub async fn delete_room(&self, id: Uuid) -> bool {
        self.rooms.write().await.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    pub async fn list_inventory(&self) -> Vec<InventoryItem> {
        let mut rows: Vec<InventoryItem> =
            self.inventory.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    pub async fn get_inventory_item(&self, id: Uuid) -> Option<InventoryItem> {
        self.inventory.read().await.get(&id).cloned()
    }

    pub async fn create_inventory_item(&self, payload: &CreateInventoryItem) -> InventoryItem {
        let now = Utc::now();
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: payload.name.clone(),
            category: payload.category.clone(),
            quantity: payload.quantity,
            min_stock_level: payload.min_stock_level,
            unit: payload.unit.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inventory.write().await.insert(item.id, item.clone());
        item
    }

    pub async fn update_inventory_item(
        &self,
        id: Uuid,
        update: &UpdateInventoryItem,
    ) -> Option<InventoryItem> {
        let mut rows = self.inventory.write().await;
        let item = rows.get_mut(&id)?;
        item.apply_update(update);
        Some(item.clone())
    }

    pub async fn delete_inventory_item(&self, id: Uuid) -> bool {
        self.inventory.write().await.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Menu
    // ------------------------------------------------------------------

    pub async fn list_menu(&self) -> Vec<MenuItem> {
        let mut rows: Vec<MenuItem> = self.menu.read().await.values().cloned().collect();
        rows.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        rows
    }

    pub async fn get_menu_item(&self, id: Uuid) -> Option<MenuItem> {
        self.menu.read().await.get(&id).cloned()
    }

    pub async fn create_menu_item(&self, payload: &CreateMenuItem) -> MenuItem {
        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4(),
            name: payload.name.clone(),
            category: payload.category.clone(),
            price: payload.price,
            status: MenuStatus::Available,
            description: payload.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.menu.write().await.insert(item.id, item.clone());
        item
    }

    pub async fn update_menu_item(&self, id: Uuid, update: &UpdateMenuItem) -> Option<MenuItem> {
        let mut rows = self.menu.write().await;
        let item = rows.get_mut(&id)?;
        item.apply_update(update);
        Some(item.clone())
    }

    pub async fn set_menu_status(&self, id: Uuid, status: MenuStatus) -> Option<MenuItem> {
        let mut rows = self.menu.write().await;
        let item = rows.get_mut(&id)?;
        item.update_status(status);
        Some(item.clone())
    }

    pub async fn delete_menu_item(&self, id: Uuid) -> bool {
        self.menu.write().await.remove(&id).is_some()
    }

    /// Starter rooms and dishes for a fresh install.
    pub async fn seed_demo(&self) {
        for (number, room_type, capacity, rate) in [
            ("101", "Standard Queen", 2, 120.0),
            ("102", "Standard Twin", 2, 120.0),
            ("201", "Deluxe King", 3, 180.0),
            ("301", "Terrace Suite", 4, 260.0),
        ] {
            self.create_room(&CreateRoom {
                number: number.to_string(),
                room_type: room_type.to_string(),
                capacity,
                nightly_rate: rate,
            })
            .await;
        }
        for (name, category, price) in [
            ("Seared Salmon", "Mains", 28.0),
            ("Ribeye Steak", "Mains", 42.0),
            ("Caesar Salad", "Starters", 14.0),
            ("Creme Brulee", "Desserts", 11.0),
        ] {
            self.create_menu_item(&CreateMenuItem {
                name: name.to_string(),
                category: category.to_string(),
                price,
                description: None,
            })
            .await;
        }
        tracing::info!("seeded demo rooms and menu");
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
