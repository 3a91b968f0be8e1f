use crate::client::RestClient;
use async_trait::async_trait;
use atrio_catalog::{
    CreateInventoryItem, CreateMenuItem, CreateRoom, InventoryItem, MenuItem, Room,
    UpdateInventoryItem, UpdateMenuItem, UpdateRoom,
};
use atrio_core::{GatewayResult, ListParams, ResourceGateway};
use atrio_lifecycle::{Booking, CreateBooking, CreateEvent, Event, UpdateBooking, UpdateEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// One REST collection (`/api/{entity}`) bound to its entity types. Every
/// typed client below is just this struct with a fixed path segment, so
/// adding an entity that only needs generic CRUD (suppliers, employees,
/// admins, ...) is a one-liner.
pub struct Resource<T, C, U> {
    client: Arc<RestClient>,
    entity: &'static str,
    _marker: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> Resource<T, C, U> {
    pub fn new(client: Arc<RestClient>, entity: &'static str) -> Self {
        Self {
            client,
            entity,
            _marker: PhantomData,
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }
}

#[async_trait]
impl<T, C, U> ResourceGateway<T, C, U> for Resource<T, C, U>
where
    T: DeserializeOwned + Send + Sync,
    C: Serialize + Send + Sync,
    U: Serialize + Send + Sync,
{
    async fn list(&self, params: &ListParams) -> GatewayResult<Vec<T>> {
        self.client.list(self.entity, params).await
    }

    async fn get(&self, id: Uuid) -> GatewayResult<T> {
        self.client.get(self.entity, id).await
    }

    async fn create(&self, payload: &C) -> GatewayResult<T> {
        self.client.create(self.entity, payload).await
    }

    async fn update(&self, id: Uuid, payload: &U) -> GatewayResult<T> {
        self.client.update(self.entity, id, payload).await
    }

    async fn remove(&self, id: Uuid) -> GatewayResult<()> {
        self.client.remove(self.entity, id).await
    }

    async fn set_status(&self, id: Uuid, status: &str) -> GatewayResult<T> {
        self.client.set_status(self.entity, id, status).await
    }
}

pub type BookingsClient = Resource<Booking, CreateBooking, UpdateBooking>;
pub type EventsClient = Resource<Event, CreateEvent, UpdateEvent>;
pub type RoomsClient = Resource<Room, CreateRoom, UpdateRoom>;
pub type InventoryClient = Resource<InventoryItem, CreateInventoryItem, UpdateInventoryItem>;
pub type MenuClient = Resource<MenuItem, CreateMenuItem, UpdateMenuItem>;

pub fn bookings(client: Arc<RestClient>) -> BookingsClient {
    Resource::new(client, "bookings")
}

pub fn events(client: Arc<RestClient>) -> EventsClient {
    Resource::new(client, "events")
}

pub fn rooms(client: Arc<RestClient>) -> RoomsClient {
    Resource::new(client, "rooms")
}

pub fn inventory(client: Arc<RestClient>) -> InventoryClient {
    Resource::new(client, "inventory")
}

pub fn menu(client: Arc<RestClient>) -> MenuClient {
    Resource::new(client, "menu")
}
