pub mod app_config;
pub mod calendar;
pub mod client;
pub mod resources;

pub use app_config::GatewayConfig;
pub use calendar::{flatten_groups, CalendarQuery};
pub use client::RestClient;
pub use resources::{
    bookings, events, inventory, menu, rooms, BookingsClient, EventsClient, InventoryClient,
    MenuClient, Resource, RoomsClient,
};
