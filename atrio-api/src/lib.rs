use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod bookings;
pub mod calendar;
pub mod error;
pub mod events;
pub mod inventory;
pub mod menu;
pub mod query;
pub mod rooms;
pub mod state;
pub mod store;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The back-office SPA is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(bookings::routes())
        .merge(events::routes())
        .merge(rooms::routes())
        .merge(inventory::routes())
        .merge(menu::routes())
        .merge(calendar::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
