pub mod inventory;
pub mod menu;
pub mod room;

pub use inventory::{CreateInventoryItem, InventoryItem, StockLevel, UpdateInventoryItem};
pub use menu::{CreateMenuItem, MenuItem, MenuStatus, UpdateMenuItem};
pub use room::{CreateRoom, Room, RoomStatus, UpdateRoom};
