pub mod error;
pub mod gateway;
pub mod validate;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{ListParams, ResourceGateway};
pub use validate::collect_field_errors;
