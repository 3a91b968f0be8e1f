pub mod refcode;
pub mod wire;

pub use refcode::reference_code;
pub use wire::ErrorBody;
