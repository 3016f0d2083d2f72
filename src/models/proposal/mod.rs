pub mod ban_name;
pub mod types;

pub use types::*;
