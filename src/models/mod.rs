pub mod organization;
pub mod proposal;
