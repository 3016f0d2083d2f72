pub mod csrf;
pub mod session;
pub mod validate;
