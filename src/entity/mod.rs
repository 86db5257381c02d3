pub mod incident;
pub mod priority;
pub mod status;
pub mod user;
