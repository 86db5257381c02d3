mod auth;
mod health;
mod incident;

pub use crate::api::auth::{get_user, list_users, login, register};
pub use crate::api::health::{health_check, index};
pub use crate::api::incident::{
    create_incident, delete_incident, get_incident, get_stats, list_incidents, list_priorities,
    list_statuses, update_incident,
};
