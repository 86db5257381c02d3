pub mod auth;
pub mod global_error;
pub mod incident;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserListResponse, UserLookupResponse, UserResponse};
pub use incident::{
    IncidentCreateRequest, IncidentListQuery, IncidentListResponse, IncidentResponse,
    IncidentUpdateRequest, PriorityResponse, StatsResponse, StatusResponse,
};
