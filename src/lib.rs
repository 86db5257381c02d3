pub mod api;
pub mod db;
pub mod entity;
pub mod migration;
pub mod model;
pub mod repository;
pub mod seed;
pub mod telemetry;
