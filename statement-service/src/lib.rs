pub mod config;
pub mod dtos;
pub mod events;
pub mod handlers;
pub mod models;
pub mod period;
pub mod services;
pub mod startup;
