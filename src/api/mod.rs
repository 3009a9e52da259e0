// Backend API client — authentication and creator discovery endpoints.

pub mod auth;
pub mod client;
pub mod creators;

pub use client::BackendClient;
