pub mod auth_service;
pub mod paper_service;
