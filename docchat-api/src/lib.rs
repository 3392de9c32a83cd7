//! docchat-api: document upload, text extraction and chat HTTP service.
pub mod config;
pub mod dtos;
pub mod extraction;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
