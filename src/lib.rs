//! LemiPay Backend Library
//!
//! This library exports the core modules for the LemiPay backend server.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod profile_service;
pub mod routes;
