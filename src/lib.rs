//! Villarent - A holiday rental listing and travel article system
//!
//! This library provides the core functionality for the Villarent service.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
