//! Core types for petcare.
//!
//! This crate provides everything the `petcare` CLI needs apart from terminal I/O:
//! - `models` for pets, schedule items, comments and users as the server sends them
//! - `grid` and `date` for the month grid and date normalization
//! - `calendar` for the month-view controller
//! - `api` for the HTTP client, `session` and `config` for local state
//! - `event` and `local_store` for the shared event shape and the legacy event file

pub mod api;
pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod grid;
pub mod local_store;
pub mod models;
pub mod session;

pub use error::{PetcareError, PetcareResult};
