// src/lib.rs

//! Bambu filament material table generator library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
