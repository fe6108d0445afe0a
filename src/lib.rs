// src/lib.rs
//! HTTP worker for a supportive-listener chat companion backed by Gemini.

pub mod config;
pub mod error;
pub mod message;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod services;
pub mod state;
