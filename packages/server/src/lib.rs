// Laptop Store API - Core
//
// This crate provides the backend API for listing and registering laptop
// products stored in a document database.
// Domain logic lives in domains/, store infrastructure in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
