//! mapp-gateway
//!
//! A small HTTP gateway for storing and retrieving named `.mapp` binary
//! artifacts against an S3-compatible bucket or a local directory.
//! The main server binary is in main.rs; this library target exists so
//! integration tests can build the router.

pub mod config;
pub mod error;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod storage;
