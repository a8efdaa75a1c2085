//! # Geogate CLI
//!
//! Access administration commands used by the `geogate-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use geogate_cli::commands::sync_cities;
//!
//! let synced = sync_cities(&engine, 42, &[1, 2], Some(1)).await?;
//! ```

pub mod commands;
