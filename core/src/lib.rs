//! miihouse-core: resident simulation, economy, and persistence for a
//! small household of Mii-like characters.
//!
//! The presentation layer talks to [`session::Session`] only. Everything
//! underneath is plain state plus functions that mutate it.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod event;
pub mod income_subsystem;
pub mod inventory;
pub mod resident;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod subsystem;
pub mod types;
pub mod vitals_subsystem;
