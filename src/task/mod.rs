//! Task lifecycle management for Taskboard.
//!
//! This module implements the task state machine and its field side
//! effects, the filter/sort/paginate query model, and the period-bounded
//! productivity report. The service layer composes these with a storage
//! collaborator to provide create, read, update, delete, list, and report
//! operations. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
