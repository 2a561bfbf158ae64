//! Taskboard: task lifecycle management, querying, and reporting.
//!
//! This crate provides the core functionality for managing work items as
//! they move through a constrained lifecycle, for building filtered and
//! paginated list views over a task collection, and for aggregating
//! productivity reports over a creation-time window.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage backends)
//!
//! # Modules
//!
//! - [`task`]: Task records, lifecycle transitions, queries, and reports

pub mod task;
