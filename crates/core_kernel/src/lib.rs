//! Core Kernel - Foundational types and utilities for the invoice ledger
//!
//! This crate provides the fundamental building blocks used across all layers:
//! - Strongly-typed identifiers for domain entities
//! - Port infrastructure (error taxonomy, health checks) shared by adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{InvoiceId, LineItemId, PaymentId, UserId};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
