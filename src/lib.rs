//! PayGate Outbound Gateway Integration Library
//!
//! Submits payment transactions to third-party payment-gateway backends
//! through a single [`PaymentGateway`] interface, selected from a closed
//! identifier set by [`gateways::select`]. The [`net`] module carries the
//! shared HTTP transport: synchronous GET/POST helpers that time the
//! network call, normalize encoding artifacts, and (for POST) convert
//! transport failures into a sentinel [`net::HttpResponse`] value instead
//! of an error.
//!
//! [`PaymentGateway`]: gateways::PaymentGateway

pub mod config;
pub mod core;
pub mod gateways;
pub mod net;

// Re-export commonly used types
pub use crate::core::{AppError, Currency, Result};
pub use config::Config;
pub use gateways::{select, select_by_name, AvailableGateway, PaymentGateway};
pub use net::{HttpResponse, STATUS_NO_EXCHANGE};
