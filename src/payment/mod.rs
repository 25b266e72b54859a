//! Payment attempts and the per-event ledger.
//!
//! This module provides:
//! - Payment and charge models matching the gateway wire format
//! - An append-only ledger with one-active-attempt-per-registration
//! - Idempotent application of gateway webhook updates
//!
//! ## Example
//!
//! ```
//! use padel_events::payment::{Charge, Payment, PaymentLedger, PaymentStatus};
//! use uuid::Uuid;
//!
//! let user_id = Uuid::new_v4();
//! let charge = Charge {
//!     payment_id: "2d2f4f2a".to_string(),
//!     payment_link: "https://payments.test/checkout/2d2f4f2a".to_string(),
//! };
//!
//! let mut ledger = PaymentLedger::new();
//! ledger.record_attempt(Payment::from_charge(charge, user_id, Uuid::new_v4(), 1500_00));
//!
//! ledger.apply_update("2d2f4f2a", PaymentStatus::Succeeded);
//! assert!(ledger.is_paid(user_id));
//! ```

pub mod ledger;
pub mod models;

pub use ledger::{LedgerUpdate, PaymentLedger};
pub use models::{Charge, Payment, PaymentStatus};
