//! Domain layer for muxdesk, a terminal portal for telecom circuit records.
//!
//! This crate owns everything the UI renders but does not decide:
//!
//! - **Domain model** ([`model`]) — [`CircuitRecord`] with its ten
//!   user-entered fields plus the system-managed `last_updated` stamp,
//!   [`CircuitField`] identifying each field, and [`CircuitDraft`] holding
//!   raw form input prior to validation.
//!
//! - **Validation engine** ([`validate`]) — the single pure
//!   [`validate_field`](validate::validate_field) function both forms call,
//!   with per-form aggregation into [`FieldErrors`]. The dotted-address
//!   depth differs between registration and editing by original design;
//!   [`AddressCheck`] makes that choice explicit at each call site.
//!
//! - **[`Portal`]** — async facade over the in-memory [`RecordStore`]:
//!   login, lookup, register, update. All latency is simulated with fixed
//!   delays; there is no backend, persistence, or retry anywhere.
//!
//! - **Session gate** — a placeholder credential check against one
//!   configured pair. Not a security boundary.

pub mod error;
pub mod model;
pub mod portal;
pub mod store;
pub mod validate;

pub use error::CoreError;
pub use model::{CircuitDraft, CircuitField, CircuitRecord, GateCredentials, Role, Session};
pub use portal::Portal;
pub use store::{RecordStore, demo_records};
pub use validate::{AddressCheck, FieldErrors, validate_field, validate_fields};
