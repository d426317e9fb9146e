//! Payment session lifecycle
//!
//! Request construction, the remote session client, response
//! interpretation, and the reconciliation applied to an order as a
//! result.

pub mod gateway;
pub mod interpret;
pub mod providers;
pub mod reconcile;
pub mod request;
pub mod traits;
pub mod types;
