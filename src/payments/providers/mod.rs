//! Remote processor implementations
//!
//! Concrete implementations of the PaymentProcessor trait.

pub mod mobbex;

pub use mobbex::MobbexClient;
