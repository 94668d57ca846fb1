//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `checkout` - Checkout wizard orchestration and order placement
//! - `proofs` - Payment proof screenshot storage

pub mod checkout;
pub mod proofs;

pub use checkout::{CheckoutService, OrderStore, PlaceOrderError, ProofStore, attach_proof};
pub use proofs::FsProofStore;
