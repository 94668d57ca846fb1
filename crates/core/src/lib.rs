//! Kinmel Core - Shared domain types library.
//!
//! This crate provides the domain model shared by all Kinmel components:
//! - `storefront` - Public-facing shop (server-rendered)
//! - `admin` - Back-office JSON API
//! - `cli` - Migrations and management tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. The cart, the checkout step machine and the
//! pricing rules all live here so they can be unit tested without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, email, statuses, order numbers
//! - [`variant`] - The purchasable-variant sum type and pricing
//! - [`cart`] - The shopper's cart and subtotal computation
//! - [`checkout`] - The checkout wizard state machine
//! - [`order`] - Orders, order items and the cart-to-order snapshot
//! - [`upload`] - The shared image upload policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod order;
pub mod types;
pub mod upload;
pub mod variant;

pub use cart::{Cart, CartLine, ProductSnapshot};
pub use checkout::{CheckoutForm, CheckoutStep, ContactInfo, PaymentProof, StepError};
pub use order::{Order, OrderDraft, OrderItem, OrderItemDraft};
pub use types::*;
pub use upload::{UploadError, UploadPolicy};
pub use variant::{DenominationChoice, PlanChoice, Variant};
