//! Identity provider module
//!
//! This module provides the client side of the password verification call:
//! wire payloads, the provider trait, the HTTP implementation and the errors
//! the call can produce.

pub mod client;
pub mod errors;
pub mod wire;

pub use client::{HttpIdentityProvider, IdentityProvider, IdentityProviderConfig};
pub use errors::VerificationError;
pub use wire::{ProviderErrorBody, ProviderErrorDetail, VerificationRequest, VerificationResponse};
