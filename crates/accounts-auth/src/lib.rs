//! # Accounts Auth
//!
//! Token handling and authorization policies for the accounts service.
//!
//! - [`tokens`]: [`TokenService`], which issues, validates and rotates JWTs
//! - [`claims`]: the claim set, [`Scope`] and [`Subject`]
//! - [`policy`]: [`Policy`], [`Target`] and the [`Identity`] trait users implement
//!
//! Nothing here touches storage or the environment. The HTTP crate resolves the
//! user behind a token and feeds it to [`Policy::evaluate`].

pub mod claims;
pub mod policy;
pub mod tokens;

pub use claims::{Claims, Scope, Subject};
pub use policy::{Identity, Policy, Target};
pub use tokens::TokenService;
