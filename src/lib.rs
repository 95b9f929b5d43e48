//! Identity-stable form trees over a stateless request/response host.
//!
//! The host rebuilds its form definition from scratch on every request.
//! This crate recognizes "the same" logical element across rebuilds,
//! carries non-renderable state between requests inside an opaque
//! encrypted stash token, and reconciles submitted values back onto the
//! rebuilt tree.
//!
//! Per request, a [`form::form::Form`] runs one synchronous cycle:
//! decode the prior stash, build the element tree (reusing ids the
//! client echoed back), repopulate submitted values, re-dispatch any
//! pending triggering event, and seal a fresh stash token into the
//! emitted output.

pub mod error;
pub mod form;
pub mod stash;
pub mod trace;
pub mod tree;
pub mod values;

pub use error::{CipherError, FormError};
pub use form::form::Form;
pub use form::hooks::AlterHooks;
pub use form::request::{RequestState, TriggeringEvent, STASH_KEY};
pub use stash::cipher::{StashCipher, TaggedCipher};
pub use stash::stash_model::FormStorage;
pub use tree::builder::IdGenerator;
pub use tree::element_model::{Element, ElementRef};
pub use tree::registry::ElementRegistry;
