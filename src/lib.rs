//! Client-side behavior layer for the server-rendered license portal.
//!
//! Compiled to WebAssembly with the `hydrate` feature, this crate replaces the
//! portal's hand-written page script: theme switching, the notification
//! dropdown, alert auto-dismiss, card entrance animation, confirm-before-submit,
//! copy-to-clipboard toasts, required-field validation, and relative-time
//! labels. Without `hydrate` the same behaviors run natively against an
//! in-memory document, which is how they are tested.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Behavior table, delegated event dispatch, timer teardown |
//! | [`behaviors`] | One module per behavior |
//! | [`dom`] | [`dom::Dom`] abstraction and the in-memory document |
//! | [`host`] | Storage, dialogs, clipboard, timers, clock |
//! | [`config`] | Selectors, timings, and messages with portal defaults |
//! | [`error`] | Error types |
//! | `web` | Browser binding (`hydrate` only) |

pub mod behaviors;
pub mod config;
pub mod dom;
pub mod error;
pub mod host;
pub mod page;
#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
#[path = "fixture_test.rs"]
pub(crate) mod fixture;

pub use config::PageConfig;
pub use error::{ClipboardError, PageError};
pub use page::{BehaviorKind, ClickIntent, Page, SubmitOutcome};
