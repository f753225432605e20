//! The individual page behaviors.
//!
//! DESIGN
//! ======
//! Each module holds the pure rules for one behavior (theme flipping, age
//! buckets, ...) next to the `impl Page` block that applies them to the
//! document. Behaviors share nothing but the document and never call each
//! other.

pub mod alerts;
pub mod cards;
pub mod clipboard;
pub mod confirm;
pub mod notifications;
pub mod relative_time;
pub mod theme;
pub mod validation;
