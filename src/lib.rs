//! Parameter binding and display-space conversion for audio plugin UIs.
//!
//! The host owns a parameter's raw, engine-native value; knobs and rockers edit a
//! perceptually-scaled display value. A [`ParamBinding`][binding::ParamBinding] sits between the
//! two: it converts raw values to display values and back through a curve declared by the
//! parameter's flags, classifies user edits as automation gestures for the host, and arbitrates
//! between in-progress edits and host-driven automation so neither side fights the other.

#[macro_use]
pub mod debug;

/// Everything you'd need to bind a control to a parameter. Import this with
/// `use paramlink::prelude::*;`.
pub mod prelude;

// This module has also been re-exported in the prelude.
pub mod formatters;

pub mod binding;
pub mod group;
pub mod notify;
pub mod param;

// Re-exported for use in the `pl_*!()` macros.
pub use log;
