//! The parameter descriptor contract shared between the host and the UI layer.

use bitflags::bitflags;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod conversion;

/// Classification of a parameter write, used by the host's automation recording. A user gesture
/// produces exactly one [`Touch`][Self::Touch], zero or more [`Value`][Self::Value]s, and exactly
/// one [`Release`][Self::Release].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationEvent {
    /// The user grabbed the control and this is the gesture's first write.
    Touch,
    /// An intermediate write, either mid-gesture or programmatic.
    Value,
    /// The user let go of the control. Always sent, even when the final value matches the last
    /// written one, so the host can close the automation gesture.
    Release,
}

/// The unit a parameter's raw value is expressed in. Drives the display-string formatting in
/// [`crate::formatters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A plain number without further interpretation.
    Generic,
    /// An index into the parameter's value strings.
    Indexed,
    /// An on/off toggle stored as 0.0 or 1.0.
    Boolean,
    /// Rendered relative to the parameter's maximum value.
    Percent,
    Hertz,
    Milliseconds,
    Seconds,
    /// Tempo in beats per minute.
    Bpm,
    /// A MIDI note number, rendered as a pitch class plus octave.
    MidiNoteNumber,
}

bitflags! {
    /// Capability and display hints declared by a parameter descriptor. The `DISPLAY_*` flags
    /// select the display curve; see [`conversion::DisplayConversion::from_flags()`] for the
    /// precedence when several are set. Flags are fixed for the lifetime of a descriptor.
    pub struct ParamFlags: u32 {
        const READABLE = 1 << 0;
        const WRITABLE = 1 << 1;
        /// The parameter is continuous enough that the host should record fine-grained automation.
        const HIGH_RESOLUTION = 1 << 2;
        /// The parameter's values are named; see
        /// [`ParamDescriptor::value_strings()`].
        const VALUES_HAVE_STRINGS = 1 << 3;
        const DISPLAY_LOGARITHMIC = 1 << 4;
        const DISPLAY_EXPONENTIAL = 1 << 5;
        const DISPLAY_SQUARED = 1 << 6;
        const DISPLAY_SQUARE_ROOT = 1 << 7;
        const DISPLAY_CUBED = 1 << 8;
        const DISPLAY_CUBE_ROOT = 1 << 9;
    }
}

/// An opaque identifier attached to parameter writes so a change's source can be told apart from
/// external changes. The notification layer uses this to keep a binding's own writes from echoing
/// back to it as host updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OriginatorToken(u64);

impl OriginatorToken {
    /// Allocate a token that is unique within this process.
    pub fn unique() -> Self {
        static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single host parameter as seen by the UI layer. The host side implements this; bindings only
/// ever talk to the trait object.
///
/// The raw value is shared between the host and every binding observing the same address. Mutation
/// of that value is serialized by the host's own threading discipline; implementations should not
/// assume a binding has exclusive write access.
pub trait ParamDescriptor: Send + Sync {
    /// The stable numeric id the host keys change notifications by.
    fn address(&self) -> u64;

    /// The parameter's human readable display name.
    fn display_name(&self) -> &str;

    /// Lower bound of the raw value range, inclusive.
    fn min_value(&self) -> f32;

    /// Upper bound of the raw value range, inclusive. Must be strictly greater than
    /// [`min_value()`][Self::min_value()] for a binding to accept the descriptor.
    fn max_value(&self) -> f32;

    fn unit(&self) -> UnitKind;

    fn flags(&self) -> ParamFlags;

    /// Display names for the parameter's values, in raw value order. Only meaningful when
    /// [`ParamFlags::VALUES_HAVE_STRINGS`] is set.
    fn value_strings(&self) -> Option<&[String]> {
        None
    }

    /// The parameter's current raw value.
    fn value(&self) -> f32;

    /// Write a new raw value. `originator` identifies the writer so the host's notification layer
    /// can suppress the echo back to it; `event` is the automation gesture classification for this
    /// write.
    fn set_value(&self, raw: f32, originator: Option<OriginatorToken>, event: AutomationEvent);

    /// Reverse lookup of a value string. Unrecognized strings fall back to the first value rather
    /// than failing.
    fn value_from_string(&self, string: &str) -> f32 {
        match self.value_strings() {
            Some(strings) => strings.iter().position(|s| s == string).unwrap_or(0) as f32,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn originator_tokens_are_unique() {
        let a = OriginatorToken::unique();
        let b = OriginatorToken::unique();
        assert_ne!(a, b);
    }

    #[test]
    fn display_flags_are_distinct_from_capability_flags() {
        let flags = ParamFlags::READABLE | ParamFlags::WRITABLE | ParamFlags::DISPLAY_LOGARITHMIC;
        assert!(flags.contains(ParamFlags::DISPLAY_LOGARITHMIC));
        assert!(!flags.contains(ParamFlags::DISPLAY_EXPONENTIAL));
        assert!(!flags.contains(ParamFlags::VALUES_HAVE_STRINGS));
    }
}
