//! Convenience functions for formatting parameter values in common unit formats.

use crate::param::UnitKind;

const NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Format a raw parameter value according to its unit. `max_value` is the parameter's raw upper
/// bound, needed for percent units which are rendered relative to it.
pub fn format_value(value: f32, unit: UnitKind, max_value: f32) -> String {
    match unit {
        UnitKind::Percent => format_percent(value, max_value),
        UnitKind::Hertz => format_frequency(value),
        UnitKind::Milliseconds => format_milliseconds(value),
        // A seconds value is just a milliseconds value with the decimal point moved, including the
        // switch-over threshold
        UnitKind::Seconds => format_milliseconds(value * 1000.0),
        UnitKind::Bpm => format!("{} BPM", max_two_decimals(value)),
        UnitKind::MidiNoteNumber => format_note(value),
        UnitKind::Generic | UnitKind::Indexed | UnitKind::Boolean => max_two_decimals(value),
    }
}

/// Format a value as a percentage of `max_value`, rounded to whole percent.
pub fn format_percent(value: f32, max_value: f32) -> String {
    format!("{:.0}%", value / max_value * 100.0)
}

/// Format a Hertz value, switching to `kHz` at 1000 Hz. Negative frequencies (FM offsets and the
/// like) keep their sign as a prefix on the formatted magnitude.
pub fn format_frequency(value: f32) -> String {
    let magnitude = value.abs();
    let formatted = if magnitude < 1000.0 {
        format!("{} Hz", max_two_decimals(magnitude))
    } else {
        format!("{} kHz", max_two_decimals(magnitude / 1000.0))
    };

    if value < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Format a millisecond value, switching to seconds with at most two decimals at 1000 ms. Below
/// the threshold milliseconds are rendered whole.
pub fn format_milliseconds(value: f32) -> String {
    if value >= 1000.0 {
        format!("{} s", max_two_decimals(value / 1000.0))
    } else {
        format!("{value:.0} ms")
    }
}

/// Turn a MIDI note number into a note name, e.g. 69 -> A4.
pub fn format_note(value: f32) -> String {
    let note = value as usize;
    let note_name = NOTES[note % 12];
    let octave = (note / 12) as i32 - 1;
    format!("{note_name}{octave}")
}

/// Format with at most two fraction digits, trimming trailing zeros so `1.50` renders as `1.5`
/// and `120.00` as `120`.
fn max_two_decimals(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
