//! Bindings between host parameters and UI controls. This is where user edits and host automation
//! get arbitrated.

use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

use crate::formatters;
use crate::notify::{NotificationBus, Subscription};
use crate::param::conversion::DisplayConversion;
use crate::param::{AutomationEvent, OriginatorToken, ParamDescriptor, ParamFlags};

/// Where a binding currently is in the edit/host-update arbitration cycle. `Inactive` is both the
/// start and the rest state between interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditingState {
    /// No interaction in flight. Host updates are applied.
    Inactive,
    /// The user grabbed the control; the next write is the gesture's `Touch`.
    Began,
    /// The user is dragging; writes are `Value` events.
    Active,
    /// The user let go; the next write is the gesture's `Release`.
    Ended,
    /// A host-originated change is being applied to local state. Writes back to the descriptor
    /// are suppressed while in this state so a host push never loops back out as an edit.
    HostUpdate,
}

/// One selectable value of an enumerated parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerValue {
    pub string_value: String,
    /// The raw value the string maps back to.
    pub value: f32,
}

/// A labeled value used for scale tick marks on a control.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub title: String,
    /// The raw value of the marking.
    pub value: f32,
    /// The raw value mapped through the binding's display conversion. This is where the tick
    /// lands on the control's travel.
    pub display_value: f32,
}

/// Descriptor misconfigurations caught when creating a binding. Anything that slips past
/// construction surfaces as `NaN`/`inf` display values rather than a crash.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The raw range collapses or is not a real interval, so every conversion would divide by
    /// zero or propagate non-finite values.
    #[error("parameter {address} has a degenerate range ({min}..{max})")]
    DegenerateRange { address: u64, min: f32, max: f32 },
}

/// Binds one host parameter to a UI control.
///
/// The binding owns the control-facing display value and keeps it in sync with the descriptor's
/// raw value in both directions: user edits are converted to raw values and written to the host
/// with an automation gesture classification, and host changes queued on the [`NotificationBus`]
/// are converted to display values when [`poll_host_updates()`][Self::poll_host_updates()] runs.
/// An edit in progress always wins over a host push.
///
/// All methods must be called from the UI's single logical thread. Dropping the binding releases
/// its bus subscription.
pub struct ParamBinding {
    descriptor: Arc<dyn ParamDescriptor>,
    conversion: DisplayConversion,
    editing_state: EditingState,
    current_value: f32,
    title: String,
    token: OriginatorToken,
    subscription: Subscription,
    picker_values: Vec<PickerValue>,
    points_of_interest: Vec<PointOfInterest>,
    /// Explicit observer for display-value changes, notified on every change regardless of the
    /// change's source. The rendering layer hangs its redraw trigger off of this.
    value_changed: Option<Arc<dyn Fn(f32) + Send + Sync>>,
    /// Overrides the unit-based formatting in [`Self::formatted_value()`].
    value_to_string: Option<Arc<dyn Fn(f32) -> String + Send + Sync>>,
}

impl std::fmt::Debug for ParamBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamBinding")
            .field("current_value", &self.current_value)
            .field("title", &self.title)
            .field("token", &self.token)
            .field("picker_values", &self.picker_values)
            .field("points_of_interest", &self.points_of_interest)
            .finish_non_exhaustive()
    }
}

impl ParamBinding {
    /// Bind a descriptor, subscribing to its change notifications on `bus`. The descriptor's
    /// display curve and metadata are resolved once here and fixed for the binding's lifetime.
    ///
    /// Points of interest default to the range endpoints, plus zero when the range straddles it;
    /// use [`with_points_of_interest()`][Self::with_points_of_interest()] to override them. For
    /// parameters with value strings the pickers double as the points of interest and the
    /// override is ignored.
    pub fn new(
        descriptor: Arc<dyn ParamDescriptor>,
        bus: &NotificationBus,
    ) -> Result<Self, BindingError> {
        let min = descriptor.min_value();
        let max = descriptor.max_value();
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(BindingError::DegenerateRange {
                address: descriptor.address(),
                min,
                max,
            });
        }

        let conversion = DisplayConversion::from_flags(descriptor.flags(), min, max);
        let token = OriginatorToken::unique();
        let subscription = bus.subscribe(descriptor.address(), token);

        let mut binding = Self {
            conversion,
            editing_state: EditingState::Inactive,
            current_value: conversion.to_display(descriptor.value()),
            title: descriptor.display_name().to_owned(),
            token,
            subscription,
            picker_values: Vec::new(),
            points_of_interest: Vec::new(),
            value_changed: None,
            value_to_string: None,
            descriptor,
        };

        if binding
            .descriptor
            .flags()
            .contains(ParamFlags::VALUES_HAVE_STRINGS)
        {
            binding.picker_values = binding
                .descriptor
                .value_strings()
                .unwrap_or_default()
                .iter()
                .map(|string| PickerValue {
                    string_value: string.clone(),
                    value: binding.descriptor.value_from_string(string),
                })
                .collect();

            // Enumerated values are not curve-converted, so the tick position is the raw value
            binding.points_of_interest = binding
                .picker_values
                .iter()
                .map(|picker| PointOfInterest {
                    title: picker.string_value.clone(),
                    value: picker.value,
                    display_value: picker.value,
                })
                .collect();
        } else {
            let mut defaults = vec![min];
            if min < 0.0 && max > 0.0 {
                defaults.push(0.0);
            }
            defaults.push(max);

            binding.points_of_interest = defaults
                .into_iter()
                .map(|value| binding.map_point_of_interest(value))
                .collect();
        }

        Ok(binding)
    }

    /// Replace the scale markings with the given raw values, formatted and mapped through the
    /// display curve. Ignored for parameters with value strings.
    pub fn with_points_of_interest(mut self, values: &[f32]) -> Self {
        if self.picker_values.is_empty() {
            self.points_of_interest = values
                .iter()
                .map(|&value| self.map_point_of_interest(value))
                .collect();
        }
        self
    }

    /// Run a callback whenever the display value changes, from either a user edit or an applied
    /// host update. This should not do anything expensive as it may be called multiple times in
    /// rapid succession while a control is being dragged.
    pub fn with_callback(mut self, callback: Arc<dyn Fn(f32) + Send + Sync>) -> Self {
        self.value_changed = Some(callback);
        self
    }

    /// Use a custom conversion function from the raw value to a display string instead of the
    /// unit-based formatting.
    pub fn with_value_to_string(
        mut self,
        callback: Arc<dyn Fn(f32) -> String + Send + Sync>,
    ) -> Self {
        self.value_to_string = Some(callback);
        self
    }

    /// The current display value.
    pub fn current_value(&self) -> f32 {
        self.current_value
    }

    /// The parameter's display name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The bound parameter's address.
    pub fn address(&self) -> u64 {
        self.descriptor.address()
    }

    /// Lower bound of the display value range.
    pub fn display_min_value(&self) -> f32 {
        self.conversion.display_min_value()
    }

    /// Upper bound of the display value range.
    pub fn display_max_value(&self) -> f32 {
        self.conversion.display_max_value()
    }

    /// The display range's extent. Controls use this to turn a display value into a fraction of
    /// their travel.
    pub fn range(&self) -> f32 {
        self.display_max_value() - self.display_min_value()
    }

    pub fn picker_values(&self) -> &[PickerValue] {
        &self.picker_values
    }

    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.points_of_interest
    }

    /// Index of the picker entry matching the current value, for driving a segmented control.
    /// Falls back to the truncated display value for parameters without value strings and to the
    /// first entry when nothing matches.
    pub fn picker_index(&self) -> usize {
        if self.picker_values.is_empty() {
            self.current_value as usize
        } else {
            self.picker_values
                .iter()
                .position(|picker| picker.value == self.current_value)
                .unwrap_or(0)
        }
    }

    /// The current value formatted for display, through either the
    /// [`with_value_to_string()`][Self::with_value_to_string()] override or the parameter's unit
    /// rules.
    pub fn formatted_value(&self) -> String {
        self.format_raw_value(self.conversion.from_display(self.current_value))
    }

    /// Set the display value from the UI side.
    ///
    /// Unless a host update is being applied, the value is converted back to raw, classified as
    /// an automation event per the gesture state, and written to the descriptor with this
    /// binding's originator token. The change callback fires in every case.
    pub fn set_display_value(&mut self, value: f32) {
        if self.editing_state != EditingState::HostUpdate {
            let raw = self.conversion.from_display(value);
            let event = self.resolve_event_type();
            self.descriptor.set_value(raw, Some(self.token), event);
        }

        self.current_value = value;
        if let Some(callback) = &self.value_changed {
            callback(value);
        }
    }

    /// Report that the user grabbed (`began == true`) or released (`began == false`) the bound
    /// control.
    ///
    /// Releasing re-applies the current display value so the host always receives a final
    /// `Release`-classified write, even when the last drag tick already wrote the same value.
    /// Automation recording needs that event to close the gesture.
    pub fn on_interaction_changed(&mut self, began: bool) {
        if began {
            self.editing_state = EditingState::Began;
        } else {
            self.editing_state = EditingState::Ended;
            self.set_display_value(self.current_value);
        }
    }

    /// Apply host-originated changes queued since the last call. This is the marshaling boundary
    /// required by the threading contract: the bus enqueues from wherever automation runs, and
    /// only this method, on the UI thread, touches the display value.
    ///
    /// Changes that arrive while an edit gesture is in flight are dropped, not deferred; the
    /// user's edit wins.
    pub fn poll_host_updates(&mut self) {
        while let Some(change) = self.subscription.try_recv() {
            pl_debug_assert_eq!(change.address, self.descriptor.address());
            if self.editing_state != EditingState::Inactive {
                continue;
            }

            self.editing_state = EditingState::HostUpdate;
            let display_value = self.conversion.to_display(change.raw_value);
            self.set_display_value(display_value);
            self.editing_state = EditingState::Inactive;
        }
    }

    /// Classify the next descriptor write and advance the gesture state machine.
    fn resolve_event_type(&mut self) -> AutomationEvent {
        match self.editing_state {
            EditingState::Began => {
                self.editing_state = EditingState::Active;
                AutomationEvent::Touch
            }
            EditingState::Ended => {
                self.editing_state = EditingState::Inactive;
                AutomationEvent::Release
            }
            _ => AutomationEvent::Value,
        }
    }

    fn format_raw_value(&self, raw: f32) -> String {
        match &self.value_to_string {
            Some(callback) => callback(raw),
            None => {
                formatters::format_value(raw, self.descriptor.unit(), self.descriptor.max_value())
            }
        }
    }

    fn map_point_of_interest(&self, value: f32) -> PointOfInterest {
        PointOfInterest {
            title: self.format_raw_value(value),
            value,
            display_value: self.conversion.to_display(value),
        }
    }
}

impl Display for ParamBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted_value())
    }
}

// Bindings are identified by the parameter they are bound to, not by their contents, so UI code
// can use them as collection keys
impl PartialEq for ParamBinding {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.address() == other.descriptor.address()
    }
}

impl Eq for ParamBinding {}

impl Hash for ParamBinding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.address().hash(state);
    }
}
