// Re-export the macros
pub use crate::debug::*;

pub use crate::formatters;

pub use crate::binding::{BindingError, ParamBinding, PickerValue, PointOfInterest};
pub use crate::group::{GroupDisplayMode, GroupId, ParamGroup};
pub use crate::notify::{NotificationBus, ParamChange, Subscription};
pub use crate::param::conversion::DisplayConversion;
pub use crate::param::{AutomationEvent, OriginatorToken, ParamDescriptor, ParamFlags, UnitKind};
