pub mod state;
pub mod widget;

pub use state::{Action, Direction, Phase, PickerState};
pub use widget::{ExternalRange, RangePicker};
