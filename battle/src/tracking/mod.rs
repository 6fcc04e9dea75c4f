//! Battle state tracking from server messages

mod battle;
mod event;
mod updater;

pub use battle::{Battle, Outcome, Side, Snapshot};
pub use event::{Event, FieldEffect, HpReport, HpSource, SwitchIn, Volatile, WeatherSource};
pub use updater::event_from_message;
