//! Small rendering helpers shared by the screens.

pub mod status_indicator;
pub mod time_fmt;
