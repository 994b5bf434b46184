pub mod countdown;
pub mod goodbye;
pub mod instructions;
pub mod intake;
pub mod models;
pub mod ui;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items for convenience
pub use countdown::{CountdownSettings, show_realtime_countdown, show_static_countdown};
pub use goodbye::show_goodbye;
pub use instructions::{InstructionOptions, show_instructions};
pub use intake::get_subject_info;
pub use models::{Form, Gender, Key, Race, SubjectRecord, TextStyle};
pub use ui::TuiSession;
pub use window::{Clock, DialogService, InputSource, MonotonicClock, Surface};
