pub mod config;
pub mod error;
pub mod screenflow;

// Re-export commonly used items for convenience
pub use config::Config;
pub use error::{FlowError, Result};
pub use screenflow::{
    get_subject_info, show_goodbye, show_instructions, show_realtime_countdown,
    show_static_countdown,
};
