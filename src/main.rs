use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use psyflow::config::CONFIG_ENV;
use psyflow::screenflow::{InstructionOptions, MonotonicClock, TuiSession};
use psyflow::{
    Config, FlowError, get_subject_info, show_goodbye, show_instructions,
    show_realtime_countdown, show_static_countdown,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEMO_INSTRUCTIONS: &str = "Welcome!\n\nIn this task you will see a series of screens.\nPress SPACE to continue.";

fn init_logging(config: &Config) -> std::io::Result<()> {
    // stdout belongs to the terminal UI, so logs go to a file
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Instructions for this run. The built-in text stands in for the default
/// image only when no config file was given; a configured image that is
/// missing stays missing so the session fails.
fn session_instructions(config: &Config, from_file: bool) -> InstructionOptions {
    let mut instructions = config.instructions.clone();
    if !from_file
        && instructions.use_image
        && instructions.intro_text.is_none()
        && !instructions.img_file.exists()
    {
        instructions.intro_text = Some(DEMO_INSTRUCTIONS.to_string());
    }
    instructions
}

/// Runs a whole session: instructions, intake, both countdowns, goodbye.
fn run(config: &Config, from_file: bool) -> Result<(), FlowError> {
    let interval = config.countdown_interval()?;
    let duration = config.countdown_duration()?;
    let instructions = session_instructions(config, from_file);

    let mut session = TuiSession::new(config.frame_interval())?;
    let clock = MonotonicClock;

    show_instructions(&mut session, &instructions, &config.instruction_style)?;

    let subject = get_subject_info(&mut session)?;
    info!(
        file_stem = %subject.file_stem(),
        "Session started for subject {}",
        subject.subject_id()
    );

    show_static_countdown(
        &mut session,
        &clock,
        config.countdown.start,
        interval,
        &config.countdown_style,
    )?;
    show_realtime_countdown(
        &mut session,
        &clock,
        duration,
        &config.countdown_style,
    )?;

    show_goodbye(&mut session, &config.outro_text, &config.instruction_style)
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("Error opening log file {}: {}", config.log_file.display(), e);
        return ExitCode::FAILURE;
    }

    let from_file = std::env::var_os(CONFIG_ENV).is_some();

    // The session is dropped, and the terminal restored, before we print
    match run(&config, from_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(FlowError::IntakeCancelled) => {
            info!("Operator cancelled subject intake");
            eprintln!("Subject intake cancelled.");
            ExitCode::FAILURE
        }
        Err(FlowError::Interrupted) => {
            info!("Session interrupted with Ctrl+C");
            eprintln!("Session interrupted.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Session aborted: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
