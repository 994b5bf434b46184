use tracing::{info, warn};

use crate::error::{FlowError, InvalidInput, Result};
use crate::screenflow::models::{Form, Gender, Race, SubjectRecord};
use crate::screenflow::window::DialogService;

const SUBJECT_ID_ERROR: [&str; 2] = [
    "Subject ID should be a 3-digit integer between 101 and 199.",
    "For example: 101 or 106",
];
const AGE_ERROR: [&str; 1] = ["Age must be a 2-digit integer (≥ 18)."];
const CONFIRMATION: [&str; 1] = ["Subject information successfully registered!"];

/// The intake form as first shown to the operator.
pub fn subject_form() -> Form {
    let genders: Vec<&str> = Gender::ALL.iter().map(Gender::label).collect();
    let races: Vec<&str> = Race::ALL.iter().map(Race::label).collect();

    Form::new("Subject data")
        .note("For subject ID, change the last two digits only!")
        .entry("Subject ID (three digit):", "100")
        .entry("Age:", "1")
        .choice("Gender:", &genders)
        .choice("Race:", &races)
}

/// Parses a submitted value as a decimal integer and checks its digit count.
fn parse_digits(raw: &str, digits: usize) -> Option<i64> {
    let value: i64 = raw.trim().parse().ok()?;
    (value.to_string().len() == digits).then_some(value)
}

/// Accepts exactly the three-digit integers 101 through 199.
pub fn parse_subject_id(raw: &str) -> std::result::Result<u16, InvalidInput> {
    match parse_digits(raw, 3) {
        Some(id @ 101..=199) => Ok(id as u16),
        _ => Err(InvalidInput::SubjectId),
    }
}

/// Accepts two-digit integers of at least 18.
pub fn parse_age(raw: &str) -> std::result::Result<u8, InvalidInput> {
    match parse_digits(raw, 2) {
        Some(age @ 18..=99) => Ok(age as u8),
        _ => Err(InvalidInput::Age),
    }
}

fn error_lines(invalid: InvalidInput) -> &'static [&'static str] {
    match invalid {
        InvalidInput::SubjectId => &SUBJECT_ID_ERROR,
        InvalidInput::Age => &AGE_ERROR,
    }
}

/// Collects subject ID, age, gender and race through a modal form.
///
/// The form is shown again, pre-filled with the last submission, until both
/// ID and age validate. Each rejection opens an error dialog naming the broken
/// constraint. A success confirmation is shown once before returning.
///
/// Dismissing the form returns [`FlowError::IntakeCancelled`].
pub fn get_subject_info<D: DialogService>(dialogs: &mut D) -> Result<SubjectRecord> {
    let mut form = subject_form();

    let (subject_id, age, values) = loop {
        let values = match dialogs.show_form(&form)? {
            Some(values) => values,
            None => {
                warn!("Subject intake dismissed by operator");
                return Err(FlowError::IntakeCancelled);
            }
        };
        form.apply(&values)?;

        let checked = parse_subject_id(&values[0])
            .and_then(|id| parse_age(&values[1]).map(|age| (id, age)));
        match checked {
            Ok((id, age)) => break (id, age, values),
            Err(invalid) => {
                warn!(id = %values[0], age = %values[1], "Rejected subject data: {}", invalid);
                dialogs.show_message(error_lines(invalid))?;
            }
        }
    };

    let gender: Gender = values[2].parse()?;
    let race: Race = values[3].parse()?;

    dialogs.show_message(&CONFIRMATION)?;

    let record = SubjectRecord::new(subject_id, age, gender, race);
    info!(
        subject = record.subject_id(),
        age = record.age(),
        gender = %gender,
        race = %race,
        "Subject information registered"
    );
    Ok(record)
}
