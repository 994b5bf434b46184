use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::error::FlowError;

/// A key the operator can press to advance a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Key {
    Space,
    Return,
    Escape,
    Char(char),
}

impl FromStr for Key {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_lowercase().as_str() {
            "space" => Ok(Key::Space),
            "return" | "enter" => Ok(Key::Return),
            "escape" | "esc" => Ok(Key::Escape),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Key::Char(c)),
                    _ => Err(FlowError::Config(format!("unknown key name '{}'", s))),
                }
            }
        }
    }
}

impl TryFrom<String> for Key {
    type Error = FlowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => write!(f, "space"),
            Key::Return => write!(f, "return"),
            Key::Escape => write!(f, "escape"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// How a block of text is laid out on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Maximum line width, in terminal columns
    pub wrap_width: u16,
    /// Color name, e.g. "black", "yellow" or "#262626"
    pub color: String,
}

impl TextStyle {
    pub fn new(wrap_width: u16, color: &str) -> TextStyle {
        TextStyle {
            wrap_width,
            color: color.to_string(),
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::new(60, "reset")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Race {
    Caucasian,
    AfricanAmerican,
    Asian,
    Hispanic,
    NativeAmerican,
}

impl Race {
    pub const ALL: [Race; 5] = [
        Race::Caucasian,
        Race::AfricanAmerican,
        Race::Asian,
        Race::Hispanic,
        Race::NativeAmerican,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Race::Caucasian => "Caucasian",
            Race::AfricanAmerican => "African-American",
            Race::Asian => "Asian",
            Race::Hispanic => "Hispanic",
            Race::NativeAmerican => "Native-American",
        }
    }
}

impl FromStr for Gender {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| FlowError::MalformedSubmission(format!("unknown gender '{}'", s)))
    }
}

impl FromStr for Race {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Race::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| FlowError::MalformedSubmission(format!("unknown race '{}'", s)))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated demographic data for one subject.
///
/// ID and age are held in their decimal string form because file naming and
/// data logging downstream work with strings.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRecord {
    subject_id: String,
    age: String,
    gender: Gender,
    race: Race,
    registered_at: DateTime<Local>,
}

impl SubjectRecord {
    pub fn new(subject_id: u16, age: u8, gender: Gender, race: Race) -> SubjectRecord {
        SubjectRecord {
            subject_id: subject_id.to_string(),
            age: age.to_string(),
            gender,
            race,
            registered_at: Local::now(),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn registered_at(&self) -> DateTime<Local> {
        self.registered_at
    }

    /// `[id, age, gender, race]`, all as strings.
    pub fn into_fields(self) -> [String; 4] {
        [
            self.subject_id,
            self.age,
            self.gender.label().to_string(),
            self.race.label().to_string(),
        ]
    }

    /// Base name for the subject's data files, e.g. `sub102_20261017-142530`.
    pub fn file_stem(&self) -> String {
        format!(
            "sub{}_{}",
            self.subject_id,
            self.registered_at.format("%Y%m%d-%H%M%S")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text entry
    Entry,
    /// One value out of a fixed list
    Choice(Vec<String>),
}

/// One labelled field of a modal form. `value` is what the form shows next time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
}

/// A modal form handed to a `DialogService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub notes: Vec<String>,
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(title: &str) -> Form {
        Form {
            title: title.to_string(),
            notes: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn note(mut self, text: &str) -> Form {
        self.notes.push(text.to_string());
        self
    }

    pub fn entry(mut self, label: &str, initial: &str) -> Form {
        self.fields.push(Field {
            label: label.to_string(),
            kind: FieldKind::Entry,
            value: initial.to_string(),
        });
        self
    }

    /// Adds a choice field preselecting the first choice.
    pub fn choice(mut self, label: &str, choices: &[&str]) -> Form {
        let choices: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        self.fields.push(Field {
            label: label.to_string(),
            value: choices.first().cloned().unwrap_or_default(),
            kind: FieldKind::Choice(choices),
        });
        self
    }

    pub fn values(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value.clone()).collect()
    }

    /// Stores a submission so the next presentation is pre-filled with it.
    pub fn apply(&mut self, values: &[String]) -> Result<(), FlowError> {
        if values.len() != self.fields.len() {
            return Err(FlowError::MalformedSubmission(format!(
                "got {} values for {} fields",
                values.len(),
                self.fields.len()
            )));
        }
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = value.clone();
        }
        Ok(())
    }
}
