use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Every answer the questionnaire can record, keyed the way the kiosk front-end keys them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerField {
    Age,
    HasFever,
    Temperature,
    TroubleConsciousness,
    Convulsions,
    SevereAnemia,
    RespiratoryDistress,
    Jaundice,
    Hemoglobinuria,
    HasParasitemia,
    ParasitemiaLevel,
}

/// Shape of the value stored under a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Flag,
    Number,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flag => "yes/no",
            Self::Number => "number",
        }
    }
}

impl AnswerField {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Age,
            Self::HasFever,
            Self::Temperature,
            Self::TroubleConsciousness,
            Self::Convulsions,
            Self::SevereAnemia,
            Self::RespiratoryDistress,
            Self::Jaundice,
            Self::Hemoglobinuria,
            Self::HasParasitemia,
            Self::ParasitemiaLevel,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::HasFever => "hasFever",
            Self::Temperature => "temperature",
            Self::TroubleConsciousness => "troubleConsciousness",
            Self::Convulsions => "convulsions",
            Self::SevereAnemia => "severeAnemia",
            Self::RespiratoryDistress => "respiratoryDistress",
            Self::Jaundice => "jaundice",
            Self::Hemoglobinuria => "hemoglobinuria",
            Self::HasParasitemia => "hasParasitemia",
            Self::ParasitemiaLevel => "parasitemiaLevel",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Age | Self::Temperature | Self::ParasitemiaLevel => FieldKind::Number,
            _ => FieldKind::Flag,
        }
    }

    /// Only the parasitemia level may be left blank before scoring.
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::ParasitemiaLevel)
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(f64),
}

impl AnswerValue {
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Flag(_) => FieldKind::Flag,
            Self::Number(_) => FieldKind::Number,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Flag(_) => None,
        }
    }
}

/// Answers gathered so far in a session. Later writes to a field replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<AnswerField, AnswerValue>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: AnswerField) -> Option<&AnswerValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: AnswerField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn set(&mut self, field: AnswerField, value: AnswerValue) {
        self.0.insert(field, value);
    }

    pub fn with(mut self, field: AnswerField, value: AnswerValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnswerField, AnswerValue)> + '_ {
        self.0.iter().map(|(field, value)| (*field, *value))
    }

    fn flag(&self, field: AnswerField) -> Result<bool, RecordError> {
        match self.0.get(&field) {
            Some(AnswerValue::Flag(value)) => Ok(*value),
            Some(_) => Err(RecordError::WrongKind {
                field,
                expected: FieldKind::Flag,
            }),
            None => Err(RecordError::MissingField(field)),
        }
    }

    fn number(&self, field: AnswerField) -> Result<Option<f64>, RecordError> {
        match self.0.get(&field) {
            Some(AnswerValue::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(RecordError::WrongKind {
                field,
                expected: FieldKind::Number,
            }),
            None if field.is_optional() => Ok(None),
            None => Err(RecordError::MissingField(field)),
        }
    }
}

/// Raised when an answer sheet cannot become a record. Reaching this means the caller
/// skipped the collector's checks or the questionnaire definition is broken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("answer for '{0}' is missing")]
    MissingField(AnswerField),
    #[error("answer for '{field}' must be a {}", .expected.label())]
    WrongKind {
        field: AnswerField,
        expected: FieldKind,
    },
    #[error("answer {value} for '{field}' is not a whole number of years")]
    OutOfRange { field: AnswerField, value: f64 },
}

/// Completed questionnaire, ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub age: u32,
    pub has_fever: bool,
    pub temperature: f64,
    pub trouble_consciousness: bool,
    pub convulsions: bool,
    pub severe_anemia: bool,
    pub respiratory_distress: bool,
    pub jaundice: bool,
    pub hemoglobinuria: bool,
    pub has_parasitemia: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parasitemia_level: Option<f64>,
}

impl TryFrom<&AnswerSheet> for AnswerRecord {
    type Error = RecordError;

    fn try_from(sheet: &AnswerSheet) -> Result<Self, Self::Error> {
        let raw_age = sheet
            .number(AnswerField::Age)?
            .ok_or(RecordError::MissingField(AnswerField::Age))?;
        let age = whole_number(raw_age).ok_or(RecordError::OutOfRange {
            field: AnswerField::Age,
            value: raw_age,
        })?;
        let temperature = sheet
            .number(AnswerField::Temperature)?
            .ok_or(RecordError::MissingField(AnswerField::Temperature))?;

        Ok(Self {
            age,
            has_fever: sheet.flag(AnswerField::HasFever)?,
            temperature,
            trouble_consciousness: sheet.flag(AnswerField::TroubleConsciousness)?,
            convulsions: sheet.flag(AnswerField::Convulsions)?,
            severe_anemia: sheet.flag(AnswerField::SevereAnemia)?,
            respiratory_distress: sheet.flag(AnswerField::RespiratoryDistress)?,
            jaundice: sheet.flag(AnswerField::Jaundice)?,
            hemoglobinuria: sheet.flag(AnswerField::Hemoglobinuria)?,
            has_parasitemia: sheet.flag(AnswerField::HasParasitemia)?,
            parasitemia_level: sheet.number(AnswerField::ParasitemiaLevel)?,
        })
    }
}

impl From<&AnswerRecord> for AnswerSheet {
    fn from(record: &AnswerRecord) -> Self {
        let mut sheet = AnswerSheet::new()
            .with(AnswerField::Age, AnswerValue::Number(f64::from(record.age)))
            .with(AnswerField::HasFever, AnswerValue::Flag(record.has_fever))
            .with(AnswerField::Temperature, AnswerValue::Number(record.temperature))
            .with(
                AnswerField::TroubleConsciousness,
                AnswerValue::Flag(record.trouble_consciousness),
            )
            .with(AnswerField::Convulsions, AnswerValue::Flag(record.convulsions))
            .with(AnswerField::SevereAnemia, AnswerValue::Flag(record.severe_anemia))
            .with(
                AnswerField::RespiratoryDistress,
                AnswerValue::Flag(record.respiratory_distress),
            )
            .with(AnswerField::Jaundice, AnswerValue::Flag(record.jaundice))
            .with(AnswerField::Hemoglobinuria, AnswerValue::Flag(record.hemoglobinuria))
            .with(AnswerField::HasParasitemia, AnswerValue::Flag(record.has_parasitemia));
        if let Some(level) = record.parasitemia_level {
            sheet.set(AnswerField::ParasitemiaLevel, AnswerValue::Number(level));
        }
        sheet
    }
}

/// Whole, non-negative values that fit a `u32`.
pub(crate) fn whole_number(value: f64) -> Option<u32> {
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}
