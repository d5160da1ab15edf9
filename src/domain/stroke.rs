//! Stroke parameters.

use serde::Serialize;

use super::schema::{self, find_field, FieldError, FieldSpec, FieldValue};

const GENDER_OPTIONS: &[(&str, &str)] = &[("Male", "Male"), ("Female", "Female"), ("Other", "Other")];
const RESIDENCE_OPTIONS: &[(&str, &str)] = &[("Urban", "Urban"), ("Rural", "Rural")];
const SMOKING_OPTIONS: &[(&str, &str)] = &[
    ("never_smoked", "Never Smoked"),
    ("formerly_smoked", "Formerly Smoked"),
    ("smokes", "Smokes"),
];

/// The 8 stroke input parameters. Categorical fields travel as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeParameters {
    pub age: u32,
    pub hypertension: u8,
    pub heart_disease: u8,

    /// Average glucose in mg/dL
    pub avg_glucose_level: f64,

    pub bmi: f64,

    /// One of `Male`, `Female`, `Other`
    pub gender: &'static str,

    /// One of `Urban`, `Rural`
    pub residence_type: &'static str,

    /// One of `never_smoked`, `formerly_smoked`, `smokes`
    pub smoking_status: &'static str,
}

impl Default for StrokeParameters {
    fn default() -> Self {
        Self {
            age: 45,
            hypertension: 0,
            heart_disease: 0,
            avg_glucose_level: 100.0,
            bmi: 25.0,
            gender: "Male",
            residence_type: "Urban",
            smoking_status: "never_smoked",
        }
    }
}

pub const STROKE_FIELDS: [FieldSpec; 8] = [
    FieldSpec::slider("age", "Age", "years (20-90)", 20.0, 90.0),
    FieldSpec::flag("hypertension", "Hypertension", "No", "Yes"),
    FieldSpec::flag("heart_disease", "Heart Disease", "No", "Yes"),
    FieldSpec::numeric(
        "avg_glucose_level",
        "Average Glucose Level",
        "mg/dL (50-300)",
        50.0,
        300.0,
        0.1,
    ),
    FieldSpec::numeric("bmi", "BMI", "kg/m² (10-50)", 10.0, 50.0, 0.1),
    FieldSpec::choice("gender", "Gender", GENDER_OPTIONS),
    FieldSpec::choice("residence_type", "Residence Type", RESIDENCE_OPTIONS),
    FieldSpec::choice("smoking_status", "Smoking Status", SMOKING_OPTIONS),
];

impl StrokeParameters {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "age" => FieldValue::Number(f64::from(self.age)),
            "hypertension" => FieldValue::Flag(self.hypertension == 1),
            "heart_disease" => FieldValue::Flag(self.heart_disease == 1),
            "avg_glucose_level" => FieldValue::Number(self.avg_glucose_level),
            "bmi" => FieldValue::Number(self.bmi),
            "gender" => FieldValue::Choice(self.gender),
            "residence_type" => FieldValue::Choice(self.residence_type),
            "smoking_status" => FieldValue::Choice(self.smoking_status),
            _ => return None,
        };
        Some(value)
    }

    /// # Errors
    /// Returns error for unknown keys, mistyped values or unknown options.
    pub fn assign(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        let spec =
            find_field(&STROKE_FIELDS, key).ok_or_else(|| FieldError::Unknown(key.to_string()))?;
        match key {
            "age" => self.age = schema::whole(spec, value)?,
            "hypertension" => self.hypertension = schema::flag(spec, value)?,
            "heart_disease" => self.heart_disease = schema::flag(spec, value)?,
            "avg_glucose_level" => self.avg_glucose_level = schema::number(spec, value)?,
            "bmi" => self.bmi = schema::number(spec, value)?,
            "gender" => self.gender = choice(spec, value)?,
            "residence_type" => self.residence_type = choice(spec, value)?,
            "smoking_status" => self.smoking_status = choice(spec, value)?,
            _ => return Err(FieldError::Unknown(key.to_string())),
        }
        Ok(())
    }
}

fn choice(spec: &FieldSpec, value: FieldValue) -> Result<&'static str, FieldError> {
    match value {
        FieldValue::Choice(v) => {
            spec.check(value).map_err(|reason| spec.invalid(reason))?;
            Ok(v)
        }
        _ => Err(spec.invalid("wrong value type")),
    }
}
