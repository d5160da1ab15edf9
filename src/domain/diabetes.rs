//! Diabetes parameters.
//!
//! Canonical lowercase snake_case schema. Keys match what the inference
//! service reads from `POST /predict/diabetes`.

use serde::{Deserialize, Serialize};

use super::schema::{self, find_field, FieldError, FieldSpec, FieldValue};

/// The 15 diabetes input parameters: demographics, labs and lifestyle flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesParameters {
    pub age: u32,

    /// 1 = male, 0 = female
    pub gender: u8,

    pub bmi: f64,

    /// Systolic blood pressure in mmHg
    pub sbp: f64,

    /// Diastolic blood pressure in mmHg
    pub dbp: f64,

    /// Fasting plasma glucose in mg/dL
    pub fpg: f64,

    /// Total cholesterol in mg/dL
    pub chol: f64,

    pub hdl: f64,
    pub ldl: f64,

    /// Blood urea nitrogen in mg/dL
    pub bun: f64,

    /// Creatinine clearance rate in mL/min
    pub ccr: f64,

    /// Fasting FPG at follow-up in mg/dL
    pub ffpg: f64,

    pub smoking_status: u8,
    pub drinking_status: u8,
    pub family_history: u8,
}

impl Default for DiabetesParameters {
    fn default() -> Self {
        Self {
            age: 45,
            gender: 1,
            bmi: 25.0,
            sbp: 120.0,
            dbp: 80.0,
            fpg: 100.0,
            chol: 200.0,
            hdl: 50.0,
            ldl: 130.0,
            bun: 15.0,
            ccr: 90.0,
            ffpg: 95.0,
            smoking_status: 0,
            drinking_status: 0,
            family_history: 0,
        }
    }
}

pub const DIABETES_FIELDS: [FieldSpec; 15] = [
    FieldSpec::slider("age", "Age", "years (20-90)", 20.0, 90.0),
    FieldSpec::flag("gender", "Gender", "Female", "Male"),
    FieldSpec::numeric("bmi", "Body Mass Index", "kg/m² (10-50)", 10.0, 50.0, 0.1),
    FieldSpec::numeric("sbp", "Systolic BP", "mmHg (80-250)", 80.0, 250.0, 1.0),
    FieldSpec::numeric("dbp", "Diastolic BP", "mmHg (40-150)", 40.0, 150.0, 1.0),
    FieldSpec::numeric("fpg", "Fasting Plasma Glucose", "mg/dL (50-300)", 50.0, 300.0, 0.1),
    FieldSpec::numeric("chol", "Total Cholesterol", "mg/dL (100-500)", 100.0, 500.0, 1.0),
    FieldSpec::numeric("hdl", "HDL Cholesterol", "mg/dL (20-100)", 20.0, 100.0, 1.0),
    FieldSpec::numeric("ldl", "LDL Cholesterol", "mg/dL (50-300)", 50.0, 300.0, 1.0),
    FieldSpec::numeric("bun", "Blood Urea Nitrogen", "mg/dL (5-50)", 5.0, 50.0, 1.0),
    FieldSpec::numeric("ccr", "Creatinine Clearance", "mL/min (30-150)", 30.0, 150.0, 1.0),
    FieldSpec::numeric("ffpg", "Fasting FPG", "mg/dL (50-300)", 50.0, 300.0, 0.1),
    FieldSpec::flag("smoking_status", "Smoking Status", "Non-smoker", "Smoker"),
    FieldSpec::flag("drinking_status", "Drinking Status", "Non-drinker", "Drinker"),
    FieldSpec::flag("family_history", "Family History of Diabetes", "No", "Yes"),
];

impl DiabetesParameters {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "age" => FieldValue::Number(f64::from(self.age)),
            "gender" => FieldValue::Flag(self.gender == 1),
            "bmi" => FieldValue::Number(self.bmi),
            "sbp" => FieldValue::Number(self.sbp),
            "dbp" => FieldValue::Number(self.dbp),
            "fpg" => FieldValue::Number(self.fpg),
            "chol" => FieldValue::Number(self.chol),
            "hdl" => FieldValue::Number(self.hdl),
            "ldl" => FieldValue::Number(self.ldl),
            "bun" => FieldValue::Number(self.bun),
            "ccr" => FieldValue::Number(self.ccr),
            "ffpg" => FieldValue::Number(self.ffpg),
            "smoking_status" => FieldValue::Flag(self.smoking_status == 1),
            "drinking_status" => FieldValue::Flag(self.drinking_status == 1),
            "family_history" => FieldValue::Flag(self.family_history == 1),
            _ => return None,
        };
        Some(value)
    }

    /// # Errors
    /// Returns error for unknown keys or mistyped values.
    pub fn assign(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        let spec =
            find_field(&DIABETES_FIELDS, key).ok_or_else(|| FieldError::Unknown(key.to_string()))?;
        match key {
            "age" => self.age = schema::whole(spec, value)?,
            "gender" => self.gender = schema::flag(spec, value)?,
            "bmi" => self.bmi = schema::number(spec, value)?,
            "sbp" => self.sbp = schema::number(spec, value)?,
            "dbp" => self.dbp = schema::number(spec, value)?,
            "fpg" => self.fpg = schema::number(spec, value)?,
            "chol" => self.chol = schema::number(spec, value)?,
            "hdl" => self.hdl = schema::number(spec, value)?,
            "ldl" => self.ldl = schema::number(spec, value)?,
            "bun" => self.bun = schema::number(spec, value)?,
            "ccr" => self.ccr = schema::number(spec, value)?,
            "ffpg" => self.ffpg = schema::number(spec, value)?,
            "smoking_status" => self.smoking_status = schema::flag(spec, value)?,
            "drinking_status" => self.drinking_status = schema::flag(spec, value)?,
            "family_history" => self.family_history = schema::flag(spec, value)?,
            _ => return Err(FieldError::Unknown(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_keys() {
        let json = serde_json::to_value(DiabetesParameters::default()).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 15);
        assert!(obj.contains_key("family_history"));
        assert!(!obj.contains_key("family_histroy"));
        assert!(!obj.contains_key("Age"));
        for field in &DIABETES_FIELDS {
            assert!(obj.contains_key(field.key), "missing {}", field.key);
        }
    }

    #[test]
    fn test_assign_flag_and_lab() {
        let mut params = DiabetesParameters::default();
        params
            .assign("family_history", FieldValue::Flag(true))
            .expect("assign");
        params.assign("hdl", FieldValue::Number(38.0)).expect("assign");
        assert_eq!(params.family_history, 1);
        assert_eq!(params.get("hdl"), Some(FieldValue::Number(38.0)));
        assert!(params.assign("hdl", FieldValue::Choice("x")).is_err());
    }
}
