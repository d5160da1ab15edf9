//! Chronic heart disease parameters.
//!
//! Framingham-style feature set; keys match what the inference service reads
//! from `POST /predict/chd`.

use serde::{Deserialize, Serialize};

use super::schema::{self, find_field, FieldError, FieldSpec, FieldValue};

/// The 15 CHD input parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChdParameters {
    /// Gender: 1 = male, 0 = female
    pub male: u8,

    /// Age in years (20-90)
    pub age: u32,

    /// Education tier (1-4)
    pub education: u32,

    #[serde(rename = "currentSmoker")]
    pub current_smoker: u8,

    #[serde(rename = "cigsPerDay")]
    pub cigs_per_day: u32,

    /// On blood pressure medication
    #[serde(rename = "BPMeds")]
    pub bp_meds: u8,

    #[serde(rename = "prevalentStroke")]
    pub prevalent_stroke: u8,

    /// Prevalent hypertension
    #[serde(rename = "prevalentHyp")]
    pub prevalent_hyp: u8,

    pub diabetes: u8,

    /// Total cholesterol in mg/dL
    #[serde(rename = "totChol")]
    pub tot_chol: f64,

    /// Systolic blood pressure in mmHg
    #[serde(rename = "sysBP")]
    pub sys_bp: f64,

    /// Diastolic blood pressure in mmHg
    #[serde(rename = "diaBP")]
    pub dia_bp: f64,

    #[serde(rename = "BMI")]
    pub bmi: f64,

    /// Resting heart rate in bpm
    #[serde(rename = "heartRate")]
    pub heart_rate: f64,

    /// Glucose in mg/dL
    pub glucose: f64,
}

impl Default for ChdParameters {
    fn default() -> Self {
        Self {
            male: 1,
            age: 45,
            education: 2,
            current_smoker: 0,
            cigs_per_day: 0,
            bp_meds: 0,
            prevalent_stroke: 0,
            prevalent_hyp: 0,
            diabetes: 0,
            tot_chol: 200.0,
            sys_bp: 120.0,
            dia_bp: 80.0,
            bmi: 25.0,
            heart_rate: 75.0,
            glucose: 100.0,
        }
    }
}

/// Field schema in form order.
pub const CHD_FIELDS: [FieldSpec; 15] = [
    FieldSpec::flag("male", "Gender", "Female", "Male"),
    FieldSpec::slider("age", "Age", "years (20-90)", 20.0, 90.0),
    FieldSpec::numeric("education", "Education Level", "level (1-4)", 1.0, 4.0, 1.0),
    FieldSpec::flag("currentSmoker", "Current Smoker", "No", "Yes"),
    FieldSpec::numeric("cigsPerDay", "Cigarettes Per Day", "count (0-100)", 0.0, 100.0, 1.0),
    FieldSpec::flag("BPMeds", "BP Medications", "No", "Yes"),
    FieldSpec::flag("prevalentStroke", "Prevalent Stroke", "No", "Yes"),
    FieldSpec::flag("prevalentHyp", "Prevalent Hypertension", "No", "Yes"),
    FieldSpec::flag("diabetes", "Diabetes", "No", "Yes"),
    FieldSpec::numeric("totChol", "Total Cholesterol", "mg/dL (100-600)", 100.0, 600.0, 1.0),
    FieldSpec::numeric("sysBP", "Systolic BP", "mmHg (80-250)", 80.0, 250.0, 1.0),
    FieldSpec::numeric("diaBP", "Diastolic BP", "mmHg (40-150)", 40.0, 150.0, 1.0),
    FieldSpec::numeric("BMI", "Body Mass Index", "kg/m² (10-50)", 10.0, 50.0, 0.1),
    FieldSpec::numeric("heartRate", "Heart Rate", "bpm (40-220)", 40.0, 220.0, 1.0),
    FieldSpec::numeric("glucose", "Glucose Level", "mg/dL (50-400)", 50.0, 400.0, 1.0),
];

impl ChdParameters {
    /// Read a field by wire key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "male" => FieldValue::Flag(self.male == 1),
            "age" => FieldValue::Number(f64::from(self.age)),
            "education" => FieldValue::Number(f64::from(self.education)),
            "currentSmoker" => FieldValue::Flag(self.current_smoker == 1),
            "cigsPerDay" => FieldValue::Number(f64::from(self.cigs_per_day)),
            "BPMeds" => FieldValue::Flag(self.bp_meds == 1),
            "prevalentStroke" => FieldValue::Flag(self.prevalent_stroke == 1),
            "prevalentHyp" => FieldValue::Flag(self.prevalent_hyp == 1),
            "diabetes" => FieldValue::Flag(self.diabetes == 1),
            "totChol" => FieldValue::Number(self.tot_chol),
            "sysBP" => FieldValue::Number(self.sys_bp),
            "diaBP" => FieldValue::Number(self.dia_bp),
            "BMI" => FieldValue::Number(self.bmi),
            "heartRate" => FieldValue::Number(self.heart_rate),
            "glucose" => FieldValue::Number(self.glucose),
            _ => return None,
        };
        Some(value)
    }

    /// Write a field by wire key. Range is not checked here.
    ///
    /// # Errors
    /// Returns error for unknown keys or mistyped values.
    pub fn assign(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        let spec = find_field(&CHD_FIELDS, key).ok_or_else(|| FieldError::Unknown(key.to_string()))?;
        match key {
            "male" => self.male = schema::flag(spec, value)?,
            "age" => self.age = schema::whole(spec, value)?,
            "education" => self.education = schema::whole(spec, value)?,
            "currentSmoker" => self.current_smoker = schema::flag(spec, value)?,
            "cigsPerDay" => self.cigs_per_day = schema::whole(spec, value)?,
            "BPMeds" => self.bp_meds = schema::flag(spec, value)?,
            "prevalentStroke" => self.prevalent_stroke = schema::flag(spec, value)?,
            "prevalentHyp" => self.prevalent_hyp = schema::flag(spec, value)?,
            "diabetes" => self.diabetes = schema::flag(spec, value)?,
            "totChol" => self.tot_chol = schema::number(spec, value)?,
            "sysBP" => self.sys_bp = schema::number(spec, value)?,
            "diaBP" => self.dia_bp = schema::number(spec, value)?,
            "BMI" => self.bmi = schema::number(spec, value)?,
            "heartRate" => self.heart_rate = schema::number(spec, value)?,
            "glucose" => self.glucose = schema::number(spec, value)?,
            _ => return Err(FieldError::Unknown(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys() {
        let json = serde_json::to_value(ChdParameters::default()).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 15);
        for field in &CHD_FIELDS {
            assert!(obj.contains_key(field.key), "missing {}", field.key);
        }
        assert_eq!(obj["male"], serde_json::json!(1));
        assert_eq!(obj["age"], serde_json::json!(45));
        assert_eq!(obj["sysBP"], serde_json::json!(120.0));
    }

    #[test]
    fn test_get_assign() {
        let mut params = ChdParameters::default();
        params
            .assign("sysBP", FieldValue::Number(142.0))
            .expect("assign");
        params
            .assign("currentSmoker", FieldValue::Flag(true))
            .expect("assign");
        assert_eq!(params.get("sysBP"), Some(FieldValue::Number(142.0)));
        assert_eq!(params.current_smoker, 1);

        assert!(params.assign("sysBP", FieldValue::Flag(true)).is_err());
        assert!(matches!(
            params.assign("cholesterol", FieldValue::Number(1.0)),
            Err(FieldError::Unknown(_))
        ));
        assert_eq!(params.get("cholesterol"), None);
    }
}
