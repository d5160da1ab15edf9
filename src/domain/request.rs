//! Risk Assessment Request: one typed parameter record for exactly one domain.

use serde::Serialize;

use super::chd::{ChdParameters, CHD_FIELDS};
use super::diabetes::{DiabetesParameters, DIABETES_FIELDS};
use super::risk::Domain;
use super::schema::{FieldError, FieldSpec, FieldValue};
use super::stroke::{StrokeParameters, STROKE_FIELDS};

/// Request body for one prediction. Serializes as the bare parameter object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssessmentRequest {
    Chd(ChdParameters),
    Stroke(StrokeParameters),
    Diabetes(DiabetesParameters),
}

/// Ordered field schema for a domain.
#[must_use]
pub fn fields_for(domain: Domain) -> &'static [FieldSpec] {
    match domain {
        Domain::Chd => &CHD_FIELDS,
        Domain::Stroke => &STROKE_FIELDS,
        Domain::Diabetes => &DIABETES_FIELDS,
    }
}

/// Every wire key across all domains (deduplicated).
#[must_use]
pub fn all_field_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Domain::ALL
        .iter()
        .flat_map(|d| fields_for(*d).iter().map(|f| f.key))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

impl AssessmentRequest {
    /// A request populated with the documented defaults for `domain`.
    #[must_use]
    pub fn defaults(domain: Domain) -> Self {
        match domain {
            Domain::Chd => Self::Chd(ChdParameters::default()),
            Domain::Stroke => Self::Stroke(StrokeParameters::default()),
            Domain::Diabetes => Self::Diabetes(DiabetesParameters::default()),
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        match self {
            Self::Chd(_) => Domain::Chd,
            Self::Stroke(_) => Domain::Stroke,
            Self::Diabetes(_) => Domain::Diabetes,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.domain())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        match self {
            Self::Chd(p) => p.get(key),
            Self::Stroke(p) => p.get(key),
            Self::Diabetes(p) => p.get(key),
        }
    }

    /// Store a typed value. No range check; see [`AssessmentRequest::validate`].
    ///
    /// # Errors
    /// Returns error for unknown keys or mistyped values.
    pub fn assign(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        match self {
            Self::Chd(p) => p.assign(key, value),
            Self::Stroke(p) => p.assign(key, value),
            Self::Diabetes(p) => p.assign(key, value),
        }
    }

    /// Validate that every field is within its declared domain.
    ///
    /// # Errors
    /// Returns all violations as human-readable messages.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .fields()
            .iter()
            .filter_map(|spec| match self.get(spec.key) {
                Some(value) => spec.check(value).err(),
                None => Some(format!("{}: missing value", spec.label)),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for domain in Domain::ALL {
            let request = AssessmentRequest::defaults(domain);
            assert_eq!(request.domain(), domain);
            assert!(request.validate().is_ok(), "{domain} defaults invalid");
        }
    }

    #[test]
    fn test_field_counts() {
        assert_eq!(fields_for(Domain::Chd).len(), 15);
        assert_eq!(fields_for(Domain::Stroke).len(), 8);
        assert_eq!(fields_for(Domain::Diabetes).len(), 15);
    }

    #[test]
    fn test_validation_collects_every_violation() {
        let mut request = AssessmentRequest::defaults(Domain::Chd);
        request
            .assign("education", FieldValue::Number(7.0))
            .expect("assign");
        request
            .assign("sysBP", FieldValue::Number(300.0))
            .expect("assign");

        let errors = request.validate().expect_err("should be invalid");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Education Level"));
        assert!(errors[1].contains("Systolic BP"));
    }

    #[test]
    fn test_untagged_serialization() {
        let json = serde_json::to_value(AssessmentRequest::defaults(Domain::Stroke))
            .expect("serialize");
        assert_eq!(json["age"], 45);
        assert!(json.get("Stroke").is_none());
    }

    #[test]
    fn test_all_field_keys() {
        let keys = all_field_keys();
        assert!(keys.contains(&"sysBP"));
        assert!(keys.contains(&"family_history"));
        assert_eq!(keys.iter().filter(|k| **k == "age").count(), 1);
    }
}
