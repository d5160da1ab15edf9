//! Form Controller: per-domain editable request state and submission gating.
//!
//! One controller per risk form. It owns the typed request record, coerces
//! control text into it, and tracks the single in-flight submission together
//! with its outcome (result or failure notice).

use crate::domain::{
    fields_for, AssessmentRequest, Domain, FieldError, FieldSpec, FieldValue, RiskAssessment,
};

use super::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("a submission is already in flight")]
    InFlight,

    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<String>),
}

impl From<FieldError> for FormError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Unknown(key) => Self::UnknownField(key),
            FieldError::Invalid { field, reason } => Self::InvalidValue {
                field: field.to_string(),
                reason,
            },
        }
    }
}

/// Editable state of one risk form.
#[derive(Debug, Clone)]
pub struct FormController {
    request: AssessmentRequest,
    in_flight: bool,
    result: Option<RiskAssessment>,
    notice: Option<Notice>,
}

impl FormController {
    /// A form initialised to the documented defaults.
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self {
            request: AssessmentRequest::defaults(domain),
            in_flight: false,
            result: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.request.domain()
    }

    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.domain())
    }

    #[must_use]
    pub fn request(&self) -> &AssessmentRequest {
        &self.request
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<FieldValue> {
        self.request.get(key)
    }

    /// Current value rendered as control text.
    #[must_use]
    pub fn display_value(&self, key: &str) -> Option<String> {
        let spec = self.spec(key).ok()?;
        self.value(key).map(|v| spec.display(v))
    }

    fn spec(&self, key: &str) -> Result<&'static FieldSpec, FormError> {
        self.fields()
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))
    }

    /// Store a typed value, clamping slider fields into range.
    fn store(&mut self, spec: &FieldSpec, value: FieldValue) -> Result<(), FormError> {
        let value = if spec.is_slider() {
            spec.clamp(value)
        } else {
            value
        };
        self.request.assign(spec.key, value)?;
        Ok(())
    }

    /// Set a field from control text.
    ///
    /// Non-slider numbers are stored as given, even out of range; they are
    /// caught by [`FormController::validate`] at submission.
    ///
    /// # Errors
    /// Returns `FormError::UnknownField` or `FormError::InvalidValue`; the
    /// record is left unchanged.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        let value = spec.parse(raw)?;
        self.store(spec, value)
    }

    /// Set a numeric field directly (slider path).
    ///
    /// # Errors
    /// Returns `FormError` for unknown keys, non-numeric fields or non-finite values.
    pub fn set_number(&mut self, key: &str, value: f64) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        if !value.is_finite() {
            return Err(spec.invalid("Invalid number").into());
        }
        self.store(spec, FieldValue::Number(value))
    }

    /// Move a field one step: numbers by their step within range, flags
    /// toggle, choices cycle.
    ///
    /// # Errors
    /// Returns `FormError::UnknownField` for unknown keys.
    pub fn step(&mut self, key: &str, direction: i8) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        let current = self
            .value(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        let next = spec.step(current, direction);
        self.request.assign(spec.key, next)?;
        Ok(())
    }

    /// # Errors
    /// Returns every range violation.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        self.request.validate()
    }

    /// Start a submission and return the snapshot to send.
    ///
    /// Clears the previous result and notice.
    ///
    /// # Errors
    /// Returns `FormError::InFlight` while a submission is pending and
    /// `FormError::Invalid` if any field is out of range.
    pub fn begin_submit(&mut self) -> Result<AssessmentRequest, FormError> {
        if self.in_flight {
            return Err(FormError::InFlight);
        }
        self.validate().map_err(FormError::Invalid)?;

        self.in_flight = true;
        self.result = None;
        self.notice = None;
        Ok(self.request.clone())
    }

    /// Resolve the in-flight submission.
    ///
    /// Every error becomes the same "Prediction Failed" notice. Outcomes that
    /// arrive with nothing in flight are dropped.
    pub fn complete(&mut self, outcome: crate::Result<RiskAssessment>) {
        if !self.in_flight {
            tracing::debug!(domain = %self.domain(), "Dropping outcome with no submission in flight");
            return;
        }
        self.in_flight = false;

        match outcome {
            Ok(assessment) => self.result = Some(assessment),
            Err(_) => self.notice = Some(Notice::PREDICTION_FAILED),
        }
    }

    /// Restore every default and clear the outcome.
    ///
    /// # Errors
    /// Returns `FormError::InFlight` while a submission is pending.
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.in_flight {
            return Err(FormError::InFlight);
        }
        self.request = AssessmentRequest::defaults(self.domain());
        self.clear_outcome();
        Ok(())
    }

    /// Discard the result and notice (e.g. when navigating away).
    pub fn clear_outcome(&mut self) {
        self.result = None;
        self.notice = None;
    }

    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        !self.in_flight
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn result(&self) -> Option<&RiskAssessment> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PredictionFailed;
    use crate::domain::RiskTier;

    fn assessment(domain: Domain, p: f64) -> RiskAssessment {
        RiskAssessment::from_probability(domain, p).expect("valid probability")
    }

    #[test]
    fn test_defaults() {
        let form = FormController::new(Domain::Chd);
        assert_eq!(form.value("age"), Some(FieldValue::Number(45.0)));
        assert_eq!(form.display_value("male").as_deref(), Some("Male"));
        assert_eq!(form.fields().len(), 15);
        assert!(form.is_submit_enabled());
        assert!(form.result().is_none());
    }

    #[test]
    fn test_set_coerces_text() {
        let mut form = FormController::new(Domain::Stroke);
        form.set("hypertension", "1").expect("flag");
        form.set("residence_type", "rural").expect("choice");
        form.set("bmi", "31.4").expect("number");

        assert_eq!(form.value("hypertension"), Some(FieldValue::Flag(true)));
        assert_eq!(form.value("residence_type"), Some(FieldValue::Choice("Rural")));
        assert_eq!(form.value("bmi"), Some(FieldValue::Number(31.4)));
    }

    #[test]
    fn test_set_rejects_bad_input_without_change() {
        let mut form = FormController::new(Domain::Chd);
        assert!(matches!(
            form.set("totChol", "lots"),
            Err(FormError::InvalidValue { .. })
        ));
        assert!(matches!(
            form.set("cholesterol", "200"),
            Err(FormError::UnknownField(_))
        ));
        assert_eq!(form.value("totChol"), Some(FieldValue::Number(200.0)));
    }

    #[test]
    fn test_slider_clamps_but_plain_numbers_do_not() {
        let mut form = FormController::new(Domain::Chd);
        form.set("age", "150").expect("slider");
        assert_eq!(form.value("age"), Some(FieldValue::Number(90.0)));
        form.set_number("age", 3.0).expect("slider");
        assert_eq!(form.value("age"), Some(FieldValue::Number(20.0)));

        form.set("sysBP", "300").expect("stored as given");
        assert_eq!(form.value("sysBP"), Some(FieldValue::Number(300.0)));
        let errors = form.validate().expect_err("out of range");
        assert_eq!(errors, vec!["Systolic BP: Value must be between 80 and 250"]);
    }

    #[test]
    fn test_step() {
        let mut form = FormController::new(Domain::Diabetes);
        form.step("bmi", 1).expect("step");
        assert_eq!(form.value("bmi"), Some(FieldValue::Number(25.1)));
        form.step("family_history", 1).expect("toggle");
        assert_eq!(form.value("family_history"), Some(FieldValue::Flag(true)));
    }

    #[test]
    fn test_fractional_whole_numbers_are_rejected() {
        let mut form = FormController::new(Domain::Chd);
        assert!(matches!(
            form.set("education", "0.6"),
            Err(FormError::InvalidValue { .. })
        ));
        assert!(matches!(
            form.set("cigsPerDay", "100.4"),
            Err(FormError::InvalidValue { .. })
        ));
        assert!(form.set("age", "45.5").is_err());

        assert_eq!(form.value("education"), Some(FieldValue::Number(2.0)));
        assert_eq!(form.value("cigsPerDay"), Some(FieldValue::Number(0.0)));
        assert_eq!(form.value("age"), Some(FieldValue::Number(45.0)));
        assert_eq!(form.validate(), Ok(()));

        form.set("cigsPerDay", "101").expect("stored as given");
        assert_eq!(
            form.validate(),
            Err(vec!["Cigarettes Per Day: Value must be between 0 and 100".to_string()])
        );
    }

    #[test]
    fn test_invalid_form_cannot_submit() {
        let mut form = FormController::new(Domain::Chd);
        form.set("education", "9").expect("stored");
        assert!(matches!(form.begin_submit(), Err(FormError::Invalid(e)) if e.len() == 1));
        assert!(form.is_submit_enabled());
    }

    #[test]
    fn test_submission_gating() {
        let mut form = FormController::new(Domain::Chd);
        let snapshot = form.begin_submit().expect("submit");
        assert_eq!(snapshot.domain(), Domain::Chd);
        assert!(!form.is_submit_enabled());
        assert_eq!(form.begin_submit(), Err(FormError::InFlight));
        assert_eq!(form.reset(), Err(FormError::InFlight));

        form.complete(Ok(assessment(Domain::Chd, 0.5)));
        assert!(form.is_submit_enabled());
        assert_eq!(form.result().map(|r| r.tier), Some(RiskTier::Moderate));
    }

    #[test]
    fn test_failure_is_uniform_and_never_partial() {
        let mut form = FormController::new(Domain::Stroke);
        form.begin_submit().expect("submit");
        form.complete(Ok(assessment(Domain::Stroke, 0.35)));
        assert!(form.result().is_some());

        form.begin_submit().expect("resubmit");
        assert!(form.result().is_none(), "previous result cleared on submit");
        form.complete(Err(PredictionFailed::status(503).into()));

        assert!(form.result().is_none());
        assert_eq!(form.notice(), Some(&Notice::PREDICTION_FAILED));
        assert!(form.is_submit_enabled());
    }

    #[test]
    fn test_stale_outcome_dropped() {
        let mut form = FormController::new(Domain::Chd);
        form.complete(Ok(assessment(Domain::Chd, 0.9)));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = FormController::new(Domain::Chd);
        form.set("age", "70").expect("set");
        form.set("totChol", "310").expect("set");
        form.set("sysBP", "160").expect("set");
        form.begin_submit().expect("submit");
        form.complete(Ok(assessment(Domain::Chd, 0.8)));

        form.reset().expect("reset");
        assert_eq!(form.value("age"), Some(FieldValue::Number(45.0)));
        assert_eq!(form.value("totChol"), Some(FieldValue::Number(200.0)));
        assert_eq!(form.value("sysBP"), Some(FieldValue::Number(120.0)));
        assert!(form.result().is_none());
        assert!(form.notice().is_none());
    }
}
