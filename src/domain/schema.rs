//! Field schema shared by the three parameter records.
//!
//! A `FieldSpec` describes one named clinical parameter: its wire key, how a
//! form control presents it, and the domain of values it accepts.

/// Value domain of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Bounded number. Slider fields are clamped on update instead of
    /// being rejected at submission.
    Numeric {
        min: f64,
        max: f64,
        step: f64,
        slider: bool,
    },
    /// Binary 0/1 flag with display labels for each state.
    Flag {
        off: &'static str,
        on: &'static str,
    },
    /// Enumerated string value: `(wire value, label)` pairs.
    Choice {
        options: &'static [(&'static str, &'static str)],
    },
}

/// A typed field value as held by a parameter record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
    Choice(&'static str),
}

/// Error raised when a field update cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    Unknown(String),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Description of one named parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key used on the wire and for set-by-name
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub(crate) const fn numeric(
        key: &'static str,
        label: &'static str,
        hint: &'static str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        Self {
            key,
            label,
            hint,
            kind: FieldKind::Numeric {
                min,
                max,
                step,
                slider: false,
            },
        }
    }

    pub(crate) const fn slider(
        key: &'static str,
        label: &'static str,
        hint: &'static str,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            key,
            label,
            hint,
            kind: FieldKind::Numeric {
                min,
                max,
                step: 1.0,
                slider: true,
            },
        }
    }

    pub(crate) const fn flag(
        key: &'static str,
        label: &'static str,
        off: &'static str,
        on: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            hint: "0 / 1",
            kind: FieldKind::Flag { off, on },
        }
    }

    pub(crate) const fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            key,
            label,
            hint: "←/→ to change",
            kind: FieldKind::Choice { options },
        }
    }

    /// Whether updates to this field are clamped into range.
    #[must_use]
    pub fn is_slider(&self) -> bool {
        matches!(self.kind, FieldKind::Numeric { slider: true, .. })
    }

    /// Coerce control text into a typed value.
    ///
    /// Numbers are parsed but not range-checked here; flags accept
    /// `0/1/yes/no/true/false` or their labels; choices accept the wire value
    /// or its label, case-insensitively.
    ///
    /// # Errors
    /// Returns `FieldError::Invalid` if the text cannot be coerced.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let text = raw.trim();
        match self.kind {
            FieldKind::Numeric { .. } => {
                let value: f64 = text.parse().map_err(|_| self.invalid("Invalid number"))?;
                if !value.is_finite() {
                    return Err(self.invalid("Invalid number"));
                }
                Ok(FieldValue::Number(value))
            }
            FieldKind::Flag { off, on } => {
                let lower = text.to_ascii_lowercase();
                if matches!(lower.as_str(), "1" | "yes" | "y" | "true") || lower == on.to_ascii_lowercase() {
                    Ok(FieldValue::Flag(true))
                } else if matches!(lower.as_str(), "0" | "no" | "n" | "false")
                    || lower == off.to_ascii_lowercase()
                {
                    Ok(FieldValue::Flag(false))
                } else {
                    Err(self.invalid(format!("expected 0 or 1, got '{text}'")))
                }
            }
            FieldKind::Choice { options } => options
                .iter()
                .find(|(value, label)| {
                    value.eq_ignore_ascii_case(text) || label.eq_ignore_ascii_case(text)
                })
                .map(|(value, _)| FieldValue::Choice(*value))
                .ok_or_else(|| {
                    let allowed: Vec<&str> = options.iter().map(|(v, _)| *v).collect();
                    self.invalid(format!("must be one of {}", allowed.join(", ")))
                }),
        }
    }

    /// Clamp a numeric value into this field's range. Non-numeric fields and
    /// values pass through unchanged.
    #[must_use]
    pub fn clamp(&self, value: FieldValue) -> FieldValue {
        match (self.kind, value) {
            (FieldKind::Numeric { min, max, .. }, FieldValue::Number(v)) => {
                FieldValue::Number(v.clamp(min, max))
            }
            _ => value,
        }
    }

    /// Advance a value one step in `direction` (negative = down). Numbers
    /// move by the field step and stay in range; flags toggle; choices cycle.
    #[must_use]
    pub fn step(&self, value: FieldValue, direction: i8) -> FieldValue {
        match (self.kind, value) {
            (FieldKind::Numeric { min, max, step, .. }, FieldValue::Number(v)) => {
                let next = v + step * f64::from(direction.signum());
                // Snap to the step grid so decimal steps don't drift.
                let scale = 1.0 / step;
                let next = (next * scale).round() / scale;
                FieldValue::Number(next.clamp(min, max))
            }
            (FieldKind::Flag { .. }, FieldValue::Flag(b)) => FieldValue::Flag(!b),
            (FieldKind::Choice { options }, FieldValue::Choice(current)) => {
                let len = options.len();
                let idx = options.iter().position(|(v, _)| *v == current).unwrap_or(0);
                let next = if direction < 0 {
                    (idx + len - 1) % len
                } else {
                    (idx + 1) % len
                };
                FieldValue::Choice(options[next].0)
            }
            _ => value,
        }
    }

    /// Check a value against the field's declared domain.
    ///
    /// # Errors
    /// Returns a human-readable message on violation.
    pub fn check(&self, value: FieldValue) -> Result<(), String> {
        match (self.kind, value) {
            (FieldKind::Numeric { min, max, .. }, FieldValue::Number(v)) => {
                if v.is_finite() && (min..=max).contains(&v) {
                    Ok(())
                } else {
                    Err(format!(
                        "{}: Value must be between {} and {}",
                        self.label, min, max
                    ))
                }
            }
            (FieldKind::Flag { .. }, FieldValue::Flag(_)) => Ok(()),
            (FieldKind::Choice { options }, FieldValue::Choice(v)) => {
                if options.iter().any(|(o, _)| *o == v) {
                    Ok(())
                } else {
                    Err(format!("{}: '{}' is not an allowed option", self.label, v))
                }
            }
            _ => Err(format!("{}: wrong value type", self.label)),
        }
    }

    /// Render a value as control text.
    #[must_use]
    pub fn display(&self, value: FieldValue) -> String {
        match (self.kind, value) {
            (_, FieldValue::Number(v)) => format_number(v),
            (FieldKind::Flag { off, on }, FieldValue::Flag(b)) => {
                (if b { on } else { off }).to_string()
            }
            (FieldKind::Choice { options }, FieldValue::Choice(v)) => options
                .iter()
                .find(|(o, _)| *o == v)
                .map_or(v, |(_, label)| *label)
                .to_string(),
            (_, FieldValue::Flag(b)) => u8::from(b).to_string(),
            (_, FieldValue::Choice(v)) => v.to_string(),
        }
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> FieldError {
        FieldError::Invalid {
            field: self.key,
            reason: reason.into(),
        }
    }
}

/// Format a number without a trailing `.0` for whole values.
#[must_use]
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Look up a field by key.
#[must_use]
pub fn find_field(fields: &'static [FieldSpec], key: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|f| f.key == key)
}

/// Convert a numeric field value to a whole number for integer-typed fields.
/// Fractional values are rejected, never rounded into range.
pub(crate) fn whole(spec: &FieldSpec, value: FieldValue) -> Result<u32, FieldError> {
    match value {
        FieldValue::Number(v)
            if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) && v.fract() == 0.0 =>
        {
            Ok(v as u32)
        }
        FieldValue::Number(v) if v.is_finite() && v.fract() != 0.0 => {
            Err(spec.invalid("must be a whole number"))
        }
        FieldValue::Number(_) => Err(spec.invalid("must be a non-negative whole number")),
        _ => Err(spec.invalid("wrong value type")),
    }
}

pub(crate) fn number(spec: &FieldSpec, value: FieldValue) -> Result<f64, FieldError> {
    match value {
        FieldValue::Number(v) if v.is_finite() => Ok(v),
        FieldValue::Number(_) => Err(spec.invalid("Invalid number")),
        _ => Err(spec.invalid("wrong value type")),
    }
}

pub(crate) fn flag(spec: &FieldSpec, value: FieldValue) -> Result<u8, FieldError> {
    match value {
        FieldValue::Flag(b) => Ok(u8::from(b)),
        _ => Err(spec.invalid("wrong value type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGE: FieldSpec = FieldSpec::slider("age", "Age", "years (20-90)", 20.0, 90.0);
    const BMI: FieldSpec = FieldSpec::numeric("BMI", "BMI", "kg/m² (10-50)", 10.0, 50.0, 0.1);
    const SMOKER: FieldSpec = FieldSpec::flag("currentSmoker", "Current Smoker", "No", "Yes");
    const RESIDENCE: FieldSpec =
        FieldSpec::choice("residence_type", "Residence", &[("Urban", "Urban"), ("Rural", "Rural")]);

    #[test]
    fn test_parse_numeric() {
        assert_eq!(BMI.parse(" 27.5 "), Ok(FieldValue::Number(27.5)));
        assert!(BMI.parse("abc").is_err());
        assert!(BMI.parse("NaN").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(SMOKER.parse("1"), Ok(FieldValue::Flag(true)));
        assert_eq!(SMOKER.parse("Yes"), Ok(FieldValue::Flag(true)));
        assert_eq!(SMOKER.parse("no"), Ok(FieldValue::Flag(false)));
        assert!(SMOKER.parse("2").is_err());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(RESIDENCE.parse("rural"), Ok(FieldValue::Choice("Rural")));
        assert!(RESIDENCE.parse("Suburban").is_err());
    }

    #[test]
    fn test_clamp_and_check() {
        assert_eq!(AGE.clamp(FieldValue::Number(120.0)), FieldValue::Number(90.0));
        assert_eq!(AGE.clamp(FieldValue::Number(5.0)), FieldValue::Number(20.0));
        assert!(AGE.check(FieldValue::Number(19.0)).is_err());
        assert!(AGE.check(FieldValue::Number(20.0)).is_ok());
        assert!(BMI.check(FieldValue::Flag(true)).is_err());
    }

    #[test]
    fn test_step() {
        assert_eq!(AGE.step(FieldValue::Number(90.0), 1), FieldValue::Number(90.0));
        assert_eq!(AGE.step(FieldValue::Number(45.0), -1), FieldValue::Number(44.0));
        assert_eq!(BMI.step(FieldValue::Number(25.0), 1), FieldValue::Number(25.1));
        assert_eq!(SMOKER.step(FieldValue::Flag(false), 1), FieldValue::Flag(true));
        assert_eq!(
            RESIDENCE.step(FieldValue::Choice("Rural"), 1),
            FieldValue::Choice("Urban")
        );
        assert_eq!(
            RESIDENCE.step(FieldValue::Choice("Urban"), -1),
            FieldValue::Choice("Rural")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AGE.display(FieldValue::Number(45.0)), "45");
        assert_eq!(BMI.display(FieldValue::Number(27.5)), "27.5");
        assert_eq!(SMOKER.display(FieldValue::Flag(true)), "Yes");
        assert_eq!(RESIDENCE.display(FieldValue::Choice("Urban")), "Urban");
    }
}
