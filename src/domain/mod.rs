//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: risk domains and tiers, the per-domain parameter
//! records with their field schemas, and the feedback record.

mod chd;
mod diabetes;
mod feedback;
mod request;
mod risk;
pub mod schema;
mod stroke;

pub use chd::{ChdParameters, CHD_FIELDS};
pub use diabetes::{DiabetesParameters, DIABETES_FIELDS};
pub use feedback::Feedback;
pub use request::{all_field_keys, fields_for, AssessmentRequest};
pub use risk::{Domain, RiskAssessment, RiskTier, Thresholds};
pub use schema::{FieldError, FieldKind, FieldSpec, FieldValue};
pub use stroke::{StrokeParameters, STROKE_FIELDS};
