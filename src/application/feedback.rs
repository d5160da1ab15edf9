//! Feedback form state and delivery service.

use std::sync::Arc;

use crate::domain::Feedback;
use crate::ports::{FeedbackError, FeedbackNotifier};

use super::form::FormError;
use super::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackField {
    Name,
    Subject,
    Suggestion,
}

impl FeedbackField {
    pub const ALL: [FeedbackField; 3] = [Self::Name, Self::Subject, Self::Suggestion];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Subject => "Subject",
            Self::Suggestion => "Your Suggestion",
        }
    }

    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Enter your name",
            Self::Subject => "What is your suggestion about?",
            Self::Suggestion => "Please provide details about your suggestion...",
        }
    }
}

/// Editable feedback record with the same submission gating as the risk forms.
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    feedback: Feedback,
    in_flight: bool,
    notice: Option<Notice>,
}

impl FeedbackForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[must_use]
    pub fn value(&self, field: FeedbackField) -> &str {
        match field {
            FeedbackField::Name => &self.feedback.name,
            FeedbackField::Subject => &self.feedback.subject,
            FeedbackField::Suggestion => &self.feedback.suggestion,
        }
    }

    fn value_mut(&mut self, field: FeedbackField) -> &mut String {
        match field {
            FeedbackField::Name => &mut self.feedback.name,
            FeedbackField::Subject => &mut self.feedback.subject,
            FeedbackField::Suggestion => &mut self.feedback.suggestion,
        }
    }

    pub fn set(&mut self, field: FeedbackField, text: impl Into<String>) {
        *self.value_mut(field) = text.into();
    }

    pub fn push_char(&mut self, field: FeedbackField, c: char) {
        self.value_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: FeedbackField) {
        self.value_mut(field).pop();
    }

    /// # Errors
    /// Returns the list of blank fields.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        self.feedback.validate()
    }

    /// # Errors
    /// Returns `FormError::InFlight` while sending and `FormError::Invalid`
    /// if a field is blank.
    pub fn begin_submit(&mut self) -> Result<Feedback, FormError> {
        if self.in_flight {
            return Err(FormError::InFlight);
        }
        self.validate().map_err(FormError::Invalid)?;
        self.in_flight = true;
        self.notice = None;
        Ok(self.feedback.clone())
    }

    /// On success the fields are cleared; on failure they are kept for retry.
    pub fn complete(&mut self, outcome: Result<(), FeedbackError>) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;

        match outcome {
            Ok(()) => {
                self.feedback = Feedback::default();
                self.notice = Some(Notice::FEEDBACK_SUBMITTED);
            }
            Err(_) => self.notice = Some(Notice::FEEDBACK_FAILED),
        }
    }

    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        !self.in_flight
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

/// Service for delivering feedback.
pub struct FeedbackService<N: FeedbackNotifier + ?Sized> {
    notifier: Arc<N>,
}

impl<N: FeedbackNotifier + ?Sized> Clone for FeedbackService<N> {
    fn clone(&self) -> Self {
        Self {
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<N: FeedbackNotifier + ?Sized> FeedbackService<N> {
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }

    /// # Errors
    /// Returns `FeedbackError::Invalid` for blank fields, otherwise whatever
    /// the notifier reports.
    pub fn send(&self, feedback: &Feedback) -> Result<(), FeedbackError> {
        feedback.validate().map_err(FeedbackError::Invalid)?;

        let result = self.notifier.send(feedback);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Feedback delivery failed");
        }
        result
    }

    /// Run a feedback form's submission synchronously.
    ///
    /// # Errors
    /// Returns `FormError` if the form refuses to submit.
    pub fn submit(&self, form: &mut FeedbackForm) -> Result<(), FormError> {
        let feedback = form.begin_submit()?;
        form.complete(self.send(&feedback));
        Ok(())
    }
}
