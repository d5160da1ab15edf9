//! Transient user notifications ("toasts").

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    /// Shown for every prediction failure regardless of cause.
    pub const PREDICTION_FAILED: Notice = Notice {
        kind: NoticeKind::Error,
        title: "Prediction Failed",
        description: "There was an error processing your request. Please try again.",
    };

    pub const FEEDBACK_SUBMITTED: Notice = Notice {
        kind: NoticeKind::Success,
        title: "Suggestion Submitted",
        description: "Thank you for your feedback!",
    };

    /// Shown for every feedback delivery failure regardless of cause.
    pub const FEEDBACK_FAILED: Notice = Notice {
        kind: NoticeKind::Error,
        title: "Submission Failed",
        description: "There was an error sending your suggestion. Please try again.",
    };

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
