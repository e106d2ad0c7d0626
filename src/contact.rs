//! Contact form state and submission.
//!
//! The form validates the email address on every keystroke, gates the send
//! button on [`ContactForm::can_submit`], and hands a composed
//! [`OutgoingEmail`] to a [`Mailer`]. Delivery failures become an inline
//! message; the fields are kept so the visitor can try again.

use crate::config::ContactConfig;
use maud::html;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{info, warn};

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const SENT: &str = "Message sent successfully! We will get back to you soon.";
pub const SEND_FAILED: &str = "Failed to send message. Please try again later.";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail rejected: {0}")]
    Rejected(String),
    #[error("Mail transport failed: {0}")]
    Transport(String),
}

/// A composed message ready for a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Transactional email delivery.
pub trait Mailer {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Result of the last submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sent,
    Failed,
}

impl SubmitStatus {
    /// Inline message shown under the form.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SubmitStatus::Idle => None,
            SubmitStatus::Sent => Some(SENT),
            SubmitStatus::Failed => Some(SEND_FAILED),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    project_type: String,
    message: String,
    email_error: Option<&'static str>,
    status: SubmitStatus,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn email_error(&self) -> Option<&'static str> {
        self.email_error
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Update the address and re-validate it. An empty address clears the
    /// error rather than flagging it.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.email_error = if self.email.is_empty() || is_valid_email(&self.email) {
            None
        } else {
            Some(INVALID_EMAIL)
        };
    }

    pub fn set_project_type(&mut self, project_type: impl Into<String>) {
        self.project_type = project_type.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
            && is_valid_email(&self.email)
    }

    /// Compose the email this form would send.
    pub fn compose(&self, settings: &ContactConfig) -> OutgoingEmail {
        let body = html! {
            h2 { "New Contact Form Submission" }
            p { strong { "Name:" } " " (self.name) }
            p { strong { "Email:" } " " (self.email) }
            @if !self.project_type.trim().is_empty() {
                p { strong { "Project type:" } " " (self.project_type) }
            }
            p { strong { "Message:" } }
            p { (self.message) }
        };
        OutgoingEmail {
            from: settings.from.clone(),
            to: settings.to.clone(),
            reply_to: self.email.clone(),
            subject: format!("New Contact Form Submission from {}", self.name),
            html: body.into_string(),
        }
    }

    /// Send the form through `mailer`.
    ///
    /// Does nothing unless [`can_submit`](Self::can_submit) holds. On
    /// success the fields are cleared; on failure they are kept and the
    /// send is not retried.
    pub fn submit(&mut self, mailer: &dyn Mailer, settings: &ContactConfig) -> SubmitStatus {
        if !self.can_submit() {
            return self.status;
        }
        self.submitting = true;
        self.status = SubmitStatus::Idle;

        let email = self.compose(settings);
        self.status = match mailer.send(&email) {
            Ok(()) => {
                info!(to = %email.to, "contact message sent");
                self.name.clear();
                self.email.clear();
                self.project_type.clear();
                self.message.clear();
                SubmitStatus::Sent
            }
            Err(e) => {
                warn!(error = %e, "contact message failed");
                SubmitStatus::Failed
            }
        };
        self.submitting = false;
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::RecordingMailer;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_name("Thandi");
        form.set_email("thandi@example.co.za");
        form.set_message("We'd like a quote for a clinic.");
        form
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@studio.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@c.de"));
        assert!(!is_valid_email("a@@c.de"));
    }

    #[test]
    fn invalid_email_sets_error_and_blocks_submit() {
        let mut form = filled();
        form.set_email("a@b");
        assert_eq!(form.email_error(), Some(INVALID_EMAIL));
        assert!(!form.can_submit());

        form.set_email("a@b.co");
        assert_eq!(form.email_error(), None);
        assert!(form.can_submit());
    }

    #[test]
    fn empty_email_clears_error() {
        let mut form = filled();
        form.set_email("nope");
        form.set_email("");
        assert_eq!(form.email_error(), None);
        assert!(!form.can_submit());
    }

    #[test]
    fn blank_fields_block_submit() {
        let mut form = filled();
        form.set_name("   ");
        assert!(!form.can_submit());

        let mut form = filled();
        form.set_message("\n");
        assert!(!form.can_submit());
    }

    // =========================================================================
    // Submission
    // =========================================================================

    #[test]
    fn successful_submit_clears_fields() {
        let mailer = RecordingMailer::default();
        let mut form = filled();
        let status = form.submit(&mailer, &ContactConfig::default());

        assert_eq!(status, SubmitStatus::Sent);
        assert_eq!(status.message(), Some(SENT));
        assert!(form.name().is_empty());
        assert!(form.message().is_empty());
        assert!(!form.is_submitting());

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New Contact Form Submission from Thandi");
        assert_eq!(sent[0].to, ContactConfig::default().to);
        assert_eq!(sent[0].reply_to, "thandi@example.co.za");
    }

    #[test]
    fn failed_submit_keeps_fields_and_does_not_retry() {
        let mailer = RecordingMailer::failing();
        let mut form = filled();
        let status = form.submit(&mailer, &ContactConfig::default());

        assert_eq!(status, SubmitStatus::Failed);
        assert_eq!(status.message(), Some(SEND_FAILED));
        assert_eq!(form.name(), "Thandi");
        assert!(form.can_submit());
        assert_eq!(mailer.sent().len(), 1);
    }

    #[test]
    fn submit_is_a_no_op_when_not_allowed() {
        let mailer = RecordingMailer::default();
        let mut form = ContactForm::new();
        assert_eq!(form.submit(&mailer, &ContactConfig::default()), SubmitStatus::Idle);
        assert!(mailer.sent().is_empty());
    }

    #[test]
    fn body_escapes_user_text() {
        let mut form = filled();
        form.set_name("<script>alert(1)</script>");
        form.set_message("Budget < R2m & \"soon\"");
        let email = form.compose(&ContactConfig::default());
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("Budget &lt; R2m &amp;"));
        assert!(email.html.starts_with("<h2>New Contact Form Submission</h2>"));
    }

    #[test]
    fn project_type_only_when_given() {
        let mut form = filled();
        assert!(!form.compose(&ContactConfig::default()).html.contains("Project type"));
        form.set_project_type("Residential");
        let html = form.compose(&ContactConfig::default()).html;
        assert!(html.contains("<strong>Project type:</strong> Residential"));
    }
}
