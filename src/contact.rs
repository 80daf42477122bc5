//! Contact form validation and submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form posts to a third-party delivery endpoint. Validation runs first
//! and a failing form never reaches the network. The endpoint answers with
//! JSON carrying a boolean `success`; a missing or unreadable answer counts
//! as a transport failure.
//!
//! [`FormView`] is the display state the host mirrors into the page. It is
//! split into [`FormView::begin`] and [`FormView::finish`] so the host can
//! release its borrow while the request is in flight.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::SubmitError;

pub const MSG_FIX_ERRORS: &str = "Please fix the errors above";
pub const MSG_SENT: &str = "Your message has been sent successfully!";
pub const MSG_REJECTED: &str = "Something went wrong. Please try again!";
pub const MSG_NETWORK: &str = "Network error. Please try again later!";

static EMAIL: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// A user-editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    Mobile,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 5] = [Self::FullName, Self::Email, Self::Mobile, Self::Subject, Self::Message];

    /// The input's `name` attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Id of the inline error element below the input.
    #[must_use]
    pub fn error_id(self) -> &'static str {
        match self {
            Self::FullName => "fullNameError",
            Self::Email => "emailError",
            Self::Mobile => "mobileError",
            Self::Subject => "subjectError",
            Self::Message => "messageError",
        }
    }
}

/// Submitted form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub subject: String,
    pub message: String,
    /// Hidden inputs passed through untouched (delivery access key etc.).
    pub hidden: Vec<(String, String)>,
}

impl ContactForm {
    /// Value of a visible field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Copy with every visible field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            mobile: self.mobile.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
            hidden: self.hidden.clone(),
        }
    }

    /// Name/value pairs in submission order, hidden inputs first.
    #[must_use]
    pub fn encode(&self) -> Vec<(String, String)> {
        let mut pairs = self.hidden.clone();
        pairs.extend(Field::ALL.iter().map(|f| (f.name().to_owned(), self.value(*f).to_owned())));
        pairs
    }

    /// Empty the visible fields; hidden inputs keep their values.
    pub fn reset(&mut self) {
        self.full_name.clear();
        self.email.clear();
        self.mobile.clear();
        self.subject.clear();
        self.message.clear();
    }
}

/// An inline validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Whether `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_ok_and(|re| re.is_match(email))
}

/// Check a form. Values are trimmed before checking.
///
/// # Errors
///
/// Returns every failing field, in field order.
pub fn validate(form: &ContactForm) -> Result<(), Vec<FieldError>> {
    let form = form.trimmed();
    let len = |field: Field| form.value(field).chars().count();
    let mut errors = Vec::new();

    if len(Field::FullName) < 2 {
        errors.push(FieldError { field: Field::FullName, message: "Full name must be at least 2 characters" });
    }
    if !is_valid_email(&form.email) {
        errors.push(FieldError { field: Field::Email, message: "Please enter a valid email address" });
    }
    if len(Field::Mobile) < 10 {
        errors.push(FieldError { field: Field::Mobile, message: "Please enter a valid mobile number" });
    }
    if len(Field::Subject) < 5 {
        errors.push(FieldError { field: Field::Subject, message: "Subject must be at least 5 characters" });
    }
    if len(Field::Message) < 10 {
        errors.push(FieldError { field: Field::Message, message: "Message must be at least 10 characters" });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// JSON answer from the delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitReply {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Sends encoded form fields somewhere and returns the endpoint's answer.
pub trait Transport {
    fn post(&self, fields: Vec<(String, String)>) -> impl Future<Output = Result<SubmitReply, SubmitError>>;
}

/// Final result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    /// The endpoint accepted the message.
    Sent,
    /// The endpoint answered with `success: false`.
    Rejected,
    /// No usable answer came back.
    NetworkFailed,
}

impl Outcome {
    /// The summary shown under the form.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Invalid(_) => MSG_FIX_ERRORS,
            Self::Sent => MSG_SENT,
            Self::Rejected => MSG_REJECTED,
            Self::NetworkFailed => MSG_NETWORK,
        }
    }

    #[must_use]
    pub fn tone(&self) -> Tone {
        if matches!(self, Self::Sent) { Tone::Success } else { Tone::Error }
    }
}

/// Styling of the form summary message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    /// CSS modifier class on `.form-message`.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// What the form currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub form: ContactForm,
    pub field_errors: Vec<FieldError>,
    pub summary: Option<(&'static str, Tone)>,
    pub submitting: bool,
}

impl FormView {
    /// Validate `form` and, if it passes, enter the submitting state.
    ///
    /// Returns the fields to send, or `None` when validation failed (the
    /// view then carries the inline errors and summary).
    pub fn begin(&mut self, form: ContactForm) -> Option<Vec<(String, String)>> {
        self.form = form.trimmed();
        self.field_errors.clear();
        self.summary = None;

        if let Err(errors) = validate(&self.form) {
            let outcome = Outcome::Invalid(errors.clone());
            self.summary = Some((outcome.message(), outcome.tone()));
            self.field_errors = errors;
            return None;
        }
        self.submitting = true;
        Some(self.form.encode())
    }

    /// Leave the submitting state with the transport's result.
    pub fn finish(&mut self, result: Result<SubmitReply, SubmitError>) -> Outcome {
        self.submitting = false;
        let outcome = match result {
            Ok(reply) if reply.success => Outcome::Sent,
            Ok(reply) => {
                log::warn!("submission rejected: {}", reply.message.as_deref().unwrap_or("no reason given"));
                Outcome::Rejected
            }
            Err(err) => {
                log::warn!("submission failed: {err}");
                Outcome::NetworkFailed
            }
        };
        if outcome == Outcome::Sent {
            self.form.reset();
        }
        self.summary = Some((outcome.message(), outcome.tone()));
        outcome
    }

    /// Hide the summary message.
    pub fn dismiss(&mut self) {
        self.summary = None;
    }
}

/// Validate and submit `form` through `transport`, updating `view`.
pub async fn submit<T: Transport>(view: &mut FormView, transport: &T, form: ContactForm) -> Outcome {
    let Some(fields) = view.begin(form) else {
        return Outcome::Invalid(view.field_errors.clone());
    };
    let result = transport.post(fields).await;
    view.finish(result)
}

/// Posts to the delivery endpoint with `fetch`, form-encoded.
#[cfg(feature = "hydrate")]
pub struct FetchTransport {
    endpoint: String,
}

#[cfg(feature = "hydrate")]
impl FetchTransport {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

#[cfg(feature = "hydrate")]
impl Transport for FetchTransport {
    async fn post(&self, fields: Vec<(String, String)>) -> Result<SubmitReply, SubmitError> {
        let params = web_sys::UrlSearchParams::new().map_err(|e| SubmitError::Transport(format!("{e:?}")))?;
        for (name, value) in &fields {
            params.append(name, value);
        }
        let resp = gloo_net::http::Request::post(&self.endpoint)
            .header("Accept", "application/json")
            .body(params)
            .map_err(|e| SubmitError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        match resp.json::<SubmitReply>().await {
            Ok(reply) => Ok(reply),
            Err(_) if !resp.ok() => Err(SubmitError::Status(resp.status())),
            Err(e) => Err(SubmitError::Decode(e.to_string())),
        }
    }
}
