//! Quote request submission.
//!
//! A [`QuoteRequest`] bundles contact details with the configuration to be
//! quoted. Requests go through a [`QuoteService`]; the bundled
//! [`MockQuoteService`] simulates a remote endpoint with a delay and a random
//! failure rate.

use std::{path::Path, thread, time::Duration};

use chrono::Utc;
use log::{debug, info, warn};
use rand::{Rng, rngs::ThreadRng};
use serde::Serialize;
use thiserror::Error;

use mezzanine_core::model::Configuration;

use crate::{
    config::QuoteConfig,
    validate::{IssueCode, ValidationError, ValidationIssue},
};

/// File extensions accepted as attachments, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];

const SUCCESS_MESSAGE: &str =
    "Quote request submitted successfully! We will contact you within 24 hours.";
const FAILURE_MESSAGE: &str = "Failed to submit quote request. Please try again later.";
const REQUEST_ID_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const REQUEST_ID_SUFFIX_LEN: usize = 9;

/// Errors raised when submitting a quote request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid quote request")]
    Invalid(#[from] ValidationError),
}

/// A file sent along with a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    file_name: String,
    size_bytes: u64,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns true for images and PDFs.
    pub fn is_accepted(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
    }
}

/// Contact details and the configuration to quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    name: String,
    company: String,
    email: String,
    telephone: String,
    postal_code: String,
    attachments: Vec<Attachment>,
    configuration: Configuration,
    include_installation: bool,
    message: String,
}

impl QuoteRequest {
    /// Create a request with the required contact fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        telephone: impl Into<String>,
        configuration: Configuration,
    ) -> Self {
        Self {
            name: name.into(),
            company: String::new(),
            email: email.into(),
            telephone: telephone.into(),
            postal_code: String::new(),
            attachments: Vec::new(),
            configuration,
            include_installation: false,
            message: String::new(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_installation(mut self, include_installation: bool) -> Self {
        self.include_installation = include_installation;
        self
    }

    /// Attach a file if its type is accepted. Returns false if it was dropped.
    pub fn add_attachment(&mut self, attachment: Attachment) -> bool {
        if !attachment.is_accepted() {
            warn!(file_name = attachment.file_name(); "Dropping attachment of unsupported type");
            return false;
        }
        self.attachments.push(attachment);
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn telephone(&self) -> &str {
        &self.telephone
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn include_installation(&self) -> bool {
        self.include_installation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check the required contact fields.
    ///
    /// # Errors
    ///
    /// Returns every missing field and a malformed email address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("telephone", &self.telephone),
        ] {
            if value.trim().is_empty() {
                issues.push(
                    ValidationIssue::new(IssueCode::V100, format!("{field} is required"))
                        .with_help(format!("provide a {field} so we can reach you")),
                );
            }
        }

        if !self.email.trim().is_empty() && !is_email_shaped(self.email.trim()) {
            issues.push(
                ValidationIssue::new(
                    IssueCode::V101,
                    format!("`{}` is not a valid email address", self.email),
                )
                .with_help("use the form name@example.com"),
            );
        }

        ValidationError::check(issues)
    }
}

/// `local@domain.tld` with no whitespace and non-empty parts.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Outcome of a submission the service accepted for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl QuoteResponse {
    pub fn succeeded(request_id: String) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            request_id: Some(request_id),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
            request_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// Endpoint that receives quote requests.
pub trait QuoteService {
    /// Submit `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the request fails validation. A request
    /// the service rejects is an `Ok` response with `success` false.
    fn submit(&mut self, request: &QuoteRequest) -> Result<QuoteResponse, Error>;
}

/// Simulated quote endpoint.
///
/// Blocks for the configured delay, then succeeds with probability
/// `success_rate`.
#[derive(Debug)]
pub struct MockQuoteService<R = ThreadRng> {
    delay: Duration,
    success_rate: f64,
    rng: R,
}

impl MockQuoteService {
    pub fn new(config: &QuoteConfig) -> Self {
        Self {
            delay: config.delay(),
            success_rate: config.success_rate(),
            rng: rand::rng(),
        }
    }
}

impl<R: Rng> MockQuoteService<R> {
    /// Replace the random source, e.g. with a seeded one.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> MockQuoteService<R2> {
        MockQuoteService {
            delay: self.delay,
            success_rate: self.success_rate,
            rng,
        }
    }

    fn generate_request_id(&mut self) -> String {
        let suffix: String = (0..REQUEST_ID_SUFFIX_LEN)
            .map(|_| {
                let index = self.rng.random_range(0..REQUEST_ID_CHARSET.len());
                char::from(REQUEST_ID_CHARSET[index])
            })
            .collect();
        format!("REQ-{}-{suffix}", Utc::now().timestamp_millis())
    }
}

impl<R: Rng> QuoteService for MockQuoteService<R> {
    fn submit(&mut self, request: &QuoteRequest) -> Result<QuoteResponse, Error> {
        request.validate()?;

        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64; "Simulating network delay");
            thread::sleep(self.delay);
        }

        info!(
            name = request.name(),
            company = request.company(),
            email = request.email(),
            telephone = request.telephone(),
            postal_code = request.postal_code(),
            files_count = request.attachments().len(),
            include_installation = request.include_installation(),
            message = request.message();
            "Quote request submitted"
        );
        debug!(configuration:? = request.configuration(); "Quoted configuration");

        let response = if self.rng.random::<f64>() < self.success_rate {
            QuoteResponse::succeeded(self.generate_request_id())
        } else {
            QuoteResponse::failed()
        };
        info!(success = response.is_success(), request_id:? = response.request_id(); "Quote response");

        Ok(response)
    }
}
