//! Input validation for configurations and quote requests.
//!
//! The engines accept any decoded [`Configuration`]; callers run [`validate`]
//! first to reject input outside the ranges the configurator offers. Every
//! problem is collected so a user sees all of them at once.

use std::{
    collections::HashSet,
    fmt::{self, Display},
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use mezzanine_core::model::{AccessoryKind, Configuration};

/// Stable codes identifying each kind of validation issue.
///
/// Codes are grouped by range:
///
/// - V0xx: configuration issues
/// - V1xx: quote request issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// Dimension below its minimum.
    V001,

    /// Dimension above its maximum.
    V002,

    /// Dimension not a multiple of the step.
    ///
    /// Dimensions are picked in fixed increments, 100 mm by default.
    V003,

    /// Accessory quantity out of range.
    V004,

    /// Railing length out of range.
    ///
    /// Also reported for a length that is not a finite number.
    V005,

    /// Duplicate accessory id.
    ///
    /// Two accessories in one configuration share an id, so updates and
    /// removals by id would be ambiguous.
    V006,

    /// Empty accessory id.
    V007,

    /// Required quote field missing.
    V100,

    /// Malformed email address.
    V101,
}

impl IssueCode {
    /// Returns the code as a string (e.g., "V001").
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::V001 => "V001",
            IssueCode::V002 => "V002",
            IssueCode::V003 => "V003",
            IssueCode::V004 => "V004",
            IssueCode::V005 => "V005",
            IssueCode::V006 => "V006",
            IssueCode::V007 => "V007",
            IssueCode::V100 => "V100",
            IssueCode::V101 => "V101",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single problem found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    code: IssueCode,
    message: String,
    help: Option<String>,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Attach a hint on how to fix the issue.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> IssueCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// All issues found in one validation pass. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation issue(s) found", issues.len())]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Turn collected issues into a result: `Ok` when there are none.
    pub(crate) fn check(issues: Vec<ValidationIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

/// Inclusive range for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: Copy + PartialOrd> Range<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Accepted input ranges, loaded from the `[limits]` configuration section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Limits {
    length_mm: Range<u32>,
    width_mm: Range<u32>,
    height_mm: Range<u32>,
    dimension_step_mm: u32,
    quantity: Range<u32>,
    railing_length_m: Range<f64>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            length_mm: Range::new(2_000, 20_000),
            width_mm: Range::new(2_000, 20_000),
            height_mm: Range::new(2_000, 6_000),
            dimension_step_mm: 100,
            quantity: Range::new(1, 20),
            railing_length_m: Range::new(1.0, 50.0),
        }
    }
}

impl Limits {
    pub fn length_mm(&self) -> Range<u32> {
        self.length_mm
    }

    pub fn width_mm(&self) -> Range<u32> {
        self.width_mm
    }

    pub fn height_mm(&self) -> Range<u32> {
        self.height_mm
    }

    pub fn dimension_step_mm(&self) -> u32 {
        self.dimension_step_mm
    }

    pub fn quantity(&self) -> Range<u32> {
        self.quantity
    }

    pub fn railing_length_m(&self) -> Range<f64> {
        self.railing_length_m
    }

    fn check_dimension(&self, name: &str, value: u32, range: Range<u32>) -> Option<ValidationIssue> {
        if value < range.min() {
            return Some(
                ValidationIssue::new(
                    IssueCode::V001,
                    format!("{name} of {value} mm is below the minimum of {} mm", range.min()),
                )
                .with_help(format!("use a {name} between {} and {} mm", range.min(), range.max())),
            );
        }
        if value > range.max() {
            return Some(
                ValidationIssue::new(
                    IssueCode::V002,
                    format!("{name} of {value} mm exceeds the maximum of {} mm", range.max()),
                )
                .with_help(format!("use a {name} between {} and {} mm", range.min(), range.max())),
            );
        }
        let step = self.dimension_step_mm;
        if step > 0 && value % step != 0 {
            return Some(
                ValidationIssue::new(
                    IssueCode::V003,
                    format!("{name} of {value} mm is not a multiple of {step} mm"),
                )
                .with_help(format!("round the {name} to the nearest {step} mm")),
            );
        }
        None
    }
}

/// Check `config` against `limits`, collecting every issue.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing all issues when any check fails.
pub fn validate(config: &Configuration, limits: &Limits) -> Result<(), ValidationError> {
    let mut issues: Vec<ValidationIssue> = [
        limits.check_dimension("length", config.length(), limits.length_mm),
        limits.check_dimension("width", config.width(), limits.width_mm),
        limits.check_dimension("height", config.height(), limits.height_mm),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut seen = HashSet::new();
    for accessory in config.accessories() {
        let id = accessory.id();
        if id.is_empty() {
            issues.push(
                ValidationIssue::new(IssueCode::V007, "accessory has an empty id")
                    .with_help("give every accessory a non-empty identifier"),
            );
        } else if !seen.insert(id.as_str()) {
            issues.push(
                ValidationIssue::new(IssueCode::V006, format!("accessory id `{id}` is used more than once"))
                    .with_help("accessory ids must be unique within a configuration"),
            );
        }

        if !limits.quantity.contains(accessory.quantity()) {
            issues.push(
                ValidationIssue::new(
                    IssueCode::V004,
                    format!(
                        "accessory `{id}` has quantity {}, expected {} to {}",
                        accessory.quantity(),
                        limits.quantity.min(),
                        limits.quantity.max()
                    ),
                )
                .with_help("remove the accessory instead of setting its quantity to zero"),
            );
        }

        if let AccessoryKind::Railing { length_meters } = *accessory.kind() {
            if length_meters.is_finite() && limits.railing_length_m.contains(length_meters) {
                continue;
            }
            issues.push(
                ValidationIssue::new(
                    IssueCode::V005,
                    format!(
                        "railing `{id}` is {length_meters} m long, expected {} to {} m",
                        limits.railing_length_m.min(),
                        limits.railing_length_m.max()
                    ),
                )
                .with_help("split longer runs into several railing entries"),
            );
        }
    }

    debug!(issues_len = issues.len(); "Configuration validated");
    ValidationError::check(issues)
}
