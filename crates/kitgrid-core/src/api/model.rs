//! Payloads exchanged with the list and decision collaborators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{GridError, Result};
use crate::record::{Record, RecordId};
use crate::selection::SelectionEntry;

/// Column holding the request date compared by [`ListFilter`].
pub const REQUEST_DATE: &str = "RequestDate";
/// Column holding the project compared by [`ListFilter`].
pub const PROJECT: &str = "Project";

/// The decision applied to every record of a bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn approved(self) -> bool {
        matches!(self, Decision::Approve)
    }

    /// Status written to the secondary status field once applied.
    pub fn resulting_status(self) -> &'static str {
        match self {
            Decision::Approve => "Approved",
            Decision::Reject => "Rejected",
        }
    }

    /// Verb used on the bulk action button.
    pub fn label(self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Reject => "Reject",
        }
    }
}

/// Body of the batch decision submit: `{ "Ids": [...], "Approved": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchDecision {
    pub ids: Vec<RecordId>,
    pub approved: bool,
}

impl BatchDecision {
    pub fn new(decision: Decision, selection: &[SelectionEntry]) -> Self {
        Self {
            ids: selection.iter().map(SelectionEntry::id).collect(),
            approved: decision.approved(),
        }
    }

    pub fn decision(&self) -> Decision {
        if self.approved {
            Decision::Approve
        } else {
            Decision::Reject
        }
    }
}

/// Backend answer to a batch decision.
///
/// The contract is all-or-nothing; any non-empty `failed_ids` turns the
/// whole batch into a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecisionResponse {
    pub success: bool,
    #[serde(default)]
    pub failed_ids: Vec<RecordId>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DecisionResponse {
    pub fn into_result(self) -> Result<()> {
        if !self.failed_ids.is_empty() {
            return Err(GridError::PartialBatchFailure {
                failed: self.failed_ids,
            });
        }
        if !self.success {
            return Err(GridError::network(
                "submit decision",
                self.message
                    .unwrap_or_else(|| "backend rejected the batch".to_string()),
            ));
        }
        Ok(())
    }
}

/// High-level filters forwarded to the list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub project: Option<String>,
    pub status: Option<String>,
}

impl ListFilter {
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Query pairs for an HTTP list endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.date_from {
            pairs.push(("dateFrom", from.to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("dateTo", to.to_string()));
        }
        if let Some(project) = &self.project {
            pairs.push(("project", project.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs
    }

    /// In-process evaluation used by file-backed sources.
    ///
    /// Records without a parseable `RequestDate` fail any date bound.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(project) = &self.project {
            let same = record
                .text_field(PROJECT)
                .is_some_and(|p| p.eq_ignore_ascii_case(project));
            if !same {
                return false;
            }
        }

        if let Some(status) = &self.status
            && record.store_request_status.as_deref() != Some(status.as_str())
        {
            return false;
        }

        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }

        let Some(date) = record
            .text_field(REQUEST_DATE)
            .and_then(|raw| raw.get(..10).and_then(|d| d.parse::<NaiveDate>().ok()))
        else {
            return false;
        };

        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }
}
