//! Request types for the SplitBill API.
//!
//! Amounts arrive the way a form submits them: as text or as JSON numbers.
//! They are parsed into decimals here before anything reaches the calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_amount, parse_manual_amount};
use crate::error::ValidationResult;
use crate::models::{ManualEntry, SplitInput, SplitLine};

/// An amount as submitted by a client.
///
/// `"12.50"` and `12.5` are both accepted; anything that is not a plain
/// decimal number is rejected when parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountText {
    /// A JSON string.
    Text(String),
    /// A JSON number.
    Number(serde_json::Number),
}

impl AmountText {
    /// Returns the amount as the user typed it.
    pub fn raw(&self) -> String {
        match self {
            AmountText::Text(text) => text.clone(),
            AmountText::Number(number) => number.to_string(),
        }
    }
}

fn parse_total(total: Option<&AmountText>) -> ValidationResult<Decimal> {
    parse_amount(&total.map(AmountText::raw).unwrap_or_default())
}

/// A manual override for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntryRequest {
    /// The participant the amount belongs to.
    pub participant_id: String,
    /// The typed amount; absent or blank means "not set".
    #[serde(default)]
    pub amount: Option<AmountText>,
}

/// Parses manual entries, keeping only the ones that override the equal split.
///
/// Entries for participants outside the selection are dropped unparsed.
fn parse_manual_entries(
    participants: &[String],
    entries: &[ManualEntryRequest],
) -> ValidationResult<Vec<ManualEntry>> {
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        if !participants.contains(&entry.participant_id) {
            continue;
        }
        let raw = entry.amount.as_ref().map(AmountText::raw).unwrap_or_default();
        if let Some(amount) = parse_manual_amount(&entry.participant_id, &raw)? {
            parsed.push(ManualEntry::new(entry.participant_id.clone(), amount));
        }
    }
    Ok(parsed)
}

/// Request body for `POST /api/splits/preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPreviewRequest {
    /// The expense total.
    #[serde(default)]
    pub total: Option<AmountText>,
    /// Selected participant ids, in selection order.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Amounts typed for individual participants.
    #[serde(default)]
    pub manual_entries: Vec<ManualEntryRequest>,
}

impl SplitPreviewRequest {
    /// Parses the request into calculator input.
    ///
    /// The total is parsed first, so a bad total is reported before any
    /// problem with the manual entries.
    pub fn to_split_input(&self) -> ValidationResult<SplitInput> {
        let total = parse_total(self.total.as_ref())?;
        Ok(SplitInput {
            total,
            participants: self.participants.clone(),
            manual_entries: parse_manual_entries(&self.participants, &self.manual_entries)?,
        })
    }
}

/// Request body for `POST /api/splits/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateSplitRequest {
    /// The expense total.
    #[serde(default)]
    pub total: Option<AmountText>,
    /// Selected participant ids.
    #[serde(default)]
    pub participants: Vec<String>,
    /// The split to check.
    #[serde(default)]
    pub lines: Vec<SplitLine>,
}

impl ValidateSplitRequest {
    /// Parses the total.
    pub fn parsed_total(&self) -> ValidationResult<Decimal> {
        parse_total(self.total.as_ref())
    }
}

/// Request body for `POST /api/expenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// What the money was spent on.
    pub description: String,
    /// The expense total.
    #[serde(default)]
    pub amount: Option<AmountText>,
    /// The group the expense belongs to.
    pub group_id: String,
    /// The participant who paid.
    pub paid_by: String,
    /// Selected participant ids, in selection order.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Amounts typed for individual participants.
    #[serde(default)]
    pub manual_entries: Vec<ManualEntryRequest>,
    /// A split computed by the client; when absent the split is computed here.
    #[serde(default)]
    pub splits: Option<Vec<SplitLine>>,
    /// Free-form category.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateExpenseRequest {
    /// Parses the amount and manual entries into calculator input.
    pub fn to_split_input(&self) -> ValidationResult<SplitInput> {
        let total = parse_total(self.amount.as_ref())?;
        Ok(SplitInput {
            total,
            participants: self.participants.clone(),
            manual_entries: parse_manual_entries(&self.participants, &self.manual_entries)?,
        })
    }
}

/// Query string for `GET /api/groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsQuery {
    /// The participant whose groups are listed.
    pub member: String,
}

/// Query string for `DELETE /api/expenses/:expense_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteExpenseQuery {
    /// The participant asking for the deletion.
    pub requested_by: String,
}
