use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::domain::model::opt_cell;
use crate::modules::core_utilities::format_currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionType {
    pub const VALUES: &'static [&'static str] = &["deposit", "withdrawal", "transfer"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_account_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Deposit, withdrawal and transfer all submit this one flat payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFormData {
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Form for TransactionFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("transactionType", "Transaction Type")
                    .rule(Rule::required("Transaction type is required"))
                    .rule(Rule::one_of(TransactionType::VALUES, "Unknown transaction type")),
            )
            .field(
                FieldSpec::new("amount", "Amount")
                    .rule(Rule::required("Amount is required"))
                    .rule(Rule::min(0.01, "Amount must be greater than 0")),
            )
            .field(
                FieldSpec::new("accountId", "Account ID")
                    .rule(Rule::required("Account ID is required")),
            )
            .field(
                FieldSpec::new("targetAccountId", "Target Account ID (for transfers)").rule(
                    Rule::required_when(
                        "transactionType",
                        "transfer",
                        "Target account is required for transfers",
                    ),
                ),
            )
            .field(
                FieldSpec::new("description", "Description").rule(Rule::max_length(
                    100,
                    "Description must be less than 100 characters",
                )),
            )
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "transactionType" => match self.transaction_type {
                Some(t) => FieldValue::text(t.as_str()),
                None => FieldValue::Missing,
            },
            "amount" => FieldValue::opt_number(self.amount),
            "currency" => FieldValue::text(&self.currency),
            "accountId" => FieldValue::text(&self.account_id),
            "targetAccountId" => FieldValue::opt_text(&self.target_account_id),
            "description" => FieldValue::opt_text(&self.description),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for Transaction {
    type Id = String;
    type FormData = TransactionFormData;

    const LABELS: Labels = Labels {
        title: "Transaction Management",
        singular: "transaction",
        plural: "transactions",
    };
    const PATH: &'static str = "transactions";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Date", |t: &Self| t.timestamp.format("%Y-%m-%d %H:%M").to_string()),
            Column::new("Account", |t: &Self| t.account_id.clone()),
            Column::new("Type", |t: &Self| t.transaction_type.to_string()),
            Column::new("Amount", |t: &Self| format_currency(t.amount, &t.currency)),
            Column::new("Recipient", |t: &Self| opt_cell(&t.recipient_account_id)),
            Column::new("Status", |t: &Self| t.status.to_string()),
            Column::new("Description", |t: &Self| opt_cell(&t.description)),
        ]
    }
}
