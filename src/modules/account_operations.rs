use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationAccountType {
    Checking,
    Savings,
    Loan,
    Credit,
}

impl OperationAccountType {
    pub const VALUES: &'static [&'static str] = &["checking", "savings", "loan", "credit"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationAccountType::Checking => "checking",
            OperationAccountType::Savings => "savings",
            OperationAccountType::Loan => "loan",
            OperationAccountType::Credit => "credit",
        }
    }
}

impl fmt::Display for OperationAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Active,
    Closed,
    Suspended,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationStatus::Active => "active",
            OperationStatus::Closed => "closed",
            OperationStatus::Suspended => "suspended",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOperation {
    pub id: String,
    pub account_number: String,
    pub account_type: OperationAccountType,
    pub balance: f64,
    pub owner_id: String,
    pub status: OperationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opening form; the closing flow reuses it with `account_number`, `verification_id` and
/// `close_reason` filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOperationFormData {
    pub account_type: Option<OperationAccountType>,
    pub initial_deposit: Option<f64>,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<String>,
}

impl Form for AccountOperationFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("accountType", "Account Type")
                    .rule(Rule::required("Account type is required"))
                    .rule(Rule::one_of(OperationAccountType::VALUES, "Unknown account type")),
            )
            .field(
                FieldSpec::new("initialDeposit", "Initial Deposit")
                    .rule(Rule::required("Initial deposit is required"))
                    .rule(Rule::min(0.0, "Amount must be positive")),
            )
            .field(FieldSpec::new("ownerId", "Owner ID").rule(Rule::required("Owner ID is required")))
            .field(FieldSpec::new("accountNumber", "Account Number"))
            .field(FieldSpec::new("verificationId", "Verification ID"))
            .field(
                FieldSpec::new("closeReason", "Close Reason")
                    .rule(Rule::max_length(200, "Close reason cannot exceed 200 characters")),
            )
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "accountType" => match self.account_type {
                Some(t) => FieldValue::text(t.as_str()),
                None => FieldValue::Missing,
            },
            "initialDeposit" => FieldValue::opt_number(self.initial_deposit),
            "ownerId" => FieldValue::text(&self.owner_id),
            "accountNumber" => FieldValue::opt_text(&self.account_number),
            "verificationId" => FieldValue::opt_text(&self.verification_id),
            "closeReason" => FieldValue::opt_text(&self.close_reason),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for AccountOperation {
    type Id = String;
    type FormData = AccountOperationFormData;

    const LABELS: Labels = Labels {
        title: "Account Operations",
        singular: "item",
        plural: "items",
    };
    const PATH: &'static str = "account-operations";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Account Number", |a: &Self| a.account_number.clone()),
            Column::new("Type", |a: &Self| a.account_type.to_string()),
            Column::new("Balance", |a: &Self| format!("{:.2}", a.balance)),
            Column::new("Owner", |a: &Self| a.owner_id.clone()),
            Column::new("Status", |a: &Self| a.status.to_string()),
            Column::new("Opened", |a: &Self| a.created_at.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_deposit_rejected() {
        let form = AccountOperationFormData {
            account_type: Some(OperationAccountType::Loan),
            initial_deposit: Some(-5.0),
            owner_id: "u-3".to_string(),
            account_number: None,
            verification_id: None,
            close_reason: None,
        };
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("initialDeposit"), Some("Amount must be positive"));
    }

    #[test]
    fn test_zero_deposit_allowed() {
        let form = AccountOperationFormData {
            account_type: Some(OperationAccountType::Checking),
            initial_deposit: Some(0.0),
            owner_id: "u-3".to_string(),
            account_number: None,
            verification_id: None,
            close_reason: None,
        };
        assert!(form.validate(FormMode::Create).is_ok());
    }
}
