use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::domain::model::opt_cell;
use crate::modules::core_utilities::format_currency;
use crate::modules::patterns::CURRENCY_CODE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
    Business,
}

impl BankAccountType {
    pub const VALUES: &'static [&'static str] = &["checking", "savings", "business"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BankAccountType::Checking => "checking",
            BankAccountType::Savings => "savings",
            BankAccountType::Business => "business",
        }
    }
}

impl fmt::Display for BankAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountStatus {
    Active,
    Frozen,
    Closed,
}

impl fmt::Display for BankAccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BankAccountStatus::Active => "active",
            BankAccountStatus::Frozen => "frozen",
            BankAccountStatus::Closed => "closed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub account_number: String,
    pub account_type: BankAccountType,
    pub balance: f64,
    pub currency: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: BankAccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountFormData {
    pub account_number: String,
    pub account_type: Option<BankAccountType>,
    pub balance: Option<f64>,
    pub currency: String,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BankAccountStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
}

impl Form for BankAccountFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("accountNumber", "Account Number")
                    .rule(Rule::required("Account number is required")),
            )
            .field(
                FieldSpec::new("accountType", "Account Type")
                    .rule(Rule::required("Account type is required"))
                    .rule(Rule::one_of(BankAccountType::VALUES, "Unknown account type")),
            )
            .field(
                FieldSpec::new("balance", "Balance")
                    .rule(Rule::required("Balance is required"))
                    .rule(Rule::min(0.0, "Balance cannot be negative")),
            )
            .field(
                FieldSpec::new("currency", "Currency")
                    .rule(Rule::required("Currency is required"))
                    .rule(Rule::pattern(&CURRENCY_CODE, "Currency must be a 3-letter code")),
            )
            .field(FieldSpec::new("ownerId", "Owner ID").rule(Rule::required("Owner ID is required")))
            .field(FieldSpec::new("status", "Status"))
            .field(
                FieldSpec::new("overdraftLimit", "Overdraft Limit")
                    .rule(Rule::min(0.0, "Overdraft limit cannot be negative")),
            )
            .field(
                FieldSpec::new("interestRate", "Interest Rate")
                    .rule(Rule::min(0.0, "Interest rate cannot be negative"))
                    .rule(Rule::max(100.0, "Interest rate cannot exceed 100%")),
            )
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "accountNumber" => FieldValue::text(&self.account_number),
            "accountType" => match self.account_type {
                Some(t) => FieldValue::text(t.as_str()),
                None => FieldValue::Missing,
            },
            "balance" => FieldValue::opt_number(self.balance),
            "currency" => FieldValue::text(&self.currency),
            "ownerId" => FieldValue::text(&self.owner_id),
            "status" => match self.status {
                Some(s) => FieldValue::Text(s.to_string()),
                None => FieldValue::Missing,
            },
            "overdraftLimit" => FieldValue::opt_number(self.overdraft_limit),
            "interestRate" => FieldValue::opt_number(self.interest_rate),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for BankAccount {
    type Id = String;
    type FormData = BankAccountFormData;

    const LABELS: Labels = Labels {
        title: "Bank Account Management",
        singular: "bank account",
        plural: "bank accounts",
    };
    const PATH: &'static str = "bank-accounts";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Account Number", |a: &Self| a.account_number.clone()),
            Column::new("Type", |a: &Self| a.account_type.to_string()),
            Column::new("Balance", |a: &Self| format_currency(a.balance, &a.currency)),
            Column::new("Owner", |a: &Self| a.owner_id.clone()),
            Column::new("Status", |a: &Self| a.status.to_string()),
            Column::new("Overdraft", |a: &Self| opt_cell(&a.overdraft_limit)),
        ]
    }
}
