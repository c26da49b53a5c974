use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::modules::core_utilities::format_currency;
use crate::modules::patterns::CURRENCY_CODE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub account_type: String,
    pub currency: String,
    pub balance: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountViewFormData {
    pub account_type: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_deposit: Option<f64>,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
}

impl Form for AccountViewFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("accountType", "Account Type")
                    .rule(Rule::required("This field is required")),
            )
            .field(
                FieldSpec::new("currency", "Currency")
                    .rule(Rule::required("This field is required"))
                    .rule(Rule::pattern(&CURRENCY_CODE, "Currency must be a 3-letter code")),
            )
            .field(
                FieldSpec::new("initialDeposit", "Initial Deposit")
                    .rule(Rule::min(0.0, "Initial deposit cannot be negative")),
            )
            .field(
                FieldSpec::new("termsAccepted", "I accept the terms and conditions")
                    .rule(Rule::required("You must accept the terms")),
            )
            .field(FieldSpec::new("closureReason", "Closure Reason"))
            .field(FieldSpec::new("transferAccountId", "Transfer Remaining Balance To"))
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "accountType" => FieldValue::text(&self.account_type),
            "currency" => FieldValue::text(&self.currency),
            "initialDeposit" => FieldValue::opt_number(self.initial_deposit),
            "termsAccepted" => FieldValue::Bool(self.terms_accepted),
            "closureReason" => FieldValue::opt_text(&self.closure_reason),
            "transferAccountId" => FieldValue::opt_text(&self.transfer_account_id),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for AccountView {
    type Id = String;
    type FormData = AccountViewFormData;

    const LABELS: Labels = Labels {
        title: "Account Views",
        singular: "view",
        plural: "views",
    };
    const PATH: &'static str = "account-views";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const SYNC: SyncStrategy = SyncStrategy::Local;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Account", |a: &Self| a.id.clone()),
            Column::new("Type", |a: &Self| a.account_type.clone()),
            Column::new("Balance", |a: &Self| format_currency(a.balance, &a.currency)),
            Column::new("Active", |a: &Self| {
                String::from(if a.is_active { "yes" } else { "no" })
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_must_be_accepted() {
        let form = AccountViewFormData {
            account_type: "savings".to_string(),
            currency: "EUR".to_string(),
            ..Default::default()
        };
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("termsAccepted"), Some("You must accept the terms"));

        let form = AccountViewFormData {
            terms_accepted: true,
            ..form
        };
        assert!(form.validate(FormMode::Create).is_ok());
    }
}
