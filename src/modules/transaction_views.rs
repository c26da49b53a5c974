use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::domain::model::opt_cell;
use crate::modules::core_utilities::format_currency;
use crate::modules::transactions::{TransactionStatus, TransactionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionViewFormData {
    pub amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Form for TransactionViewFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(FieldSpec::new("amount", "Amount").rule(Rule::required("Amount is required")))
            .field(
                FieldSpec::new("description", "Description")
                    .rule(Rule::required("Description is required")),
            )
            .field(FieldSpec::new("recipient", "Recipient (for transfers)"))
            .field(
                FieldSpec::new("transactionType", "Transaction Type")
                    .rule(Rule::required("Transaction type is required")),
            )
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "amount" => FieldValue::opt_number(self.amount),
            "currency" => FieldValue::text(&self.currency),
            "description" => FieldValue::text(&self.description),
            "recipient" => FieldValue::opt_text(&self.recipient),
            "transactionType" => match self.transaction_type {
                Some(t) => FieldValue::text(t.as_str()),
                None => FieldValue::Missing,
            },
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for TransactionView {
    type Id = String;
    type FormData = TransactionViewFormData;

    const LABELS: Labels = Labels {
        title: "Transaction Views",
        singular: "transaction view",
        plural: "transaction views",
    };
    const PATH: &'static str = "transaction-views";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Date", |t: &Self| t.timestamp.format("%Y-%m-%d").to_string()),
            Column::new("Type", |t: &Self| t.transaction_type.to_string()),
            Column::new("Amount", |t: &Self| format_currency(t.amount, &t.currency)),
            Column::new("Status", |t: &Self| t.status.to_string()),
            Column::new("Recipient", |t: &Self| opt_cell(&t.recipient)),
            Column::new("Reference", |t: &Self| opt_cell(&t.reference)),
        ]
    }
}
