//! Shared banking helpers (currency formatting, ad-hoc input validation, user-facing error
//! mapping, activity logging) plus the Core Utilities screen itself.

use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::modules::patterns::MONEY_AMOUNT;
use crate::utils::error::{BankError, ErrorCategory};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

fn minor_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `format_currency(1234.5, "USD")` gives `$1,234.50`; codes without a known symbol are
/// appended instead, `1,234.50 CHF`.
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    let digits = minor_digits(&code);
    let fixed = format!("{:.*}", digits, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut number = group_thousands(whole);
    if let Some(fraction) = fraction {
        number.push('.');
        number.push_str(fraction);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match currency_symbol(&code) {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, number, code),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationRuleKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: ValidationRuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

fn rule_length(rule: &ValidationRule) -> Option<usize> {
    match &rule.value {
        Some(serde_json::Value::Number(n)) => n.as_u64().map(|n| n as usize),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Unlike the record forms this reports every failing rule, not just the first.
pub fn validate_input(input: &str, rules: &[ValidationRule]) -> ValidationResult {
    let len = input.chars().count();
    let mut errors = Vec::new();

    for rule in rules {
        let failed = match rule.kind {
            ValidationRuleKind::Required => input.trim().is_empty(),
            ValidationRuleKind::MinLength => rule_length(rule).is_some_and(|min| len < min),
            ValidationRuleKind::MaxLength => rule_length(rule).is_some_and(|max| len > max),
            ValidationRuleKind::Pattern => {
                let pattern = rule.value.as_ref().and_then(|v| v.as_str()).unwrap_or_default();
                match Regex::new(pattern) {
                    Ok(re) => !re.is_match(input),
                    Err(e) => {
                        tracing::warn!("Ignoring input, invalid pattern '{}': {}", pattern, e);
                        true
                    }
                }
            }
        };
        if failed {
            errors.push(rule.message.clone());
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFriendlyError {
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

pub fn handle_error(error: &BankError) -> UserFriendlyError {
    let title = match error.category() {
        ErrorCategory::Network => "Connection problem",
        ErrorCategory::Server => "Request failed",
        ErrorCategory::Data => "Unexpected data",
        ErrorCategory::Configuration => "Configuration problem",
        ErrorCategory::Validation => "Check your input",
        ErrorCategory::System => "System error",
    };

    let code = match error {
        BankError::HttpStatusError { status, .. } => Some(format!("HTTP_{}", status)),
        BankError::NotFoundError { .. } => Some("NOT_FOUND".to_string()),
        BankError::ValidationError(_) => Some("VALIDATION".to_string()),
        _ => None,
    };

    UserFriendlyError {
        title: title.to_string(),
        message: error.user_friendly_message(),
        code,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ActivityLog {
    pub fn now(action: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.to_string(),
            details: serde_json::Map::new(),
            user_id: None,
        }
    }
}

pub fn log_activity(activity: &ActivityLog) {
    let details = serde_json::Value::Object(activity.details.clone());
    tracing::info!(
        action = %activity.action,
        user_id = activity.user_id.as_deref().unwrap_or("anonymous"),
        timestamp = %activity.timestamp.to_rfc3339(),
        details = %details,
        "activity"
    );
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreUtility {
    pub id: String,
    pub amount: f64,
    pub account_number: String,
    pub description: String,
    #[serde(default)]
    pub log_activity: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreUtilityFormData {
    /// Kept as typed so the two-decimal format check sees exactly what was entered.
    pub amount: String,
    pub account_number: String,
    pub description: String,
    #[serde(default)]
    pub log_activity: bool,
}

impl Form for CoreUtilityFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("amount", "Amount")
                    .rule(Rule::required("Amount is required"))
                    .rule(Rule::pattern(&MONEY_AMOUNT, "Invalid currency format")),
            )
            .field(
                FieldSpec::new("accountNumber", "Account Number")
                    .rule(Rule::required("Account number is required"))
                    .rule(Rule::min_length(8, "Account number must be at least 8 characters"))
                    .rule(Rule::max_length(12, "Account number cannot exceed 12 characters")),
            )
            .field(
                FieldSpec::new("description", "Description")
                    .rule(Rule::required("Description is required"))
                    .rule(Rule::max_length(100, "Description cannot exceed 100 characters")),
            )
            .field(FieldSpec::new("logActivity", "Log this activity"))
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "amount" => FieldValue::text(&self.amount),
            "accountNumber" => FieldValue::text(&self.account_number),
            "description" => FieldValue::text(&self.description),
            "logActivity" => FieldValue::Bool(self.log_activity),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for CoreUtility {
    type Id = String;
    type FormData = CoreUtilityFormData;

    const LABELS: Labels = Labels {
        title: "Core Utilities",
        singular: "utility",
        plural: "utilities",
    };
    const PATH: &'static str = "core-utilities";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Amount", |c: &Self| format!("{:.2}", c.amount)),
            Column::new("Account Number", |c: &Self| c.account_number.clone()),
            Column::new("Description", |c: &Self| c.description.clone()),
            Column::new("Logged", |c: &Self| c.log_activity.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::FormErrors;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_currency(10.0, "eur"), "€10.00");
        assert_eq!(format_currency(1234567.0, "JPY"), "¥1,234,567");
        assert_eq!(format_currency(1234.5, "CHF"), "1,234.50 CHF");
        assert_eq!(format_currency(-42.1, "GBP"), "-£42.10");
        assert_eq!(format_currency(999.999, "USD"), "$1,000.00");
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn test_validate_input_collects_every_failure() {
        let rules: Vec<ValidationRule> = serde_json::from_value(serde_json::json!([
            {"type": "required", "message": "Required"},
            {"type": "minLength", "value": 8, "message": "Too short"},
            {"type": "pattern", "value": "^[0-9]+$", "message": "Digits only"}
        ]))
        .unwrap();

        let result = validate_input("12ab", &rules);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Too short", "Digits only"]);

        let result = validate_input("12345678", &rules);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_validate_input_max_length_from_string_value() {
        let rules = vec![ValidationRule {
            kind: ValidationRuleKind::MaxLength,
            value: Some(serde_json::json!("3")),
            message: "Too long".to_string(),
        }];
        assert_eq!(validate_input("abcd", &rules).errors, vec!["Too long"]);
    }

    #[test]
    fn test_handle_error_codes() {
        let err = BankError::HttpStatusError {
            method: "DELETE".to_string(),
            url: "http://localhost:3000/api/core-utilities/1".to_string(),
            status: 409,
        };
        let friendly = handle_error(&err);
        assert_eq!(friendly.title, "Request failed");
        assert_eq!(friendly.code.as_deref(), Some("HTTP_409"));

        let friendly = handle_error(&BankError::ValidationError(FormErrors::new()));
        assert_eq!(friendly.title, "Check your input");
    }

    #[test]
    fn test_amount_format_rule() {
        let form = CoreUtilityFormData {
            amount: "12.345".to_string(),
            account_number: "12345678".to_string(),
            description: "fee".to_string(),
            log_activity: true,
        };
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("amount"), Some("Invalid currency format"));

        let form = CoreUtilityFormData {
            amount: "12.34".to_string(),
            account_number: "1234567890123".to_string(),
            ..form
        };
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert!(errors.get("amount").is_none());
        assert_eq!(
            errors.get("accountNumber"),
            Some("Account number cannot exceed 12 characters")
        );
    }

    #[test]
    fn test_activity_log_wire_format() {
        let log: ActivityLog = serde_json::from_value(serde_json::json!({
            "timestamp": "2024-05-01T10:00:00Z",
            "action": "transfer.submitted",
            "details": {"amount": 10},
            "userId": "u-1"
        }))
        .unwrap();
        assert_eq!(log.user_id.as_deref(), Some("u-1"));
        log_activity(&log);
    }
}
