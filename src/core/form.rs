//! Declarative field validation for the record forms.
//!
//! Every form data struct describes its fields once through [`Form::schema`] and exposes its
//! current values through [`Form::value`]. Rules run in declaration order and only the first
//! failing rule of a field is reported, so a field shows at most one inline message. Rules other
//! than [`Rule::Required`], [`Rule::RequiredWhen`] and [`Rule::Matches`] are skipped for empty
//! values: an optional field is only checked once the user typed something into it.

use crate::utils::error::{BankError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<f64>),
    Bool(bool),
    Missing,
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    pub fn opt_text(value: &Option<String>) -> Self {
        match value {
            Some(v) => FieldValue::Text(v.clone()),
            None => FieldValue::Missing,
        }
    }

    pub fn number(value: f64) -> Self {
        FieldValue::Number(Some(value))
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        FieldValue::Number(value)
    }

    /// Empty means "nothing entered": blank text, no number, an unticked checkbox.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(n) => n.is_none(),
            FieldValue::Bool(b) => !b,
            FieldValue::Missing => true,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(Some(n)) => Some(n.to_string()),
            FieldValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    Required {
        message: String,
    },
    MinLength {
        min: usize,
        message: String,
    },
    MaxLength {
        max: usize,
        message: String,
    },
    Pattern {
        regex: &'static Regex,
        message: String,
    },
    /// Every pattern must match somewhere in the value.
    AllOf {
        patterns: Vec<&'static Regex>,
        message: String,
    },
    Min {
        min: f64,
        message: String,
    },
    Max {
        max: f64,
        message: String,
    },
    /// Cross-field equality, e.g. confirm password.
    Matches {
        field: &'static str,
        message: String,
    },
    /// Required only while another field holds `equals`.
    RequiredWhen {
        field: &'static str,
        equals: &'static str,
        message: String,
    },
    OneOf {
        values: &'static [&'static str],
        message: String,
    },
}

impl Rule {
    pub fn required(message: &str) -> Self {
        Rule::Required {
            message: message.to_string(),
        }
    }

    pub fn min_length(min: usize, message: &str) -> Self {
        Rule::MinLength {
            min,
            message: message.to_string(),
        }
    }

    pub fn max_length(max: usize, message: &str) -> Self {
        Rule::MaxLength {
            max,
            message: message.to_string(),
        }
    }

    pub fn pattern(regex: &'static Regex, message: &str) -> Self {
        Rule::Pattern {
            regex,
            message: message.to_string(),
        }
    }

    pub fn all_of(patterns: Vec<&'static Regex>, message: &str) -> Self {
        Rule::AllOf {
            patterns,
            message: message.to_string(),
        }
    }

    pub fn min(min: f64, message: &str) -> Self {
        Rule::Min {
            min,
            message: message.to_string(),
        }
    }

    pub fn max(max: f64, message: &str) -> Self {
        Rule::Max {
            max,
            message: message.to_string(),
        }
    }

    pub fn matches(field: &'static str, message: &str) -> Self {
        Rule::Matches {
            field,
            message: message.to_string(),
        }
    }

    pub fn required_when(field: &'static str, equals: &'static str, message: &str) -> Self {
        Rule::RequiredWhen {
            field,
            equals,
            message: message.to_string(),
        }
    }

    pub fn one_of(values: &'static [&'static str], message: &str) -> Self {
        Rule::OneOf {
            values,
            message: message.to_string(),
        }
    }

    /// Returns the message when the rule fails for `value`.
    fn check(&self, value: &FieldValue, lookup: &dyn Fn(&str) -> FieldValue) -> Option<&str> {
        match self {
            Rule::Required { message } => value.is_empty().then_some(message.as_str()),
            Rule::RequiredWhen {
                field,
                equals,
                message,
            } => {
                let active = lookup(field).as_text().as_deref() == Some(*equals);
                (active && value.is_empty()).then_some(message.as_str())
            }
            Rule::Matches { field, message } => {
                let other = lookup(field).as_text().unwrap_or_default();
                let mine = value.as_text().unwrap_or_default();
                (other != mine).then_some(message.as_str())
            }
            _ if value.is_empty() => None,
            Rule::MinLength { min, message } => {
                let len = value.as_text().map(|s| s.chars().count()).unwrap_or(0);
                (len < *min).then_some(message.as_str())
            }
            Rule::MaxLength { max, message } => {
                let len = value.as_text().map(|s| s.chars().count()).unwrap_or(0);
                (len > *max).then_some(message.as_str())
            }
            Rule::Pattern { regex, message } => {
                let text = value.as_text().unwrap_or_default();
                (!regex.is_match(&text)).then_some(message.as_str())
            }
            Rule::AllOf { patterns, message } => {
                let text = value.as_text().unwrap_or_default();
                (!patterns.iter().all(|re| re.is_match(&text))).then_some(message.as_str())
            }
            Rule::Min { min, message } => match value.as_number() {
                Some(n) if n >= *min => None,
                _ => Some(message.as_str()),
            },
            Rule::Max { max, message } => match value.as_number() {
                Some(n) if n <= *max => None,
                _ => Some(message.as_str()),
            },
            Rule::OneOf { values, message } => {
                let text = value.as_text().unwrap_or_default();
                (!values.contains(&text.as_str())).then_some(message.as_str())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Field name to inline message, first failing rule only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub trait Form {
    fn schema(mode: FormMode) -> FormSchema;

    fn value(&self, field: &str) -> FieldValue;

    fn validate(&self, mode: FormMode) -> std::result::Result<(), FormErrors> {
        validate_with(&Self::schema(mode), &|field| self.value(field))
    }
}

pub fn validate_with(
    schema: &FormSchema,
    lookup: &dyn Fn(&str) -> FieldValue,
) -> std::result::Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    for field in &schema.fields {
        let value = lookup(field.name);
        if let Some(message) = field.rules.iter().find_map(|rule| rule.check(&value, lookup)) {
            errors.insert(field.name, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// 驗證通過才呼叫 `on_submit`，否則回傳欄位錯誤
pub fn handle_submit<F, T>(form: &F, mode: FormMode, on_submit: impl FnOnce(&F) -> T) -> Result<T>
where
    F: Form,
{
    form.validate(mode).map_err(BankError::ValidationError)?;
    Ok(on_submit(form))
}
