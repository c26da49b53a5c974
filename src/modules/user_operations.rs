use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::domain::model::opt_cell;
use crate::modules::patterns::{EMAIL, ISO_DATE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationFormData {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl Form for UserOperationFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("username", "Username").rule(Rule::required("Username is required")),
            )
            .field(
                FieldSpec::new("password", "Password").rule(Rule::required("Password is required")),
            )
            .field(
                FieldSpec::new("email", "Email")
                    .rule(Rule::required("Email is required"))
                    .rule(Rule::pattern(&EMAIL, "Invalid email address")),
            )
            .field(
                FieldSpec::new("firstName", "First Name")
                    .rule(Rule::required("First name is required")),
            )
            .field(
                FieldSpec::new("lastName", "Last Name")
                    .rule(Rule::required("Last name is required")),
            )
            .field(FieldSpec::new("phoneNumber", "Phone Number"))
            .field(FieldSpec::new("address", "Address"))
            .field(
                FieldSpec::new("dateOfBirth", "Date of Birth")
                    .rule(Rule::pattern(&ISO_DATE, "Date of birth must be YYYY-MM-DD")),
            )
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "username" => FieldValue::text(&self.username),
            "password" => FieldValue::text(&self.password),
            "email" => FieldValue::text(&self.email),
            "firstName" => FieldValue::text(&self.first_name),
            "lastName" => FieldValue::text(&self.last_name),
            "phoneNumber" => FieldValue::opt_text(&self.phone_number),
            "address" => FieldValue::opt_text(&self.address),
            "dateOfBirth" => FieldValue::opt_text(&self.date_of_birth),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for UserOperation {
    type Id = String;
    type FormData = UserOperationFormData;

    const LABELS: Labels = Labels {
        title: "User Operations",
        singular: "item",
        plural: "items",
    };
    const PATH: &'static str = "users";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Username", |u: &Self| u.username.clone()),
            Column::new("Email", |u: &Self| u.email.clone()),
            Column::new("First Name", |u: &Self| u.first_name.clone()),
            Column::new("Last Name", |u: &Self| u.last_name.clone()),
            Column::new("Phone", |u: &Self| opt_cell(&u.phone_number)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_only_checked_when_present() {
        let form = UserOperationFormData {
            username: "ops".to_string(),
            password: "pw".to_string(),
            email: "ops@bank.test".to_string(),
            first_name: "Op".to_string(),
            last_name: "Erator".to_string(),
            ..Default::default()
        };
        assert!(form.validate(FormMode::Create).is_ok());

        let form = UserOperationFormData {
            date_of_birth: Some("01/02/1990".to_string()),
            ..form
        };
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("dateOfBirth"), Some("Date of birth must be YYYY-MM-DD"));
    }

    #[test]
    fn test_every_required_field_reported() {
        let errors = UserOperationFormData::default()
            .validate(FormMode::Create)
            .unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }
}
