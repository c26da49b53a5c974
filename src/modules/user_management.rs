use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::modules::patterns::{EMAIL, PHONE_DIGITS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered customer. The password is write-only and never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormData {
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing)]
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

impl Form for UserFormData {
    fn schema(mode: FormMode) -> FormSchema {
        let mut schema = FormSchema::new().field(
            FieldSpec::new("username", "Username").rule(Rule::required("Username is required")),
        );

        // the profile editor does not show the password fields
        if mode == FormMode::Create {
            schema = schema
                .field(
                    FieldSpec::new("password", "Password")
                        .rule(Rule::required("Password is required")),
                )
                .field(
                    FieldSpec::new("confirmPassword", "Confirm Password")
                        .rule(Rule::matches("password", "Passwords do not match")),
                );
        }

        schema
            .field(
                FieldSpec::new("firstName", "First Name")
                    .rule(Rule::required("First name is required")),
            )
            .field(
                FieldSpec::new("lastName", "Last Name")
                    .rule(Rule::required("Last name is required")),
            )
            .field(
                FieldSpec::new("email", "Email")
                    .rule(Rule::required("Email is required"))
                    .rule(Rule::pattern(&EMAIL, "Invalid email address")),
            )
            .field(
                FieldSpec::new("phone", "Phone")
                    .rule(Rule::required("Phone is required"))
                    .rule(Rule::pattern(&PHONE_DIGITS, "Invalid phone number")),
            )
            .field(FieldSpec::new("address", "Address").rule(Rule::required("Address is required")))
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "username" => FieldValue::text(&self.username),
            "password" => FieldValue::text(&self.password),
            "confirmPassword" => FieldValue::text(&self.confirm_password),
            "firstName" => FieldValue::text(&self.first_name),
            "lastName" => FieldValue::text(&self.last_name),
            "phone" => FieldValue::text(&self.phone),
            "address" => FieldValue::text(&self.address),
            "email" => FieldValue::text(&self.email),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for User {
    type Id = i64;
    type FormData = UserFormData;

    const LABELS: Labels = Labels {
        title: "User Management",
        singular: "user",
        plural: "users",
    };
    const PATH: &'static str = "users";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &i64 {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Username", |u: &Self| u.username.clone()),
            Column::new("First Name", |u: &Self| u.first_name.clone()),
            Column::new("Last Name", |u: &Self| u.last_name.clone()),
            Column::new("Email", |u: &Self| u.email.clone()),
            Column::new("Phone", |u: &Self| u.phone.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> UserFormData {
        UserFormData {
            username: "jdoe".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: "5551234567".to_string(),
            address: "1 Main St".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration().validate(FormMode::Create).is_ok());
    }

    #[test]
    fn test_phone_must_be_digits() {
        let form = UserFormData {
            phone: "555-123".to_string(),
            ..registration()
        };
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Invalid phone number"));
    }

    #[test]
    fn test_profile_edit_without_password() {
        let form = UserFormData {
            password: String::new(),
            confirm_password: String::new(),
            ..registration()
        };
        assert!(form.validate(FormMode::Edit).is_ok());
        let errors = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_confirm_password_not_sent() {
        let json = serde_json::to_value(registration()).unwrap();
        assert!(json.get("confirmPassword").is_none());
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["password"], "hunter22");
    }
}
