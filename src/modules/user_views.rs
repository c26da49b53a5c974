use crate::core::form::{FieldSpec, FieldValue, Form, FormMode, FormSchema, Rule};
use crate::core::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
use crate::modules::patterns::{password_classes, EMAIL, PHONE_FORMATTED};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserViewFormData {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing)]
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
}

impl Form for UserViewFormData {
    fn schema(_mode: FormMode) -> FormSchema {
        FormSchema::new()
            .field(
                FieldSpec::new("username", "Username")
                    .rule(Rule::required("Username is required"))
                    .rule(Rule::min_length(4, "Username must be at least 4 characters"))
                    .rule(Rule::max_length(20, "Username must not exceed 20 characters")),
            )
            .field(
                FieldSpec::new("password", "Password")
                    .rule(Rule::required("Password is required"))
                    .rule(Rule::min_length(8, "Password must be at least 8 characters"))
                    .rule(Rule::all_of(
                        password_classes(),
                        "Password must contain uppercase, lowercase, number, and special character",
                    )),
            )
            .field(
                FieldSpec::new("confirmPassword", "Confirm Password")
                    .rule(Rule::matches("password", "Passwords do not match")),
            )
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
                FieldSpec::new("phoneNumber", "Phone Number")
                    .rule(Rule::required("Phone number is required"))
                    .rule(Rule::pattern(&PHONE_FORMATTED, "Invalid phone number")),
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
            "phoneNumber" => FieldValue::text(&self.phone_number),
            "address" => FieldValue::text(&self.address),
            "email" => FieldValue::text(&self.email),
            _ => FieldValue::Missing,
        }
    }
}

impl Resource for UserView {
    type Id = String;
    type FormData = UserViewFormData;

    const LABELS: Labels = Labels {
        title: "User Views",
        singular: "user view",
        plural: "user views",
    };
    const PATH: &'static str = "user-views";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const SYNC: SyncStrategy = SyncStrategy::Local;

    fn id(&self) -> &String {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Username", |u: &Self| u.username.clone()),
            Column::new("Name", |u: &Self| format!("{} {}", u.first_name, u.last_name)),
            Column::new("Email", |u: &Self| u.email.clone()),
            Column::new("Phone", |u: &Self| u.phone_number.clone()),
            Column::new("Address", |u: &Self| u.address.clone()),
        ]
    }
}
