//! One submodule per screen. Each declares its record, form data, form rules and table columns,
//! and ties them together with a `Resource` impl.

pub mod account_operations;
pub mod account_views;
pub mod bank_accounts;
pub mod core_utilities;
pub mod patterns;
pub mod transaction_views;
pub mod transactions;
pub mod user_management;
pub mod user_operations;
pub mod user_views;
