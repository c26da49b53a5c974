pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod modules;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::AppConfig;
pub use core::{form::Form, list::OutputFormat, page::Page, service::HttpCrudService};
pub use domain::{model::Resource, ports::CrudService};
pub use utils::error::{BankError, Result};
