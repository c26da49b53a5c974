//! Drives one screen for a single CLI invocation: mount the page, apply the requested action,
//! then render what the user would see.

use crate::config::toml_config::AppConfig;
use crate::core::list::OutputFormat;
use crate::core::page::Page;
use crate::core::service::HttpCrudService;
use crate::core::{CrudService, Resource};
use crate::modules::core_utilities::{log_activity, ActivityLog};
use crate::modules::{
    account_operations::AccountOperation, account_views::AccountView, bank_accounts::BankAccount,
    core_utilities::CoreUtility, transaction_views::TransactionView, transactions::Transaction,
    user_management::User, user_operations::UserOperation, user_views::UserView,
};
use crate::utils::error::{BankError, Result};
use reqwest::Client;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ResourceKind {
    AccountOperations,
    AccountViews,
    BankAccounts,
    CoreUtilities,
    Transactions,
    TransactionViews,
    Users,
    UserOperations,
    UserViews,
}

impl ResourceKind {
    /// Key of this screen in the config file's `[resources]` table.
    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::AccountOperations => "account_operations",
            ResourceKind::AccountViews => "account_views",
            ResourceKind::BankAccounts => "bank_accounts",
            ResourceKind::CoreUtilities => "core_utilities",
            ResourceKind::Transactions => "transactions",
            ResourceKind::TransactionViews => "transaction_views",
            ResourceKind::Users => "users",
            ResourceKind::UserOperations => "user_operations",
            ResourceKind::UserViews => "user_views",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    List { format: OutputFormat },
    Show { id: String },
    Create { data: String },
    Update { id: String, data: String },
    Delete { id: String },
}

/// What the screen shows after the action, plus its banner if one is up.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOutcome {
    pub output: String,
    pub banner: Option<String>,
}

pub async fn run(
    kind: ResourceKind,
    client: Client,
    config: &AppConfig,
    action: ScreenAction,
) -> Result<ScreenOutcome> {
    match kind {
        ResourceKind::AccountOperations => open::<AccountOperation>(kind, client, config, action).await,
        ResourceKind::AccountViews => open::<AccountView>(kind, client, config, action).await,
        ResourceKind::BankAccounts => open::<BankAccount>(kind, client, config, action).await,
        ResourceKind::CoreUtilities => open::<CoreUtility>(kind, client, config, action).await,
        ResourceKind::Transactions => open::<Transaction>(kind, client, config, action).await,
        ResourceKind::TransactionViews => open::<TransactionView>(kind, client, config, action).await,
        ResourceKind::Users => open::<User>(kind, client, config, action).await,
        ResourceKind::UserOperations => open::<UserOperation>(kind, client, config, action).await,
        ResourceKind::UserViews => open::<UserView>(kind, client, config, action).await,
    }
}

async fn open<R: Resource>(
    kind: ResourceKind,
    client: Client,
    config: &AppConfig,
    action: ScreenAction,
) -> Result<ScreenOutcome> {
    let path = config.resource_path(kind.key(), R::PATH);
    let service = HttpCrudService::<R>::with_path(client, &config.api.base_url, path)?;
    let mut page: Page<R, _> = Page::new(service);
    let output = run_screen(&mut page, action).await?;
    Ok(ScreenOutcome {
        output,
        banner: page.error().map(str::to_string),
    })
}

/// Mounts `page` and applies `action`. Service failures end up in the page banner, only bad
/// input (unparsable id or JSON, rejected form, unknown record) is returned as an error.
pub async fn run_screen<R, S>(page: &mut Page<R, S>, action: ScreenAction) -> Result<String>
where
    R: Resource,
    S: CrudService<R>,
{
    page.mount().await;

    match action {
        ScreenAction::List { format } => page.render(format),
        ScreenAction::Show { id } => {
            let id = parse_id::<R>(&id)?;
            let record = page.service().get_by_id(&id).await?;
            Ok(serde_json::to_string_pretty(&record)?)
        }
        ScreenAction::Create { data } => {
            let form: R::FormData = serde_json::from_str(&data)?;
            page.clear_selection();
            page.submit(form).await?;
            record_activity(page, "create", None);
            page.render(OutputFormat::Table)
        }
        ScreenAction::Update { id, data } => {
            let parsed = parse_id::<R>(&id)?;
            if !page.select(&parsed) {
                return Err(BankError::NotFoundError {
                    resource: R::LABELS.singular.to_string(),
                    id,
                });
            }
            let form: R::FormData = serde_json::from_str(&data)?;
            page.submit(form).await?;
            record_activity(page, "update", Some(&id));
            page.render(OutputFormat::Table)
        }
        ScreenAction::Delete { id } => {
            let parsed = parse_id::<R>(&id)?;
            page.delete(&parsed).await;
            record_activity(page, "delete", Some(&id));
            page.render(OutputFormat::Table)
        }
    }
}

/// Successful mutations go to the activity log; a raised banner means nothing changed.
fn record_activity<R, S>(page: &Page<R, S>, action: &str, id: Option<&str>)
where
    R: Resource,
    S: CrudService<R>,
{
    if page.error().is_some() {
        return;
    }
    let mut activity = ActivityLog::now(action);
    activity
        .details
        .insert("resource".to_string(), R::LABELS.singular.into());
    if let Some(id) = id {
        activity.details.insert("id".to_string(), id.into());
    }
    log_activity(&activity);
}

fn parse_id<R: Resource>(raw: &str) -> Result<R::Id> {
    <R::Id as FromStr>::from_str(raw).map_err(|_| BankError::InvalidConfigValueError {
        field: "id".to_string(),
        value: raw.to_string(),
        reason: format!("Not a valid {} id", R::LABELS.singular),
    })
}
