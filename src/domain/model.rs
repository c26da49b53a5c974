use crate::core::form::Form;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nouns used in headings and page error banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    Put,
    Patch,
}

/// How a page reconciles its list after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Run `get_all` again and replace the list.
    Refetch,
    /// Splice the server's answer into the local list.
    Local,
}

pub struct Column<R> {
    pub header: &'static str,
    pub cell: fn(&R) -> String,
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, cell: fn(&R) -> String) -> Self {
        Self { header, cell }
    }
}

pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    type Id: fmt::Display + fmt::Debug + Clone + PartialEq + FromStr + Send + Sync;
    type FormData: Form + Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync;

    const LABELS: Labels;
    /// Path below the API base URL, e.g. `bank-accounts`.
    const PATH: &'static str;
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const SYNC: SyncStrategy = SyncStrategy::Refetch;

    fn id(&self) -> &Self::Id;

    fn columns() -> Vec<Column<Self>>;
}

pub(crate) fn opt_cell<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
