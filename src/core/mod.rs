pub mod form;
pub mod list;
pub mod page;
pub mod service;

pub use crate::domain::model::{Column, Labels, Resource, SyncStrategy, UpdateMethod};
pub use crate::domain::ports::CrudService;
pub use crate::utils::error::Result;
