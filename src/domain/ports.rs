use crate::domain::model::Resource;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The four verbs every screen talks to, plus a single-record read.
#[async_trait]
pub trait CrudService<R: Resource>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<R>>;
    async fn get_by_id(&self, id: &R::Id) -> Result<R>;
    async fn create(&self, data: &R::FormData) -> Result<R>;
    async fn update(&self, id: &R::Id, data: &R::FormData) -> Result<R>;
    async fn delete(&self, id: &R::Id) -> Result<()>;
}
