use crate::core::{CrudService, Resource, UpdateMethod};
use crate::utils::error::{BankError, Result};
use reqwest::{Client, Method, Response, StatusCode};
use std::marker::PhantomData;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

pub fn build_client(timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;
    Ok(client)
}

/// REST client for one resource collection, `{api_base}/{path}`.
pub struct HttpCrudService<R: Resource> {
    client: Client,
    collection: Url,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpCrudService<R> {
    /// Uses the resource's default path below `api_base`.
    pub fn new(client: Client, api_base: &str) -> Result<Self> {
        Self::with_path(client, api_base, R::PATH)
    }

    pub fn with_path(client: Client, api_base: &str, path: &str) -> Result<Self> {
        let mut collection = Url::parse(api_base)?;
        {
            let mut segments = collection
                .path_segments_mut()
                .map_err(|_| BankError::ConfigError {
                    message: format!("'{}' cannot be used as an API base URL", api_base),
                })?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }

        tracing::debug!("{} service bound to {}", R::LABELS.title, collection);

        Ok(Self {
            client,
            collection,
            _resource: PhantomData,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn item_url(&self, id: &R::Id) -> Url {
        let mut url = self.collection.clone();
        // collection was already checked to be a base URL in `with_path`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<&R::FormData>) -> Result<Response> {
        tracing::debug!("Making API request: {} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        tracing::debug!("API response status: {}", response.status());

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(BankError::HttpStatusError {
                method: method.to_string(),
                url: url.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}

impl<R: Resource> Clone for HttpCrudService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection: self.collection.clone(),
            _resource: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<R: Resource> CrudService<R> for HttpCrudService<R> {
    async fn get_all(&self) -> Result<Vec<R>> {
        let response = self.send(Method::GET, self.collection.clone(), None).await?;
        let records: Vec<R> = response.json().await?;
        tracing::debug!("Fetched {} {}", records.len(), R::LABELS.plural);
        Ok(records)
    }

    async fn get_by_id(&self, id: &R::Id) -> Result<R> {
        match self.send(Method::GET, self.item_url(id), None).await {
            Ok(response) => Ok(response.json().await?),
            Err(BankError::HttpStatusError { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Err(BankError::NotFoundError {
                    resource: R::LABELS.singular.to_string(),
                    id: id.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn create(&self, data: &R::FormData) -> Result<R> {
        let response = self
            .send(Method::POST, self.collection.clone(), Some(data))
            .await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &R::Id, data: &R::FormData) -> Result<R> {
        let method = match R::UPDATE_METHOD {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        };
        let response = self.send(method, self.item_url(id), Some(data)).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &R::Id) -> Result<()> {
        self.send(Method::DELETE, self.item_url(id), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::bank_accounts::BankAccount;
    use crate::modules::user_management::User;

    #[test]
    fn test_collection_url_joins_base_and_path() {
        let service =
            HttpCrudService::<BankAccount>::new(Client::new(), "http://localhost:3000/api/")
                .unwrap();
        assert_eq!(
            service.collection_url().as_str(),
            "http://localhost:3000/api/bank-accounts"
        );
    }

    #[test]
    fn test_path_override_is_split_into_segments() {
        let service =
            HttpCrudService::<User>::with_path(Client::new(), "http://localhost:3000", "/v2/users/")
                .unwrap();
        assert_eq!(
            service.collection_url().as_str(),
            "http://localhost:3000/v2/users"
        );
        assert_eq!(
            service.item_url(&42).as_str(),
            "http://localhost:3000/v2/users/42"
        );
    }

    #[test]
    fn test_item_url_escapes_id() {
        let service =
            HttpCrudService::<BankAccount>::new(Client::new(), "http://localhost:3000/api").unwrap();
        assert_eq!(
            service.item_url(&"a b/c".to_string()).as_str(),
            "http://localhost:3000/api/bank-accounts/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let result = HttpCrudService::<BankAccount>::new(Client::new(), "mailto:ops@bank.test");
        assert!(matches!(result, Err(BankError::ConfigError { .. })));
    }
}
