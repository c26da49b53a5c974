//! Screen controller: owns one resource list plus loading, error and selection state, and
//! drives a [`CrudService`] in response to user actions.
//!
//! Failed service calls never escape a page operation. They are logged and turned into a single
//! static banner string such as `Failed to fetch users`; the loading flag is cleared on every path.

use crate::core::form::{Form, FormErrors, FormMode};
use crate::core::list::{ListView, OutputFormat};
use crate::core::{CrudService, Resource, SyncStrategy};
use crate::utils::error::{BankError, Result};
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Action {
    fn failure_message<R: Resource>(self) -> String {
        match self {
            Action::Fetch => format!("Failed to fetch {}", R::LABELS.plural),
            Action::Create => format!("Failed to create {}", R::LABELS.singular),
            Action::Update => format!("Failed to update {}", R::LABELS.singular),
            Action::Delete => format!("Failed to delete {}", R::LABELS.singular),
        }
    }
}

pub struct Page<R: Resource, S: CrudService<R>> {
    service: S,
    items: Vec<R>,
    loading: bool,
    error: Option<String>,
    selected: Option<R>,
    form_errors: FormErrors,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, S: CrudService<R>> Page<R, S> {
    /// A fresh page shows the loading indicator until the first fetch settles.
    pub fn new(service: S) -> Self {
        Self {
            service,
            items: Vec::new(),
            loading: true,
            error: None,
            selected: None,
            form_errors: FormErrors::new(),
            _resource: PhantomData,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    pub fn form_errors(&self) -> &FormErrors {
        &self.form_errors
    }

    pub fn form_mode(&self) -> FormMode {
        if self.selected.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub async fn mount(&mut self) {
        tracing::debug!("Mounting {} page", R::LABELS.title);
        self.fetch_all().await;
    }

    pub async fn fetch_all(&mut self) {
        self.loading = true;
        if self.reload().await {
            self.error = None;
        }
        self.loading = false;
    }

    /// The list's Edit button. Returns false when the id is not in the current list.
    pub fn select(&mut self, id: &R::Id) -> bool {
        self.selected = self.items.iter().find(|r| r.id() == id).cloned();
        self.form_errors = FormErrors::new();
        self.selected.is_some()
    }

    /// The form's Cancel button.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.form_errors = FormErrors::new();
    }

    /// Validates the form, then creates or updates depending on the current selection. A form
    /// with field errors never reaches the service.
    pub async fn submit(&mut self, data: R::FormData) -> Result<()> {
        if let Err(errors) = data.validate(self.form_mode()) {
            tracing::debug!("{} form rejected: {}", R::LABELS.title, errors);
            self.form_errors = errors.clone();
            return Err(BankError::ValidationError(errors));
        }
        self.form_errors = FormErrors::new();

        match self.selected.as_ref().map(|r| r.id().clone()) {
            Some(id) => self.update(&id, &data).await,
            None => self.create(&data).await,
        }
        Ok(())
    }

    pub async fn create(&mut self, data: &R::FormData) {
        self.loading = true;
        match self.service.create(data).await {
            Ok(created) => {
                tracing::info!("Created {} {}", R::LABELS.singular, created.id());
                if self.sync_after(Action::Create, created).await {
                    self.error = None;
                }
            }
            Err(e) => self.fail(Action::Create, &e),
        }
        self.loading = false;
    }

    pub async fn update(&mut self, id: &R::Id, data: &R::FormData) {
        self.loading = true;
        match self.service.update(id, data).await {
            Ok(updated) => {
                tracing::info!("Updated {} {}", R::LABELS.singular, id);
                if self.sync_after(Action::Update, updated).await {
                    self.error = None;
                }
                self.selected = None;
            }
            Err(e) => self.fail(Action::Update, &e),
        }
        self.loading = false;
    }

    pub async fn delete(&mut self, id: &R::Id) {
        self.loading = true;
        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", R::LABELS.singular, id);
                let synced = match R::SYNC {
                    SyncStrategy::Refetch => self.reload().await,
                    SyncStrategy::Local => {
                        self.items.retain(|r| r.id() != id);
                        true
                    }
                };
                if self.selected.as_ref().is_some_and(|r| r.id() == id) {
                    self.selected = None;
                }
                if synced {
                    self.error = None;
                }
            }
            Err(e) => self.fail(Action::Delete, &e),
        }
        self.loading = false;
    }

    async fn sync_after(&mut self, action: Action, record: R) -> bool {
        match R::SYNC {
            SyncStrategy::Refetch => self.reload().await,
            SyncStrategy::Local => {
                match action {
                    Action::Update => {
                        if let Some(slot) = self.items.iter_mut().find(|r| r.id() == record.id()) {
                            *slot = record;
                        }
                    }
                    _ => self.items.push(record),
                }
                true
            }
        }
    }

    /// Replaces the list from the server. A failure keeps the old list and sets the fetch banner.
    async fn reload(&mut self) -> bool {
        match self.service.get_all().await {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(e) => {
                self.fail(Action::Fetch, &e);
                false
            }
        }
    }

    fn fail(&mut self, action: Action, err: &BankError) {
        let message = action.failure_message::<R>();
        tracing::warn!("{}: {}", message, err);
        self.error = Some(message);
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let mut out = format!("== {} ==\n", R::LABELS.title);

        if let Some(error) = &self.error {
            out.push_str(&format!("Error: {}\n", error));
        }

        match &self.selected {
            Some(record) => {
                out.push_str(&format!("Editing {} {}\n", R::LABELS.singular, record.id()))
            }
            None => out.push_str(&format!("New {}\n", R::LABELS.singular)),
        }
        for field in R::FormData::schema(self.form_mode()).fields {
            match self.form_errors.get(field.name) {
                Some(message) => out.push_str(&format!("  {}: {}\n", field.label, message)),
                None => out.push_str(&format!("  {}\n", field.label)),
            }
        }
        out.push('\n');

        if self.loading {
            out.push_str("Loading...");
        } else {
            out.push_str(&ListView::new(&self.items).render(format)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user_views::{UserView, UserViewFormData};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockUserViewService {
        records: Arc<Mutex<Vec<UserView>>>,
        calls: Arc<Mutex<Vec<&'static str>>>,
        fail_all: bool,
    }

    impl MockUserViewService {
        fn with_records(records: Vec<UserView>) -> Self {
            Self {
                records: Arc::new(Mutex::new(records)),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail_all: true,
                ..Default::default()
            }
        }

        async fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().await.clone()
        }

        async fn record(&self, call: &'static str) -> Result<()> {
            self.calls.lock().await.push(call);
            if self.fail_all {
                return Err(BankError::HttpStatusError {
                    method: call.to_string(),
                    url: "http://mock/user-views".to_string(),
                    status: 500,
                });
            }
            Ok(())
        }
    }

    fn to_view(id: String, data: &UserViewFormData) -> UserView {
        UserView {
            id,
            username: data.username.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            phone_number: data.phone_number.clone(),
            address: data.address.clone(),
            email: data.email.clone(),
        }
    }

    #[async_trait::async_trait]
    impl CrudService<UserView> for MockUserViewService {
        async fn get_all(&self) -> Result<Vec<UserView>> {
            self.record("get_all").await?;
            Ok(self.records.lock().await.clone())
        }

        async fn get_by_id(&self, id: &String) -> Result<UserView> {
            self.record("get_by_id").await?;
            self.records
                .lock()
                .await
                .iter()
                .find(|r| &r.id == id)
                .cloned()
                .ok_or_else(|| BankError::NotFoundError {
                    resource: "user view".to_string(),
                    id: id.clone(),
                })
        }

        async fn create(&self, data: &UserViewFormData) -> Result<UserView> {
            self.record("create").await?;
            let mut records = self.records.lock().await;
            let view = to_view(format!("uv{}", records.len() + 1), data);
            records.push(view.clone());
            Ok(view)
        }

        async fn update(&self, id: &String, data: &UserViewFormData) -> Result<UserView> {
            self.record("update").await?;
            Ok(to_view(id.clone(), data))
        }

        async fn delete(&self, _id: &String) -> Result<()> {
            self.record("delete").await
        }
    }

    fn page_with(service: MockUserViewService) -> Page<UserView, MockUserViewService> {
        Page::new(service)
    }

    fn valid_form() -> UserViewFormData {
        UserViewFormData {
            username: "jdoe".to_string(),
            password: "Secr3t!pass".to_string(),
            confirm_password: "Secr3t!pass".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "555-123-4567".to_string(),
            address: "1 Main St".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    fn existing(id: &str) -> UserView {
        to_view(id.to_string(), &valid_form())
    }

    #[tokio::test]
    async fn test_new_page_starts_loading() {
        let page = page_with(MockUserViewService::default());
        assert!(page.is_loading());
        assert!(page.items().is_empty());
        assert!(page.render(OutputFormat::Table).unwrap().ends_with("Loading..."));
    }

    #[tokio::test]
    async fn test_mount_fetches_list() {
        let mut page = page_with(MockUserViewService::with_records(vec![existing("uv1")]));
        page.mount().await;

        assert!(!page.is_loading());
        assert_eq!(page.items().len(), 1);
        assert!(page.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_sets_banner_and_clears_loading() {
        let mut page = page_with(MockUserViewService::failing());
        page.mount().await;

        assert!(!page.is_loading());
        assert_eq!(page.error(), Some("Failed to fetch user views"));
        let rendered = page.render(OutputFormat::Table).unwrap();
        assert!(rendered.contains("Error: Failed to fetch user views"));
    }

    #[tokio::test]
    async fn test_render_layout() {
        let mut page = page_with(MockUserViewService::failing());
        page.mount().await;

        let rendered = page.render(OutputFormat::Table).unwrap();
        assert!(rendered.starts_with(
            "== User Views ==\nError: Failed to fetch user views\nNew user view\n  Username\n"
        ));
        assert!(rendered.ends_with("  Address\n\nNo user views found."));
    }

    #[tokio::test]
    async fn test_create_appends_locally() {
        let service = MockUserViewService::with_records(vec![existing("uv1")]);
        let mut page = page_with(service.clone());
        page.mount().await;

        page.submit(valid_form()).await.unwrap();

        assert_eq!(page.items().len(), 2);
        assert_eq!(page.items()[1].id, "uv2");
        assert_eq!(service.calls().await, vec!["get_all", "create"]);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_service() {
        let service = MockUserViewService::default();
        let mut page = page_with(service.clone());
        page.mount().await;

        let form = UserViewFormData {
            confirm_password: "different".to_string(),
            ..valid_form()
        };
        let result = page.submit(form).await;

        assert!(matches!(result, Err(BankError::ValidationError(_))));
        assert_eq!(
            page.form_errors().get("confirmPassword"),
            Some("Passwords do not match")
        );
        assert_eq!(service.calls().await, vec!["get_all"]);
        assert!(page
            .render(OutputFormat::Table)
            .unwrap()
            .contains("Confirm Password: Passwords do not match"));
    }

    #[tokio::test]
    async fn test_submit_with_selection_updates_in_place() {
        let service =
            MockUserViewService::with_records(vec![existing("uv1"), existing("uv2")]);
        let mut page = page_with(service.clone());
        page.mount().await;

        assert!(page.select(&"uv2".to_string()));
        assert_eq!(page.form_mode(), FormMode::Edit);

        let form = UserViewFormData {
            first_name: "Janet".to_string(),
            ..valid_form()
        };
        page.submit(form).await.unwrap();

        assert!(page.selected().is_none());
        assert_eq!(page.items()[1].first_name, "Janet");
        assert_eq!(page.items()[0].first_name, "Jane");
        assert_eq!(service.calls().await, vec!["get_all", "update"]);
    }

    #[tokio::test]
    async fn test_delete_removes_locally() {
        let mut page =
            page_with(MockUserViewService::with_records(vec![existing("uv1"), existing("uv2")]));
        page.mount().await;
        page.select(&"uv1".to_string());

        page.delete(&"uv1".to_string()).await;

        assert_eq!(page.items().len(), 1);
        assert!(page.items().iter().all(|r| r.id != "uv1"));
        assert!(page.selected().is_none());
    }

    #[tokio::test]
    async fn test_select_unknown_id() {
        let mut page = page_with(MockUserViewService::with_records(vec![existing("uv1")]));
        page.mount().await;
        assert!(!page.select(&"nope".to_string()));
        assert_eq!(page.form_mode(), FormMode::Create);
    }
}
