//! The generic CRUD page: list state, pagination, form dialog and delete
//! confirmation for one resource, driven by a [`ResourceConfig`].
//!
//! Lifecycle: `Idle → Loading → {Loaded, LoadFailed}`. From a loaded page a
//! form can be opened (create or edit) and submitted, or a delete confirmed.
//! Failures never tear the page down: they keep the previous list, report a
//! toast through the [`Notifier`] and log a diagnostic.

use async_trait::async_trait;
use wanderdesk_api::types::{Page, Record, RecordId, Submission};
use wanderdesk_api::{PageQuery, Resource, DEFAULT_LIMIT};

use crate::error::{AdminError, Operation};
use crate::form::{FormMode, ListingForm};
use crate::pagination::PaginationState;
use crate::resources::ResourceConfig;

/// The backend operations a page needs. Implemented over HTTP by
/// [`AdminClient`](crate::client::AdminClient).
#[async_trait]
pub trait ResourceBackend: Send + Sync {
    async fn list_page(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> Result<Page<Record>, AdminError>;

    async fn list_all(&self, resource: Resource) -> Result<Vec<Record>, AdminError>;

    async fn fetch(&self, resource: Resource, id: &RecordId) -> Result<Record, AdminError>;

    async fn create(
        &self,
        resource: Resource,
        submission: Submission,
    ) -> Result<Option<Record>, AdminError>;

    async fn update(
        &self,
        resource: Resource,
        id: &RecordId,
        submission: Submission,
    ) -> Result<Option<Record>, AdminError>;

    async fn delete(&self, resource: Resource, id: &RecordId) -> Result<(), AdminError>;

    /// `Ok(None)` means the backend declined without an error status.
    async fn set_published(
        &self,
        resource: Resource,
        id: &RecordId,
        published: bool,
    ) -> Result<Option<Record>, AdminError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A short user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Receives toasts from the page. Front ends decide how to show them.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Where the list itself stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// What is open on top of the list.
#[derive(Clone, Debug)]
pub enum Dialog {
    Closed,
    Form(ListingForm),
    ConfirmingDelete(RecordId),
}

pub struct PageController<B, N> {
    config: ResourceConfig,
    backend: B,
    notifier: N,
    state: PageState,
    items: Vec<Record>,
    pagination: PaginationState,
    dialog: Dialog,
}

impl<B: ResourceBackend, N: Notifier> PageController<B, N> {
    /// Checks the descriptor list of `config` before anything is shown.
    pub fn new(config: ResourceConfig, backend: B, notifier: N) -> Result<Self, AdminError> {
        config.validate()?;
        Ok(Self {
            config,
            backend,
            notifier,
            state: PageState::Idle,
            items: Vec::new(),
            pagination: PaginationState::new(DEFAULT_LIMIT),
            dialog: Dialog::Closed,
        })
    }

    /// Uses `limit` as the page size of the first fetch.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.pagination = PaginationState::new(limit);
        self
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn form(&self) -> Option<&ListingForm> {
        match &self.dialog {
            Dialog::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ListingForm> {
        match &mut self.dialog {
            Dialog::Form(form) => Some(form),
            _ => None,
        }
    }

    fn resource(&self) -> Resource {
        self.config.resource
    }

    fn toast(&self, level: ToastLevel, message: String) {
        self.notifier.notify(Toast { level, message });
    }

    fn fail(&self, err: &AdminError) {
        tracing::error!("{}", err);
        self.toast(ToastLevel::Error, err.to_string());
    }

    /// First load of the page. Only acts while the page is still idle.
    pub async fn mount(&mut self) -> Result<(), AdminError> {
        if self.state != PageState::Idle {
            return Ok(());
        }
        self.load(self.pagination.query()).await
    }

    /// Refetches the page currently shown.
    pub async fn reload(&mut self) -> Result<(), AdminError> {
        self.load(self.pagination.query()).await
    }

    /// Loads `page`. On an idle page the count is not known yet and the
    /// request goes out as given; afterwards `page` must lie within
    /// `1..=total_pages`. Returns whether a fetch was dispatched.
    pub async fn open_page(&mut self, page: u32) -> Result<bool, AdminError> {
        if self.state == PageState::Idle {
            return self
                .load(self.pagination.query().with_page(page))
                .await
                .map(|_| true);
        }
        self.change_page(i64::from(page)).await
    }

    /// Fetches `requested` if it lies within `1..=total_pages`. Returns
    /// whether a fetch was dispatched.
    pub async fn change_page(&mut self, requested: i64) -> Result<bool, AdminError> {
        match self.pagination.change_page(requested) {
            Some(query) => self.load(query).await.map(|_| true),
            None => {
                tracing::debug!(
                    "Ignoring page {} of {} for {}",
                    requested,
                    self.pagination.total_pages(),
                    self.resource()
                );
                Ok(false)
            }
        }
    }

    pub async fn next_page(&mut self) -> Result<bool, AdminError> {
        self.change_page(i64::from(self.pagination.page()) + 1).await
    }

    pub async fn previous_page(&mut self) -> Result<bool, AdminError> {
        self.change_page(i64::from(self.pagination.page()) - 1).await
    }

    async fn load(&mut self, query: PageQuery) -> Result<(), AdminError> {
        self.state = PageState::Loading;
        let resource = self.resource();
        let result = if self.config.paginated {
            self.backend
                .list_page(resource, &query)
                .await
                .map(|page| (page.items, Some(page.pagination)))
        } else {
            self.backend
                .list_all(resource)
                .await
                .map(|items| (items, None))
        };
        match result {
            Ok((items, served)) => {
                match served {
                    Some(served) => self.pagination.reconcile(&served),
                    None => self.pagination.reconcile_unpaginated(items.len()),
                }
                self.items = items;
                self.state = PageState::Loaded;
                tracing::debug!("Loaded {} {} ({})", self.items.len(), resource, self.pagination);
                Ok(())
            }
            Err(err) => {
                self.state = PageState::LoadFailed;
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.items.iter().find(|r| r.id().as_ref() == Some(id))
    }

    /// Opens a blank create form.
    pub fn open_create(&mut self) {
        self.dialog = Dialog::Form(ListingForm::create(self.config.fields.clone()));
    }

    /// Opens an edit form seeded from the record with `id`. Records not on
    /// the current page are fetched first.
    pub async fn open_edit(&mut self, id: &RecordId) -> Result<(), AdminError> {
        let record = match self.find(id) {
            Some(record) => record.clone(),
            None => match self.backend.fetch(self.resource(), id).await {
                Ok(record) => record,
                Err(err) => {
                    self.fail(&err);
                    return Err(err);
                }
            },
        };
        let form = ListingForm::edit(self.config.fields.clone(), &record)?;
        self.dialog = Dialog::Form(form);
        Ok(())
    }

    /// Discards the open form without submitting.
    pub fn close_form(&mut self) {
        if matches!(self.dialog, Dialog::Form(_)) {
            self.dialog = Dialog::Closed;
        }
    }

    /// Submits the open form.
    ///
    /// Invalid forms stay open with their fields flagged and nothing is
    /// sent. A failed call keeps the form open for another attempt. On
    /// success the form closes and the page is refetched.
    pub async fn submit_form(&mut self) -> Result<(), AdminError> {
        let resource = self.config.resource;
        let singular = self.config.singular.clone();
        let Dialog::Form(form) = &mut self.dialog else {
            return Err(AdminError::InvalidInput("no form is open".to_string()));
        };
        let mode = form.mode().clone();
        let target = mode.clone();
        let backend = &self.backend;
        let result = form
            .submit(|submission| async move {
                match &target {
                    FormMode::Create => backend.create(resource, submission).await.map(|_| ()),
                    FormMode::Edit(id) => {
                        backend.update(resource, id, submission).await.map(|_| ())
                    }
                }
            })
            .await;

        match result {
            Ok(()) => {
                self.dialog = Dialog::Closed;
                let verb = match mode {
                    FormMode::Create => "created",
                    FormMode::Edit(_) => "updated",
                };
                self.toast(ToastLevel::Success, format!("{} {}", singular, verb));
                if let Err(err) = self.reload().await {
                    tracing::debug!("Refetch after {} {} failed: {}", resource, verb, err);
                }
                Ok(())
            }
            Err(err @ AdminError::ValidationFailed(_)) => {
                tracing::debug!("{} form blocked: {}", resource, err);
                Err(err)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Asks for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: RecordId) {
        self.dialog = Dialog::ConfirmingDelete(id);
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.dialog, Dialog::ConfirmingDelete(_)) {
            self.dialog = Dialog::Closed;
        }
    }

    /// Deletes the record awaiting confirmation. The confirmation closes
    /// either way; on failure the record stays listed.
    pub async fn confirm_delete(&mut self) -> Result<(), AdminError> {
        let id = match std::mem::replace(&mut self.dialog, Dialog::Closed) {
            Dialog::ConfirmingDelete(id) => id,
            other => {
                self.dialog = other;
                return Err(AdminError::InvalidInput(
                    "no delete is awaiting confirmation".to_string(),
                ));
            }
        };
        match self.backend.delete(self.resource(), &id).await {
            Ok(()) => {
                self.toast(
                    ToastLevel::Success,
                    format!("{} {} deleted", self.config.singular, id),
                );
                if let Err(err) = self.reload().await {
                    tracing::debug!("Refetch after deleting {} {} failed: {}", self.resource(), id, err);
                }
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Sets the publish flag of `id`. The server's answer is merged into
    /// the list; whichever answer arrives last wins.
    pub async fn set_published(&mut self, id: &RecordId, published: bool) -> Result<(), AdminError> {
        if !self.config.is_publishable() {
            return Err(AdminError::InvalidInput(format!(
                "{} cannot be published",
                self.resource()
            )));
        }
        let resource = self.resource();
        let err = match self.backend.set_published(resource, id, published).await {
            Ok(Some(record)) => {
                self.merge(id, record, published);
                let verb = if published { "published" } else { "unpublished" };
                self.toast(
                    ToastLevel::Success,
                    format!("{} {} {}", self.config.singular, id, verb),
                );
                return Ok(());
            }
            Ok(None) => AdminError::rejected(Operation::Publish, resource),
            Err(err) => err,
        };
        self.fail(&err);
        Err(err)
    }

    /// Flips the publish flag of a listed record.
    pub async fn toggle_published(&mut self, id: &RecordId) -> Result<(), AdminError> {
        let current = self
            .find(id)
            .and_then(|record| self.config.published(record))
            .unwrap_or(false);
        self.set_published(id, !current).await
    }

    /// Overlays the server's answer on the listed record. A bare
    /// acknowledgement only sets the flag.
    fn merge(&mut self, id: &RecordId, returned: Record, published: bool) {
        let Some(slot) = self
            .items
            .iter_mut()
            .find(|r| r.id().as_ref() == Some(id))
        else {
            return;
        };
        if returned.id().is_some_and(|other| &other != id) {
            tracing::warn!("Publish answer for {} carried id {:?}", id, returned.id());
            return;
        }
        let mut fields = std::mem::take(slot).into_fields();
        let returned = returned.into_fields();
        if let Some(field) = self.config.publish_field.as_deref() {
            if !returned.contains_key(field) {
                let flag = if published { "1" } else { "0" };
                fields.insert(field.to_string(), serde_json::Value::from(flag));
            }
        }
        fields.extend(returned);
        *slot = Record::new(fields);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;
    use wanderdesk_api::types::{FieldValue, Pagination};

    use super::*;
    use crate::fields::FieldDescriptor;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ListPage(u32, u32),
        ListAll,
        Fetch(String),
        Create(usize),
        Update(String),
        Delete(String),
        Publish(String, bool),
    }

    /// In-memory backend: serves `pages` in order and records every call.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<Call>>,
        pages: Mutex<VecDeque<Result<Page<Record>, AdminError>>>,
        all: Vec<Record>,
        fail_delete: bool,
        publish_reply: Option<Record>,
    }

    impl FakeBackend {
        fn with_pages(pages: Vec<Page<Record>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().map(Ok).collect()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn api_error(status: u16) -> wanderdesk_api::Error {
        wanderdesk_api::Error::HttpStatus {
            status,
            body: String::new(),
        }
    }

    #[async_trait]
    impl ResourceBackend for FakeBackend {
        async fn list_page(
            &self,
            resource: Resource,
            query: &PageQuery,
        ) -> Result<Page<Record>, AdminError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::ListPage(query.page(), query.limit()));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AdminError::fetch(resource, api_error(500))))
        }

        async fn list_all(&self, _resource: Resource) -> Result<Vec<Record>, AdminError> {
            self.calls.lock().unwrap().push(Call::ListAll);
            Ok(self.all.clone())
        }

        async fn fetch(&self, resource: Resource, id: &RecordId) -> Result<Record, AdminError> {
            self.calls.lock().unwrap().push(Call::Fetch(id.to_string()));
            if id.as_str() == "77" {
                Ok(record(77, "Remote", "1"))
            } else {
                Err(AdminError::fetch(resource, api_error(404)))
            }
        }

        async fn create(
            &self,
            _resource: Resource,
            submission: Submission,
        ) -> Result<Option<Record>, AdminError> {
            self.calls.lock().unwrap().push(Call::Create(submission.len()));
            Ok(Some(Record::default()))
        }

        async fn update(
            &self,
            resource: Resource,
            id: &RecordId,
            _submission: Submission,
        ) -> Result<Option<Record>, AdminError> {
            self.calls.lock().unwrap().push(Call::Update(id.to_string()));
            Err(AdminError::mutation(Operation::Update, resource, api_error(422)))
        }

        async fn delete(&self, resource: Resource, id: &RecordId) -> Result<(), AdminError> {
            self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
            if self.fail_delete {
                Err(AdminError::mutation(Operation::Delete, resource, api_error(500)))
            } else {
                Ok(())
            }
        }

        async fn set_published(
            &self,
            _resource: Resource,
            id: &RecordId,
            published: bool,
        ) -> Result<Option<Record>, AdminError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Publish(id.to_string(), published));
            Ok(self.publish_reply.clone())
        }
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Toast>>);

    impl Recorder {
        fn levels(&self) -> Vec<ToastLevel> {
            self.0.borrow().iter().map(|t| t.level).collect()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, toast: Toast) {
            self.0.borrow_mut().push(toast);
        }
    }

    fn record(id: i64, name: &str, published: &str) -> Record {
        serde_json::from_value(json!({"id": id, "name": name, "published": published})).unwrap()
    }

    fn page(number: u32, total_pages: u32, items: Vec<Record>) -> Page<Record> {
        Page {
            items,
            pagination: Pagination {
                page: number,
                limit: 10,
                total_pages,
                total_records: 25,
            },
        }
    }

    fn config() -> ResourceConfig {
        ResourceConfig::new(
            Resource::Activities,
            "Activity",
            vec![
                FieldDescriptor::text("name", "Name").required(),
                FieldDescriptor::number("price", "Price"),
            ],
        )
        .columns(&[("id", "ID"), ("name", "Name"), ("published", "Status")])
        .publishable("published")
    }

    fn controller(backend: FakeBackend) -> PageController<FakeBackend, Recorder> {
        PageController::new(config(), backend, Recorder::default()).unwrap()
    }

    #[tokio::test]
    async fn mount_then_next_page() {
        let backend = FakeBackend::with_pages(vec![
            page(1, 3, vec![record(1, "Kayak", "1")]),
            page(2, 3, vec![record(11, "Surf", "0")]),
        ]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();
        assert_eq!(page_ctl.state(), PageState::Loaded);
        assert_eq!(page_ctl.pagination().to_string(), "page 1 of 3");

        assert!(page_ctl.next_page().await.unwrap());
        assert_eq!(page_ctl.pagination().page(), 2);
        assert_eq!(page_ctl.items()[0].get("name"), Some(&json!("Surf")));
        assert_eq!(
            page_ctl.backend().calls(),
            vec![Call::ListPage(1, 10), Call::ListPage(2, 10)]
        );

        // mounting again is a no-op
        page_ctl.mount().await.unwrap();
        assert_eq!(page_ctl.backend().calls().len(), 2);
    }

    #[tokio::test]
    async fn out_of_range_pages_are_ignored() {
        let backend = FakeBackend::with_pages(vec![page(1, 3, vec![])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        assert!(!page_ctl.change_page(0).await.unwrap());
        assert!(!page_ctl.change_page(4).await.unwrap());
        assert!(!page_ctl.previous_page().await.unwrap());
        assert_eq!(page_ctl.backend().calls(), vec![Call::ListPage(1, 10)]);
        assert_eq!(page_ctl.pagination().page(), 1);
    }

    #[tokio::test]
    async fn open_page_past_the_end_after_mount_sends_nothing() {
        let backend = FakeBackend::with_pages(vec![
            page(1, 3, vec![record(1, "Kayak", "1")]),
            page(3, 3, vec![record(21, "Raft", "0")]),
        ]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        assert!(!page_ctl.open_page(99).await.unwrap());
        assert!(!page_ctl.open_page(4).await.unwrap());
        assert_eq!(page_ctl.backend().calls(), vec![Call::ListPage(1, 10)]);

        assert!(page_ctl.open_page(3).await.unwrap());
        assert_eq!(page_ctl.pagination().page(), 3);
        assert_eq!(
            page_ctl.backend().calls(),
            vec![Call::ListPage(1, 10), Call::ListPage(3, 10)]
        );
    }

    #[tokio::test]
    async fn open_page_on_an_idle_page_goes_straight_out() {
        let backend = FakeBackend::with_pages(vec![page(2, 3, vec![record(11, "Surf", "0")])]);
        let mut page_ctl = controller(backend);
        assert!(page_ctl.open_page(2).await.unwrap());
        assert_eq!(page_ctl.pagination().page(), 2);
        assert_eq!(page_ctl.backend().calls(), vec![Call::ListPage(2, 10)]);
    }

    #[test]
    fn option_field_without_options_is_rejected() {
        let broken = ResourceConfig::new(
            Resource::Accommodations,
            "Accommodation",
            vec![FieldDescriptor::select("stars", "Stars", &[])],
        );
        let err = PageController::new(broken, FakeBackend::default(), Recorder::default())
            .err()
            .expect("construction fails");
        let AdminError::ValidationFailed(fields) = err else {
            panic!("expected a descriptor failure");
        };
        assert_eq!(fields[0].field, "stars");
    }

    #[tokio::test]
    async fn failed_refetch_after_create_still_succeeds() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.open_create();
        page_ctl.form_mut().unwrap().set_input("name", "Hike").unwrap();
        page_ctl.submit_form().await.unwrap();

        assert!(matches!(page_ctl.dialog(), Dialog::Closed));
        assert_eq!(page_ctl.state(), PageState::LoadFailed);
        assert_eq!(
            page_ctl.notifier().levels(),
            vec![ToastLevel::Success, ToastLevel::Error]
        );
    }

    #[tokio::test]
    async fn load_failure_keeps_items_and_toasts() {
        let backend = FakeBackend::with_pages(vec![page(1, 2, vec![record(1, "Kayak", "1")])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        let err = page_ctl.next_page().await.unwrap_err();
        assert!(matches!(err, AdminError::FetchFailed { .. }));
        assert_eq!(page_ctl.state(), PageState::LoadFailed);
        assert_eq!(page_ctl.items().len(), 1);
        assert_eq!(page_ctl.notifier().levels(), vec![ToastLevel::Error]);
    }

    #[tokio::test]
    async fn unpaginated_resources_list_everything() {
        let backend = FakeBackend {
            all: vec![record(1, "Kayak", "1"), record(2, "Surf", "0")],
            ..FakeBackend::default()
        };
        let mut page_ctl = PageController::new(config().unpaginated(), backend, Recorder::default()).unwrap();
        page_ctl.mount().await.unwrap();
        assert_eq!(page_ctl.items().len(), 2);
        assert_eq!(page_ctl.pagination().total_records(), 2);
        assert_eq!(page_ctl.backend().calls(), vec![Call::ListAll]);
    }

    #[tokio::test]
    async fn empty_required_field_blocks_create() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.open_create();
        let err = page_ctl.submit_form().await.unwrap_err();
        assert!(matches!(err, AdminError::ValidationFailed(_)));

        let form = page_ctl.form().expect("form stays open");
        assert_eq!(form.error_for("name"), Some("Name is required"));
        assert_eq!(page_ctl.backend().calls(), vec![Call::ListPage(1, 10)]);
        assert!(page_ctl.notifier().levels().is_empty());
    }

    #[tokio::test]
    async fn successful_create_closes_and_refetches() {
        let backend = FakeBackend::with_pages(vec![
            page(1, 1, vec![]),
            page(1, 1, vec![record(3, "Hike", "0")]),
        ]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.open_create();
        let form = page_ctl.form_mut().unwrap();
        form.set_input("name", "Hike").unwrap();
        form.set("price", FieldValue::Number(40.0)).unwrap();
        page_ctl.submit_form().await.unwrap();

        assert!(matches!(page_ctl.dialog(), Dialog::Closed));
        assert_eq!(page_ctl.items().len(), 1);
        assert_eq!(
            page_ctl.backend().calls(),
            vec![Call::ListPage(1, 10), Call::Create(2), Call::ListPage(1, 10)]
        );
        assert_eq!(page_ctl.notifier().levels(), vec![ToastLevel::Success]);
    }

    #[tokio::test]
    async fn failed_update_keeps_form_open() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![record(4, "Dive", "1")])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.open_edit(&RecordId::from(4)).await.unwrap();
        let err = page_ctl.submit_form().await.unwrap_err();
        assert!(matches!(err, AdminError::MutationFailed { .. }));

        let form = page_ctl.form().expect("form stays open");
        assert_eq!(form.mode(), &FormMode::Edit(RecordId::from(4)));
        assert_eq!(form.value("name"), Some(&FieldValue::Text("Dive".to_string())));
        assert_eq!(page_ctl.notifier().levels(), vec![ToastLevel::Error]);
    }

    #[tokio::test]
    async fn edit_fetches_records_off_the_page() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.open_edit(&RecordId::from(77)).await.unwrap();
        assert_eq!(
            page_ctl.form().unwrap().value("name"),
            Some(&FieldValue::Text("Remote".to_string()))
        );
        assert!(page_ctl.open_edit(&RecordId::from(78)).await.is_err());
    }

    #[tokio::test]
    async fn failed_delete_keeps_item() {
        let mut backend = FakeBackend::with_pages(vec![page(1, 1, vec![record(5, "Zip line", "1")])]);
        backend.fail_delete = true;
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.request_delete(RecordId::from(5));
        assert!(page_ctl.confirm_delete().await.is_err());

        assert!(matches!(page_ctl.dialog(), Dialog::Closed));
        assert!(page_ctl.find(&RecordId::from(5)).is_some());
        assert_eq!(page_ctl.notifier().levels(), vec![ToastLevel::Error]);
        assert_eq!(
            page_ctl.backend().calls(),
            vec![Call::ListPage(1, 10), Call::Delete("5".to_string())]
        );
    }

    #[tokio::test]
    async fn cancelled_delete_sends_nothing() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![record(5, "Zip line", "1")])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        page_ctl.request_delete(RecordId::from(5));
        page_ctl.cancel_delete();
        assert!(page_ctl.confirm_delete().await.is_err());
        assert_eq!(page_ctl.backend().calls().len(), 1);
    }

    #[tokio::test]
    async fn publishing_twice_is_idempotent() {
        let backend = FakeBackend {
            publish_reply: Some(record(6, "Canoe", "1")),
            ..FakeBackend::with_pages(vec![page(1, 1, vec![record(6, "Canoe", "0")])])
        };
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        let id = RecordId::from(6);
        page_ctl.set_published(&id, true).await.unwrap();
        page_ctl.set_published(&id, true).await.unwrap();

        let listed = page_ctl.find(&id).unwrap();
        assert_eq!(page_ctl.config().published(listed), Some(true));
        assert_eq!(page_ctl.items().len(), 1);
        assert_eq!(
            page_ctl.notifier().levels(),
            vec![ToastLevel::Success, ToastLevel::Success]
        );
    }

    #[tokio::test]
    async fn declined_publish_is_an_error() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![record(6, "Canoe", "0")])]);
        let mut page_ctl = controller(backend);
        page_ctl.mount().await.unwrap();

        let id = RecordId::from(6);
        assert!(page_ctl.toggle_published(&id).await.is_err());
        assert_eq!(
            page_ctl.backend().calls().last(),
            Some(&Call::Publish("6".to_string(), true))
        );
        assert_eq!(page_ctl.config().published(page_ctl.find(&id).unwrap()), Some(false));
        assert_eq!(page_ctl.notifier().levels(), vec![ToastLevel::Error]);
    }

    #[tokio::test]
    async fn unpublishable_resources_refuse() {
        let backend = FakeBackend::with_pages(vec![page(1, 1, vec![])]);
        let plain = ResourceConfig::new(Resource::Leads, "Lead", vec![]);
        let mut page_ctl = PageController::new(plain, backend, Recorder::default()).unwrap();
        assert!(matches!(
            page_ctl.set_published(&RecordId::from(1), true).await,
            Err(AdminError::InvalidInput(_))
        ));
        assert!(page_ctl.backend().calls().is_empty());
    }
}
