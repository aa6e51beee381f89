//! Task list synchronizer
//!
//! Keeps the local task collection consistent with the server. Every mutation
//! is split in two steps:
//!
//! 1. [`Request::send`] performs the HTTP call and yields a [`Confirmed`]
//!    payload or an operation-specific [`AppError`].
//! 2. [`TaskList::apply`] folds that result into local state. Only `Ok`
//!    payloads touch the collection; an `Err` only fills the error slot.
//!
//! The split lets the TUI run step 1 on a worker thread and apply results on
//! the event loop in the order they resolve. The CLI uses [`TaskList::dispatch`]
//! which does both synchronously.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::client::TaskApi;
use crate::error::{AppError, Result};
use crate::model::{Task, TaskDraft};
use crate::session::SessionContext;

/// Per-row view/edit state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Viewing,
    /// Edit buffers, snapshotted from the row when editing started
    Editing { title: String, description: String },
}

/// A server call the synchronizer knows how to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Add(TaskDraft),
    Remove(i64),
    Update(i64, TaskDraft),
    Toggle(i64),
}

/// Server-confirmed outcome of a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed {
    Listed(Vec<Task>),
    Added(Task),
    Removed(i64),
    Updated(i64, Task),
    Toggled(i64, Task),
}

impl Request {
    /// Perform the call with `token`. Transport failures and non-success
    /// statuses collapse into the error variant for this operation.
    pub fn send(&self, api: &dyn TaskApi, token: &str) -> Result<Confirmed> {
        match self {
            Request::List => api
                .list_tasks(token)
                .map(Confirmed::Listed)
                .map_err(AppError::Fetch),
            Request::Add(draft) => api
                .create_task(token, draft)
                .map(Confirmed::Added)
                .map_err(AppError::Add),
            Request::Remove(id) => api
                .delete_task(token, *id)
                .map(|()| Confirmed::Removed(*id))
                .map_err(AppError::Delete),
            Request::Update(id, draft) => api
                .update_task(token, *id, draft)
                .map(|task| Confirmed::Updated(*id, task))
                .map_err(AppError::Update),
            Request::Toggle(id) => api
                .toggle_task(token, *id)
                .map(|task| Confirmed::Toggled(*id, task))
                .map_err(AppError::Toggle),
        }
    }

    /// Short label for logs and loading messages
    pub fn label(&self) -> String {
        match self {
            Request::List => "Loading tasks".to_string(),
            Request::Add(draft) => format!("Adding \"{}\"", draft.title),
            Request::Remove(id) => format!("Deleting #{}", id),
            Request::Update(id, _) => format!("Saving #{}", id),
            Request::Toggle(id) => format!("Toggling #{}", id),
        }
    }
}

/// Local, ordered cache of the server's tasks plus the UI state around it
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    rows: HashMap<i64, RowState>,
    /// Add-form input: title
    pub new_title: String,
    /// Add-form input: description
    pub new_description: String,
    /// Single error slot; each failure overwrites the previous message
    error: Option<String>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Store a failure message in the error slot
    pub fn report(&mut self, err: &AppError) {
        match err.client_cause() {
            Some(cause) => warn!(error = %err, %cause, "task request failed"),
            None => warn!(error = %err, "task request failed"),
        }
        self.error = Some(err.to_string());
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref err) = result {
            self.report(err);
        }
        result
    }

    // ========== Row state machine ==========

    pub fn row_state(&self, id: i64) -> Option<&RowState> {
        self.rows.get(&id)
    }

    pub fn is_editing(&self, id: i64) -> bool {
        matches!(self.rows.get(&id), Some(RowState::Editing { .. }))
    }

    /// viewing → editing, snapshotting the row into the edit buffers.
    /// Returns false if the task is unknown. Already-editing rows keep their
    /// buffers.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        let state = self.rows.entry(id).or_default();
        if *state == RowState::Viewing {
            *state = RowState::Editing {
                title: task.title.clone(),
                description: task.description.clone(),
            };
        }
        true
    }

    /// editing → viewing, dropping the buffers. No network call.
    pub fn cancel_edit(&mut self, id: i64) {
        if let Some(state) = self.rows.get_mut(&id) {
            *state = RowState::Viewing;
        }
    }

    /// Mutable access to a row's edit buffers `(title, description)`
    pub fn edit_buffers_mut(&mut self, id: i64) -> Option<(&mut String, &mut String)> {
        match self.rows.get_mut(&id) {
            Some(RowState::Editing { title, description }) => Some((title, description)),
            _ => None,
        }
    }

    /// Build the update request for an editing row
    pub fn save_request(&self, id: i64) -> Option<Request> {
        match self.rows.get(&id) {
            Some(RowState::Editing { title, description }) => Some(Request::Update(
                id,
                TaskDraft::new(title.clone(), description.clone()),
            )),
            _ => None,
        }
    }

    /// Build the add request from the add-form inputs
    pub fn add_request(&self) -> Request {
        Request::Add(TaskDraft::new(
            self.new_title.clone(),
            self.new_description.clone(),
        ))
    }

    // ========== Applying results ==========

    /// Fold a request result into local state.
    ///
    /// `Err` leaves the collection and row states untouched and fills the
    /// error slot. A failed list keeps the last-known-good collection.
    pub fn apply(&mut self, result: Result<Confirmed>) -> Result<Confirmed> {
        let confirmed = self.record(result)?;
        match &confirmed {
            Confirmed::Listed(tasks) => {
                self.rows.retain(|id, _| tasks.iter().any(|t| t.id == *id));
                for task in tasks {
                    self.rows.entry(task.id).or_default();
                }
                self.tasks = tasks.clone();
            }
            Confirmed::Added(task) => {
                self.rows.insert(task.id, RowState::Viewing);
                self.tasks.push(task.clone());
                self.new_title.clear();
                self.new_description.clear();
            }
            Confirmed::Removed(id) => {
                self.tasks.retain(|t| t.id != *id);
                self.rows.remove(id);
            }
            Confirmed::Updated(id, task) => {
                if self.replace(*id, task.clone()) {
                    self.rows.insert(task.id, RowState::Viewing);
                }
            }
            Confirmed::Toggled(id, task) => {
                self.replace(*id, task.clone());
            }
        }
        debug!(tasks = ?self.tasks, "task list changed");
        Ok(confirmed)
    }

    /// Swap the entry with `id` for the server's object, keeping its position
    fn replace(&mut self, id: i64, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.id != id {
            if let Some(state) = self.rows.remove(&id) {
                self.rows.insert(task.id, state);
            }
        }
        *slot = task;
        true
    }

    // ========== Synchronous operations ==========

    /// Check the session, send the request, apply the result.
    /// Without a token no request is sent.
    pub fn dispatch(
        &mut self,
        session: &SessionContext,
        api: &dyn TaskApi,
        request: Request,
    ) -> Result<Confirmed> {
        let token = self.record(session.require_session())?;
        let result = request.send(api, &token);
        self.apply(result)
    }

    /// Replace the whole collection with the server's list
    pub fn list(&mut self, session: &SessionContext, api: &dyn TaskApi) -> Result<&[Task]> {
        self.dispatch(session, api, Request::List)?;
        Ok(&self.tasks)
    }

    /// Create a task and append the server's copy
    pub fn add(
        &mut self,
        session: &SessionContext,
        api: &dyn TaskApi,
        title: &str,
        description: &str,
    ) -> Result<Task> {
        match self.dispatch(session, api, Request::Add(TaskDraft::new(title, description)))? {
            Confirmed::Added(task) => Ok(task),
            other => Err(unexpected(other)),
        }
    }

    /// Delete a task. Callers confirm with the user before calling this.
    pub fn remove(&mut self, session: &SessionContext, api: &dyn TaskApi, id: i64) -> Result<()> {
        self.dispatch(session, api, Request::Remove(id)).map(|_| ())
    }

    /// Replace title/description; the row leaves editing only on success
    pub fn update(
        &mut self,
        session: &SessionContext,
        api: &dyn TaskApi,
        id: i64,
        title: &str,
        description: &str,
    ) -> Result<Task> {
        let request = Request::Update(id, TaskDraft::new(title, description));
        match self.dispatch(session, api, request)? {
            Confirmed::Updated(_, task) => Ok(task),
            other => Err(unexpected(other)),
        }
    }

    /// Save an editing row's buffers
    pub fn save_edit(
        &mut self,
        session: &SessionContext,
        api: &dyn TaskApi,
        id: i64,
    ) -> Result<Task> {
        let (title, description) = match self.rows.get(&id) {
            Some(RowState::Editing { title, description }) => (title.clone(), description.clone()),
            _ => {
                return Err(AppError::invalid_data(format!(
                    "task #{} is not being edited",
                    id
                )))
            }
        };
        self.update(session, api, id, &title, &description)
    }

    /// Ask the server to flip completion; the server's value wins
    pub fn toggle(&mut self, session: &SessionContext, api: &dyn TaskApi, id: i64) -> Result<Task> {
        match self.dispatch(session, api, Request::Toggle(id))? {
            Confirmed::Toggled(_, task) => Ok(task),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(confirmed: Confirmed) -> AppError {
    AppError::invalid_data(format!("unexpected result: {:?}", confirmed))
}
