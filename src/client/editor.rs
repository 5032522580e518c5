//! CRUD editors with a keyed draft overlay.
//!
//! Canonical records are only replaced with what the server returned after a
//! successful write. Drafts live beside them, keyed by record id; a record is
//! in edit mode exactly when it has a draft.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::client::ClientError;
use crate::journal::models::{CreateJournalRequest, JournalEntry, UpdateJournalRequest};
use crate::medication::{
    extend_by_month,
    models::{CreateMedicationRequest, Medication, UpdateMedicationRequest},
};
use crate::todo::models::{CreateTodoRequest, Todo, UpdateTodoRequest};

pub trait Editable: Clone + Send + Sync {
    type Id: Copy + Eq + Hash + Debug + Send + Sync;
    type Draft: Clone + Send + Sync;
    type New: Send + Sync;

    fn id(&self) -> Self::Id;

    /// Staging copy seeded from the record's current values.
    fn draft(&self) -> Self::Draft;
}

#[async_trait]
pub trait RecordStore<R: Editable>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ClientError>;
    async fn create(&self, new: &R::New) -> Result<R, ClientError>;
    async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<R, ClientError>;
    async fn delete(&self, id: R::Id) -> Result<(), ClientError>;
}

impl Editable for JournalEntry {
    type Id = i32;
    type Draft = UpdateJournalRequest;
    type New = CreateJournalRequest;

    fn id(&self) -> i32 {
        self.id
    }

    fn draft(&self) -> UpdateJournalRequest {
        UpdateJournalRequest {
            journal_header: Some(self.journal_header.clone()),
            journal_text: Some(self.journal_text.clone()),
        }
    }
}

impl Editable for Medication {
    type Id = i32;
    type Draft = UpdateMedicationRequest;
    type New = CreateMedicationRequest;

    fn id(&self) -> i32 {
        self.id
    }

    fn draft(&self) -> UpdateMedicationRequest {
        UpdateMedicationRequest {
            drug_name: Some(self.drug_name.clone()),
            dosage: Some(self.dosage),
            prescriber: Some(self.prescriber.clone()),
            renew_date: Some(self.renew_date),
        }
    }
}

impl Editable for Todo {
    type Id = i32;
    type Draft = UpdateTodoRequest;
    type New = CreateTodoRequest;

    fn id(&self) -> i32 {
        self.id
    }

    fn draft(&self) -> UpdateTodoRequest {
        UpdateTodoRequest {
            task_text: Some(self.task_text.clone()),
            completed: Some(self.completed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor<R: Editable> {
    records: Vec<R>,
    drafts: HashMap<R::Id, R::Draft>,
}

impl<R: Editable> Default for Editor<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Editable> Editor<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            drafts: HashMap::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn is_editing(&self, id: R::Id) -> bool {
        self.drafts.contains_key(&id)
    }

    pub fn draft(&self, id: R::Id) -> Option<&R::Draft> {
        self.drafts.get(&id)
    }

    pub fn draft_mut(&mut self, id: R::Id) -> Option<&mut R::Draft> {
        self.drafts.get_mut(&id)
    }

    /// Replace the list with the server's. On failure the old list stays.
    pub async fn load<S>(&mut self, store: &S) -> Result<(), ClientError>
    where
        S: RecordStore<R> + ?Sized,
    {
        match store.list().await {
            Ok(records) => {
                self.records = records;
                self.drafts.retain(|id, _| self.records.iter().any(|r| r.id() == *id));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load records");
                Err(e)
            }
        }
    }

    /// Enter edit mode. An existing draft is kept as is.
    pub fn begin_edit(&mut self, id: R::Id) -> Option<&mut R::Draft> {
        let record = self.records.iter().find(|r| r.id() == id)?;
        let seed = record.draft();
        Some(self.drafts.entry(id).or_insert(seed))
    }

    /// Leave edit mode without a network call. Returns whether a draft existed.
    pub fn cancel(&mut self, id: R::Id) -> bool {
        self.drafts.remove(&id).is_some()
    }

    pub async fn save<S>(&mut self, store: &S, id: R::Id) -> Result<&R, ClientError>
    where
        S: RecordStore<R> + ?Sized,
    {
        let draft = self
            .drafts
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::Invalid(format!("record {id:?} is not being edited")))?;

        match store.update(id, &draft).await {
            Ok(updated) => {
                self.drafts.remove(&id);
                Ok(self.replace(updated))
            }
            Err(e) => {
                tracing::error!(error = %e, id = ?id, "Failed to save record");
                Err(e)
            }
        }
    }

    /// Delete after `confirm` agrees. `Ok(false)` means the user declined and
    /// nothing was sent.
    pub async fn delete<S, F>(&mut self, store: &S, id: R::Id, confirm: F) -> Result<bool, ClientError>
    where
        S: RecordStore<R> + ?Sized,
        F: FnOnce(&R) -> bool,
    {
        let record = self
            .get(id)
            .ok_or_else(|| ClientError::Invalid(format!("record {id:?} is not loaded")))?;
        if !confirm(record) {
            return Ok(false);
        }

        match store.delete(id).await {
            Ok(()) => {
                self.records.retain(|r| r.id() != id);
                self.drafts.remove(&id);
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, id = ?id, "Failed to delete record");
                Err(e)
            }
        }
    }

    pub async fn create<S>(&mut self, store: &S, new: &R::New) -> Result<&R, ClientError>
    where
        S: RecordStore<R> + ?Sized,
    {
        match store.create(new).await {
            Ok(record) => {
                self.records.push(record);
                self.records
                    .last()
                    .ok_or_else(|| ClientError::Invalid("record list is empty".into()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create record");
                Err(e)
            }
        }
    }

    // Swap in the server copy, appending if the record vanished meanwhile.
    fn replace(&mut self, record: R) -> &R {
        let id = record.id();
        let index = match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records[index] = record;
                index
            }
            None => {
                self.records.push(record);
                self.records.len() - 1
            }
        };
        &self.records[index]
    }

    async fn send_update<S>(&mut self, store: &S, id: R::Id, draft: R::Draft) -> Result<&R, ClientError>
    where
        S: RecordStore<R> + ?Sized,
    {
        match store.update(id, &draft).await {
            Ok(updated) => Ok(self.replace(updated)),
            Err(e) => {
                tracing::error!(error = %e, id = ?id, "Failed to update record");
                Err(e)
            }
        }
    }
}

impl Editor<Todo> {
    /// Flip the completed flag; any open draft is left alone.
    pub async fn toggle_completed<S>(&mut self, store: &S, id: i32) -> Result<&Todo, ClientError>
    where
        S: RecordStore<Todo> + ?Sized,
    {
        let completed = self
            .get(id)
            .map(|t| t.completed)
            .ok_or_else(|| ClientError::Invalid(format!("todo {id} is not loaded")))?;
        let change = UpdateTodoRequest {
            task_text: None,
            completed: Some(!completed),
        };
        self.send_update(store, id, change).await
    }
}

impl Editor<Medication> {
    /// Push the renewal date one calendar month out.
    pub async fn extend_renewal<S>(
        &mut self,
        store: &S,
        id: i32,
        today: NaiveDate,
    ) -> Result<&Medication, ClientError>
    where
        S: RecordStore<Medication> + ?Sized,
    {
        let current = self
            .get(id)
            .map(|m| m.renew_date)
            .ok_or_else(|| ClientError::Invalid(format!("medication {id} is not loaded")))?;
        let change = UpdateMedicationRequest {
            renew_date: Some(Some(extend_by_month(current, today))),
            ..Default::default()
        };
        self.send_update(store, id, change).await
    }
}
