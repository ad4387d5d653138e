//! Record collection state machine.
//!
//! Owned records and records shared with the caller are disjoint
//! collections filled by fetch-all; mutations only land after server
//! acknowledgment (no optimistic updates).

use crate::types::{FetchRecordsResponse, PasswordRecord};

/// Actions consumed by the records slice.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordsAction {
    FetchAllRequest,
    FetchAllSuccess(FetchRecordsResponse),
    FetchAllFailure(String),

    FetchOneRequest,
    FetchOneSuccess(PasswordRecord),
    FetchOneFailure(String),

    CreateRequest,
    CreateSuccess(PasswordRecord),
    CreateFailure(String),

    UpdateRequest,
    UpdateSuccess(PasswordRecord),
    UpdateFailure(String),

    DeleteRequest,
    DeleteSuccess(u64),
    DeleteFailure(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordsState {
    /// Records owned by the current account.
    pub records: Vec<PasswordRecord>,
    /// Records other accounts have shared with the current account.
    pub shared_records: Vec<PasswordRecord>,
    /// The record last fetched by id.
    pub current: Option<PasswordRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl RecordsState {
    pub fn reduce(&mut self, action: RecordsAction) {
        match action {
            RecordsAction::FetchAllRequest
            | RecordsAction::FetchOneRequest
            | RecordsAction::CreateRequest
            | RecordsAction::UpdateRequest
            | RecordsAction::DeleteRequest => {
                self.is_loading = true;
                self.error = None;
            }

            RecordsAction::FetchAllSuccess(response) => {
                self.records = response.owner_records;
                self.shared_records = response.shared_records;
                self.is_loading = false;
            }

            RecordsAction::FetchOneSuccess(record) => {
                self.current = Some(record);
                self.is_loading = false;
            }

            RecordsAction::CreateSuccess(record) => {
                self.records.push(record);
                self.is_loading = false;
            }

            RecordsAction::UpdateSuccess(record) => {
                if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
                    *existing = record;
                }
                self.is_loading = false;
            }

            RecordsAction::DeleteSuccess(id) => {
                self.records.retain(|r| r.id != id);
                if self.current.as_ref().is_some_and(|r| r.id == id) {
                    self.current = None;
                }
                self.is_loading = false;
            }

            RecordsAction::FetchAllFailure(message)
            | RecordsAction::FetchOneFailure(message)
            | RecordsAction::CreateFailure(message)
            | RecordsAction::UpdateFailure(message)
            | RecordsAction::DeleteFailure(message) => {
                self.error = Some(message);
                self.is_loading = false;
            }
        }
    }

    /// Looks up an owned or shared record by id.
    pub fn find(&self, id: u64) -> Option<&PasswordRecord> {
        self.records
            .iter()
            .chain(self.shared_records.iter())
            .find(|r| r.id == id)
    }

    /// Looks up an owned record by exact title.
    pub fn find_by_title(&self, title: &str) -> Option<&PasswordRecord> {
        self.records.iter().find(|r| r.title == title)
    }
}
