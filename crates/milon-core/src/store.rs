use milon_types::{Entry, EntryFields, EntryId, ListId};

use crate::error::StoreError;

/// List storage owned outside the core flows
pub trait EntryStore: Send {
    fn add_entry(&mut self, list_id: ListId, fields: EntryFields) -> Result<Entry, StoreError>;

    fn update_entry(&mut self, entry_id: EntryId, fields: EntryFields)
    -> Result<Entry, StoreError>;
}

#[derive(Debug, Clone)]
pub struct VocabList {
    pub id: ListId,
    pub name: String,
    pub entries: Vec<Entry>,
}

/// Process-lifetime store, nothing is written to disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: Vec<VocabList>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_list(&mut self, name: impl Into<String>) -> ListId {
        let list = VocabList {
            id: ListId::new(),
            name: name.into(),
            entries: Vec::new(),
        };
        let id = list.id;
        self.lists.push(list);
        id
    }

    pub fn list(&self, list_id: ListId) -> Option<&VocabList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn entries(&self, list_id: ListId) -> &[Entry] {
        self.list(list_id).map(|l| l.entries.as_slice()).unwrap_or(&[])
    }
}

impl EntryStore for MemoryStore {
    fn add_entry(&mut self, list_id: ListId, fields: EntryFields) -> Result<Entry, StoreError> {
        let list = self
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or(StoreError::ListNotFound(list_id))?;

        let entry = Entry::new(fields);
        list.entries.push(entry.clone());
        Ok(entry)
    }

    fn update_entry(
        &mut self,
        entry_id: EntryId,
        fields: EntryFields,
    ) -> Result<Entry, StoreError> {
        let entry = self
            .lists
            .iter_mut()
            .flat_map(|l| l.entries.iter_mut())
            .find(|e| e.id == entry_id)
            .ok_or(StoreError::EntryNotFound(entry_id))?;

        entry.apply(fields);
        Ok(entry.clone())
    }
}
