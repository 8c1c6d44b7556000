//! View state for the notes dashboard.
//!
//! An explicit state object plus selector functions: the full note list comes
//! from the server, everything else (active tab, search, paging, modal, drag
//! order) is derived or local. CRUD reconciliation is pessimistic — a record
//! only changes once the server answered — while drag reordering is purely
//! local and never persisted.

use crate::model::{Note, NoteStatus};

/// Notes shown per dashboard page.
pub const PAGE_SIZE: usize = 9;

/// Which modal the dashboard is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    /// The empty note form.
    Create,
    /// The note form prefilled from the note with this id.
    Edit(String),
}

/// Dashboard state.
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    notes: Vec<Note>,
    active_tab: NoteStatus,
    search: String,
    page: usize,
    pub modal: Modal,
    pub pending_delete: Option<String>,
    pub loading: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full fetched note list, in current display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_tab(&self) -> NoteStatus {
        self.active_tab
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current page index, zero-based.
    pub fn page(&self) -> usize {
        self.page
    }

    // ---- server reconciliation ----------------------------------------

    /// Replace the whole list from a `my-notes` response.
    ///
    /// Notes sort by most recent update first, matching the server order even
    /// when the payload arrives unsorted.
    pub fn set_notes(&mut self, mut notes: Vec<Note>) {
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        self.notes = notes;
        self.clamp_page();
    }

    /// Reconcile a freshly created note from the server response.
    pub fn apply_created(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Reconcile an updated record, keeping its current display position.
    pub fn apply_updated(&mut self, note: Note) {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => *slot = note,
            None => self.notes.insert(0, note),
        }
    }

    /// Reconcile a starred/unstarred record.
    pub fn apply_starred(&mut self, note: Note) {
        self.apply_updated(note);
    }

    /// Reconcile a deletion.
    pub fn apply_deleted(&mut self, id: &str) {
        self.notes.retain(|n| n.id != id);
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
        self.clamp_page();
    }

    // ---- selectors ----------------------------------------------------

    /// Notes on the active tab matching the search query.
    pub fn visible(&self) -> Vec<&Note> {
        let query = self.search.trim().to_lowercase();
        self.notes
            .iter()
            .filter(|n| n.status == self.active_tab)
            .filter(|n| {
                query.is_empty()
                    || n.title.to_lowercase().contains(&query)
                    || n.content.to_lowercase().contains(&query)
                    || n.subject.to_lowercase().contains(&query)
                    || n.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Number of pages for the current tab and search.
    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(PAGE_SIZE).max(1)
    }

    /// The visible slice for the current page.
    pub fn current_page(&self) -> Vec<&Note> {
        self.visible()
            .into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    /// Note count per subject across the whole list, alphabetical.
    pub fn subject_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for note in &self.notes {
            if note.subject.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|(s, _)| *s == note.subject) {
                Some((_, count)) => *count += 1,
                None => counts.push((note.subject.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }

    /// The note an open edit modal targets.
    pub fn edit_target(&self) -> Option<&Note> {
        match &self.modal {
            Modal::Edit(id) => self.notes.iter().find(|n| n.id == *id),
            _ => None,
        }
    }

    // ---- view-state transitions ----------------------------------------

    /// Switch tab; the page resets.
    pub fn set_tab(&mut self, tab: NoteStatus) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.page = 0;
        }
    }

    /// Update the search query; the page resets.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 0;
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Create;
    }

    pub fn open_edit(&mut self, id: impl Into<String>) {
        self.modal = Modal::Edit(id.into());
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Move the dragged note from `from` to `to`, both indexes into the
    /// current [`Self::visible`] sequence.
    ///
    /// Local-only: the display order changes, nothing is persisted, and the
    /// next full fetch restores the server order.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let visible: Vec<usize> = {
            let ids: Vec<&str> =
                self.visible().iter().map(|n| n.id.as_str()).collect();
            ids.iter()
                .map(|id| {
                    self.notes.iter().position(|n| n.id == *id).unwrap()
                })
                .collect()
        };

        if from == to || from >= visible.len() || to >= visible.len() {
            return;
        }

        let note = self.notes.remove(visible[from]);
        // removing shifts later indexes down by one.
        let mut target = visible[to];
        if visible[from] < target {
            target -= 1;
        }
        if from < to {
            // dropping after the target slot.
            target += 1;
        }
        self.notes.insert(target.min(self.notes.len()), note);
    }
}
