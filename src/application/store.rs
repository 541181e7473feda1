//! Persisted profile store.
//!
//! Wraps the in-memory [`ProfileBook`] in a storage-backed reactive value:
//! every successful mutation is written back to local storage under the
//! `answer-sheet-profiles` key and published to subscribers. Failed
//! operations (unknown id, blank name, no current profile) leave storage and
//! subscribers untouched.

use crate::domain::{Answer, Profile, ProfileBook};
use crate::infrastructure::{LocalStorage, PersistedValue};

pub const PROFILES_KEY: &str = "answer-sheet-profiles";

pub struct ProfileStore {
    data: PersistedValue<ProfileBook>,
}

impl ProfileStore {
    /// Opens the store, loading previously persisted profiles if present.
    pub fn open(storage: LocalStorage) -> Self {
        Self {
            data: PersistedValue::open(storage, PROFILES_KEY, ProfileBook::default()),
        }
    }

    pub fn book(&self) -> &ProfileBook {
        self.data.get()
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.data.get().current_profile()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.data.get().iter()
    }

    /// Registers a callback invoked with the whole book after each mutation.
    pub fn subscribe(&mut self, f: impl Fn(&ProfileBook) + 'static) {
        self.data.subscribe(f);
    }

    pub fn create_profile(&mut self, name: Option<&str>, question_count: usize) -> Profile {
        self.data.update(|book| book.create_profile(name, question_count))
    }

    pub fn switch_profile(&mut self, id: &str) -> bool {
        self.data.update(|book| book.switch_profile(id))
    }

    pub fn delete_profile(&mut self, id: &str) -> bool {
        self.data.update(|book| book.delete_profile(id))
    }

    pub fn edit_profile_name(&mut self, id: &str, new_name: &str) -> bool {
        self.data.update(|book| book.edit_profile_name(id, new_name))
    }

    pub fn update_question_count(&mut self, count: usize) -> bool {
        self.data.update(|book| book.update_question_count(count))
    }

    pub fn update_user_answers(&mut self, answers: Vec<Answer>) -> bool {
        self.data.update(|book| book.update_user_answers(answers))
    }

    pub fn update_standard_answers(&mut self, answers: Vec<Answer>) -> bool {
        self.data.update(|book| book.update_standard_answers(answers))
    }

    /// Creates one default profile if the store is empty. Idempotent.
    pub fn initialize_profiles(&mut self) {
        self.data.update(|book| book.initialize_profiles());
    }
}
