//! Application state management for the terminal answer-sheet tracker.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use crate::application::store::ProfileStore;
use crate::domain::{Answer, TabId, TabSelector, DEFAULT_QUESTION_COUNT};

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and what UI elements
/// are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal navigation mode - arrow keys move selection, shortcuts available
    Normal,
    /// An answer value is being typed for the selected question
    EditingAnswer,
    /// Name entry for a new profile
    NewProfile,
    /// Name entry for renaming the current profile
    RenameProfile,
    /// Question-count entry for resizing the current profile
    QuestionCount,
    /// Profile picker popup is open
    ProfileList,
    /// CSV export dialog is open
    ExportCsv,
    /// Help screen is displayed
    Help,
}

/// Main application state: the profile store, the tab selector, and all
/// transient UI state (selection, input buffers, status messages).
pub struct App {
    /// Persisted profile store
    pub store: ProfileStore,
    /// Active view and circular navigation between the three tabs
    pub tabs: TabSelector,
    /// Currently selected question (zero-based index into the answer lists)
    pub selected: usize,
    /// First visible question row in the viewport
    pub scroll: usize,
    /// Viewport height in question rows (for scrolling calculations)
    pub viewport_rows: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Current input buffer (answer values, names, counts, filenames)
    pub input: String,
    /// Cursor position within the input buffer
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Cursor position within the profile picker popup
    pub profile_cursor: usize,
}

impl App {
    /// Builds the application state around an opened store and makes sure at
    /// least one profile exists.
    pub fn new(mut store: ProfileStore) -> Self {
        store.initialize_profiles();
        Self {
            store,
            tabs: TabSelector::default(),
            selected: 0,
            scroll: 0,
            viewport_rows: 20,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            status_message: None,
            help_scroll: 0,
            profile_cursor: 0,
        }
    }

    /// Question count of the current profile, or 0 when none is selected.
    pub fn question_count(&self) -> usize {
        self.store
            .current_profile()
            .map(|p| p.question_count)
            .unwrap_or(0)
    }

    /// The answer list shown by the active tab, if that tab is editable.
    pub fn active_answers(&self) -> Option<&[Answer]> {
        let profile = self.store.current_profile()?;
        match self.tabs.active {
            TabId::UserAnswers => Some(&profile.user_answers),
            TabId::StandardAnswers => Some(&profile.standard_answers),
            TabId::Diff => None,
        }
    }

    /// Keeps the selected question inside the current profile's range.
    pub fn clamp_selection(&mut self) {
        let count = self.question_count();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    /// Switches to editing mode for the currently selected question.
    ///
    /// The diff tab is read-only; attempting to edit there sets a status
    /// message and stays in normal mode.
    pub fn start_editing(&mut self) {
        let Some(answers) = self.active_answers() else {
            self.status_message = Some("Diff view is read-only".to_string());
            return;
        };
        let value = answers
            .get(self.selected)
            .and_then(|a| a.value.clone())
            .unwrap_or_default();
        self.mode = AppMode::EditingAnswer;
        self.input = value;
        self.cursor_position = self.input.len();
        self.status_message = None;
    }

    /// Completes editing and writes the input back to the active answer list.
    ///
    /// A blank input clears the answer. The whole list is replaced through
    /// the store so the mutation is persisted and published. Moves the
    /// selection down one question afterwards.
    pub fn finish_editing(&mut self) {
        let trimmed = self.input.trim();
        let value = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };

        if let Some(answers) = self.active_answers() {
            let mut updated = answers.to_vec();
            if let Some(answer) = updated.get_mut(self.selected) {
                answer.value = value;
                match self.tabs.active {
                    TabId::UserAnswers => self.store.update_user_answers(updated),
                    TabId::StandardAnswers => self.store.update_standard_answers(updated),
                    TabId::Diff => false,
                };
            }
        }

        if self.selected + 1 < self.question_count() {
            self.selected += 1;
            self.ensure_cursor_visible();
        }

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Cancels editing and returns to normal mode without saving changes.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Opens the name prompt for a new profile.
    pub fn start_new_profile(&mut self) {
        self.mode = AppMode::NewProfile;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Creates the profile named in the input buffer and switches to it.
    ///
    /// A blank input falls back to the default date-based name.
    pub fn finish_new_profile(&mut self) {
        let trimmed = self.input.trim().to_string();
        let name = if trimmed.is_empty() { None } else { Some(trimmed.as_str()) };

        let profile = self.store.create_profile(name, DEFAULT_QUESTION_COUNT);
        self.store.switch_profile(&profile.id);
        self.selected = 0;
        self.scroll = 0;
        self.status_message = Some(format!("Created profile {}", profile.name));

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Opens the rename prompt prefilled with the current profile name.
    pub fn start_rename_profile(&mut self) {
        let Some(profile) = self.store.current_profile() else {
            return;
        };
        self.input = profile.name.clone();
        self.cursor_position = self.input.len();
        self.mode = AppMode::RenameProfile;
        self.status_message = None;
    }

    /// Applies the rename; a blank name is rejected and reported.
    pub fn finish_rename_profile(&mut self) {
        let id = self
            .store
            .current_profile()
            .map(|p| p.id.clone())
            .unwrap_or_default();
        if self.store.edit_profile_name(&id, &self.input) {
            self.status_message = Some("Profile renamed".to_string());
        } else {
            self.status_message = Some("Rename failed: name cannot be empty".to_string());
        }

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Opens the question-count prompt prefilled with the current count.
    pub fn start_question_count(&mut self) {
        if self.store.current_profile().is_none() {
            return;
        }
        self.input = self.question_count().to_string();
        self.cursor_position = self.input.len();
        self.mode = AppMode::QuestionCount;
        self.status_message = None;
    }

    /// Parses the input as the new question count and resizes the profile.
    ///
    /// Shrinking drops answers past the new count; that loss is intended.
    pub fn finish_question_count(&mut self) {
        match self.input.trim().parse::<usize>() {
            Ok(count) => {
                if self.store.update_question_count(count) {
                    self.status_message = Some(format!("Question count set to {}", count));
                    self.clamp_selection();
                    self.ensure_cursor_visible();
                } else {
                    self.status_message = Some("No profile selected".to_string());
                }
            }
            Err(_) => {
                self.status_message = Some(format!("Invalid question count: {}", self.input));
            }
        }

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Cancels any prompt mode and returns to normal mode.
    pub fn cancel_input(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Opens the profile picker with the cursor on the current profile.
    pub fn open_profile_list(&mut self) {
        self.profile_cursor = self
            .store
            .profiles()
            .position(|p| Some(p.id.as_str()) == self.store.book().current_id())
            .unwrap_or(0);
        self.mode = AppMode::ProfileList;
        self.status_message = None;
    }

    pub fn profile_list_next(&mut self) {
        let len = self.store.book().len();
        if len > 0 {
            self.profile_cursor = (self.profile_cursor + 1) % len;
        }
    }

    pub fn profile_list_previous(&mut self) {
        let len = self.store.book().len();
        if len > 0 {
            self.profile_cursor = (self.profile_cursor + len - 1) % len;
        }
    }

    /// Switches to the profile under the picker cursor.
    pub fn confirm_profile_selection(&mut self) {
        let id = self
            .store
            .profiles()
            .nth(self.profile_cursor)
            .map(|p| p.id.clone());
        if let Some(id) = id {
            if self.store.switch_profile(&id) {
                self.selected = 0;
                self.scroll = 0;
                let name = self
                    .store
                    .current_profile()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.status_message = Some(format!("Switched to {}", name));
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Deletes the profile under the picker cursor.
    ///
    /// The store self-heals: deleting the last profile creates a fresh
    /// default one, so the picker never ends up empty.
    pub fn delete_selected_profile(&mut self) {
        let id = self
            .store
            .profiles()
            .nth(self.profile_cursor)
            .map(|p| p.id.clone());
        if let Some(id) = id {
            if self.store.delete_profile(&id) {
                self.status_message = Some("Profile deleted".to_string());
            }
        }
        let len = self.store.book().len();
        if self.profile_cursor >= len && len > 0 {
            self.profile_cursor = len - 1;
        }
        self.clamp_selection();
    }

    /// Opens the CSV export dialog with a filename derived from the profile.
    pub fn start_csv_export(&mut self) {
        self.input = self
            .store
            .current_profile()
            .map(|p| format!("{}.csv", p.name.to_lowercase().replace(' ', "-")))
            .unwrap_or_else(|| "results.csv".to_string());
        self.cursor_position = self.input.len();
        self.mode = AppMode::ExportCsv;
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export.
    pub fn get_csv_export_filename(&self) -> String {
        if self.input.is_empty() {
            "results.csv".to_string()
        } else {
            self.input.clone()
        }
    }

    /// Processes the result of a CSV export operation and returns to normal
    /// mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    /// Ensures the selected question is visible by adjusting the scroll
    /// position.
    pub fn ensure_cursor_visible(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.viewport_rows {
            self.scroll = self.selected.saturating_sub(self.viewport_rows - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::LocalStorage;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(LocalStorage::new(dir.path()).unwrap());
        (App::new(store), dir)
    }

    #[test]
    fn test_new_app_has_a_profile() {
        let (app, _dir) = test_app();
        assert_eq!(app.store.book().len(), 1);
        assert!(app.store.current_profile().is_some());
        assert_eq!(app.selected, 0);
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.question_count(), DEFAULT_QUESTION_COUNT);
    }

    #[test]
    fn test_start_editing_loads_existing_value() {
        let (mut app, _dir) = test_app();
        let mut answers = app.store.current_profile().unwrap().user_answers.clone();
        answers[0].value = Some("B".to_string());
        app.store.update_user_answers(answers);

        app.start_editing();

        assert!(matches!(app.mode, AppMode::EditingAnswer));
        assert_eq!(app.input, "B");
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_finish_editing_stores_answer_and_advances() {
        let (mut app, _dir) = test_app();
        app.start_editing();
        app.input = "A".to_string();

        app.finish_editing();

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.selected, 1);
        let profile = app.store.current_profile().unwrap();
        assert_eq!(profile.user_answers[0].value.as_deref(), Some("A"));
    }

    #[test]
    fn test_finish_editing_blank_clears_answer() {
        let (mut app, _dir) = test_app();
        let mut answers = app.store.current_profile().unwrap().user_answers.clone();
        answers[0].value = Some("A".to_string());
        app.store.update_user_answers(answers);

        app.start_editing();
        app.input = "   ".to_string();
        app.finish_editing();

        let profile = app.store.current_profile().unwrap();
        assert!(profile.user_answers[0].value.is_none());
    }

    #[test]
    fn test_editing_standard_answers_tab() {
        let (mut app, _dir) = test_app();
        app.tabs.active = TabId::StandardAnswers;

        app.start_editing();
        app.input = "C".to_string();
        app.finish_editing();

        let profile = app.store.current_profile().unwrap();
        assert_eq!(profile.standard_answers[0].value.as_deref(), Some("C"));
        assert!(profile.user_answers[0].value.is_none());
    }

    #[test]
    fn test_diff_tab_rejects_editing() {
        let (mut app, _dir) = test_app();
        app.tabs.active = TabId::Diff;

        app.start_editing();

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.status_message.as_ref().unwrap().contains("read-only"));
    }

    #[test]
    fn test_cancel_editing_discards_input() {
        let (mut app, _dir) = test_app();
        app.start_editing();
        app.input = "D".to_string();

        app.cancel_editing();

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.input.is_empty());
        let profile = app.store.current_profile().unwrap();
        assert!(profile.user_answers[0].value.is_none());
    }

    #[test]
    fn test_new_profile_flow_switches_to_created() {
        let (mut app, _dir) = test_app();

        app.start_new_profile();
        assert!(matches!(app.mode, AppMode::NewProfile));
        app.input = "Final Exam".to_string();
        app.finish_new_profile();

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.store.book().len(), 2);
        assert_eq!(app.store.current_profile().unwrap().name, "Final Exam");
        assert!(app.status_message.as_ref().unwrap().contains("Final Exam"));
    }

    #[test]
    fn test_new_profile_blank_name_uses_default() {
        let (mut app, _dir) = test_app();

        app.start_new_profile();
        app.input = "  ".to_string();
        app.finish_new_profile();

        assert!(app.store.current_profile().unwrap().name.starts_with("Profile "));
    }

    #[test]
    fn test_rename_profile_flow() {
        let (mut app, _dir) = test_app();

        app.start_rename_profile();
        assert!(matches!(app.mode, AppMode::RenameProfile));
        app.input = "  Renamed  ".to_string();
        app.finish_rename_profile();

        assert_eq!(app.store.current_profile().unwrap().name, "Renamed");
        assert!(app.status_message.as_ref().unwrap().contains("renamed"));
    }

    #[test]
    fn test_rename_profile_blank_is_rejected() {
        let (mut app, _dir) = test_app();
        let original = app.store.current_profile().unwrap().name.clone();

        app.start_rename_profile();
        app.input = "   ".to_string();
        app.finish_rename_profile();

        assert_eq!(app.store.current_profile().unwrap().name, original);
        assert!(app.status_message.as_ref().unwrap().contains("failed"));
    }

    #[test]
    fn test_question_count_flow() {
        let (mut app, _dir) = test_app();
        app.selected = 99;

        app.start_question_count();
        assert_eq!(app.input, "100");
        app.input = "10".to_string();
        app.finish_question_count();

        assert_eq!(app.question_count(), 10);
        // Selection is clamped into the new range
        assert_eq!(app.selected, 9);
    }

    #[test]
    fn test_question_count_invalid_input() {
        let (mut app, _dir) = test_app();

        app.start_question_count();
        app.input = "ten".to_string();
        app.finish_question_count();

        assert_eq!(app.question_count(), DEFAULT_QUESTION_COUNT);
        assert!(app.status_message.as_ref().unwrap().contains("Invalid"));
    }

    #[test]
    fn test_profile_list_navigation_wraps() {
        let (mut app, _dir) = test_app();
        app.store.create_profile(Some("Second"), 5);
        app.store.create_profile(Some("Third"), 5);

        app.open_profile_list();
        assert!(matches!(app.mode, AppMode::ProfileList));
        assert_eq!(app.profile_cursor, 0);

        app.profile_list_previous();
        assert_eq!(app.profile_cursor, 2);
        app.profile_list_next();
        assert_eq!(app.profile_cursor, 0);
    }

    #[test]
    fn test_confirm_profile_selection_switches() {
        let (mut app, _dir) = test_app();
        let second = app.store.create_profile(Some("Second"), 5);
        app.selected = 42;

        app.open_profile_list();
        app.profile_list_next();
        app.confirm_profile_selection();

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.store.book().current_id(), Some(second.id.as_str()));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_delete_selected_profile_keeps_picker_valid() {
        let (mut app, _dir) = test_app();
        app.store.create_profile(Some("Second"), 5);

        app.open_profile_list();
        app.profile_list_next();
        app.delete_selected_profile();

        assert_eq!(app.store.book().len(), 1);
        assert!(app.profile_cursor < app.store.book().len());
    }

    #[test]
    fn test_delete_last_profile_from_picker_self_heals() {
        let (mut app, _dir) = test_app();

        app.open_profile_list();
        app.delete_selected_profile();

        assert_eq!(app.store.book().len(), 1);
        assert!(app.store.current_profile().is_some());
    }

    #[test]
    fn test_csv_export_dialog_flow() {
        let (mut app, _dir) = test_app();
        let id = app.store.current_profile().unwrap().id.clone();
        app.store.edit_profile_name(&id, "Mock Exam");

        app.start_csv_export();
        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.input, "mock-exam.csv");
        assert_eq!(app.get_csv_export_filename(), "mock-exam.csv");

        app.input.clear();
        assert_eq!(app.get_csv_export_filename(), "results.csv");

        app.set_csv_export_result(Ok("mock-exam.csv".to_string()));
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.status_message.as_ref().unwrap().contains("Exported to"));

        app.start_csv_export();
        app.set_csv_export_result(Err("disk full".to_string()));
        assert!(app.status_message.as_ref().unwrap().contains("Export failed"));
    }

    #[test]
    fn test_viewport_and_scrolling() {
        let (mut app, _dir) = test_app();
        app.update_viewport_size(10);

        app.selected = 25;
        app.ensure_cursor_visible();
        assert_eq!(app.scroll, 16);

        app.selected = 3;
        app.ensure_cursor_visible();
        assert_eq!(app.scroll, 3);
    }

    #[test]
    fn test_mode_transitions_return_to_normal() {
        let (mut app, _dir) = test_app();

        app.start_new_profile();
        app.cancel_input();
        assert!(matches!(app.mode, AppMode::Normal));

        app.start_rename_profile();
        app.cancel_input();
        assert!(matches!(app.mode, AppMode::Normal));

        app.start_question_count();
        app.cancel_input();
        assert!(matches!(app.mode, AppMode::Normal));

        app.start_csv_export();
        app.cancel_input();
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
