use crate::application::{App, AppMode};
use crate::domain::{CsvExporter, TabId};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::EditingAnswer => Self::handle_editing_mode(app, key),
            AppMode::NewProfile => Self::handle_new_profile_mode(app, key),
            AppMode::RenameProfile => Self::handle_rename_mode(app, key),
            AppMode::QuestionCount => Self::handle_question_count_mode(app, key),
            AppMode::ProfileList => Self::handle_profile_list_mode(app, key),
            AppMode::ExportCsv => Self::handle_export_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Tab | KeyCode::Right => {
                app.tabs.switch_to_next();
                tracing::debug!(tab = app.tabs.active.as_str(), "switched view");
            }
            KeyCode::BackTab | KeyCode::Left => {
                app.tabs.switch_to_previous();
                tracing::debug!(tab = app.tabs.active.as_str(), "switched view");
            }
            KeyCode::Char('1') => {
                app.tabs.active = TabId::UserAnswers;
            }
            KeyCode::Char('2') => {
                app.tabs.active = TabId::StandardAnswers;
            }
            KeyCode::Char('3') => {
                app.tabs.active = TabId::Diff;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.selected > 0 {
                    app.selected -= 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.selected + 1 < app.question_count() {
                    app.selected += 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::PageUp => {
                app.selected = app.selected.saturating_sub(app.viewport_rows);
                app.ensure_cursor_visible();
            }
            KeyCode::PageDown => {
                let count = app.question_count();
                if count > 0 {
                    app.selected = (app.selected + app.viewport_rows).min(count - 1);
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Home => {
                app.selected = 0;
                app.ensure_cursor_visible();
            }
            KeyCode::End => {
                let count = app.question_count();
                if count > 0 {
                    app.selected = count - 1;
                    app.ensure_cursor_visible();
                }
            }
            KeyCode::Enter => {
                app.start_editing();
            }
            KeyCode::Char('n') => {
                app.start_new_profile();
            }
            KeyCode::Char('r') => {
                app.start_rename_profile();
            }
            KeyCode::Char('c') => {
                app.start_question_count();
            }
            KeyCode::Char('p') => {
                app.open_profile_list();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            _ => Self::edit_input_buffer(app, key),
        }
    }

    fn handle_new_profile_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_new_profile(),
            KeyCode::Esc => app.cancel_input(),
            _ => Self::edit_input_buffer(app, key),
        }
    }

    fn handle_rename_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_rename_profile(),
            KeyCode::Esc => app.cancel_input(),
            _ => Self::edit_input_buffer(app, key),
        }
    }

    fn handle_question_count_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_question_count(),
            KeyCode::Esc => app.cancel_input(),
            _ => Self::edit_input_buffer(app, key),
        }
    }

    fn handle_profile_list_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.profile_list_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.profile_list_next(),
            KeyCode::Enter => app.confirm_profile_selection(),
            KeyCode::Char('d') => app.delete_selected_profile(),
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = match app.store.current_profile() {
                    Some(profile) => CsvExporter::export_results(profile, &filename),
                    None => Err("no profile selected".to_string()),
                };
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => app.cancel_input(),
            _ => Self::edit_input_buffer(app, key),
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                app.help_scroll += 10;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            _ => {}
        }
    }

    /// Shared text editing for every prompt mode: characters insert at the
    /// cursor, Backspace/Delete remove around it, arrows and Home/End move it.
    fn edit_input_buffer(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char(c) => {
                app.input.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let previous = app.input[..app.cursor_position]
                        .chars()
                        .next_back()
                        .map(|c| c.len_utf8())
                        .unwrap_or(0);
                    app.cursor_position -= previous;
                    app.input.remove(app.cursor_position);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.input.len() {
                    app.input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                let previous = app.input[..app.cursor_position]
                    .chars()
                    .next_back()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
                app.cursor_position -= previous;
            }
            KeyCode::Right => {
                let next = app.input[app.cursor_position..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
                app.cursor_position += next;
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.input.len();
            }
            _ => {}
        }
    }
}
