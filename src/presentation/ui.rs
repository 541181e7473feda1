use crate::application::{App, AppMode};
use crate::domain::{diff_profile, DiffStatus, DiffSummary, TabId, TabSelector};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tab_bar(f, app, chunks[1]);
    match app.tabs.active {
        TabId::UserAnswers | TabId::StandardAnswers => render_answers(f, app, chunks[2]),
        TabId::Diff => render_diff(f, app, chunks[2]),
    }
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::ProfileList) {
        render_profile_list_popup(f, app);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.store.current_profile() {
        Some(profile) => format!(
            "anshts - Answer Sheet Tracker | Profile: {} ({} questions)",
            profile.name, profile.question_count
        ),
        None => "anshts - Answer Sheet Tracker | No profile".to_string(),
    };
    let header = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TabSelector::tabs()
        .iter()
        .map(|tab| Line::from(tab.label))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Views"))
        .select(app.tabs.active_index().unwrap_or(0))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_answers(f: &mut Frame, app: &App, area: Rect) {
    let Some(answers) = app.active_answers() else {
        return;
    };

    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let end = (app.scroll + visible_rows).min(answers.len());

    let header_row = Row::new([
        Cell::from("#").style(Style::default().fg(Color::Yellow)),
        Cell::from("Answer").style(Style::default().fg(Color::Yellow)),
    ])
    .height(1);

    let mut rows = vec![header_row];
    for (index, answer) in answers.iter().enumerate().take(end).skip(app.scroll) {
        let number_style = if index == app.selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let value = if index == app.selected && matches!(app.mode, AppMode::EditingAnswer) {
            format!("{}_", app.input)
        } else {
            answer.value.clone().unwrap_or_default()
        };
        let value_style = if index == app.selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };

        rows.push(Row::new([
            Cell::from(format!("{}", answer.id)).style(number_style),
            Cell::from(value).style(value_style),
        ]));
    }

    let title = app.tabs.active_label();
    let table = Table::new(rows, [Constraint::Length(5), Constraint::Min(10)])
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_diff(f: &mut Frame, app: &App, area: Rect) {
    let Some(profile) = app.store.current_profile() else {
        return;
    };

    let entries = diff_profile(profile);
    let summary = DiffSummary::from_entries(&entries);

    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let end = (app.scroll + visible_rows).min(entries.len());

    let header_row = Row::new(["#", "Yours", "Key", "Result"].map(|label| {
        Cell::from(label).style(Style::default().fg(Color::Yellow))
    }))
    .height(1);

    let mut rows = vec![header_row];
    for (index, entry) in entries.iter().enumerate().take(end).skip(app.scroll) {
        let status_style = match entry.status {
            DiffStatus::Correct => Style::default().fg(Color::Green),
            DiffStatus::Incorrect => Style::default().fg(Color::Red),
            DiffStatus::Unanswered => Style::default().fg(Color::DarkGray),
            DiffStatus::NoKey => Style::default().fg(Color::Magenta),
        };
        let number_style = if index == app.selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };

        rows.push(Row::new([
            Cell::from(format!("{}", entry.id)).style(number_style),
            Cell::from(entry.user.clone().unwrap_or_default()),
            Cell::from(entry.standard.clone().unwrap_or_default()),
            Cell::from(entry.status.symbol()).style(status_style),
        ]));
    }

    let score = match summary.score_percent() {
        Some(percent) => format!("{:.1}%", percent),
        None => "n/a".to_string(),
    };
    let title = format!(
        "Diff | {} ok, {} wrong, {} blank, {} no key | score {}",
        summary.correct, summary.incorrect, summary.unanswered, summary.no_key, score
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Min(8),
            Constraint::Length(8),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);
    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab/S-Tab: views | Enter: edit | n: new | r: rename | c: count | p: profiles | Ctrl+E: export | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::EditingAnswer => format!(
            "Answer #{}: {} (Enter to save, Esc to cancel)",
            app.selected + 1,
            app.input
        ),
        AppMode::NewProfile => format!(
            "New profile name: {} (Enter to create, blank for default, Esc to cancel)",
            app.input
        ),
        AppMode::RenameProfile => {
            format!("Rename profile: {} (Enter to save, Esc to cancel)", app.input)
        }
        AppMode::QuestionCount => {
            format!("Question count: {} (Enter to apply, Esc to cancel)", app.input)
        }
        AppMode::ProfileList => {
            "↑↓/jk: select | Enter: switch | d: delete | Esc: close".to_string()
        }
        AppMode::ExportCsv => {
            format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.input)
        }
        AppMode::Help => "↑↓/jk: scroll | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::EditingAnswer => Style::default().fg(Color::Green),
            AppMode::NewProfile | AppMode::RenameProfile => Style::default().fg(Color::Yellow),
            AppMode::QuestionCount => Style::default().fg(Color::Yellow),
            AppMode::ProfileList => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_profile_list_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 8,
        y: area.height / 6,
        width: area.width * 3 / 4,
        height: area.height * 2 / 3,
    };

    f.render_widget(Clear, popup_area);

    let header_row = Row::new(["", "Name", "Questions", "Created"].map(|label| {
        Cell::from(label).style(Style::default().fg(Color::Yellow))
    }))
    .height(1);

    let current_id = app.store.book().current_id();
    let mut rows = vec![header_row];
    for (index, profile) in app.store.profiles().enumerate() {
        let marker = if Some(profile.id.as_str()) == current_id { "*" } else { "" };
        let style = if index == app.profile_cursor {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        rows.push(
            Row::new([
                Cell::from(marker),
                Cell::from(profile.name.clone()),
                Cell::from(format!("{}", profile.question_count)),
                Cell::from(profile.create_time.format("%Y-%m-%d").to_string()),
            ])
            .style(style),
        );
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Profiles"))
    .column_spacing(1);
    f.render_widget(table, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start = scroll.min(help_lines.len().saturating_sub(1));
    let end = (start + visible_height).min(help_lines.len());
    let visible_text = help_lines[start..end].join("\n");

    let help = Paragraph::new(visible_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(help, popup_area);
}

fn get_help_text() -> String {
    [
        "anshts - Answer Sheet Tracker",
        "",
        "Views",
        "  Tab / Shift+Tab    next / previous view (wraps around)",
        "  Left / Right       previous / next view",
        "  1 / 2 / 3          jump to User Answers / Standard Answers / Diff",
        "",
        "Questions",
        "  Up / Down, k / j   move selection",
        "  PgUp / PgDn        move a screen at a time",
        "  Home / End         first / last question",
        "  Enter              edit the selected answer (not on Diff)",
        "",
        "Profiles",
        "  n                  create a new profile",
        "  r                  rename the current profile",
        "  c                  change the question count (shrinking discards answers)",
        "  p                  open the profile picker (Enter switch, d delete)",
        "",
        "Data",
        "  Ctrl+E             export the diff as CSV",
        "",
        "Other",
        "  F1 / ?             this help",
        "  q                  quit",
        "",
        "All changes are saved automatically.",
    ]
    .join("\n")
}
