//! The three answer-sheet views and circular navigation between them.

/// Identifier of one of the three fixed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    UserAnswers,
    StandardAnswers,
    Diff,
}

impl TabId {
    /// Stable string id for the view.
    pub fn as_str(self) -> &'static str {
        match self {
            TabId::UserAnswers => "answer",
            TabId::StandardAnswers => "input",
            TabId::Diff => "diff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub label: &'static str,
}

pub const TABS: [Tab; 3] = [
    Tab { id: TabId::UserAnswers, label: "User Answers" },
    Tab { id: TabId::StandardAnswers, label: "Standard Answers" },
    Tab { id: TabId::Diff, label: "Diff" },
];

/// Holds the active view and supports circular next/previous switching.
///
/// `active` is deliberately public: the UI may assign it directly in
/// addition to using the switching operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSelector {
    pub active: TabId,
}

impl Default for TabSelector {
    fn default() -> Self {
        Self { active: TABS[0].id }
    }
}

impl TabSelector {
    pub fn tabs() -> &'static [Tab] {
        &TABS
    }

    pub fn active_index(&self) -> Option<usize> {
        TABS.iter().position(|tab| tab.id == self.active)
    }

    pub fn active_label(&self) -> &'static str {
        TABS.iter()
            .find(|tab| tab.id == self.active)
            .map(|tab| tab.label)
            .unwrap_or("")
    }

    /// Moves to the next tab, wrapping from the last back to the first.
    pub fn switch_to_next(&mut self) {
        let Some(current) = self.active_index() else {
            return;
        };
        let next = if current < TABS.len() - 1 { current + 1 } else { 0 };
        self.active = TABS[next].id;
    }

    /// Moves to the previous tab, wrapping from the first to the last.
    pub fn switch_to_previous(&mut self) {
        let Some(current) = self.active_index() else {
            return;
        };
        let previous = if current > 0 { current - 1 } else { TABS.len() - 1 };
        self.active = TABS[previous].id;
    }
}
