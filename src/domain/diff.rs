//! Per-question comparison of user answers against the standard answers.

use super::models::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    /// Both answers present and equal after trimming and case folding.
    Correct,
    /// Both answers present but different.
    Incorrect,
    /// No user answer recorded.
    Unanswered,
    /// User answered but no standard answer exists to grade against.
    NoKey,
}

impl DiffStatus {
    pub fn symbol(self) -> &'static str {
        match self {
            DiffStatus::Correct => "ok",
            DiffStatus::Incorrect => "wrong",
            DiffStatus::Unanswered => "blank",
            DiffStatus::NoKey => "no key",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub id: usize,
    pub user: Option<String>,
    pub standard: Option<String>,
    pub status: DiffStatus,
}

/// Compares the two answer lists positionally.
///
/// The lists are expected to be parallel; if a wholesale answer update left
/// them ragged, the comparison covers the shorter prefix and treats missing
/// tail entries as absent values.
pub fn diff_profile(profile: &Profile) -> Vec<DiffEntry> {
    let len = profile.user_answers.len().max(profile.standard_answers.len());
    (0..len)
        .map(|i| {
            let user = profile
                .user_answers
                .get(i)
                .and_then(|a| a.value.clone());
            let standard = profile
                .standard_answers
                .get(i)
                .and_then(|a| a.value.clone());
            let status = grade(user.as_deref(), standard.as_deref());
            DiffEntry { id: i + 1, user, standard, status }
        })
        .collect()
}

fn grade(user: Option<&str>, standard: Option<&str>) -> DiffStatus {
    match (user, standard) {
        (None, _) => DiffStatus::Unanswered,
        (Some(_), None) => DiffStatus::NoKey,
        (Some(user), Some(standard)) => {
            if user.trim().eq_ignore_ascii_case(standard.trim()) {
                DiffStatus::Correct
            } else {
                DiffStatus::Incorrect
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub no_key: usize,
}

impl DiffSummary {
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.status {
                DiffStatus::Correct => summary.correct += 1,
                DiffStatus::Incorrect => summary.incorrect += 1,
                DiffStatus::Unanswered => summary.unanswered += 1,
                DiffStatus::NoKey => summary.no_key += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.unanswered + self.no_key
    }

    /// Percentage of correct answers among gradeable ones, or `None` when
    /// nothing could be graded.
    pub fn score_percent(&self) -> Option<f64> {
        let graded = self.correct + self.incorrect;
        if graded == 0 {
            return None;
        }
        Some(self.correct as f64 * 100.0 / graded as f64)
    }
}
