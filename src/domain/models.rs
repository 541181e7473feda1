use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub const DEFAULT_QUESTION_COUNT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Answer {
    pub fn blank(id: usize) -> Self {
        Self { id, value: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub create_time: DateTime<Utc>,
    pub question_count: usize,
    pub user_answers: Vec<Answer>,
    pub standard_answers: Vec<Answer>,
}

impl Profile {
    pub fn new(id: String, name: Option<&str>, question_count: usize) -> Self {
        let create_time = Utc::now();
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("Profile {}", create_time.format("%Y-%m-%d")),
        };
        Self {
            id,
            name,
            create_time,
            question_count,
            user_answers: blank_answers(question_count),
            standard_answers: blank_answers(question_count),
        }
    }

    /// Grows or shrinks both answer lists so their length matches `count`.
    ///
    /// Growing appends unanswered entries continuing the 1-based id sequence;
    /// shrinking truncates both lists. Values in the surviving prefix are left
    /// untouched.
    pub fn resize_questions(&mut self, count: usize) {
        if count > self.question_count {
            for id in self.question_count + 1..=count {
                self.user_answers.push(Answer::blank(id));
                self.standard_answers.push(Answer::blank(id));
            }
        } else if count < self.question_count {
            self.user_answers.truncate(count);
            self.standard_answers.truncate(count);
        }
        self.question_count = count;
    }
}

fn blank_answers(count: usize) -> Vec<Answer> {
    (1..=count).map(Answer::blank).collect()
}

fn generate_profile_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("profile_{}_{}", millis, &suffix[..9])
}

/// Id-keyed profile collection that remembers insertion order.
///
/// Serializes as a plain sequence of profiles so the on-disk JSON stays an
/// array while lookups stay O(1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileMap {
    entries: HashMap<String, Profile>,
    order: Vec<String>,
}

impl ProfileMap {
    pub fn insert(&mut self, profile: Profile) {
        if self.entries.insert(profile.id.clone(), profile.clone()).is_none() {
            self.order.push(profile.id);
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Profile> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            self.order.retain(|existing| existing != id);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn last_inserted(&self) -> Option<&Profile> {
        self.order.last().and_then(|id| self.entries.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for ProfileMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.order.len()))?;
        for profile in self.iter() {
            seq.serialize_element(profile)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ProfileMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{SeqAccess, Visitor};
        use std::fmt;

        struct ProfilesVisitor;

        impl<'de> Visitor<'de> for ProfilesVisitor {
            type Value = ProfileMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of profiles")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut map = ProfileMap::default();
                while let Some(profile) = seq.next_element::<Profile>()? {
                    map.insert(profile);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_seq(ProfilesVisitor)
    }
}

/// The profile collection plus the "current profile" reference.
///
/// Mutating operations return a bool (or the created profile) instead of an
/// error; callers check the result. The book never ends a delete or
/// initialize operation with zero profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBook {
    profiles: ProfileMap,
    current_id: Option<String>,
}

impl ProfileBook {
    pub fn create_profile(&mut self, name: Option<&str>, question_count: usize) -> Profile {
        let profile = Profile::new(generate_profile_id(), name, question_count);
        let was_empty = self.profiles.is_empty();
        self.profiles.insert(profile.clone());
        if was_empty {
            self.current_id = Some(profile.id.clone());
        }
        profile
    }

    pub fn switch_profile(&mut self, id: &str) -> bool {
        if self.profiles.contains(id) {
            self.current_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn delete_profile(&mut self, id: &str) -> bool {
        if self.profiles.remove(id).is_none() {
            return false;
        }

        if self.current_id.as_deref() == Some(id) {
            if let Some(last) = self.profiles.last_inserted() {
                self.current_id = Some(last.id.clone());
            } else {
                // create_profile on an empty book makes the new profile current
                self.create_profile(None, DEFAULT_QUESTION_COUNT);
            }
        }

        true
    }

    pub fn edit_profile_name(&mut self, id: &str, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.profiles.get_mut(id) {
            Some(profile) => {
                profile.name = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    pub fn update_question_count(&mut self, count: usize) -> bool {
        match self.current_profile_mut() {
            Some(profile) => {
                profile.resize_questions(count);
                true
            }
            None => false,
        }
    }

    pub fn update_user_answers(&mut self, answers: Vec<Answer>) -> bool {
        match self.current_profile_mut() {
            Some(profile) => {
                profile.user_answers = answers;
                true
            }
            None => false,
        }
    }

    pub fn update_standard_answers(&mut self, answers: Vec<Answer>) -> bool {
        match self.current_profile_mut() {
            Some(profile) => {
                profile.standard_answers = answers;
                true
            }
            None => false,
        }
    }

    pub fn initialize_profiles(&mut self) {
        if self.profiles.is_empty() {
            self.create_profile(None, DEFAULT_QUESTION_COUNT);
        }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.current_id
            .as_deref()
            .and_then(|id| self.profiles.get(id))
    }

    fn current_profile_mut(&mut self) -> Option<&mut Profile> {
        match self.current_id.clone() {
            Some(id) => self.profiles.get_mut(&id),
            None => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_book() -> (ProfileBook, String, String) {
        let mut book = ProfileBook::default();
        let first = book.create_profile(Some("First"), 10);
        let second = book.create_profile(Some("Second"), 20);
        (book, first.id, second.id)
    }

    #[test]
    fn test_create_profile_shape() {
        let mut book = ProfileBook::default();
        let profile = book.create_profile(Some("Midterm"), 5);

        assert_eq!(profile.name, "Midterm");
        assert_eq!(profile.question_count, 5);
        assert_eq!(profile.user_answers.len(), 5);
        assert_eq!(profile.standard_answers.len(), 5);
        for (i, answer) in profile.user_answers.iter().enumerate() {
            assert_eq!(answer.id, i + 1);
            assert!(answer.value.is_none());
        }
        for (i, answer) in profile.standard_answers.iter().enumerate() {
            assert_eq!(answer.id, i + 1);
        }
    }

    #[test]
    fn test_first_profile_becomes_current() {
        let mut book = ProfileBook::default();
        assert!(book.current_profile().is_none());

        let first = book.create_profile(None, 10);
        assert_eq!(book.current_id(), Some(first.id.as_str()));

        // Later creations leave the current profile alone
        book.create_profile(None, 10);
        assert_eq!(book.current_id(), Some(first.id.as_str()));
    }

    #[test]
    fn test_default_profile_name_and_count() {
        let mut book = ProfileBook::default();
        let profile = book.create_profile(None, DEFAULT_QUESTION_COUNT);

        assert!(profile.name.starts_with("Profile "));
        assert_eq!(profile.question_count, 100);
    }

    #[test]
    fn test_profile_ids_are_unique() {
        let mut book = ProfileBook::default();
        let a = book.create_profile(None, 1);
        let b = book.create_profile(None, 1);
        let c = book.create_profile(None, 1);

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_switch_profile() {
        let (mut book, first_id, second_id) = create_test_book();
        assert_eq!(book.current_id(), Some(first_id.as_str()));

        assert!(book.switch_profile(&second_id));
        assert_eq!(book.current_id(), Some(second_id.as_str()));
    }

    #[test]
    fn test_switch_profile_unknown_id() {
        let (mut book, first_id, _) = create_test_book();

        assert!(!book.switch_profile("profile_0_missing"));
        assert_eq!(book.current_id(), Some(first_id.as_str()));
    }

    #[test]
    fn test_delete_non_current_profile() {
        let (mut book, first_id, second_id) = create_test_book();

        assert!(book.delete_profile(&second_id));
        assert_eq!(book.len(), 1);
        assert_eq!(book.current_id(), Some(first_id.as_str()));
    }

    #[test]
    fn test_delete_current_picks_last_inserted() {
        let (mut book, first_id, second_id) = create_test_book();
        let third = book.create_profile(Some("Third"), 5);

        assert!(book.switch_profile(&first_id));
        assert!(book.delete_profile(&first_id));

        // Most recently inserted remaining profile becomes current
        assert_eq!(book.current_id(), Some(third.id.as_str()));
        assert!(book.get(&second_id).is_some());
    }

    #[test]
    fn test_delete_current_with_one_other_remaining() {
        let (mut book, first_id, second_id) = create_test_book();
        assert!(book.switch_profile(&second_id));

        assert!(book.delete_profile(&second_id));

        assert_eq!(book.len(), 1);
        assert_eq!(book.current_id(), Some(first_id.as_str()));
    }

    #[test]
    fn test_delete_last_profile_self_heals() {
        let mut book = ProfileBook::default();
        let only = book.create_profile(Some("Only"), 10);

        assert!(book.delete_profile(&only.id));

        assert_eq!(book.len(), 1);
        let current = book.current_profile().expect("replacement profile");
        assert_ne!(current.id, only.id);
        assert_eq!(current.question_count, DEFAULT_QUESTION_COUNT);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (mut book, _, _) = create_test_book();

        assert!(!book.delete_profile("profile_0_missing"));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_book_never_ends_empty() {
        let mut book = ProfileBook::default();
        book.initialize_profiles();
        assert_eq!(book.len(), 1);

        // Repeated initialize is idempotent
        book.initialize_profiles();
        assert_eq!(book.len(), 1);

        // Delete everything repeatedly; a replacement always appears
        for _ in 0..5 {
            let id = book.current_id().unwrap().to_string();
            assert!(book.delete_profile(&id));
            assert!(!book.is_empty());
            assert!(book.current_profile().is_some());
        }
    }

    #[test]
    fn test_edit_profile_name_trims() {
        let (mut book, first_id, _) = create_test_book();

        assert!(book.edit_profile_name(&first_id, "  Foo  "));
        assert_eq!(book.get(&first_id).unwrap().name, "Foo");
    }

    #[test]
    fn test_edit_profile_name_rejects_blank() {
        let (mut book, first_id, _) = create_test_book();

        assert!(!book.edit_profile_name(&first_id, "   "));
        assert!(!book.edit_profile_name(&first_id, ""));
        assert_eq!(book.get(&first_id).unwrap().name, "First");
    }

    #[test]
    fn test_edit_profile_name_unknown_id() {
        let (mut book, _, _) = create_test_book();
        assert!(!book.edit_profile_name("profile_0_missing", "Foo"));
    }

    #[test]
    fn test_update_question_count_grow() {
        let (mut book, first_id, _) = create_test_book();
        book.switch_profile(&first_id);

        assert!(book.update_question_count(15));

        let profile = book.current_profile().unwrap();
        assert_eq!(profile.question_count, 15);
        assert_eq!(profile.user_answers.len(), 15);
        assert_eq!(profile.standard_answers.len(), 15);
        assert_eq!(profile.user_answers[14].id, 15);
        assert!(profile.user_answers[14].value.is_none());
    }

    #[test]
    fn test_update_question_count_shrink() {
        let (mut book, first_id, _) = create_test_book();
        book.switch_profile(&first_id);

        assert!(book.update_question_count(3));

        let profile = book.current_profile().unwrap();
        assert_eq!(profile.question_count, 3);
        assert_eq!(profile.user_answers.len(), 3);
        assert_eq!(profile.standard_answers.len(), 3);
    }

    #[test]
    fn test_update_question_count_same_is_success() {
        let (mut book, first_id, _) = create_test_book();
        book.switch_profile(&first_id);

        assert!(book.update_question_count(10));
        assert_eq!(book.current_profile().unwrap().question_count, 10);
    }

    #[test]
    fn test_grow_then_shrink_preserves_prefix() {
        let mut book = ProfileBook::default();
        book.create_profile(Some("Quiz"), 3);

        let mut answers = book.current_profile().unwrap().user_answers.clone();
        answers[0].value = Some("A".to_string());
        answers[2].value = Some("C".to_string());
        assert!(book.update_user_answers(answers));

        assert!(book.update_question_count(8));
        assert!(book.update_question_count(3));

        let profile = book.current_profile().unwrap();
        assert_eq!(profile.user_answers[0].value.as_deref(), Some("A"));
        assert!(profile.user_answers[1].value.is_none());
        assert_eq!(profile.user_answers[2].value.as_deref(), Some("C"));
    }

    #[test]
    fn test_update_answers_without_current_profile() {
        let mut book = ProfileBook::default();
        assert!(!book.update_user_answers(vec![Answer::blank(1)]));
        assert!(!book.update_standard_answers(vec![Answer::blank(1)]));
        assert!(!book.update_question_count(10));
    }

    #[test]
    fn test_update_standard_answers_replaces_list() {
        let mut book = ProfileBook::default();
        book.create_profile(Some("Quiz"), 2);

        let answers = vec![
            Answer { id: 1, value: Some("B".to_string()) },
            Answer { id: 2, value: None },
        ];
        assert!(book.update_standard_answers(answers.clone()));
        assert_eq!(book.current_profile().unwrap().standard_answers, answers);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let (book, first_id, second_id) = create_test_book();
        let ids: Vec<&str> = book.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![first_id.as_str(), second_id.as_str()]);
    }

    #[test]
    fn test_book_round_trips_through_json() {
        let (mut book, first_id, _) = create_test_book();
        book.edit_profile_name(&first_id, "Renamed");
        let mut answers = book.get(&first_id).unwrap().user_answers.clone();
        answers[0].value = Some("D".to_string());
        book.switch_profile(&first_id);
        book.update_user_answers(answers);

        let json = serde_json::to_string(&book).unwrap();
        let restored: ProfileBook = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), book.len());
        assert_eq!(restored.current_id(), book.current_id());

        let original = book.get(&first_id).unwrap();
        let loaded = restored.get(&first_id).unwrap();
        assert_eq!(loaded.name, original.name);
        assert_eq!(loaded.create_time, original.create_time);
        assert_eq!(loaded.user_answers, original.user_answers);

        let ids: Vec<&str> = restored.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<&str> = book.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_storage_shape_uses_camel_case_keys() {
        let mut book = ProfileBook::default();
        book.create_profile(Some("Shape"), 1);

        let json: serde_json::Value = serde_json::to_value(&book).unwrap();
        assert!(json.get("profiles").unwrap().is_array());
        assert!(json.get("currentId").unwrap().is_string());

        let profile = &json["profiles"][0];
        assert!(profile.get("createTime").is_some());
        assert!(profile.get("questionCount").is_some());
        assert!(profile.get("userAnswers").is_some());
        assert!(profile.get("standardAnswers").is_some());
    }
}
