//! Resolution of a free-text identifier against the active momento tasks.
//!
//! Strategies run in a fixed order and the first one that matches anything
//! decides the outcome:
//!
//! 1. numeric identifier: exact id match (no further strategies)
//! 2. case-insensitive substring of the title
//! 3. any word longer than two characters contained in the title
//! 4. the only active task, when exactly one exists
//!
//! A strategy that matches more than one task yields [`MomentoMatch::Ambiguous`]
//! with the matches in store order, rather than silently picking the first.

use crate::entities::Task;
use crate::errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MomentoMatch<'a> {
    Unique(&'a Task),
    Ambiguous(Vec<&'a Task>),
    None,
}

impl<'a> MomentoMatch<'a> {
    fn from_candidates(mut found: Vec<&'a Task>) -> Option<Self> {
        match found.len() {
            0 => None,
            1 => found.pop().map(Self::Unique),
            _ => Some(Self::Ambiguous(found)),
        }
    }
}

/// Resolve `identifier` against `active`, which must already be filtered to
/// active momento tasks.
#[must_use]
pub fn resolve<'a>(active: &'a [Task], identifier: &str) -> MomentoMatch<'a> {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<i64>() {
        return active
            .iter()
            .find(|task| task.id == id)
            .map_or(MomentoMatch::None, MomentoMatch::Unique);
    }

    let needle = identifier.to_lowercase();
    if !needle.is_empty() {
        let by_substring: Vec<&Task> = active
            .iter()
            .filter(|task| task.title.to_lowercase().contains(&needle))
            .collect();
        if let Some(found) = MomentoMatch::from_candidates(by_substring) {
            return found;
        }

        let words: Vec<&str> = needle
            .split_whitespace()
            .filter(|word| word.chars().count() > 2)
            .collect();
        if !words.is_empty() {
            let by_word: Vec<&Task> = active
                .iter()
                .filter(|task| {
                    let title = task.title.to_lowercase();
                    words.iter().any(|word| title.contains(word))
                })
                .collect();
            if let Some(found) = MomentoMatch::from_candidates(by_word) {
                return found;
            }
        }
    }

    match active {
        [only] => MomentoMatch::Unique(only),
        _ => MomentoMatch::None,
    }
}

/// Resolve for a finish request, turning every non-unique outcome into the
/// matching [`CoreError`].
///
/// # Errors
///
/// - [`CoreError::NoActiveMomento`] when `active` is empty
/// - [`CoreError::MomentoNotFound`] listing every active task
/// - [`CoreError::AmbiguousMomento`] listing the tasks that matched
pub fn resolve_for_finish<'a>(active: &'a [Task], identifier: &str) -> Result<&'a Task, CoreError> {
    if active.is_empty() {
        return Err(CoreError::NoActiveMomento);
    }
    match resolve(active, identifier) {
        MomentoMatch::Unique(task) => Ok(task),
        MomentoMatch::Ambiguous(matches) => Err(CoreError::AmbiguousMomento {
            identifier: identifier.trim().to_string(),
            candidates: describe_candidates(matches),
        }),
        MomentoMatch::None => Err(CoreError::MomentoNotFound {
            identifier: identifier.trim().to_string(),
            candidates: describe_candidates(active),
        }),
    }
}

/// `"Design review" (ID: 3), "Design doc" (ID: 4)`
pub fn describe_candidates<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    tasks
        .into_iter()
        .map(|task| format!("\"{}\" (ID: {})", task.title, task.id))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::TaskStatus;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn active(id: i64, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id,
            title: title.to_string(),
            description: None,
            status: TaskStatus::InProgress,
            task_date: None,
            start_time: None,
            end_time: None,
            is_momento_task: true,
            momento_start_timestamp: Some(now),
            momento_end_timestamp: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(found: &MomentoMatch<'_>) -> Vec<i64> {
        match found {
            MomentoMatch::Unique(task) => vec![task.id],
            MomentoMatch::Ambiguous(tasks) => tasks.iter().map(|t| t.id).collect(),
            MomentoMatch::None => vec![],
        }
    }

    #[rstest]
    #[case("2", vec![2])]
    #[case("report", vec![1])]
    #[case("WRITE REPORT", vec![1])]
    #[case("quarterly report draft", vec![1])]
    #[case("review", vec![2, 3])]
    #[case("design", vec![2, 3])]
    #[case("design review", vec![2])]
    #[case("the doc", vec![3])]
    #[case("99", vec![])]
    #[case("groceries", vec![])]
    fn resolve_strategies(#[case] identifier: &str, #[case] expected: Vec<i64>) {
        let tasks = vec![
            active(1, "Write report"),
            active(2, "Design review"),
            active(3, "Design doc review"),
        ];
        assert_eq!(ids(&resolve(&tasks, identifier)), expected);
    }

    #[test]
    fn single_active_task_is_the_fallback() {
        let tasks = vec![active(7, "Gym session")];
        assert_eq!(ids(&resolve(&tasks, "that thing")), vec![7]);
        assert_eq!(ids(&resolve(&tasks, "")), vec![7]);
    }

    #[test]
    fn numeric_identifier_never_falls_back() {
        let tasks = vec![active(7, "Gym session")];
        assert_eq!(resolve(&tasks, "8"), MomentoMatch::None);
    }

    #[test]
    fn short_words_are_ignored() {
        let tasks = vec![active(1, "Go to gym"), active(2, "Cook dinner")];
        assert_eq!(resolve(&tasks, "to go"), MomentoMatch::None);
    }

    #[test]
    fn finish_with_nothing_active_is_its_own_error() {
        assert_eq!(resolve_for_finish(&[], "x"), Err(CoreError::NoActiveMomento));
    }

    #[test]
    fn finish_ambiguity_lists_both_candidates() {
        let tasks = vec![active(3, "Design review"), active(4, "Design doc")];
        let err = resolve_for_finish(&tasks, "design").unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CoreError::AmbiguousMomento { .. }));
        assert!(message.contains("\"Design review\" (ID: 3)"), "{message}");
        assert!(message.contains("\"Design doc\" (ID: 4)"), "{message}");
    }

    #[test]
    fn finish_miss_lists_every_active_task() {
        let tasks = vec![active(3, "Design review"), active(4, "Laundry")];
        let err = resolve_for_finish(&tasks, "taxes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find momento task \"taxes\". Active momento tasks: \"Design review\" (ID: 3), \"Laundry\" (ID: 4)"
        );
    }
}
