use chrono::{DateTime, Utc};
use regex::Regex;

use crate::model::{AppState, Filter, Task};

/// Tasks admitted by `filter`, in collection order
pub fn filter_todos(todos: &[Task], filter: Filter) -> Vec<&Task> {
    todos.iter().filter(|t| filter.admits(t)).collect()
}

/// Case-insensitive substring test. An empty query matches everything.
pub fn matches_query(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Keep tasks whose text contains `query`
pub fn search_todos<'a>(todos: Vec<&'a Task>, query: &str) -> Vec<&'a Task> {
    if query.is_empty() {
        return todos;
    }
    todos
        .into_iter()
        .filter(|t| matches_query(&t.text, query))
        .collect()
}

/// Dated tasks ascending by due date, then undated tasks in their original order.
pub fn sort_by_due_date(todos: Vec<&Task>) -> Vec<&Task> {
    let (mut dated, undated): (Vec<&Task>, Vec<&Task>) =
        todos.into_iter().partition(|t| t.due_date.is_some());
    // Stable, so equal due dates keep collection order
    dated.sort_by_key(|t| t.due_date);
    dated.extend(undated);
    dated
}

/// The list shown to the user: filter, then search, then (optionally) sort.
pub fn visible_todos(state: &AppState) -> Vec<&Task> {
    let filtered = filter_todos(&state.todos, state.filter);
    let searched = search_todos(filtered, &state.search);
    if state.sort_by_due_date {
        sort_by_due_date(searched)
    } else {
        searched
    }
}

/// Past due and not yet completed. Completed tasks are never overdue.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < now)
}

/// Regex highlighting occurrences of the search query, case-insensitive
pub fn search_highlight_re(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn due(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    fn mixed_state() -> AppState {
        let mut state = AppState::default();
        let mut t1 = Task::new(1, "Buy Milk", None);
        let t2 = Task::new(2, "Walk dog", None);
        let mut t3 = Task::new(3, "Pay milkman", None);
        t1.completed = true;
        t3.completed = true;
        state.todos = vec![t1, t2, t3];
        state.next_id = 4;
        state
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn filter_selects_exact_subsets() {
        let mut state = mixed_state();
        state.filter = Filter::Active;
        assert_eq!(ids(&visible_todos(&state)), vec![2]);
        state.filter = Filter::Completed;
        assert_eq!(ids(&visible_todos(&state)), vec![1, 3]);
        state.filter = Filter::All;
        assert_eq!(ids(&visible_todos(&state)), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_query("Buy Milk", "milk"));
        assert!(matches_query("Buy Milk", "BUY"));
        assert!(matches_query("Buy Milk", ""));
        assert!(!matches_query("Buy Milk", "bread"));

        let mut state = mixed_state();
        state.search = "MILK".into();
        assert_eq!(ids(&visible_todos(&state)), vec![1, 3]);
        state.filter = Filter::Active;
        assert!(visible_todos(&state).is_empty());
    }

    #[test]
    fn derivation_never_mutates_collection() {
        let mut state = mixed_state();
        state.search = "dog".into();
        state.sort_by_due_date = true;
        let before = state.todos.clone();
        let _ = visible_todos(&state);
        assert_eq!(state.todos, before);
    }

    #[test]
    fn sort_puts_undated_last() {
        let a = Task::new(1, "a", due(2024, 3, 5));
        let b = Task::new(2, "b", None);
        let c = Task::new(3, "c", due(2024, 3, 1));
        let sorted = sort_by_due_date(vec![&a, &b, &c]);
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn sort_keeps_undated_relative_order_and_ties_stable() {
        let a = Task::new(1, "a", None);
        let b = Task::new(2, "b", due(2024, 1, 1));
        let c = Task::new(3, "c", None);
        let d = Task::new(4, "d", due(2024, 1, 1));
        let e = Task::new(5, "e", None);
        let sorted = sort_by_due_date(vec![&a, &b, &c, &d, &e]);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn unsorted_view_keeps_insertion_order() {
        let mut state = AppState::default();
        state.todos = vec![
            Task::new(1, "a", due(2024, 3, 5)),
            Task::new(2, "b", None),
            Task::new(3, "c", due(2024, 3, 1)),
        ];
        assert_eq!(ids(&visible_todos(&state)), vec![1, 2, 3]);
        state.sort_by_due_date = true;
        assert_eq!(ids(&visible_todos(&state)), vec![3, 1, 2]);
    }

    #[test]
    fn overdue_only_when_incomplete_and_past() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut t = Task::new(1, "late", Some(now - Duration::days(1)));
        assert!(is_overdue(&t, now));
        t.completed = true;
        assert!(!is_overdue(&t, now));

        let future = Task::new(2, "soon", Some(now + Duration::hours(1)));
        assert!(!is_overdue(&future, now));
        let undated = Task::new(3, "whenever", None);
        assert!(!is_overdue(&undated, now));
    }

    #[test]
    fn highlight_regex_escapes_query() {
        assert!(search_highlight_re("").is_none());
        let re = search_highlight_re("a+b").unwrap();
        assert!(re.is_match("xA+By"));
        assert!(!re.is_match("aab"));
    }
}
