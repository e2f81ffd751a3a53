use std::io::Cursor;

use super::*;
use crate::store::NewEntry;

type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

fn console(script: &str) -> TestConsole {
    Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()).with_clear_screen(false)
}

fn output(console: TestConsole) -> String {
    String::from_utf8(console.into_writer()).expect("utf8 output")
}

fn date(m: u32, d: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn add(store: &EntryStore, name: &str, minutes: u32, notes: &str, on: NaiveDate) -> Entry {
    store
        .create(&NewEntry {
            name: name.to_owned(),
            task: format!("{name} task"),
            spent_minutes: minutes,
            notes: notes.to_owned(),
            timestamp: Some(on),
        })
        .expect("create")
}

/// Alice twice, Alicia once, Bob once.
fn team() -> EntryStore {
    let store = EntryStore::open_in_memory().expect("store");
    add(&store, "Alice", 30, "fix bug in parser", date(1, 15, 2016));
    add(&store, "Alicia", 45, "", date(6, 1, 2016));
    add(&store, "Bob", 30, "lunch", date(6, 1, 2016));
    add(&store, "Alice", 60, "review", date(6, 1, 2016));
    store
}

fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

// --- find_by_employee ---

#[test]
fn employee_substring_then_exact_name() {
    let store = team();
    let mut c = console("Ali\nAlice\n");
    let matched = find_by_employee(&mut c, &store)
        .expect("lookup")
        .expect("not cancelled");
    assert_eq!(names(&matched), vec!["Alice", "Alice"]);

    let out = output(c);
    let multiple = out.find("Multiple matched names:").expect("disambiguation");
    let listed = &out[multiple..];
    assert!(listed.contains("Alice\n"));
    assert!(listed.contains("Alicia\n"));
    assert!(!listed[..listed.find("Enter a name").expect("prompt")].contains("Bob"));
}

#[test]
fn employee_single_match_skips_disambiguation() {
    let store = team();
    let mut c = console("Bo\n");
    let matched = find_by_employee(&mut c, &store)
        .expect("lookup")
        .expect("not cancelled");
    assert_eq!(names(&matched), vec!["Bob"]);
    assert!(!output(c).contains("Multiple matched names:"));
}

#[test]
fn employee_lists_distinct_names_first() {
    let store = team();
    let mut c = console("q\n");
    find_by_employee(&mut c, &store).expect("lookup");
    let out = output(c);
    assert!(out.starts_with("Employees to choose from:\nAlice\nAlicia\nBob\n"));
}

#[test]
fn employee_q_cancels_before_query() {
    let store = team();
    let mut c = console("q\n");
    assert_eq!(find_by_employee(&mut c, &store).expect("lookup"), None);
    assert!(!output(c).contains("No entries matched"));
}

#[test]
fn employee_no_match_reports_empty() {
    let store = team();
    let mut c = console("Zed\n\n");
    let matched = find_by_employee(&mut c, &store).expect("lookup");
    assert_eq!(matched, Some(Vec::new()));
    assert!(output(c).contains("No entries matched"));
}

// --- find_by_date ---

#[test]
fn date_filters_exact_day() {
    let store = team();
    let mut c = console("06/01/2016\n");
    let matched = find_by_date(&mut c, &store)
        .expect("lookup")
        .expect("not cancelled");
    assert_eq!(names(&matched), vec!["Alicia", "Bob", "Alice"]);
    assert!(matched.iter().all(|e| e.timestamp == date(6, 1, 2016)));
    assert!(output(c).contains("Dates to choose from:\n01/15/2016\n06/01/2016\n"));
}

#[test]
fn date_q_cancels() {
    let store = team();
    let mut c = console("not a date\nq\n");
    assert_eq!(find_by_date(&mut c, &store).expect("lookup"), None);
    assert!(output(c).contains("Invalid date. Please enter again."));
}

// --- find_by_date_range ---

#[test]
fn date_range_covering_year_includes_both_dates() {
    let store = team();
    let mut c = console("01/01/2016\n12/31/2016\n");
    let matched = find_by_date_range(&mut c, &store)
        .expect("lookup")
        .expect("not cancelled");
    assert_eq!(matched.len(), 4);
}

#[test]
fn date_range_between_entries_matches_nothing() {
    let store = team();
    let mut c = console("02/01/2016\n03/01/2016\n\n");
    let matched = find_by_date_range(&mut c, &store).expect("lookup");
    assert_eq!(matched, Some(Vec::new()));
    assert!(output(c).contains("No entries matched"));
}

#[test]
fn date_range_end_is_inclusive() {
    let store = team();
    let mut c = console("01/15/2016\n01/15/2016\n");
    let matched = find_by_date_range(&mut c, &store)
        .expect("lookup")
        .expect("not cancelled");
    assert_eq!(names(&matched), vec!["Alice"]);
}

#[test]
fn date_range_cancel_at_either_prompt() {
    let store = team();
    let mut start = console("q\n");
    assert_eq!(find_by_date_range(&mut start, &store).expect("lookup"), None);

    let mut end = console("01/01/2016\nq\n");
    assert_eq!(find_by_date_range(&mut end, &store).expect("lookup"), None);
    assert!(!output(end).contains("No entries matched"));
}

// --- find_by_spent_minutes ---

#[test]
fn minutes_filters_exact_value_after_reprompts() {
    let store = team();
    let mut c = console("abc\n-5\n30\n");
    let matched = find_by_spent_minutes(&mut c, &store)
        .expect("lookup")
        .expect("not cancelled");
    assert_eq!(names(&matched), vec!["Alice", "Bob"]);
    let out = output(c);
    assert!(out.contains("Invalid minutes. Please enter again."));
    assert!(out.contains("Spent minutes must be positive. Please enter again."));
}

#[test]
fn minutes_q_cancels() {
    let store = team();
    let mut c = console("q\n");
    assert_eq!(find_by_spent_minutes(&mut c, &store).expect("lookup"), None);
}

#[test]
fn minutes_closed_input_is_an_error() {
    let store = team();
    let mut c = console("abc\n");
    assert!(find_by_spent_minutes(&mut c, &store).is_err());
}

// --- find_by_search_term ---

#[test]
fn search_term_matches_notes_substring() {
    let store = team();
    let mut bug = console("bug\n");
    let matched = find_by_search_term(&mut bug, &store)
        .expect("lookup")
        .expect("no sentinel");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].notes, "fix bug in parser");

    let mut xyz = console("xyz\n\n");
    assert_eq!(
        find_by_search_term(&mut xyz, &store).expect("lookup"),
        Some(Vec::new())
    );
}

#[test]
fn search_term_matches_task() {
    let store = team();
    let mut c = console("Bob task\n");
    let matched = find_by_search_term(&mut c, &store)
        .expect("lookup")
        .expect("no sentinel");
    assert_eq!(names(&matched), vec!["Bob"]);
}

#[test]
fn search_term_has_no_cancel_sentinel() {
    let store = team();
    let mut q = console("q\n\n");
    assert_eq!(
        find_by_search_term(&mut q, &store).expect("lookup"),
        Some(Vec::new())
    );

    let mut empty = console("\n");
    let all = find_by_search_term(&mut empty, &store)
        .expect("lookup")
        .expect("no sentinel");
    assert_eq!(all.len(), 4);
}

#[test]
fn returns_matches_as_they_were_before_browsing() {
    let store = team();
    let mut c = console("bug\nd\n");
    let matched = find_by_search_term(&mut c, &store)
        .expect("lookup")
        .expect("no sentinel");
    assert_eq!(matched.len(), 1);
    assert!(
        store
            .query(&Filter::SearchTerm("bug".to_owned()))
            .expect("query")
            .is_empty()
    );
    assert_eq!(store.count().expect("count"), 3);
}
