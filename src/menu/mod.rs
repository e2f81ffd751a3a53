use std::io::{BufRead, Write};

use crate::input::Console;
use crate::lookup;
use crate::store::{Entry, EntryStore, NewEntry};

/// One selectable line of a menu. Order in the table is display order only.
pub struct MenuItem<A> {
    pub key: &'static str,
    pub label: &'static str,
    pub action: A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    AddEntry,
    LookupEntries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupAction {
    ByEmployee,
    ByDate,
    ByDateRange,
    BySpentMinutes,
    BySearchTerm,
}

pub const MAIN_MENU: &[MenuItem<MainAction>] = &[
    MenuItem {
        key: "a",
        label: "Add an entry",
        action: MainAction::AddEntry,
    },
    MenuItem {
        key: "b",
        label: "Look up previous entries",
        action: MainAction::LookupEntries,
    },
];

pub const LOOKUP_MENU: &[MenuItem<LookupAction>] = &[
    MenuItem {
        key: "a",
        label: "Find by employee name",
        action: LookupAction::ByEmployee,
    },
    MenuItem {
        key: "b",
        label: "Find by date of entry",
        action: LookupAction::ByDate,
    },
    MenuItem {
        key: "c",
        label: "Find by date range",
        action: LookupAction::ByDateRange,
    },
    MenuItem {
        key: "d",
        label: "Find by time spent on task",
        action: LookupAction::BySpentMinutes,
    },
    MenuItem {
        key: "e",
        label: "Find by a search term",
        action: LookupAction::BySearchTerm,
    },
];

/// Look up `input` (case-insensitive) among the menu keys.
pub fn select<A: Copy>(items: &[MenuItem<A>], input: &str) -> Option<A> {
    let key = input.trim().to_lowercase();
    items.iter().find(|item| item.key == key).map(|item| item.action)
}

/// Print `items` followed by `footer`, then read a choice. `None` means quit.
fn choose<A: Copy, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    items: &[MenuItem<A>],
    footer: &str,
) -> anyhow::Result<Option<A>> {
    for item in items {
        console.say(format_args!("{}) {}", item.key, item.label))?;
    }
    console.say(footer)?;
    let chosen = console.get_input()?;
    Ok(select(items, &chosen))
}

/// Top-level loop: add or look up until the user quits.
///
/// # Errors
/// Returns an error on console failure, closed input at a required prompt, or a
/// store failure.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<()> {
    loop {
        console.clear_screen()?;
        console.say("WORK LOG")?;
        console.say("Which action do you want to take?")?;
        match choose(console, MAIN_MENU, "Enter q to quit (Default)")? {
            Some(MainAction::AddEntry) => {
                add_entry(console, store)?;
            }
            Some(MainAction::LookupEntries) => lookup_entries(console, store)?,
            None => break,
        }
    }
    tracing::debug!("main menu quit");
    Ok(())
}

/// Read the fields of a new entry and store it dated today.
///
/// # Errors
/// Returns an error on console failure, closed input, or a store failure.
pub fn add_entry<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<Entry> {
    console.clear_screen()?;
    console.say("Add a new entry")?;
    let name = console.get_name()?;
    let task = console.get_task()?;
    let spent_minutes = console.get_spent_minutes()?;
    let notes = console.get_notes()?;
    store.create(&NewEntry {
        name,
        task,
        spent_minutes,
        notes,
        timestamp: None,
    })
}

/// Lookup loop: run filter strategies until the user goes back.
///
/// # Errors
/// Returns an error on console failure, closed input at a required prompt, or a
/// store failure.
pub fn lookup_entries<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<()> {
    loop {
        console.clear_screen()?;
        console.say("Search Options:")?;
        let Some(action) = choose(console, LOOKUP_MENU, "Enter q to go back (Default)")? else {
            return Ok(());
        };
        tracing::debug!(?action, "lookup selected");
        match action {
            LookupAction::ByEmployee => lookup::find_by_employee(console, store)?,
            LookupAction::ByDate => lookup::find_by_date(console, store)?,
            LookupAction::ByDateRange => lookup::find_by_date_range(console, store)?,
            LookupAction::BySpentMinutes => lookup::find_by_spent_minutes(console, store)?,
            LookupAction::BySearchTerm => lookup::find_by_search_term(console, store)?,
        };
    }
}
