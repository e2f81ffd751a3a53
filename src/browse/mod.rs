pub mod edit;

use std::io::{BufRead, Write};

use crate::input::{Console, format_date};
use crate::store::{Entry, EntryStore};

/// One browse-loop command. Anything unrecognized is [`BrowseCommand::Next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Edit,
    Delete,
    Back,
}

impl BrowseCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "p" => Self::Previous,
            "e" => Self::Edit,
            "d" => Self::Delete,
            "b" => Self::Back,
            _ => Self::Next,
        }
    }
}

/// How a browse loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// Nothing to browse.
    Empty,
    /// Paged past the last entry.
    Exhausted,
    Back,
    Deleted(i64),
    Edited(i64),
}

/// Write an entry in the single-record view format.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn print_entry<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    entry: &Entry,
) -> anyhow::Result<()> {
    let timestamp = format_date(entry.timestamp);
    console.say(&timestamp)?;
    console.say("=".repeat(timestamp.len()))?;
    console.say(format_args!("name: {}", entry.name))?;
    console.say(format_args!("task: {}", entry.task))?;
    console.say(format_args!("minutes spent: {}", entry.spent_minutes))?;
    console.say(format_args!("notes: {}", entry.notes))?;
    Ok(())
}

fn get_browse_command<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> anyhow::Result<BrowseCommand> {
    console.say("")?;
    console.say("[N]ext (Default), [P]revious, [E]dit, [D]elete, [B]ack")?;
    Ok(BrowseCommand::parse(&console.get_input()?))
}

/// Page through `entries` one at a time, offering edit and delete on the
/// current one. Deleting, or an edit that changed something, ends the loop.
///
/// # Errors
/// Returns an error on console failure or if a store operation fails.
pub fn browse_through<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
    entries: &[Entry],
) -> anyhow::Result<BrowseOutcome> {
    if entries.is_empty() {
        console.say("No entries matched")?;
        console.enter_any_key()?;
        return Ok(BrowseOutcome::Empty);
    }

    let mut index = 0;
    while let Some(current) = entries.get(index) {
        console.clear_screen()?;
        print_entry(console, current)?;
        match get_browse_command(console)? {
            BrowseCommand::Next => index += 1,
            BrowseCommand::Previous => index = index.saturating_sub(1),
            BrowseCommand::Delete => {
                store.delete(current)?;
                return Ok(BrowseOutcome::Deleted(current.id));
            }
            BrowseCommand::Edit => {
                let mut entry = current.clone();
                if edit::edit_entry(console, store, &mut entry)? {
                    return Ok(BrowseOutcome::Edited(entry.id));
                }
            }
            BrowseCommand::Back => return Ok(BrowseOutcome::Back),
        }
    }
    Ok(BrowseOutcome::Exhausted)
}
