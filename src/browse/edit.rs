use std::io::{BufRead, Write};

use crate::input::Console;
use crate::store::{Entry, EntryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Name,
    Task,
    SpentMinutes,
    Notes,
    Date,
}

pub struct AttributeChoice {
    pub key: &'static str,
    pub label: &'static str,
    pub attribute: Attribute,
}

/// Edit choices in display order.
pub const ATTRIBUTES: &[AttributeChoice] = &[
    AttributeChoice {
        key: "a",
        label: "Edit employee name",
        attribute: Attribute::Name,
    },
    AttributeChoice {
        key: "b",
        label: "Edit task title",
        attribute: Attribute::Task,
    },
    AttributeChoice {
        key: "c",
        label: "Edit minutes spent",
        attribute: Attribute::SpentMinutes,
    },
    AttributeChoice {
        key: "d",
        label: "Edit notes",
        attribute: Attribute::Notes,
    },
    AttributeChoice {
        key: "e",
        label: "Edit date",
        attribute: Attribute::Date,
    },
];

/// Ask which attribute to change, read the new value, and persist it.
///
/// Returns `Ok(true)` when the entry was changed and saved, `Ok(false)` when the
/// user quit or cancelled the date prompt.
///
/// # Errors
/// Returns an error on console failure or if the update cannot be stored.
pub fn edit_entry<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
    entry: &mut Entry,
) -> anyhow::Result<bool> {
    console.clear_screen()?;
    console.say("Edit which attribute:")?;
    for choice in ATTRIBUTES {
        console.say(format_args!("{}) {}", choice.key, choice.label))?;
    }
    console.say("Enter q to quit (Default)")?;

    let chosen = console.get_input()?.to_lowercase();
    let Some(choice) = ATTRIBUTES.iter().find(|c| c.key == chosen) else {
        tracing::debug!(id = entry.id, "edit cancelled");
        console.say("Entry not changed")?;
        return Ok(false);
    };

    match choice.attribute {
        Attribute::Name => entry.name = console.get_name()?,
        Attribute::Task => entry.task = console.get_task()?,
        Attribute::SpentMinutes => entry.spent_minutes = console.get_spent_minutes()?,
        Attribute::Notes => entry.notes = console.get_notes()?,
        Attribute::Date => {
            console.say("Enter a date (MM/DD/YYYY)")?;
            console.say("Enter q to go back")?;
            let Some(date) = console.get_date()? else {
                console.say("Entry not changed")?;
                return Ok(false);
            };
            entry.timestamp = date;
        }
    }
    store.update(entry)?;
    console.say("Entry updated")?;
    Ok(true)
}
