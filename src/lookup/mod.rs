//! The five ways to narrow the entry collection before browsing.
//!
//! Every finder returns `Ok(None)` when the user cancels before a query runs and
//! `Ok(Some(matched))` otherwise, after the matched entries have been browsed.
//! `matched` is the set as it was before any edit or delete made while browsing.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::browse::browse_through;
use crate::input::{Console, InputError, MinutesError, format_date, parse_minutes};
use crate::store::{Entry, EntryStore, Filter};

fn browse_and_return<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
    matched: Vec<Entry>,
) -> anyhow::Result<Option<Vec<Entry>>> {
    browse_through(console, store, &matched)?;
    Ok(Some(matched))
}

fn print_dates<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dates: &[NaiveDate],
) -> anyhow::Result<()> {
    console.say("Dates to choose from:")?;
    for date in dates {
        console.say(format_date(*date))?;
    }
    Ok(())
}

/// Find by employee name: substring first, then an exact name if the substring
/// matched more than one employee.
///
/// # Errors
/// Returns an error on console failure or if a store operation fails.
pub fn find_by_employee<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<Option<Vec<Entry>>> {
    console.clear_screen()?;
    console.say("Employees to choose from:")?;
    for name in store.distinct_names()? {
        console.say(name)?;
    }
    console.say("Enter an employee name")?;
    console.say("Enter q to go back (Default)")?;
    let name = console.get_input()?;
    if name == "q" {
        tracing::debug!("find by employee cancelled");
        return Ok(None);
    }

    let mut matched = store.query(&Filter::NameContains(name))?;
    let unique_names: BTreeSet<String> = matched.iter().map(|e| e.name.clone()).collect();
    if unique_names.len() > 1 {
        console.say("Multiple matched names:")?;
        for name in &unique_names {
            console.say(name)?;
        }
        console.say("Enter a name")?;
        let exact = console.get_input()?;
        matched = store.query(&Filter::NameEquals(exact))?;
    }
    browse_and_return(console, store, matched)
}

/// Find entries dated on one day.
///
/// # Errors
/// Returns an error on console failure, closed input, or a store failure.
pub fn find_by_date<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<Option<Vec<Entry>>> {
    let dates = store.distinct_dates()?;
    console.clear_screen()?;
    print_dates(console, &dates)?;
    console.say("Enter a date (MM/DD/YYYY)")?;
    console.say("Enter q to go back")?;
    let Some(date) = console.get_date()? else {
        tracing::debug!("find by date cancelled");
        return Ok(None);
    };
    let matched = store.query(&Filter::OnDate(date))?;
    browse_and_return(console, store, matched)
}

/// Find entries dated between two days, both inclusive.
///
/// # Errors
/// Returns an error on console failure, closed input, or a store failure.
pub fn find_by_date_range<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<Option<Vec<Entry>>> {
    let dates = store.distinct_dates()?;
    console.clear_screen()?;
    print_dates(console, &dates)?;
    console.say("Enter a start date (MM/DD/YYYY)")?;
    console.say("Enter q to go back to main menu")?;
    let Some(start) = console.get_date()? else {
        tracing::debug!("find by date range cancelled at start date");
        return Ok(None);
    };
    console.say("Enter an end date (MM/DD/YYYY)")?;
    console.say("Enter q to go back to main menu")?;
    let Some(end) = console.get_date()? else {
        tracing::debug!("find by date range cancelled at end date");
        return Ok(None);
    };
    let matched = store.query(&Filter::DateRange { start, end })?;
    browse_and_return(console, store, matched)
}

/// Find entries with exactly the given minutes spent.
///
/// # Errors
/// Returns an error on console failure, closed input, or a store failure.
pub fn find_by_spent_minutes<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<Option<Vec<Entry>>> {
    console.clear_screen()?;
    console.say("Enter time spent in minutes")?;
    console.say("Enter q to go back")?;
    loop {
        let input = console
            .get_reply()?
            .ok_or(InputError::Closed("minutes spent"))?;
        if input == "q" {
            tracing::debug!("find by minutes cancelled");
            return Ok(None);
        }
        match parse_minutes(&input) {
            Ok(minutes) => {
                let matched = store.query(&Filter::SpentMinutes(minutes))?;
                return browse_and_return(console, store, matched);
            }
            Err(MinutesError::Invalid) => {
                console.say("Invalid minutes. Please enter again.")?;
            }
            Err(MinutesError::Negative) => {
                console.say("Spent minutes must be positive. Please enter again.")?;
            }
        }
    }
}

/// Find entries whose task or notes contain a term. Takes no `q` sentinel: any
/// line, including an empty one, is searched for.
///
/// # Errors
/// Returns an error on console failure or a store failure.
pub fn find_by_search_term<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &EntryStore,
) -> anyhow::Result<Option<Vec<Entry>>> {
    console.clear_screen()?;
    console.say("Enter search term")?;
    let term = console.get_input()?;
    let matched = store.query(&Filter::SearchTerm(term))?;
    browse_and_return(console, store, matched)
}

#[cfg(test)]
mod tests;
