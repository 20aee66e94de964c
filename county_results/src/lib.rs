mod binning;
mod config;
pub mod manual;
pub mod palette;

use log::{debug, info};

use std::collections::{BTreeSet, HashMap};

pub use crate::binning::*;
pub use crate::config::*;
pub use crate::palette::Palette;

/// Statewide totals for the given state and year.
///
/// Arguments:
/// * `rows` the county rows, in any order and for any number of years
/// * `state` the full name or the abbreviation of the state. `All` sums the
/// whole country.
/// * `year` the election year
///
/// Returns `None` when no county matches: a missing state or year is not an error.
///
/// When no vote was cast, all the percentages are zero. A tie between the
/// two main parties is reported as a Republican win with a zero margin.
pub fn summarize(rows: &[CountyRow], state: &str, year: u16) -> Option<StateSummary> {
    let filter = StateFilter::parse(state);
    let selected = select_rows(rows, year, &filter);
    if selected.is_empty() {
        debug!("summarize: no county for {:?} in {}", state, year);
        return None;
    }

    let votes_democrat: u64 = selected.iter().map(|r| r.votes_democrat).sum();
    let votes_republican: u64 = selected.iter().map(|r| r.votes_republican).sum();
    let votes_other: u64 = selected.iter().map(|r| r.votes_other).sum();
    let votes_total = votes_democrat + votes_republican + votes_other;

    let pct = |votes: u64| -> f64 {
        if votes_total > 0 {
            votes as f64 / votes_total as f64 * 100.0
        } else {
            0.0
        }
    };
    let pct_democrat = pct(votes_democrat);
    let pct_republican = pct(votes_republican);
    let pct_other = pct(votes_other);

    // Only the two main parties are compared. Ties go to the Republican side.
    let (winner, margin) = if votes_democrat > votes_republican {
        (Party::Democrat, pct_democrat - pct_republican)
    } else {
        (Party::Republican, pct_republican - pct_democrat)
    };

    let state_name = match filter {
        StateFilter::All => "All".to_string(),
        StateFilter::Named(_) => selected[0].state_name.clone(),
    };
    info!(
        "summarize: {} {}: {} counties, {} votes, {} by {:.2} points",
        state_name,
        year,
        selected.len(),
        votes_total,
        winner,
        margin
    );

    Some(StateSummary {
        state: state_name,
        year,
        votes_democrat,
        votes_republican,
        votes_other,
        votes_total,
        pct_democrat,
        pct_republican,
        pct_other,
        winner,
        margin,
    })
}

/// The rows of one election year, restricted to the requested states.
/// The input order is preserved.
pub fn select_rows<'a>(
    rows: &'a [CountyRow],
    year: u16,
    states: &StateFilter,
) -> Vec<&'a CountyRow> {
    rows.iter()
        .filter(|r| r.year == year && states.matches(r))
        .collect()
}

/// The election years present in the data, sorted.
pub fn available_years(rows: &[CountyRow]) -> Vec<u16> {
    let years: BTreeSet<u16> = rows.iter().map(|r| r.year).collect();
    years.into_iter().collect()
}

/// The state names present in the data, sorted.
pub fn available_states(rows: &[CountyRow]) -> Vec<String> {
    let states: BTreeSet<&str> = rows
        .iter()
        .filter(|r| !r.state_name.is_empty())
        .map(|r| r.state_name.as_str())
        .collect();
    states.into_iter().map(|s| s.to_string()).collect()
}

/// Fills the missing swing values.
///
/// The swing of a county is the change of its two-party Democratic share since
/// the closest earlier year in which the same FIPS code has a share. Values
/// already present are kept. Counties without an earlier election keep no swing.
///
/// Returns the number of rows that were filled.
pub fn derive_swing(rows: &mut [CountyRow]) -> usize {
    let mut history: HashMap<String, Vec<(u16, f64)>> = HashMap::new();
    for r in rows.iter() {
        if let Some(share) = r.two_party_share() {
            history
                .entry(r.county_fips.clone())
                .or_default()
                .push((r.year, share));
        }
    }
    for h in history.values_mut() {
        h.sort_by_key(|(year, _)| *year);
    }

    let mut filled = 0;
    for r in rows.iter_mut() {
        if r.swing_from_prev_election.is_some() {
            continue;
        }
        let (share, h) = match (r.two_party_share(), history.get(&r.county_fips)) {
            (Some(share), Some(h)) => (share, h),
            _ => continue,
        };
        let idx = h.partition_point(|(year, _)| *year < r.year);
        if idx > 0 {
            let (_, prev_share) = h[idx - 1];
            r.swing_from_prev_election = Some(share - prev_share);
            filled += 1;
        }
    }
    debug!("derive_swing: filled {} rows out of {}", filled, rows.len());
    filled
}
