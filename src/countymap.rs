use log::{debug, info, warn};

use county_results::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;

use serde::Deserialize;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::countymap::config_reader::*;
use crate::countymap::io_common::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CountyMapError {
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Could not parse line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno}: missing value for {column}"))]
    MissingValue { lineno: usize, column: String },
    #[snafu(display("Line {lineno}: invalid value {content} for {column}"))]
    InvalidValue {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid bin configuration"))]
    InvalidBins { source: BinSpecError },
    #[snafu(display("Error writing CSV output"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error writing output"))]
    WritingOutput { source: std::io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CmResult<T> = Result<T, CountyMapError>;

/// A county row, as parsed from the input table.
/// This is before applying defaults and normalizing the identifiers.
#[derive(PartialEq, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParsedCountyRow {
    pub county_fips: Option<String>,
    pub county_name: Option<String>,
    pub state_name: Option<String>,
    pub state_abbr: Option<String>,
    // Numbers may be written as floats by the export (1234.0).
    pub year: Option<f64>,
    pub votes_democrat: Option<f64>,
    pub votes_republican: Option<f64>,
    pub votes_other: Option<f64>,
    pub votes_total: Option<f64>,
    pub votes_pct_two_party_democrat: Option<f64>,
    pub votes_pct_swing_from_prev_election: Option<f64>,
    pub population_total: Option<f64>,
    pub population_pct_white: Option<f64>,
    pub population_pct_black: Option<f64>,
    pub population_pct_hispanic: Option<f64>,
    #[serde(alias = "median_household_income_2010")]
    pub median_household_income: Option<f64>,
    #[serde(alias = "poverty_pct_overall_2010")]
    pub poverty_pct_overall: Option<f64>,
    pub bachelor_degree_pct_of_adults: Option<f64>,
}

/// Turns the parsed rows into county rows.
///
/// Rows without a FIPS code cannot be placed on a map and are dropped.
/// Missing vote counts count as zero.
pub fn validate_rows(parsed: &[(usize, ParsedCountyRow)]) -> CmResult<Vec<CountyRow>> {
    let mut res: Vec<CountyRow> = Vec::new();
    for (lineno, pr) in parsed.iter() {
        let lineno = *lineno;
        let county_fips = match pr.county_fips.as_deref().map(normalize_fips) {
            Some(fips) if !fips.is_empty() => fips,
            _ => {
                warn!("Line {}: no FIPS code, dropping {:?}", lineno, pr.county_name);
                continue;
            }
        };
        let year = parse_year(pr.year, lineno)?;
        let votes_democrat = parse_count(pr.votes_democrat, lineno, "votes_democrat")?;
        let votes_republican = parse_count(pr.votes_republican, lineno, "votes_republican")?;
        let votes_other = parse_count(pr.votes_other, lineno, "votes_other")?;

        let row = CountyRow {
            county_fips,
            county_name: pr.county_name.clone().unwrap_or_default(),
            state_name: pr.state_name.clone().unwrap_or_default(),
            state_abbr: pr.state_abbr.clone().unwrap_or_default(),
            year,
            votes_democrat,
            votes_republican,
            votes_other,
            pct_two_party_democrat: finite(pr.votes_pct_two_party_democrat),
            swing_from_prev_election: finite(pr.votes_pct_swing_from_prev_election),
            demographics: Demographics {
                population_total: finite(pr.population_total),
                population_pct_white: finite(pr.population_pct_white),
                population_pct_black: finite(pr.population_pct_black),
                population_pct_hispanic: finite(pr.population_pct_hispanic),
                median_household_income: finite(pr.median_household_income),
                poverty_pct_overall: finite(pr.poverty_pct_overall),
                bachelor_degree_pct_of_adults: finite(pr.bachelor_degree_pct_of_adults),
            },
        };

        if let Some(total) = pr.votes_total {
            if total.is_finite() && total.round() as u64 != row.votes_total() {
                warn!(
                    "Line {}: votes_total is {} but the parties add up to {}",
                    lineno,
                    total,
                    row.votes_total()
                );
            }
        }
        debug!("validate_rows: line {}: {:?}", lineno, row);
        res.push(row);
    }
    Ok(res)
}

fn legend_js(spec: &BinSpec) -> JSValue {
    let entries: Vec<JSValue> = spec
        .legend()
        .iter()
        .map(|(label, color)| json!({"label": label, "color": color}))
        .collect();
    json!({
        "name": spec.name(),
        "entries": entries,
        "fallbackColor": spec.fallback_color()
    })
}

fn build_legend_js(palette: &Palette) -> JSValue {
    let legends: Vec<JSValue> = palette.specs().iter().map(|s| legend_js(s)).collect();
    json!({ "legends": legends })
}

fn build_summary_js(state: &str, year: u16, summary: &Option<StateSummary>) -> JSValue {
    match summary {
        None => json!({
            "config": {"state": state, "year": year},
            "summary": JSValue::Null
        }),
        Some(s) => {
            let results: Vec<JSValue> = s
                .lines()
                .iter()
                .map(|l| {
                    json!({
                        "party": l.party.to_string(),
                        "votes": l.votes.to_string(),
                        "pct": format!("{:.2}", l.pct)
                    })
                })
                .collect();
            json!({
                "config": {"state": s.state, "year": s.year},
                "summary": {
                    "totalVotes": s.votes_total.to_string(),
                    "winner": s.winner.to_string(),
                    "margin": format!("{:.2}", s.margin),
                    "results": results
                }
            })
        }
    }
}

fn log_summary(summary: &StateSummary) {
    info!("Results for {} in {}", summary.state, summary.year);
    for l in summary.lines().iter() {
        info!("{:>12} {:>12} {:>7.2}%", l.party.to_string(), l.votes, l.pct);
    }
    info!("{} wins by {:.2} points", summary.winner, summary.margin);
}

fn check_reference(computed: &JSValue, reference_path: &str) -> CmResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(computed).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_str(),
            "\n",
        );
        whatever!("Difference detected between computed summary and reference summary")
    }
    info!("Summary matches the reference {}", reference_path);
    Ok(())
}

fn write_stdout(js: &JSValue) -> CmResult<()> {
    let pretty = serde_json::to_string_pretty(js).context(ParsingJsonSnafu {})?;
    let mut out = std::io::stdout();
    writeln!(out, "{}", pretty).context(WritingOutputSnafu {})?;
    Ok(())
}

/// Loads the table, attaches the bins and produces the requested outputs.
pub fn run(args: &Args) -> CmResult<()> {
    let palette = match &args.config {
        Some(path) => read_bins_config(path)?.palette()?,
        None => Palette::builtin().context(InvalidBinsSnafu {})?,
    };
    for spec in palette.specs().iter() {
        debug!("bin table {}: {:?}", spec.name(), spec.labels());
    }

    if args.legend {
        write_stdout(&build_legend_js(&palette))?;
    }

    let parsed = io_csv::read_county_csv(&args.input)?;
    let mut rows = validate_rows(&parsed)?;
    info!("Read {} county rows from {}", rows.len(), args.input);
    let filled = derive_swing(&mut rows);
    if filled > 0 {
        info!("Computed the swing of {} rows from earlier elections", filled);
    }

    let year = match args.year {
        Some(y) => y,
        None => match available_years(&rows).last() {
            Some(y) => *y,
            None => whatever!("No election year found in {}", args.input),
        },
    };
    let state = args.state.clone().unwrap_or_else(|| "All".to_string());
    let filter = StateFilter::parse(&state);
    let selected = select_rows(&rows, year, &filter);
    info!(
        "Selected {} counties for {:?} in {} (states available: {})",
        selected.len(),
        filter,
        year,
        available_states(&rows).len()
    );

    match args.out.as_deref() {
        None => {}
        Some("") | Some("stdout") => {
            io_csv::write_binned_csv(std::io::stdout(), &selected, &palette)?;
        }
        Some(path) => {
            let file = fs::File::create(path).context(WritingOutputSnafu {})?;
            io_csv::write_binned_csv(file, &selected, &palette)?;
            info!("Wrote {} rows to {}", selected.len(), path);
        }
    }

    if args.summary || args.reference.is_some() {
        let summary = summarize(&rows, &state, year);
        match &summary {
            Some(s) => log_summary(s),
            None => warn!("No results for {} in {}", state, year),
        }
        let summary_js = build_summary_js(&state, year, &summary);
        if args.summary {
            write_stdout(&summary_js)?;
        }
        if let Some(reference) = &args.reference {
            check_reference(&summary_js, reference)?;
        }
    }

    Ok(())
}
