// ********* Input data structures ***********

use std::fmt::Display;

/// Demographic and economic attributes attached to a county.
///
/// All of them may be missing depending on the year and the source table.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Demographics {
    pub population_total: Option<f64>,
    pub population_pct_white: Option<f64>,
    pub population_pct_black: Option<f64>,
    pub population_pct_hispanic: Option<f64>,
    pub median_household_income: Option<f64>,
    pub poverty_pct_overall: Option<f64>,
    pub bachelor_degree_pct_of_adults: Option<f64>,
}

/// One county in one election year, as produced by the ingestion pipeline.
#[derive(PartialEq, Debug, Clone)]
pub struct CountyRow {
    /// Five-digit FIPS code.
    pub county_fips: String,
    pub county_name: String,
    pub state_name: String,
    pub state_abbr: String,
    pub year: u16,
    pub votes_democrat: u64,
    pub votes_republican: u64,
    pub votes_other: u64,
    /// Democratic share of the two-party vote (0.0 - 1.0), if the table provides it.
    pub pct_two_party_democrat: Option<f64>,
    /// Change of the two-party Democratic share since the previous election.
    pub swing_from_prev_election: Option<f64>,
    pub demographics: Demographics,
}

impl CountyRow {
    pub fn votes_total(&self) -> u64 {
        self.votes_democrat + self.votes_republican + self.votes_other
    }

    pub fn pct_democrat(&self) -> Option<f64> {
        self.fraction_of_total(self.votes_democrat)
    }

    pub fn pct_republican(&self) -> Option<f64> {
        self.fraction_of_total(self.votes_republican)
    }

    pub fn pct_other(&self) -> Option<f64> {
        self.fraction_of_total(self.votes_other)
    }

    /// The two-party share provided by the table, or D / (D + R) when it is missing.
    pub fn two_party_share(&self) -> Option<f64> {
        if self.pct_two_party_democrat.is_some() {
            return self.pct_two_party_democrat;
        }
        let two_party = self.votes_democrat + self.votes_republican;
        if two_party == 0 {
            None
        } else {
            Some(self.votes_democrat as f64 / two_party as f64)
        }
    }

    /// Signed raw margin: Democrat minus Republican.
    pub fn margin_in_votes(&self) -> f64 {
        self.votes_democrat as f64 - self.votes_republican as f64
    }

    fn fraction_of_total(&self, votes: u64) -> Option<f64> {
        let total = self.votes_total();
        if total == 0 {
            None
        } else {
            Some(votes as f64 / total as f64)
        }
    }
}

/// Which states to keep when selecting rows.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StateFilter {
    All,
    /// Matches either the full state name or its postal abbreviation.
    Named(String),
}

impl StateFilter {
    /// "All" (any case) selects every state. An empty name selects none.
    pub fn parse(s: &str) -> StateFilter {
        if s.eq_ignore_ascii_case("all") {
            StateFilter::All
        } else {
            StateFilter::Named(s.to_string())
        }
    }

    pub fn matches(&self, row: &CountyRow) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Named(s) => {
                !s.is_empty() && (row.state_name == *s || row.state_abbr == *s)
            }
        }
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Party {
    Democrat,
    Republican,
    Other,
}

impl Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// One line of the results table shown for a state.
#[derive(PartialEq, Debug, Clone)]
pub struct SummaryLine {
    pub party: Party,
    pub votes: u64,
    /// In percent (0 - 100).
    pub pct: f64,
}

/// Statewide totals for one election year.
///
/// Percentages are expressed in percent (0 - 100) and are all zero when no
/// vote was cast. The margin is in percentage points.
#[derive(PartialEq, Debug, Clone)]
pub struct StateSummary {
    pub state: String,
    pub year: u16,
    pub votes_democrat: u64,
    pub votes_republican: u64,
    pub votes_other: u64,
    pub votes_total: u64,
    pub pct_democrat: f64,
    pub pct_republican: f64,
    pub pct_other: f64,
    pub winner: Party,
    pub margin: f64,
}

impl StateSummary {
    pub fn runner_up(&self) -> Party {
        match self.winner {
            Party::Democrat => Party::Republican,
            _ => Party::Democrat,
        }
    }

    pub fn line(&self, party: Party) -> SummaryLine {
        let (votes, pct) = match party {
            Party::Democrat => (self.votes_democrat, self.pct_democrat),
            Party::Republican => (self.votes_republican, self.pct_republican),
            Party::Other => (self.votes_other, self.pct_other),
        };
        SummaryLine { party, votes, pct }
    }

    /// The winner first, then the runner-up, then the other candidates,
    /// whatever their vote counts.
    pub fn lines(&self) -> [SummaryLine; 3] {
        [
            self.line(self.winner),
            self.line(self.runner_up()),
            self.line(Party::Other),
        ]
    }
}
