//! Built-in bin tables.
//!
//! Each table pairs ascending edges with labels ordered from the most
//! Republican bucket to the most Democratic one, and a red to blue colour
//! ramp. The tables are independent: editing one never affects the others.

use crate::binning::{BinSpec, BinSpecError};

pub const MARGIN_BY_SHARE: &str = "margin_bin";
pub const SWING_BY_SHARE: &str = "swing_bin";
pub const MARGIN_BY_VOTES: &str = "winning_margin_in_votes_bin";

/// Two-party Democratic share. Narrow bins around 0.5, wide bins at the ends.
pub const MARGIN_SHARE_EDGES: [f64; 15] = [
    0.0, 0.20, 0.30, 0.40, 0.45, 0.475, 0.495, 0.500, 0.505, 0.525, 0.55, 0.60, 0.70, 0.85, 1.00,
];

pub const MARGIN_SHARE_LABELS: [&str; 14] = [
    "Rep > 60%",
    "Rep 40-60%",
    "Rep 20-40%",
    "Rep 10-20%",
    "Rep 5-10%",
    "Rep < 5%",
    "Rep < 1%",
    "Dem < 1%",
    "Dem < 5%",
    "Dem 5-10%",
    "Dem 10-20%",
    "Dem 20-40%",
    "Dem 40-60%",
    "Dem > 60%",
];

pub const MARGIN_SHARE_COLORS: [&str; 14] = [
    "rgb(128,0,0)",
    "rgb(192,64,64)",
    "rgb(192,96,96)",
    "rgb(255,96,96)",
    "rgb(255,128,128)",
    "rgb(255,192,192)",
    "rgb(255,226,226)",
    "rgb(226,226,255)",
    "rgb(192,192,255)",
    "rgb(128,128,255)",
    "rgb(96,96,255)",
    "rgb(96,96,192)",
    "rgb(64,64,192)",
    "rgb(0,0,128)",
];

/// Change of the two-party share, in share units (0.01 is one point).
pub const SWING_SHARE_EDGES: [f64; 13] = [
    -1.0, -0.20, -0.10, -0.05, -0.03, -0.01, 0.0, 0.01, 0.03, 0.05, 0.10, 0.20, 1.0,
];

pub const SWING_SHARE_LABELS: [&str; 12] = [
    "Rep swing > 20%",
    "Rep swing 10-20%",
    "Rep swing 5-10%",
    "Rep swing 3-5%",
    "Rep swing 1-3%",
    "Rep swing < 1%",
    "Dem swing < 1%",
    "Dem swing 1-3%",
    "Dem swing 3-5%",
    "Dem swing 5-10%",
    "Dem swing 10-20%",
    "Dem swing > 20%",
];

pub const SWING_SHARE_COLORS: [&str; 12] = [
    "rgb(128,0,0)",
    "rgb(192,64,64)",
    "rgb(255,96,96)",
    "rgb(255,128,128)",
    "rgb(255,192,192)",
    "rgb(255,226,226)",
    "rgb(226,226,255)",
    "rgb(192,192,255)",
    "rgb(128,128,255)",
    "rgb(96,96,255)",
    "rgb(64,64,192)",
    "rgb(0,0,128)",
];

/// Signed vote difference (Democrat minus Republican). Raw margins are heavy
/// tailed, so the edges grow tenfold at each step. The outer edges are above
/// the population of any county.
pub const MARGIN_VOTES_EDGES: [f64; 11] = [
    -10_000_000.0,
    -500_000.0,
    -50_000.0,
    -5_000.0,
    -500.0,
    0.0,
    500.0,
    5_000.0,
    50_000.0,
    500_000.0,
    10_000_000.0,
];

pub const MARGIN_VOTES_LABELS: [&str; 10] = [
    "Rep > 500k",
    "Rep 50k-500k",
    "Rep 5k-50k",
    "Rep 500-5k",
    "Rep < 500",
    "Dem < 500",
    "Dem 500-5k",
    "Dem 5k-50k",
    "Dem 50k-500k",
    "Dem > 500k",
];

pub const MARGIN_VOTES_COLORS: [&str; 10] = [
    "rgb(128,0,0)",
    "rgb(192,64,64)",
    "rgb(255,96,96)",
    "rgb(255,192,192)",
    "rgb(255,226,226)",
    "rgb(226,226,255)",
    "rgb(192,192,255)",
    "rgb(96,96,255)",
    "rgb(64,64,192)",
    "rgb(0,0,128)",
];

pub fn margin_by_share() -> Result<BinSpec, BinSpecError> {
    BinSpec::new(
        MARGIN_BY_SHARE,
        &MARGIN_SHARE_EDGES,
        &MARGIN_SHARE_LABELS,
        &MARGIN_SHARE_COLORS,
    )
}

pub fn swing_by_share() -> Result<BinSpec, BinSpecError> {
    BinSpec::new(
        SWING_BY_SHARE,
        &SWING_SHARE_EDGES,
        &SWING_SHARE_LABELS,
        &SWING_SHARE_COLORS,
    )
}

pub fn margin_by_votes() -> Result<BinSpec, BinSpecError> {
    BinSpec::new(
        MARGIN_BY_VOTES,
        &MARGIN_VOTES_EDGES,
        &MARGIN_VOTES_LABELS,
        &MARGIN_VOTES_COLORS,
    )
}

/// The three binners used by the maps, built together.
#[derive(PartialEq, Debug, Clone)]
pub struct Palette {
    pub margin_by_share: BinSpec,
    pub swing_by_share: BinSpec,
    pub margin_by_votes: BinSpec,
}

impl Palette {
    pub fn builtin() -> Result<Palette, BinSpecError> {
        Ok(Palette {
            margin_by_share: margin_by_share()?,
            swing_by_share: swing_by_share()?,
            margin_by_votes: margin_by_votes()?,
        })
    }

    pub fn specs(&self) -> [&BinSpec; 3] {
        [
            &self.margin_by_share,
            &self.swing_by_share,
            &self.margin_by_votes,
        ]
    }
}
