// Primitives for reading and writing CSV tables.

use std::io::Read;

use serde::Serialize;

use crate::countymap::*;

pub fn read_county_csv(path: &str) -> CmResult<Vec<(usize, ParsedCountyRow)>> {
    info!("Attempting to read county file {:?}", path);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    read_county_records(rdr)
}

/// Parses all the records, tagged with their line number in the file.
pub fn read_county_records<R: Read>(
    mut rdr: csv::Reader<R>,
) -> CmResult<Vec<(usize, ParsedCountyRow)>> {
    let mut res: Vec<(usize, ParsedCountyRow)> = Vec::new();
    for (idx, line_r) in rdr.deserialize::<ParsedCountyRow>().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_county_records: lineno: {:?} row: {:?}", lineno, line);
        res.push((lineno, line));
    }
    Ok(res)
}

/// A county row with its bins, as written to the output table.
/// Unclassified values have an empty label and the fallback color.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct BinnedCountyRow {
    pub county_fips: String,
    pub county_name: String,
    pub state_name: String,
    pub state_abbr: String,
    pub year: u16,
    pub votes_democrat: u64,
    pub votes_republican: u64,
    pub votes_other: u64,
    pub votes_total: u64,
    pub votes_pct_democrat: Option<f64>,
    pub votes_pct_republican: Option<f64>,
    pub votes_pct_two_party_democrat: Option<f64>,
    pub votes_pct_swing_from_prev_election: Option<f64>,
    pub population_total: Option<f64>,
    pub population_pct_white: Option<f64>,
    pub population_pct_black: Option<f64>,
    pub population_pct_hispanic: Option<f64>,
    pub median_household_income: Option<f64>,
    pub poverty_pct_overall: Option<f64>,
    pub bachelor_degree_pct_of_adults: Option<f64>,
    pub margin_bin: String,
    pub margin_color: String,
    pub swing_bin: String,
    pub swing_color: String,
    pub winning_margin_in_votes_bin: String,
    pub winning_margin_in_votes_color: String,
}

/// Attaches the three bins to the rows. Each column is binned in one pass.
pub fn bin_rows(rows: &[&CountyRow], palette: &Palette) -> Vec<BinnedCountyRow> {
    let shares: Vec<Option<f64>> = rows.iter().map(|r| r.two_party_share()).collect();
    let swings: Vec<Option<f64>> = rows.iter().map(|r| r.swing_from_prev_election).collect();
    let vote_margins: Vec<Option<f64>> = rows.iter().map(|r| Some(r.margin_in_votes())).collect();

    let margin_bins = palette.margin_by_share.bin(&shares);
    let swing_bins = palette.swing_by_share.bin(&swings);
    let vote_margin_bins = palette.margin_by_votes.bin(&vote_margins);

    let mut res: Vec<BinnedCountyRow> = Vec::new();
    for (idx, r) in rows.iter().enumerate() {
        let (margin_bin, swing_bin, votes_bin) =
            (margin_bins[idx], swing_bins[idx], vote_margin_bins[idx]);
        let d = &r.demographics;
        res.push(BinnedCountyRow {
            county_fips: r.county_fips.clone(),
            county_name: r.county_name.clone(),
            state_name: r.state_name.clone(),
            state_abbr: r.state_abbr.clone(),
            year: r.year,
            votes_democrat: r.votes_democrat,
            votes_republican: r.votes_republican,
            votes_other: r.votes_other,
            votes_total: r.votes_total(),
            votes_pct_democrat: r.pct_democrat(),
            votes_pct_republican: r.pct_republican(),
            votes_pct_two_party_democrat: shares[idx],
            votes_pct_swing_from_prev_election: swings[idx],
            population_total: d.population_total,
            population_pct_white: d.population_pct_white,
            population_pct_black: d.population_pct_black,
            population_pct_hispanic: d.population_pct_hispanic,
            median_household_income: d.median_household_income,
            poverty_pct_overall: d.poverty_pct_overall,
            bachelor_degree_pct_of_adults: d.bachelor_degree_pct_of_adults,
            margin_bin: margin_bin.unwrap_or_default().to_string(),
            margin_color: palette.margin_by_share.color(margin_bin).to_string(),
            swing_bin: swing_bin.unwrap_or_default().to_string(),
            swing_color: palette.swing_by_share.color(swing_bin).to_string(),
            winning_margin_in_votes_bin: votes_bin.unwrap_or_default().to_string(),
            winning_margin_in_votes_color: palette.margin_by_votes.color(votes_bin).to_string(),
        });
    }
    res
}

pub fn write_binned_csv<W: Write>(
    wtr: W,
    rows: &[&CountyRow],
    palette: &Palette,
) -> CmResult<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    for br in bin_rows(rows, palette) {
        writer.serialize(&br).context(WritingCsvSnafu {})?;
    }
    writer.flush().context(WritingOutputSnafu {})?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
county_fips,county_name,state_name,state_abbr,year,votes_democrat,votes_republican,votes_other,votes_total,votes_pct_two_party_democrat,votes_pct_swing_from_prev_election,median_household_income_2010
13001,Appling,Georgia,GA,2020,2000.0,6500.0,100.0,8600.0,,,37000
13001,Appling,Georgia,GA,2024,2000,7000,50,9050,,,
1001,Autauga,Alabama,AL,2024,7000,20000,300,27300,0.2592,-0.01,
";

    fn read_table() -> Vec<CountyRow> {
        let rdr = csv::Reader::from_reader(TABLE.as_bytes());
        let parsed = read_county_records(rdr).unwrap();
        validate_rows(&parsed).unwrap()
    }

    #[test]
    fn reads_the_table() {
        let rows = read_table();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].votes_republican, 6500);
        assert_eq!(rows[0].demographics.median_household_income, Some(37000.0));
        assert_eq!(rows[2].county_fips, "01001");
        assert_eq!(rows[2].pct_two_party_democrat, Some(0.2592));
        assert_eq!(rows[1].pct_two_party_democrat, None);
    }

    #[test]
    fn reports_the_bad_line() {
        let table = "county_fips,year,votes_democrat\n13001,2020,12\n13003,2020,many\n";
        let rdr = csv::Reader::from_reader(table.as_bytes());
        let err = read_county_records(rdr).unwrap_err();
        assert!(matches!(err, CountyMapError::CsvLineParse { lineno: 3, .. }));
    }

    #[test]
    fn bins_every_row() {
        let mut rows = read_table();
        derive_swing(&mut rows);
        let palette = Palette::builtin().unwrap();
        let selected: Vec<&CountyRow> = rows.iter().collect();
        let binned = bin_rows(&selected, &palette);
        assert_eq!(binned.len(), 3);

        // 2000 / 8500 = 0.235
        assert_eq!(binned[0].margin_bin, "Rep 40-60%");
        assert_eq!(binned[0].margin_color, "rgb(192,64,64)");
        // No earlier election for 2020.
        assert_eq!(binned[0].swing_bin, "");
        assert_eq!(binned[0].swing_color, "#cccccc");
        assert_eq!(binned[0].winning_margin_in_votes_bin, "Rep 500-5k");

        // 2000 / 9000 - 2000 / 8500 = -0.013
        assert_eq!(binned[1].swing_bin, "Rep swing 1-3%");
        assert_eq!(binned[1].winning_margin_in_votes_bin, "Rep 500-5k");

        assert_eq!(binned[2].margin_bin, "Rep 40-60%");
        // -0.01 sits on an edge and belongs to the bin below it.
        assert_eq!(binned[2].swing_bin, "Rep swing 1-3%");
        assert_eq!(binned[2].winning_margin_in_votes_bin, "Rep 5k-50k");
    }

    #[test]
    fn writes_csv_with_header() {
        let rows = read_table();
        let palette = Palette::builtin().unwrap();
        let selected: Vec<&CountyRow> = rows.iter().filter(|r| r.year == 2024).collect();
        let mut buf: Vec<u8> = Vec::new();
        write_binned_csv(&mut buf, &selected, &palette).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("county_fips,county_name,state_name"));
        assert!(lines[0].ends_with("winning_margin_in_votes_bin,winning_margin_in_votes_color"));
        assert!(lines[2].starts_with("01001,Autauga,Alabama,AL,2024,7000,20000,300,27300,"));
    }
}
