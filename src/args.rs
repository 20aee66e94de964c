use clap::Parser;

/// Bins county-level election results for the maps and summarizes states.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The CSV table of election results, one row per county and year.
    /// See the manual for the expected columns.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path, optional) A JSON file with the bin edges, labels and colors to use instead of the built-in ones.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the selected rows are written in CSV format to the given
    /// location, with the margin, swing and vote margin bins and their colors attached.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default: the latest year in the input) The election year to select.
    #[clap(short, long, value_parser)]
    pub year: Option<u16>,

    /// (default All) The state to select, by full name or abbreviation.
    #[clap(short, long, value_parser)]
    pub state: Option<String>,

    /// If passed as an argument, prints the results of the selected state and year in JSON format.
    #[clap(long, takes_value = false)]
    pub summary: bool,

    /// (file path) A reference file containing the summary of a state in JSON format. If provided, countymap will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, prints the labels and colors of each bin table, in legend order.
    #[clap(long, takes_value = false)]
    pub legend: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
