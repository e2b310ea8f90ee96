use clap::Parser;

/// Compares universities across the TIMES, QS, USN and Washington rankings.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the ranking tables and the peer groups.
    /// For more information about the file format, read the documentation of `ranking_compare::manual`.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing the expected view in JSON format. If provided, unirank will
    /// check that the output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) Where the view is written in JSON format. Defaults to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (repeated, default all years) The editions to display.
    #[clap(short, long, value_parser)]
    pub year: Vec<i32>,

    /// (All, Yes or No, default All) Restricts the institutions that can be added by hand to the New Jersey
    /// institutions (Yes) or to the other ones (No).
    #[clap(long, value_parser)]
    pub nj: Option<String>,

    /// (repeated) A peer group to compare with.
    #[clap(short, long, value_parser)]
    pub peer_group: Vec<String>,

    /// (repeated) An institution to compare with.
    #[clap(short, long, value_parser)]
    pub add: Vec<String>,

    /// (repeated, SOURCE=NAME) An institution added in the tab of one source only, for instance
    /// `times=Rowan University`.
    #[clap(long, value_parser)]
    pub tab_add: Vec<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
