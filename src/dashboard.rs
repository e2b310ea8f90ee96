use log::{debug, info, warn};

use ranking_compare::colors::ColorAssignment;
use ranking_compare::layout::{RankStyle, SourceLayout};
use ranking_compare::normalize::normalize_table;
use ranking_compare::reconcile::ReconcileCache;
use ranking_compare::selection::{
    combined_selection, resolve, resolve_tab, tab_default_pick, tab_options, universe,
    SessionState,
};
use ranking_compare::view::{
    overview, source_tab, BandSeries, Cell, KpiPanel, Overview, RankChart, Series, SourceTab,
};
use ranking_compare::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dashboard::config_reader::*;
use crate::dashboard::io_common::{resolve_path, simplify_file_name};
use crate::dashboard::io_csv::{read_csv_table, read_peer_groups};
use crate::dashboard::io_excel::read_excel_table;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {sheet} not found in {path}"))]
    MissingWorksheet { path: String, sheet: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV file {path}"))]
    CsvRead { source: csv::Error, path: String },
    #[snafu(display("Column {column} not found in {path}"))]
    MissingPeerColumn { path: String, column: String },
    #[snafu(display("Error loading the {table} table"))]
    Normalizing {
        source: RankingErrors,
        table: String,
    },
    #[snafu(display("Unknown provider {provider} for the {table} table"))]
    UnknownProvider { provider: String, table: String },
    #[snafu(display("Unknown rank style {value} for the {table} table (expected band or scalar)"))]
    InvalidRankStyle { value: String, table: String },
    #[snafu(display("Invalid New Jersey filter {value} (expected All, Yes or No)"))]
    InvalidNjFilter { value: String },
    #[snafu(display("Invalid tab addition {value} (expected SOURCE=NAME)"))]
    InvalidTabAdd { value: String },
    #[snafu(display("The configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("Error serializing the output"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// What is asked on the command line.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DashboardRequest {
    pub config_path: String,
    pub years: Vec<i32>,
    pub nj: Option<String>,
    pub peer_groups: Vec<String>,
    pub manual: Vec<String>,
    pub tab_add: Vec<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

impl From<&Args> for DashboardRequest {
    fn from(args: &Args) -> Self {
        DashboardRequest {
            config_path: args.config.clone(),
            years: args.year.clone(),
            nj: args.nj.clone(),
            peer_groups: args.peer_group.clone(),
            manual: args.add.clone(),
            tab_add: args.tab_add.clone(),
            out: args.out.clone(),
            reference: args.reference.clone(),
        }
    }
}

pub fn parse_nj_filter(value: Option<&str>) -> DashboardResult<NjFilter> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("all") => Ok(NjFilter::All),
        Some("yes") => Ok(NjFilter::Only),
        Some("no") => Ok(NjFilter::Exclude),
        Some(_) => InvalidNjFilterSnafu {
            value: value.unwrap_or_default(),
        }
        .fail(),
    }
}

pub fn parse_tab_add(values: &[String]) -> DashboardResult<Vec<(RankingSource, String)>> {
    values
        .iter()
        .map(|value| -> DashboardResult<(RankingSource, String)> {
            let (key, name) = value
                .split_once('=')
                .context(InvalidTabAddSnafu { value })?;
            let source = RankingSource::from_key(key).context(InvalidTabAddSnafu { value })?;
            ensure!(!name.trim().is_empty(), InvalidTabAddSnafu { value });
            Ok((source, name.trim().to_string()))
        })
        .collect()
}

pub fn read_source_table(
    root: &Path,
    source: RankingSource,
    cfs: &FileSource,
) -> DashboardResult<SourceTable> {
    let path = resolve_path(root, &cfs.file_path);
    info!(
        "read_source_table: {}: reading {} ({})",
        source.label(),
        simplify_file_name(&path),
        cfs.provider
    );
    let raw = match cfs.provider.as_str() {
        "xlsx" | "excel" => read_excel_table(&path, cfs.sheet_name())?,
        "csv" => read_csv_table(&path)?,
        x => {
            return UnknownProviderSnafu {
                provider: x,
                table: source.label(),
            }
            .fail()
        }
    };
    normalize_table(source, &raw).context(NormalizingSnafu {
        table: source.label(),
    })
}

/// A loaded dataset, and the state of one session over it.
pub struct Dashboard {
    pub dataset: Dataset,
    pub policy: ComparisonPolicy,
    pub layouts: Vec<SourceLayout>,
    /// Problems found while loading, reported with every view.
    pub warnings: Vec<String>,
    cache: ReconcileCache,
    session: SessionState,
}

impl Dashboard {
    pub fn new(
        dataset: Dataset,
        policy: ComparisonPolicy,
        layouts: Vec<SourceLayout>,
        warnings: Vec<String>,
    ) -> Dashboard {
        Dashboard {
            dataset,
            policy,
            layouts,
            warnings,
            cache: ReconcileCache::new(),
            session: SessionState::default(),
        }
    }

    pub fn load(config_path: &str) -> DashboardResult<Dashboard> {
        let config = read_config(config_path)?;
        let root = Path::new(config_path)
            .parent()
            .context(MissingParentDirSnafu { path: config_path })?;
        let layouts = config.layouts()?;

        let times = read_source_table(root, RankingSource::Times, &config.sources.times)?;
        let qs = read_source_table(root, RankingSource::Qs, &config.sources.qs)?;
        let usn = read_source_table(root, RankingSource::Usn, &config.sources.usn)?;
        let washington =
            read_source_table(root, RankingSource::Washington, &config.sources.washington)?;

        let mut warnings: Vec<String> = Vec::new();
        let peer_path = resolve_path(root, config.peer_file());
        let peer_groups = match read_peer_groups(&peer_path)? {
            Some(groups) => groups,
            None => {
                let msg = format!(
                    "Peer group file {} not found: no peer group is available",
                    simplify_file_name(&peer_path)
                );
                warn!("{}", msg);
                warnings.push(msg);
                PeerGroups::default()
            }
        };

        let dataset = Dataset::new(times, qs, usn, washington, peer_groups);
        Ok(Dashboard::new(dataset, config.policy(), layouts, warnings))
    }

    /// Computes the view for a selection. Additions made in the tabs are remembered for the
    /// next calls.
    pub fn render(
        &mut self,
        selection: &Selection,
        tab_adds: &[(RankingSource, String)],
    ) -> JSValue {
        let rec = self.cache.get(&self.dataset, &self.policy.home);
        let peer_groups = &self.dataset.peer_groups;
        let pool = universe(
            &self.dataset,
            &rec.common,
            selection.nj_filter,
            &self.policy.home,
        );

        let mut warnings = self.warnings.clone();
        for name in selection.peer_groups.iter() {
            if peer_groups.members(name).is_none() {
                warnings.push(format!("Unknown peer group {}", name));
            }
        }
        let combined = combined_selection(selection, peer_groups, &pool, &self.policy);
        for name in selection.manual.iter() {
            if *name != self.policy.home && !combined.contains(name) {
                warnings.push(format!("{} cannot be added to the comparison", name));
            }
        }
        let compared = resolve(selection, peer_groups, &pool, &self.policy);
        info!("render: comparing {:?}", compared);

        let overview_view = overview(
            &self.dataset,
            &self.layouts,
            &compared,
            &selection.years,
            &self.policy,
        );

        let mut tabs: Vec<JSValue> = Vec::new();
        for layout in self.layouts.iter() {
            let source = layout.source;
            let options = tab_options(&combined, rec.extras_for(source));
            let adds: Vec<String> = tab_adds
                .iter()
                .filter(|(s, _)| *s == source)
                .map(|(_, name)| name.clone())
                .collect();
            for name in adds.iter() {
                if !options.contains(name) {
                    warnings.push(format!(
                        "{} is not available in the {} tab",
                        name,
                        source.label()
                    ));
                }
            }
            let pick: Option<Vec<String>> = if adds.is_empty() {
                None
            } else {
                let mut p = tab_default_pick(&self.session, source, &combined);
                p.extend(adds);
                Some(p)
            };
            let institutions = resolve_tab(
                &mut self.session,
                source,
                &combined,
                &options,
                pick.as_deref(),
                &self.policy,
            );
            debug!("render: {} tab: {:?}", source.label(), institutions);
            let tab = source_tab(
                self.dataset.table(source),
                layout,
                &options,
                &institutions,
                &selection.years,
                &self.policy,
            );
            tabs.push(tab_to_json(&tab));
        }

        let groups: Vec<JSValue> = peer_groups
            .groups
            .iter()
            .map(|(name, members)| {
                json!({
                    "name": name,
                    "selected": selection.peer_groups.contains(name),
                    "members": members,
                })
            })
            .collect();

        json!({
            "years": selection.years,
            "warnings": warnings,
            "peerGroups": groups,
            "overview": overview_to_json(&overview_view, peer_groups),
            "tabs": tabs,
        })
    }
}

fn cell_to_json(cell: &Cell) -> JSValue {
    match cell {
        Cell::Number(x) => json!(x),
        Cell::Text(s) => json!(s),
        Cell::NotAvailable => json!("N/A"),
    }
}

fn colors_to_json(colors: &ColorAssignment) -> Vec<JSValue> {
    colors
        .colors
        .iter()
        .map(|(name, color)| json!({"institution": name, "color": color}))
        .collect()
}

fn kpi_to_json(kpi: &KpiPanel) -> JSValue {
    let values: Vec<JSValue> = kpi
        .values
        .iter()
        .map(|(name, cell)| json!({"institution": name, "value": cell_to_json(cell)}))
        .collect();
    json!({
        "metric": kpi.metric,
        "label": kpi.label,
        "year": kpi.year,
        "values": values,
    })
}

fn series_to_json(series: &Series) -> JSValue {
    let points: Vec<JSValue> = series
        .points
        .iter()
        .map(|(year, cell)| json!({"year": year, "value": cell_to_json(cell)}))
        .collect();
    json!({
        "institution": series.institution,
        "metric": series.metric,
        "color": series.color,
        "points": points,
    })
}

fn band_series_to_json(series: &BandSeries) -> JSValue {
    let points: Vec<JSValue> = series
        .points
        .iter()
        .map(|p| {
            json!({
                "year": p.year,
                "low": p.band.low,
                "high": p.band.high,
                "mid": p.band.mid,
                "label": p.label,
            })
        })
        .collect();
    json!({
        "institution": series.institution,
        "color": series.color,
        "fillColor": series.fill_color,
        "points": points,
    })
}

fn overview_to_json(view: &Overview, peer_groups: &PeerGroups) -> JSValue {
    let institutions: Vec<JSValue> = view
        .institutions
        .iter()
        .map(|name| json!({"name": name, "peerGroup": peer_groups.group_of(name)}))
        .collect();
    let kpis: Vec<JSValue> = view
        .kpis
        .iter()
        .map(|(source, kpi)| {
            let mut js = kpi_to_json(kpi);
            js["source"] = json!(source.label());
            js
        })
        .collect();
    let charts: Vec<JSValue> = view
        .rank_charts
        .iter()
        .map(|(source, chart)| match chart {
            RankChart::Band(series) => json!({
                "source": source.label(),
                "style": "band",
                "series": series.iter().map(band_series_to_json).collect::<Vec<JSValue>>(),
            }),
            RankChart::Scalar(series) => json!({
                "source": source.label(),
                "style": "scalar",
                "series": series.iter().map(series_to_json).collect::<Vec<JSValue>>(),
            }),
        })
        .collect();
    json!({
        "institutions": institutions,
        "colors": colors_to_json(&view.colors),
        "kpis": kpis,
        "rankCharts": charts,
    })
}

fn tab_to_json(tab: &SourceTab) -> JSValue {
    let charts: Vec<JSValue> = tab
        .charts
        .iter()
        .map(|c| {
            json!({
                "section": c.spec.section,
                "title": c.spec.title,
                "description": c.spec.description,
                "metrics": c.spec.metrics,
                "series": c.series.iter().map(series_to_json).collect::<Vec<JSValue>>(),
            })
        })
        .collect();
    json!({
        "source": tab.source.label(),
        "options": tab.options,
        "institutions": tab.institutions,
        "colors": colors_to_json(&tab.colors),
        "year": tab.year,
        "kpis": tab.kpis.iter().map(kpi_to_json).collect::<Vec<JSValue>>(),
        "charts": charts,
    })
}

fn rank_style_name(style: RankStyle) -> &'static str {
    match style {
        RankStyle::Band => "band",
        RankStyle::Scalar => "scalar",
    }
}

fn write_output(out: Option<&str>, pretty_js: &str) -> DashboardResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", pretty_js);
            Ok(())
        }
        Some(path) => {
            info!("write_output: writing to {}", path);
            fs::write(path, format!("{}\n", pretty_js)).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(reference_path: &str, pretty_js: &str) -> DashboardResult<()> {
    let reference = read_summary(reference_path)?;
    let pretty_js_reference =
        serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {})?;
    if pretty_js_reference != pretty_js {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(pretty_js_reference.as_str(), pretty_js, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    Ok(())
}

pub fn run_dashboard(request: &DashboardRequest) -> DashboardResult<JSValue> {
    let nj_filter = parse_nj_filter(request.nj.as_deref())?;
    let tab_adds = parse_tab_add(&request.tab_add)?;
    let mut dashboard = Dashboard::load(&request.config_path)?;
    for layout in dashboard.layouts.iter() {
        debug!(
            "run_dashboard: {}: rank {:?} ({})",
            layout.source.label(),
            layout.rank_metric,
            rank_style_name(layout.rank_style)
        );
    }

    let years = if request.years.is_empty() {
        dashboard.dataset.available_years()
    } else {
        request.years.iter().cloned().collect()
    };
    let selection = Selection {
        years,
        nj_filter,
        peer_groups: request.peer_groups.clone(),
        manual: request.manual.clone(),
    };
    info!("run_dashboard: selection {:?}", selection);

    let result_js = dashboard.render(&selection, &tab_adds);
    let pretty_js = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;
    write_output(request.out.as_deref(), &pretty_js)?;

    if let Some(reference_path) = &request.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(result_js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const NJIT: &str = "New Jersey Institute of Technology";
    const MIT: &str = "Massachusetts Institute of Technology";
    const RUTGERS: &str = "Rutgers University-New Brunswick";
    const STEVENS: &str = "Stevens Institute of Technology";
    const ROWAN: &str = "Rowan University";

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn temp_file(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("unirank_{}_{}.json", name, std::process::id()))
            .to_string_lossy()
            .to_string()
    }

    fn request(args: &[&str]) -> DashboardRequest {
        let mut v = vec!["unirank"];
        v.extend(args);
        DashboardRequest::from(&Args::parse_from(v))
    }

    fn names(js: &JSValue) -> Vec<String> {
        js.as_array()
            .unwrap()
            .iter()
            .map(|x| x.as_str().unwrap().to_string())
            .collect()
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn aspirational_peers_over_csv() {
        init();
        let out = temp_file("aspirational");
        let config = fixture("basic/config.json");
        let js = run_dashboard(&request(&[
            "--config",
            &config,
            "--peer-group",
            "Aspirational",
            "--out",
            &out,
        ]))
        .unwrap();

        assert_eq!(js["years"], json!([2020, 2021, 2022, 2023]));
        assert_eq!(js["warnings"], json!([]));

        let overview = &js["overview"];
        assert_eq!(overview["institutions"][0]["name"], json!(NJIT));
        assert_eq!(overview["institutions"][1]["name"], json!(MIT));
        assert_eq!(overview["institutions"][1]["peerGroup"], json!("Aspirational"));
        assert_eq!(overview["institutions"].as_array().unwrap().len(), 2);
        assert_eq!(overview["colors"][0]["color"], json!("#E10600"));
        assert_eq!(overview["colors"][1]["color"], json!("#C5B0D5"));

        let times_kpi = &overview["kpis"][0];
        assert_eq!(times_kpi["source"], json!("TIMES"));
        assert_eq!(times_kpi["year"], json!(2023));
        assert_eq!(times_kpi["values"][0]["value"], json!("601–800"));
        assert_eq!(times_kpi["values"][1]["value"], json!(3.0));
        // Washington has no 2023 edition for these institutions.
        assert_eq!(overview["kpis"][3]["year"], json!(2022));

        let times_chart = &overview["rankCharts"][0];
        assert_eq!(times_chart["style"], json!("band"));
        let njit_band = &times_chart["series"][0]["points"][0];
        assert_eq!(njit_band["year"], json!(2020));
        assert_eq!(njit_band["low"], json!(601));
        assert_eq!(njit_band["high"], json!(800));
        assert_eq!(njit_band["mid"], json!(700));
        let mit_band = &times_chart["series"][1]["points"];
        assert_eq!(mit_band.as_array().unwrap().len(), 4);
        assert_eq!(mit_band[0]["low"], mit_band[0]["high"]);
        assert_eq!(
            times_chart["series"][1]["fillColor"],
            json!("rgba(197, 176, 213, 0.15)")
        );

        let usn_chart = &overview["rankCharts"][2];
        assert_eq!(usn_chart["style"], json!("scalar"));
        assert_eq!(usn_chart["series"][0]["points"][3]["value"], json!(96.0));

        let times_tab = &js["tabs"][0];
        assert_eq!(times_tab["source"], json!("TIMES"));
        assert_eq!(names(&times_tab["options"]), vec![MIT, ROWAN]);
        assert_eq!(names(&times_tab["institutions"]), vec![NJIT, MIT]);
        assert_eq!(times_tab["year"], json!(2023));
        assert_eq!(times_tab["charts"][0]["title"], json!("Teaching (29.5%)"));
        assert_eq!(
            times_tab["charts"][0]["series"][1]["points"][0]["value"],
            json!(94.8)
        );

        // The output file holds the same document.
        let written: JSValue = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, js);
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn default_comparison_and_year_selection() {
        init();
        let config = fixture("basic/config.json");
        let js = run_dashboard(&request(&[
            "--config", &config, "--year", "2020", "--year", "2021", "--out", "stdout",
        ]))
        .unwrap();
        assert_eq!(js["years"], json!([2020, 2021]));
        assert_eq!(names(&js["tabs"][1]["institutions"]), vec![NJIT, RUTGERS]);
        assert_eq!(js["tabs"][1]["year"], json!(2021));
        // The overview indicators ignore the year selection.
        assert_eq!(js["overview"]["kpis"][1]["year"], json!(2023));
        let series = js["overview"]["rankCharts"][1]["series"][1]["points"]
            .as_array()
            .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn nj_filter_and_manual_picks() {
        init();
        let config = fixture("basic/config.json");
        let js = run_dashboard(&request(&[
            "--config", &config, "--nj", "Yes", "--add", STEVENS, "--add", MIT,
        ]))
        .unwrap();
        assert_eq!(names(&js["tabs"][2]["institutions"]), vec![NJIT, STEVENS]);
        assert_eq!(
            js["warnings"],
            json!([format!("{} cannot be added to the comparison", MIT)])
        );
    }

    #[test]
    fn tab_additions_are_remembered() {
        init();
        let mut dashboard = Dashboard::load(&fixture("basic/config.json")).unwrap();
        let selection = Selection {
            years: dashboard.dataset.available_years(),
            nj_filter: NjFilter::All,
            peer_groups: vec!["Aspirational".to_string()],
            manual: Vec::new(),
        };
        let adds = parse_tab_add(&[format!("times={}", ROWAN)]).unwrap();
        let js = dashboard.render(&selection, &adds);
        assert_eq!(names(&js["tabs"][0]["institutions"]), vec![NJIT, MIT, ROWAN]);
        assert_eq!(names(&js["tabs"][1]["institutions"]), vec![NJIT, MIT]);

        // Later views keep Rowan in the TIMES tab only.
        let js = dashboard.render(&selection, &[]);
        assert_eq!(names(&js["tabs"][0]["institutions"]), vec![NJIT, MIT, ROWAN]);
        assert_eq!(names(&js["tabs"][1]["institutions"]), vec![NJIT, MIT]);
        // The overview is not affected.
        assert_eq!(js["overview"]["institutions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn missing_peer_file_is_a_warning() {
        init();
        let config = fixture("no_peers/config.json");
        let js = run_dashboard(&request(&["--config", &config, "-p", "Aspirational"])).unwrap();
        assert_eq!(
            js["warnings"],
            json!([
                "Peer group file missing_peer.csv not found: no peer group is available",
                "Unknown peer group Aspirational"
            ])
        );
        assert_eq!(js["peerGroups"], json!([]));
        // A peer group was asked for: no fallback to the default comparison.
        assert_eq!(names(&js["tabs"][0]["institutions"]), vec![NJIT]);
    }

    #[test]
    fn reference_check() {
        init();
        let config = fixture("basic/config.json");
        let out = temp_file("reference");
        run_dashboard(&request(&["--config", &config, "--out", &out])).unwrap();
        let res = run_dashboard(&request(&[
            "--config", &config, "--out", &out, "--reference", &out,
        ]));
        assert!(res.is_ok());
        let res = run_dashboard(&request(&[
            "--config",
            &config,
            "--out",
            "stdout",
            "--reference",
            &out,
            "--peer-group",
            "NJ Peers",
        ]));
        assert!(matches!(res, Err(DashboardError::ReferenceMismatch { .. })));
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn invalid_arguments() {
        assert_eq!(parse_nj_filter(None).unwrap(), NjFilter::All);
        assert_eq!(parse_nj_filter(Some("no")).unwrap(), NjFilter::Exclude);
        assert!(matches!(
            parse_nj_filter(Some("maybe")),
            Err(DashboardError::InvalidNjFilter { .. })
        ));
        assert_eq!(
            parse_tab_add(&["QS=Rowan University".to_string()]).unwrap(),
            vec![(RankingSource::Qs, ROWAN.to_string())]
        );
        for bad in ["Rowan University", "forbes=Rowan University", "times="] {
            assert!(matches!(
                parse_tab_add(&[bad.to_string()]),
                Err(DashboardError::InvalidTabAdd { .. })
            ));
        }
    }

    #[test]
    fn loading_errors() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let cfs = FileSource {
            provider: "pdf".to_string(),
            file_path: "tests/fixtures/basic/QS.csv".to_string(),
            sheet_name: None,
            rank_column: None,
            rank_style: None,
            kpis: None,
            charts: None,
        };
        assert!(matches!(
            read_source_table(root, RankingSource::Qs, &cfs),
            Err(DashboardError::UnknownProvider { .. })
        ));
        let cfs = FileSource {
            provider: "csv".to_string(),
            file_path: "tests/fixtures/basic/peer.csv".to_string(),
            ..cfs
        };
        assert!(matches!(
            read_source_table(root, RankingSource::Qs, &cfs),
            Err(DashboardError::Normalizing {
                source: RankingErrors::MissingColumn(RankingSource::Qs, _),
                ..
            })
        ));
        let cfs = FileSource {
            file_path: "tests/fixtures/basic/nope.csv".to_string(),
            ..cfs
        };
        assert!(matches!(
            read_source_table(root, RankingSource::Qs, &cfs),
            Err(DashboardError::CsvOpen { .. })
        ));
        assert!(matches!(
            Dashboard::load(&fixture("nope/config.json")),
            Err(DashboardError::OpeningJson { .. })
        ));
    }

    #[test]
    fn csv_readers() {
        let table = read_csv_table(&fixture("basic/TIMES.csv")).unwrap();
        assert_eq!(table.header[0], "IPEDS_Name");
        assert_eq!(table.rows[0][0], RawCell::Text(NJIT.to_string()));
        assert_eq!(table.rows[0][1], RawCell::Int(2020));
        assert_eq!(table.rows[0][3], RawCell::Text("601–800".to_string()));

        let peers = read_peer_groups(&fixture("basic/peer.csv")).unwrap().unwrap();
        assert_eq!(peers.names(), vec!["Aspirational".to_string(), "NJ Peers".to_string()]);
        assert_eq!(
            peers.members("NJ Peers").unwrap(),
            &[RUTGERS.to_string(), STEVENS.to_string()]
        );
        assert_eq!(read_peer_groups(&fixture("basic/missing.csv")).unwrap(), None);
    }

    #[test]
    fn excel_reader() {
        let path = fixture("xlsx/TIMES.xlsx");
        let table = read_excel_table(&path, "Rankings").unwrap();
        assert_eq!(
            table.header,
            vec!["IPEDS_Name", "Year", "New_Jersey_University", "Times_Rank", "Teaching"]
        );
        assert_eq!(table.rows.len(), 3);
        assert_eq!(
            table.rows[0],
            vec![
                RawCell::Text(NJIT.to_string()),
                RawCell::Float(2023.0),
                RawCell::Text("Yes".to_string()),
                RawCell::Text("401–500".to_string()),
                RawCell::Float(31.2),
            ]
        );
        assert_eq!(table.rows[1][3], RawCell::Float(3.0));
        // A cell absent from the sheet and a blank string are both empty.
        assert_eq!(table.rows[1][4], RawCell::Empty);
        assert_eq!(table.rows[2][4], RawCell::Empty);

        assert!(matches!(
            read_excel_table(&path, "Sheet1"),
            Err(DashboardError::MissingWorksheet { .. })
        ));
        assert!(matches!(
            read_excel_table(&fixture("xlsx/nope.xlsx"), "Rankings"),
            Err(DashboardError::OpeningExcel { .. })
        ));
    }

    #[test]
    fn dashboard_over_xlsx() {
        init();
        let dashboard = Dashboard::load(&fixture("xlsx/config.json")).unwrap();
        let times = &dashboard.dataset.times;
        assert_eq!(times.records.len(), 3);
        assert_eq!(times.years().into_iter().collect::<Vec<_>>(), vec![2023]);
        let njit = times.record(NJIT, 2023).unwrap();
        assert_eq!(njit.new_jersey, Some(true));
        assert_eq!(njit.metric("Times_Rank"), &MetricValue::Text("401–500".to_string()));
        assert_eq!(njit.metric("Teaching"), &MetricValue::Number(31.2));
        assert_eq!(
            times.record(MIT, 2023).unwrap().metric("Times_Rank"),
            &MetricValue::Number(3.0)
        );
        assert!(times.record(RUTGERS, 2023).unwrap().metric("Teaching").is_missing());

        // Without a sheet name, the default worksheet is looked up.
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let cfs = FileSource {
            provider: "xlsx".to_string(),
            file_path: "tests/fixtures/xlsx/TIMES.xlsx".to_string(),
            sheet_name: None,
            rank_column: None,
            rank_style: None,
            kpis: None,
            charts: None,
        };
        assert!(matches!(
            read_source_table(root, RankingSource::Times, &cfs),
            Err(DashboardError::MissingWorksheet { sheet, .. }) if sheet == "Sheet1"
        ));
    }
}
