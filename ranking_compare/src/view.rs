/*!
The data handed to the presentation layer: key indicators and time series for the
institutions being compared.

Nothing is drawn here. Every value is already resolved (rounded numbers, `N/A` cells,
colors), so that the rendering side only has to lay it out.
*/

use log::debug;
use std::collections::BTreeSet;

use crate::colors::{assign, fallback_color, with_opacity, ColorAssignment};
use crate::config::*;
use crate::layout::{ChartSpec, RankStyle, SourceLayout};
use crate::rank_band::{parse_rank, RankBand};
use crate::Dataset;

/// The opacity used to fill the area of a rank band.
pub const BAND_OPACITY: f64 = 0.15;

/// One displayed value.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Number(f64),
    Text(String),
    NotAvailable,
}

impl Cell {
    pub fn is_available(&self) -> bool {
        !matches!(self, Cell::NotAvailable)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// All the years covered by at least one source, sorted. This is also the default year
/// selection.
pub fn available_years(dataset: &Dataset) -> BTreeSet<i32> {
    RankingSource::ALL
        .iter()
        .flat_map(|s| dataset.table(*s).years())
        .collect()
}

fn years_with_rows(table: &SourceTable, institutions: &[String]) -> BTreeSet<i32> {
    table
        .records
        .iter()
        .filter(|r| institutions.contains(&r.institution))
        .map(|r| r.year)
        .collect()
}

/// The most recent selected year for which the source has rows about these institutions.
pub fn latest_year(
    table: &SourceTable,
    institutions: &[String],
    years: &BTreeSet<i32>,
) -> Option<i32> {
    years_with_rows(table, institutions)
        .intersection(years)
        .max()
        .cloned()
}

/// The most recent year for which the source has rows about these institutions,
/// whatever the year selection.
pub fn latest_year_any(table: &SourceTable, institutions: &[String]) -> Option<i32> {
    years_with_rows(table, institutions).into_iter().max()
}

pub fn metric_cell(table: &SourceTable, institution: &str, year: i32, metric: &str) -> Cell {
    match table.record(institution, year).map(|r| r.metric(metric)) {
        Some(MetricValue::Number(x)) => Cell::Number(round2(*x)),
        Some(MetricValue::Text(s)) => Cell::Text(s.clone()),
        Some(MetricValue::Missing) | None => Cell::NotAvailable,
    }
}

/// A key indicator: one value per compared institution, for one year.
#[derive(PartialEq, Debug, Clone)]
pub struct KpiPanel {
    pub metric: String,
    pub label: String,
    pub year: Option<i32>,
    /// In comparison order. Empty when there is no year to show.
    pub values: Vec<(String, Cell)>,
}

pub fn kpi_panel(
    table: &SourceTable,
    institutions: &[String],
    metric: &str,
    label: &str,
    year: Option<i32>,
) -> KpiPanel {
    let values = match year {
        Some(y) => institutions
            .iter()
            .map(|name| (name.clone(), metric_cell(table, name, y, metric)))
            .collect(),
        None => Vec::new(),
    };
    KpiPanel {
        metric: metric.to_string(),
        label: label.to_string(),
        year,
        values,
    }
}

/// The values of one metric for one institution, sorted by year.
#[derive(PartialEq, Debug, Clone)]
pub struct Series {
    pub institution: String,
    pub metric: String,
    pub color: &'static str,
    pub points: Vec<(i32, Cell)>,
}

fn selected_records<'a>(
    table: &'a SourceTable,
    institution: &'a str,
    years: &'a BTreeSet<i32>,
) -> Vec<&'a RankingRecord> {
    let mut records: Vec<&RankingRecord> = Vec::new();
    for y in years.iter() {
        if let Some(r) = table.record(institution, *y) {
            records.push(r);
        }
    }
    records
}

/// One series per institution, restricted to the selected years. Years without a row are
/// left out, years with a row but no value are kept as `NotAvailable`.
pub fn metric_series(
    table: &SourceTable,
    institutions: &[String],
    metric: &str,
    years: &BTreeSet<i32>,
    colors: &ColorAssignment,
) -> Vec<Series> {
    institutions
        .iter()
        .map(|name| Series {
            institution: name.clone(),
            metric: metric.to_string(),
            color: colors.get(name).unwrap_or_else(|| fallback_color(name)),
            points: selected_records(table, name, years)
                .iter()
                .map(|r| (r.year, metric_cell(table, name, r.year, metric)))
                .collect(),
        })
        .collect()
}

#[derive(PartialEq, Debug, Clone)]
pub struct BandPoint {
    pub year: i32,
    pub band: RankBand,
    /// The rank as published, e.g. `201-250`.
    pub label: String,
}

/// The rank bands of one institution, sorted by year.
#[derive(PartialEq, Debug, Clone)]
pub struct BandSeries {
    pub institution: String,
    pub color: &'static str,
    pub fill_color: String,
    pub points: Vec<BandPoint>,
}

fn rank_label(value: &MetricValue) -> String {
    match value {
        MetricValue::Text(s) => s.trim().to_string(),
        MetricValue::Number(x) => format!("{}", x),
        MetricValue::Missing => String::new(),
    }
}

/// One band series per institution. Years whose rank cannot be parsed are dropped.
pub fn rank_band_series(
    table: &SourceTable,
    institutions: &[String],
    metric: &str,
    years: &BTreeSet<i32>,
    colors: &ColorAssignment,
) -> Vec<BandSeries> {
    institutions
        .iter()
        .map(|name| {
            let color = colors.get(name).unwrap_or_else(|| fallback_color(name));
            let points = selected_records(table, name, years)
                .iter()
                .filter_map(|r| {
                    let value = r.metric(metric);
                    match parse_rank(value) {
                        Some(band) => Some(BandPoint {
                            year: r.year,
                            band,
                            label: rank_label(value),
                        }),
                        None => {
                            if !value.is_missing() {
                                debug!(
                                    "rank_band_series: {:?} {}: unreadable rank {:?}",
                                    name, r.year, value
                                );
                            }
                            None
                        }
                    }
                })
                .collect();
            BandSeries {
                institution: name.clone(),
                color,
                fill_color: with_opacity(color, BAND_OPACITY),
                points,
            }
        })
        .collect()
}

#[derive(PartialEq, Debug, Clone)]
pub enum RankChart {
    Band(Vec<BandSeries>),
    Scalar(Vec<Series>),
}

#[derive(PartialEq, Debug, Clone)]
pub struct Overview {
    pub institutions: Vec<String>,
    pub colors: ColorAssignment,
    /// The headline rank of each source, at the latest year of that source.
    pub kpis: Vec<(RankingSource, KpiPanel)>,
    pub rank_charts: Vec<(RankingSource, RankChart)>,
}

pub fn overview(
    dataset: &Dataset,
    layouts: &[SourceLayout],
    institutions: &[String],
    years: &BTreeSet<i32>,
    policy: &ComparisonPolicy,
) -> Overview {
    let colors = assign(institutions, policy);
    let mut kpis = Vec::new();
    let mut rank_charts = Vec::new();
    for layout in layouts.iter() {
        let table = dataset.table(layout.source);
        let year = latest_year_any(table, institutions);
        let label = format!("{} Rank", layout.source.label());
        kpis.push((
            layout.source,
            kpi_panel(table, institutions, &layout.rank_metric, &label, year),
        ));
        let chart = match layout.rank_style {
            RankStyle::Band => RankChart::Band(rank_band_series(
                table,
                institutions,
                &layout.rank_metric,
                years,
                &colors,
            )),
            RankStyle::Scalar => RankChart::Scalar(metric_series(
                table,
                institutions,
                &layout.rank_metric,
                years,
                &colors,
            )),
        };
        rank_charts.push((layout.source, chart));
    }
    Overview {
        institutions: institutions.to_vec(),
        colors,
        kpis,
        rank_charts,
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ChartView {
    pub spec: ChartSpec,
    pub series: Vec<Series>,
}

/// Everything shown in the tab of one source.
#[derive(PartialEq, Debug, Clone)]
pub struct SourceTab {
    pub source: RankingSource,
    /// The institutions the tab can offer in its own picker.
    pub options: Vec<String>,
    pub institutions: Vec<String>,
    pub colors: ColorAssignment,
    pub year: Option<i32>,
    pub kpis: Vec<KpiPanel>,
    pub charts: Vec<ChartView>,
}

pub fn source_tab(
    table: &SourceTable,
    layout: &SourceLayout,
    options: &[String],
    institutions: &[String],
    years: &BTreeSet<i32>,
    policy: &ComparisonPolicy,
) -> SourceTab {
    let colors = assign(institutions, policy);
    let year = latest_year(table, institutions, years);
    let kpis = layout
        .kpis
        .iter()
        .map(|k| kpi_panel(table, institutions, &k.metric, &k.label, year))
        .collect();
    let charts = layout
        .charts
        .iter()
        .map(|spec| ChartView {
            spec: spec.clone(),
            series: spec
                .metrics
                .iter()
                .flat_map(|m| metric_series(table, institutions, m, years, &colors))
                .collect(),
        })
        .collect();
    SourceTab {
        source: layout.source,
        options: options.to_vec(),
        institutions: institutions.to_vec(),
        colors,
        year,
        kpis,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::reconcile::reconcile;
    use crate::selection::{resolve, universe};

    const NJIT: &str = "NJIT";
    const MIT: &str = "MIT";
    const RUTGERS: &str = "Rutgers";

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn policy() -> ComparisonPolicy {
        ComparisonPolicy {
            home: NJIT.to_string(),
            default_comparison: RUTGERS.to_string(),
        }
    }

    fn dataset() -> Dataset {
        let mut times = TableBuilder::new(RankingSource::Times);
        let mut qs = TableBuilder::new(RankingSource::Qs);
        let mut usn = TableBuilder::new(RankingSource::Usn);
        let mut washington = TableBuilder::new(RankingSource::Washington);
        for year in 2020..=2023 {
            times.add_row(
                NJIT,
                year,
                Some(true),
                &[
                    ("Times_Rank", RawCell::Text("401–500".to_string())),
                    ("Teaching", RawCell::Float(31.456)),
                ],
            );
            times.add_row(
                MIT,
                year,
                Some(false),
                &[
                    ("Times_Rank", RawCell::Text(format!("{}-{}", year - 2019, year - 2015))),
                    ("Teaching", RawCell::Float(90.0)),
                ],
            );
            qs.add_rank(NJIT, year, "QS_Rank", "651-700");
            qs.add_rank(MIT, year, "QS_Rank", "1");
            usn.add_row(NJIT, year, Some(true), &[("Rank", RawCell::Int(100 - year as i64 + 2020))]);
            usn.add_row(MIT, year, Some(false), &[("Rank", RawCell::Int(2))]);
            washington.add_rank(NJIT, year, "Washington_Rank", "120");
            washington.add_rank(MIT, year, "Washington_Rank", "3");
        }
        // Rutgers is missing from the Washington table.
        for year in 2020..=2023 {
            times.add_rank(RUTGERS, year, "Times_Rank", "201-250");
            qs.add_rank(RUTGERS, year, "QS_Rank", "250");
            usn.add_row(RUTGERS, year, Some(true), &[("Rank", RawCell::Int(40))]);
        }
        // QS has a 2024 edition.
        qs.add_rank(NJIT, 2024, "QS_Rank", "601-650");
        Dataset::new(
            times.build().unwrap(),
            qs.build().unwrap(),
            usn.build().unwrap(),
            washington.build().unwrap(),
            PeerGroups::from_pairs(&[("Aspirational".to_string(), MIT.to_string())]),
        )
    }

    fn standard_layouts() -> Vec<SourceLayout> {
        RankingSource::ALL
            .iter()
            .map(|s| SourceLayout::standard(*s))
            .collect()
    }

    #[test]
    fn years() {
        let ds = dataset();
        assert_eq!(
            available_years(&ds).into_iter().collect::<Vec<_>>(),
            vec![2020, 2021, 2022, 2023, 2024]
        );
        let names = s(&[NJIT, MIT]);
        let selected: BTreeSet<i32> = [2021, 2022, 2030].iter().cloned().collect();
        assert_eq!(latest_year(&ds.times, &names, &selected), Some(2022));
        assert_eq!(latest_year(&ds.times, &names, &BTreeSet::new()), None);
        assert_eq!(latest_year_any(&ds.qs, &names), Some(2024));
        assert_eq!(latest_year_any(&ds.washington, &s(&[RUTGERS])), None);
    }

    #[test]
    fn cells() {
        let ds = dataset();
        assert_eq!(metric_cell(&ds.times, NJIT, 2021, "Teaching"), Cell::Number(31.46));
        assert_eq!(
            metric_cell(&ds.times, NJIT, 2021, "Times_Rank"),
            Cell::Text("401–500".to_string())
        );
        assert_eq!(metric_cell(&ds.times, RUTGERS, 2021, "Teaching"), Cell::NotAvailable);
        assert_eq!(metric_cell(&ds.times, NJIT, 2021, "Nope"), Cell::NotAvailable);
        assert_eq!(metric_cell(&ds.times, NJIT, 1999, "Teaching"), Cell::NotAvailable);
    }

    #[test]
    fn kpi_without_year_is_empty() {
        let ds = dataset();
        let panel = kpi_panel(&ds.washington, &s(&[RUTGERS]), "Washington_Rank", "Rank", None);
        assert_eq!(panel.year, None);
        assert!(panel.values.is_empty());
        let panel = kpi_panel(&ds.usn, &s(&[NJIT, RUTGERS]), "Rank", "USN Rank", Some(2023));
        assert_eq!(
            panel.values,
            vec![
                (NJIT.to_string(), Cell::Number(97.0)),
                (RUTGERS.to_string(), Cell::Number(40.0)),
            ]
        );
    }

    #[test]
    fn end_to_end() {
        let ds = dataset();
        let policy = policy();
        let rec = reconcile(&ds, &policy.home);
        // Rutgers is not covered by every source.
        let expected: BTreeSet<String> = s(&[MIT, NJIT]).into_iter().collect();
        assert_eq!(rec.common, expected);
        let u = universe(&ds, &rec.common, NjFilter::All, &policy.home);
        let selection = Selection {
            years: available_years(&ds),
            nj_filter: NjFilter::All,
            peer_groups: s(&["Aspirational"]),
            manual: Vec::new(),
        };
        let compared = resolve(&selection, &ds.peer_groups, &u, &policy);
        assert_eq!(compared, s(&[NJIT, MIT]));

        let view = overview(&ds, &standard_layouts(), &compared, &selection.years, &policy);
        assert_eq!(view.colors.get(NJIT), Some(crate::colors::HOME_COLOR));
        let (src, qs_kpi) = &view.kpis[1];
        assert_eq!(*src, RankingSource::Qs);
        assert_eq!(qs_kpi.label, "QS Rank");
        assert_eq!(qs_kpi.year, Some(2024));
        assert_eq!(
            qs_kpi.values,
            vec![
                (NJIT.to_string(), Cell::Text("601-650".to_string())),
                (MIT.to_string(), Cell::NotAvailable),
            ]
        );

        match &view.rank_charts[0] {
            (RankingSource::Times, RankChart::Band(series)) => {
                assert_eq!(series.len(), 2);
                let mit = &series[1];
                assert_eq!(mit.institution, MIT);
                assert_eq!(mit.points.len(), 4);
                assert_eq!(mit.points[0].year, 2020);
                assert_eq!(mit.points[0].band, RankBand::new(1, 5));
                assert_eq!(mit.points[0].label, "1-5");
                assert_eq!(mit.points[3].band, RankBand::new(4, 8));
                assert_eq!(series[0].points[0].band, RankBand::new(401, 500));
                assert!(mit.fill_color.starts_with("rgba("));
            }
            other => panic!("unexpected chart {:?}", other),
        }
        match &view.rank_charts[2] {
            (RankingSource::Usn, RankChart::Scalar(series)) => {
                assert_eq!(series[0].points[3], (2023, Cell::Number(97.0)));
            }
            other => panic!("unexpected chart {:?}", other),
        }
    }

    #[test]
    fn tab_uses_the_selected_years() {
        let ds = dataset();
        let policy = policy();
        let layout = SourceLayout::standard(RankingSource::Times);
        let years: BTreeSet<i32> = [2020, 2021].iter().cloned().collect();
        let names = s(&[NJIT, MIT]);
        let tab = source_tab(&ds.times, &layout, &names, &names, &years, &policy);
        assert_eq!(tab.year, Some(2021));
        assert_eq!(tab.kpis.len(), layout.kpis.len());
        assert_eq!(tab.kpis[0].values[1], (MIT.to_string(), Cell::Text("2-6".to_string())));
        let teaching = &tab.charts[0];
        assert_eq!(teaching.spec.metrics, s(&["Teaching"]));
        assert_eq!(teaching.series.len(), 2);
        assert_eq!(
            teaching.series[1].points,
            vec![(2020, Cell::Number(90.0)), (2021, Cell::Number(90.0))]
        );
        // The gender chart has one series per metric and per institution.
        let gender = tab.charts.iter().find(|c| c.spec.metrics.len() == 2).unwrap();
        assert_eq!(gender.series.len(), 4);
        assert!(gender.series[0].points.iter().all(|(_, c)| !c.is_available()));
    }
}
