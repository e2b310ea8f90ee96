use crate::dashboard::*;

use ranking_compare::layout::{ChartSpec, KpiSpec, RankStyle, SourceLayout};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_PEER_FILE: &str = "peer.csv";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct KpiConfig {
    pub metric: String,
    pub label: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub section: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub metrics: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "sheetName")]
    pub sheet_name: Option<String>,
    #[serde(rename = "rankColumn")]
    pub rank_column: Option<String>,
    #[serde(rename = "rankStyle")]
    pub rank_style: Option<String>,
    pub kpis: Option<Vec<KpiConfig>>,
    pub charts: Option<Vec<ChartConfig>>,
}

impl FileSource {
    pub fn sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }

    /// The standard layout of the source, with the parts given in the configuration
    /// replaced.
    pub fn layout(&self, source: RankingSource) -> DashboardResult<SourceLayout> {
        let mut layout = SourceLayout::standard(source);
        if let Some(col) = &self.rank_column {
            layout.rank_metric = col.clone();
        }
        if let Some(style) = &self.rank_style {
            layout.rank_style = match style.to_lowercase().as_str() {
                "band" => RankStyle::Band,
                "scalar" => RankStyle::Scalar,
                _ => {
                    return InvalidRankStyleSnafu {
                        value: style.clone(),
                        table: source.label(),
                    }
                    .fail()
                }
            };
        }
        if let Some(kpis) = &self.kpis {
            layout.kpis = kpis
                .iter()
                .map(|k| KpiSpec {
                    metric: k.metric.clone(),
                    label: k.label.clone(),
                })
                .collect();
        }
        if let Some(charts) = &self.charts {
            layout.charts = charts
                .iter()
                .map(|c| ChartSpec {
                    section: c.section.clone().unwrap_or_default(),
                    title: c.title.clone(),
                    description: c.description.clone().unwrap_or_default(),
                    metrics: c.metrics.clone(),
                })
                .collect();
        }
        Ok(layout)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSources {
    pub times: FileSource,
    pub qs: FileSource,
    pub usn: FileSource,
    pub washington: FileSource,
}

impl FileSources {
    pub fn get(&self, source: RankingSource) -> &FileSource {
        match source {
            RankingSource::Times => &self.times,
            RankingSource::Qs => &self.qs,
            RankingSource::Usn => &self.usn,
            RankingSource::Washington => &self.washington,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PeerSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub sources: FileSources,
    #[serde(rename = "peerGroups")]
    pub peer_groups: Option<PeerSource>,
    #[serde(rename = "homeInstitution")]
    pub home_institution: Option<String>,
    #[serde(rename = "defaultComparison")]
    pub default_comparison: Option<String>,
}

impl DashboardConfig {
    pub fn policy(&self) -> ComparisonPolicy {
        let mut policy = ComparisonPolicy::default();
        if let Some(home) = &self.home_institution {
            policy.home = home.clone();
        }
        if let Some(default_comparison) = &self.default_comparison {
            policy.default_comparison = default_comparison.clone();
        }
        policy
    }

    pub fn peer_file(&self) -> &str {
        self.peer_groups
            .as_ref()
            .map(|p| p.file_path.as_str())
            .unwrap_or(DEFAULT_PEER_FILE)
    }

    pub fn layouts(&self) -> DashboardResult<Vec<SourceLayout>> {
        RankingSource::ALL
            .iter()
            .map(|s| self.sources.get(*s).layout(*s))
            .collect()
    }
}

pub fn read_config(path: &str) -> DashboardResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Reads a JSON document, used for the reference output.
pub fn read_summary(path: &str) -> DashboardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
