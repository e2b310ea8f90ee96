use crate::config::RankingSource;

/// How the headline rank of a source is published.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RankStyle {
    /// Ranks may be bands such as `201-250`.
    Band,
    /// Ranks are plain numbers.
    Scalar,
}

/// A metric shown as a key indicator.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct KpiSpec {
    pub metric: String,
    pub label: String,
}

/// A time-series chart of one or more metrics.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartSpec {
    pub section: String,
    pub title: String,
    pub description: String,
    pub metrics: Vec<String>,
}

/// What is displayed for one ranking source.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceLayout {
    pub source: RankingSource,
    pub rank_metric: String,
    pub rank_style: RankStyle,
    pub kpis: Vec<KpiSpec>,
    pub charts: Vec<ChartSpec>,
}

fn kpis(v: &[(&str, &str)]) -> Vec<KpiSpec> {
    v.iter()
        .map(|(metric, label)| KpiSpec {
            metric: metric.to_string(),
            label: label.to_string(),
        })
        .collect()
}

fn charts(v: &[(&str, &str, &str, &[&str])]) -> Vec<ChartSpec> {
    v.iter()
        .map(|(section, title, description, metrics)| ChartSpec {
            section: section.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        })
        .collect()
}

impl SourceLayout {
    /// The layout used when the configuration does not provide one.
    pub fn standard(source: RankingSource) -> SourceLayout {
        match source {
            RankingSource::Times => SourceLayout {
                source,
                rank_metric: "Times_Rank".to_string(),
                rank_style: RankStyle::Band,
                kpis: kpis(&[
                    ("Times_Rank", "Rank"),
                    ("Overall", "Overall Score"),
                    ("Teaching", "Teaching"),
                    ("Research_Quality", "Research Quality"),
                    ("Research_Environment", "Research Environment"),
                    ("International_Students", "Intl. Students %"),
                    ("No_of_students_per_staff", "Student/Staff Ratio"),
                    ("No_of_FTE_Students", "FTE Students"),
                ]),
                charts: charts(&[
                    ("Teaching", "Teaching (29.5%)", "Quality of learning environment via teaching reputation and staff ratios", &["Teaching"]),
                    ("Research Performance", "Research Quality (30%)", "Research excellence through citation impact and scholarly influence", &["Research_Quality"]),
                    ("Research Performance", "Research Environment (29%)", "Research funding, reputation, and output volume", &["Research_Environment"]),
                    ("Global Engagement & Gender", "International Outlook (7.5%)", "Global faculty, international students, and collaboration strength", &["International_Outlook"]),
                    ("Global Engagement & Gender", "Industry Income (4%)", "Ability to attract industry-sponsored research income", &["Industry"]),
                    ("Global Engagement & Gender", "Gender Distribution", "Share of male and female students", &["Male_Ratio", "Female_Ratio"]),
                ]),
            },
            RankingSource::Qs => SourceLayout {
                source,
                rank_metric: "QS_Rank".to_string(),
                rank_style: RankStyle::Band,
                kpis: kpis(&[
                    ("QS_Rank", "QS Rank"),
                    ("Overall_Score", "Overall Score"),
                    ("Academic_Reputation", "Academic Reputation"),
                    ("Employer_Reputation", "Employer Reputation"),
                    ("Citations_per_Faculty", "Citations/Faculty"),
                    ("Faculty_Student_Ratio", "Faculty-Student Ratio"),
                    ("Employment_Outcomes", "Employment Outcomes"),
                    ("Sustainability_Score", "Sustainability Score"),
                ]),
                charts: charts(&[
                    ("Research & Learning", "Academic Reputation (30%)", "Global survey of academic prestige.", &["Academic_Reputation"]),
                    ("Research & Learning", "Citations per Faculty (20%)", "Research strength via faculty citation rates", &["Citations_per_Faculty"]),
                    ("Global Engagement", "International Student Ratio (5%)", "Global student diversity at the institution", &["International_Student_Ratio"]),
                    ("Global Engagement", "International Faculty Ratio (5%)", "International diversity of faculty members", &["International_Faculty_Ratio"]),
                ]),
            },
            RankingSource::Usn => SourceLayout {
                source,
                rank_metric: "Rank".to_string(),
                rank_style: RankStyle::Scalar,
                kpis: kpis(&[
                    ("Rank", "USN Rank"),
                    ("Peer_assessment_score", "Peer Assessment"),
                    ("Actual_graduation_rate", "Graduation Rate"),
                    ("Average_first_year_retention_rate", "First-Year Retention"),
                    ("Faculty_resources_rank", "Faculty Resources Rank"),
                    ("Financial_resources_rank", "Financial Resources Rank"),
                    ("Pell_Graduation_Rate", "Pell Grad Rate"),
                    ("College_grad_income_benefit_(%)", "Income Benefit"),
                ]),
                charts: charts(&[
                    ("Student Success", "Graduation & Retention Rank", "Combined ranking on student graduation and retention success.", &["Graduation_and_retention_rank"]),
                    ("Student Success", "Pell Graduation Rate", "Graduation rate of low-income Pell Grant students.", &["Pell_Graduation_Rate"]),
                    ("Faculty & Financials", "% Full-Time Faculty", "Ratio of full-time instructional faculty.", &["Percent_of_full-time_faculty"]),
                    ("Faculty & Financials", "Faculty Resources Rank", "Ranking based on class size, salary, and staff ratios.", &["Faculty_resources_rank"]),
                    ("Admissions & Selectivity", "Top 10% HS Class", "Percentage of students in top decile of their class.", &["Top_10%_of_HS_Class"]),
                    ("Admissions & Selectivity", "% Submitted SAT", "SAT submission ratio indicating selectivity.", &["%_students_submitting_SAT_scores"]),
                    ("Alumni Outcomes", "Alumni Giving Rate", "Measures alumni engagement through donations.", &["Alumni_Giving"]),
                ]),
            },
            RankingSource::Washington => SourceLayout {
                source,
                rank_metric: "Washington_Rank".to_string(),
                rank_style: RankStyle::Scalar,
                kpis: kpis(&[
                    ("Washington_Rank", "Washington Rank"),
                    ("8-year_graduation_rate", "8-Year Graduation Rate"),
                    ("Pell/non-Pell_graduation_gap", "Pell vs Non-Pell Grad Gap"),
                    ("Affordability_rank", "Affordability Rank"),
                    ("Earnings_after_9_years", "Earnings after 9 years"),
                    ("Service-oriented_majors_%", "Service-Oriented Majors %"),
                    ("Work-study_service_%", "Work-Study Service %"),
                    ("Net_price_rank", "Net Price Rank"),
                ]),
                charts: charts(&[
                    ("Social Mobility", "8-Year Graduation Rate", "Percentage of students graduating within 8 years", &["8-year_graduation_rate"]),
                    ("Social Mobility", "Pell vs Non-Pell Grad Gap", "Gap in graduation rates between Pell and non-Pell students", &["Pell/non-Pell_graduation_gap"]),
                    ("Social Mobility", "Pell Enrollment Performance", "Difference between actual and predicted Pell student enrollment", &["Actual_vs._predicted_Pell_enrollment"]),
                    ("Social Mobility", "Net Price for <$75k Income", "Average net price for low-income families", &["Net_price_of_attendance_for_families_below_$75,000_income"]),
                    ("Research", "Research Expenditures (M$)", "Total institutional research spending in millions", &["Research_expenditures_(M)"]),
                    ("Research", "S&E PhDs Awarded", "Number of science and engineering PhDs awarded", &["Science_&_engineering_PhDs_awarded"]),
                    ("Research", "Alumni Earning PhDs", "Rank of undergraduate alumni earning PhDs relative to size", &["Bachelor's_to_PhD_rank"]),
                    ("Research", "Faculty Awards", "Number of faculty receiving prestigious awards", &["Faculty_receiving_significant_awards"]),
                    ("Service", "Fed Work-Study for Service", "Percentage of work-study funds spent on service", &["Work-study_service_%"]),
                    ("Service", "Service-Oriented Majors", "% of students graduating in service-oriented disciplines", &["Service-oriented_majors_%"]),
                    ("Service", "AmeriCorps/Peace Corps", "Rank of participation in AmeriCorps and Peace Corps programs", &["AmeriCorps/Peace_Corps_rank"]),
                    ("Service", "ROTC Program", "Rank of ROTC program size relative to enrollment", &["ROTC_rank"]),
                ]),
            },
        }
    }
}
