use crate::config::MetricValue;

/// A rank that may be published as a band, such as `201-250`.
///
/// The bounds are kept in the order in which they were published: `30-23` gives
/// `low = 30` and `high = 23`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct RankBand {
    pub low: i64,
    pub high: i64,
    /// floor((low + high) / 2)
    pub mid: i64,
}

impl RankBand {
    pub fn single(value: i64) -> RankBand {
        RankBand {
            low: value,
            high: value,
            mid: value,
        }
    }

    pub fn new(low: i64, high: i64) -> RankBand {
        RankBand {
            low,
            high,
            // Widened: the sum of two large bounds overflows an i64.
            mid: (low as i128 + high as i128).div_euclid(2) as i64,
        }
    }
}

/// Parses a textual rank expression: a single integer or two integers separated by a
/// hyphen (an en-dash is accepted as well).
pub fn parse_rank_expression(s: &str) -> Option<RankBand> {
    let normalized = s.replace('\u{2013}', "-");
    let parts: Vec<&str> = normalized.split('-').collect();
    match parts.as_slice() {
        [low, high] => {
            let low = low.trim().parse::<i64>().ok()?;
            let high = high.trim().parse::<i64>().ok()?;
            Some(RankBand::new(low, high))
        }
        [single] => single.trim().parse::<i64>().ok().map(RankBand::single),
        _ => None,
    }
}

/// Reads the rank band out of a metric value.
///
/// Spreadsheets often store single ranks as floating point numbers: integral numbers are
/// accepted, anything else is not a rank.
pub fn parse_rank(value: &MetricValue) -> Option<RankBand> {
    match value {
        MetricValue::Text(s) => parse_rank_expression(s),
        MetricValue::Number(f) if f.is_finite() && f.fract() == 0.0 => {
            Some(RankBand::single(*f as i64))
        }
        MetricValue::Number(_) => None,
        MetricValue::Missing => None,
    }
}
