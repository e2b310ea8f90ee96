use crate::config::ComparisonPolicy;

/// Reserved for the home institution.
pub const HOME_COLOR: &str = "#E10600";

/// Institutions that always get the same color, whatever they are compared with.
pub const FIXED_COLORS: [(&str, &str); 19] = [
    // Benchmark peers
    ("Clarkson University", "#FF7F0E"),
    ("Colorado School of Mines", "#2CA02C"),
    ("Florida Institute of Technology", "#D62728"),
    ("Illinois Institute of Technology", "#9467BD"),
    ("Michigan Technological University", "#8C564B"),
    ("Missouri University of Science and Technology", "#E377C2"),
    ("Rensselaer Polytechnic Institute", "#7F7F7F"),
    ("Stevens Institute of Technology", "#BCBD22"),
    ("Worcester Polytechnic Institute", "#17BECF"),
    // Aspirational peers
    ("California Institute of Technology", "#FF9896"),
    ("Carnegie Mellon University", "#98DF8A"),
    ("Georgia Institute of Technology-Main Campus", "#FFBB78"),
    ("Massachusetts Institute of Technology", "#C5B0D5"),
    // NJ peers
    ("Montclair State University", "#C49C94"),
    ("Rowan University", "#F7B6D2"),
    ("Rutgers University-New Brunswick", "#1F77B4"),
    ("Rutgers University-Newark", "#C7C7C7"),
    ("Seton Hall University", "#DBDB8D"),
    ("New Jersey Institute of Technology", HOME_COLOR),
];

pub const FALLBACK_PALETTE: [&str; 20] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#aec7e8", "#ffbb78", "#98df8a", "#ff9896", "#c5b0d5", "#c49c94",
    "#f7b6d2", "#c7c7c7", "#dbdb8d", "#9edae5",
];

/// 32-bit FNV-1a. Unlike the hasher of the standard library, it gives the same value in
/// every process.
pub fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for b in s.as_bytes() {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

pub fn fallback_color(institution: &str) -> &'static str {
    FALLBACK_PALETTE[(fnv1a(institution) as usize) % FALLBACK_PALETTE.len()]
}

pub fn color_for(institution: &str, policy: &ComparisonPolicy) -> &'static str {
    if institution == policy.home {
        return HOME_COLOR;
    }
    FIXED_COLORS
        .iter()
        .find(|(name, _)| *name == institution)
        .map(|(_, color)| *color)
        .unwrap_or_else(|| fallback_color(institution))
}

/// The display color of each institution of one comparison, in comparison order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColorAssignment {
    pub colors: Vec<(String, &'static str)>,
}

impl ColorAssignment {
    pub fn get(&self, institution: &str) -> Option<&'static str> {
        self.colors
            .iter()
            .find(|(name, _)| name == institution)
            .map(|(_, c)| *c)
    }
}

pub fn assign(institutions: &[String], policy: &ComparisonPolicy) -> ColorAssignment {
    let mut colors: Vec<(String, &'static str)> = Vec::with_capacity(institutions.len());
    for name in institutions.iter() {
        if colors.iter().all(|(n, _)| n != name) {
            colors.push((name.clone(), color_for(name, policy)));
        }
    }
    ColorAssignment { colors }
}

/// Renders a `#rrggbb` color as a translucent `rgba(...)` color, used to fill rank bands.
pub fn with_opacity(color: &str, alpha: f64) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
        None => format!("rgba(128, 128, 128, {})", alpha),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
