use shared::protocol::RoleCount;

pub const ROLE_PALETTE: [&str; 5] = ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Bottom,
}

/// What a charting sink needs to draw: a labelled numeric series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub data: Vec<u64>,
    pub background: Vec<&'static str>,
    pub responsive: bool,
    pub legend: LegendPosition,
}

pub fn roles_chart(roles: &[RoleCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels: roles.iter().map(|r| r.role.clone()).collect(),
        data: roles.iter().map(|r| r.count).collect(),
        background: ROLE_PALETTE.iter().copied().cycle().take(roles.len()).collect(),
        responsive: true,
        legend: LegendPosition::Bottom,
    }
}

impl ChartSpec {
    /// One line per slice with its share of the total, for text sinks.
    pub fn to_text(&self) -> String {
        let total: u64 = self.data.iter().sum();
        self.labels
            .iter()
            .zip(&self.data)
            .map(|(label, value)| {
                let share = if total == 0 {
                    0.0
                } else {
                    *value as f64 * 100.0 / total as f64
                };
                format!("{label}: {value} ({share:.1}%)")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
