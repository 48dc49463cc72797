/// Counters captured at the end of one processed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub score: u32,
    pub clicks: u32,
    pub misclicks: u32,
    pub timeouts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Metric {
    Score,
    Clicks,
    Misclicks,
    Timeouts,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Score,
        Metric::Clicks,
        Metric::Misclicks,
        Metric::Timeouts,
    ];

    pub fn value(&self, snapshot: &MetricsSnapshot) -> u32 {
        match self {
            Metric::Score => snapshot.score,
            Metric::Clicks => snapshot.clicks,
            Metric::Misclicks => snapshot.misclicks,
            Metric::Timeouts => snapshot.timeouts,
        }
    }

    /// `(tick index, value)` pairs for charting.
    pub fn series(&self, history: &[MetricsSnapshot]) -> Vec<(f64, f64)> {
        history
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, self.value(s) as f64))
            .collect()
    }
}
