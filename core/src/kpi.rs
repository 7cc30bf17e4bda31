use crate::dataset::HourlyRecord;
use crate::math::StatsHelper;
use crate::prelude::DashboardResult;
use serde::{Deserialize, Serialize};

pub const P95: f64 = 0.95;

/// The four headline numbers of a populated render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_trips: u64,
    pub avg_speed: f64,
    pub avg_fare: f64,
    pub p95_speed: f64,
}

pub struct KpiComputer;

impl KpiComputer {
    pub fn compute(records: &[HourlyRecord]) -> DashboardResult<KpiSnapshot> {
        let total_trips = records.iter().map(|r| u64::from(r.trips)).sum();
        let speeds: Vec<f64> = records.iter().map(|r| r.avg_speed).collect();
        let fares: Vec<f64> = records.iter().map(|r| r.avg_fare).collect();
        let p95_speed = StatsHelper::percentile(&StatsHelper::sort(&speeds), P95)?;

        Ok(KpiSnapshot {
            total_trips,
            avg_speed: StatsHelper::mean(&speeds),
            avg_fare: StatsHelper::mean(&fares),
            p95_speed,
        })
    }

    /// The `k` busiest hours, busiest first; ties go to the earlier hour.
    pub fn peak_hours(records: &[HourlyRecord], k: usize) -> Vec<HourlyRecord> {
        StatsHelper::top_k_indices(records, k, |r| r.trips)
            .into_iter()
            .map(|idx| records[idx])
            .collect()
    }
}

/// Text shown in the four KPI cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub total_trips: String,
    pub avg_speed: String,
    pub avg_fare: String,
    pub p95_speed: String,
}

impl KpiDisplay {
    pub fn zero() -> Self {
        Self {
            total_trips: "0".into(),
            avg_speed: "0".into(),
            avg_fare: "0".into(),
            p95_speed: "0".into(),
        }
    }

    pub fn from_snapshot(snapshot: &KpiSnapshot) -> Self {
        Self {
            total_trips: format_grouped(snapshot.total_trips),
            avg_speed: format!("{:.1}", snapshot.avg_speed),
            avg_fare: format!("{:.1}", snapshot.avg_fare),
            p95_speed: format!("{:.1}", snapshot.p95_speed),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Default for KpiDisplay {
    fn default() -> Self {
        Self::zero()
    }
}

/// Thousands separators: 12345 -> "12,345".
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetSynthesizer;
    use crate::sampling::RngSampler;

    fn records(trips: &[u32]) -> Vec<HourlyRecord> {
        trips
            .iter()
            .enumerate()
            .map(|(hour, &t)| HourlyRecord::new(hour as u8, t, 20.0 + hour as f64, 15.0))
            .collect()
    }

    #[test]
    fn total_trips_is_exact_sum() {
        let mut synth = DatasetSynthesizer::new(RngSampler::seeded(11));
        for _ in 0..10 {
            let hourly = synth.synthesize_hourly().unwrap();
            let expected: u64 = hourly.iter().map(|r| r.trips as u64).sum();
            let kpis = KpiComputer::compute(&hourly).unwrap();
            assert_eq!(kpis.total_trips, expected);
            assert!((6000..=13176).contains(&kpis.total_trips));
        }
    }

    #[test]
    fn averages_and_p95_follow_stats_engine() {
        let hourly = records(&[300; 24]);
        let kpis = KpiComputer::compute(&hourly).unwrap();
        assert_eq!(kpis.total_trips, 7200);
        // speeds 20..=43, mean 31.5, floor(0.95 * 23) = 21 -> 41
        assert_eq!(kpis.avg_speed, 31.5);
        assert_eq!(kpis.avg_fare, 15.0);
        assert_eq!(kpis.p95_speed, 41.0);
    }

    #[test]
    fn compute_is_pure() {
        let hourly = records(&[260, 540, 300, 410]);
        assert_eq!(
            KpiComputer::compute(&hourly).unwrap(),
            KpiComputer::compute(&hourly).unwrap()
        );
    }

    #[test]
    fn empty_records_yield_zero_snapshot() {
        let kpis = KpiComputer::compute(&[]).unwrap();
        assert_eq!(kpis.total_trips, 0);
        assert_eq!(kpis.avg_speed, 0.0);
        assert_eq!(kpis.p95_speed, 0.0);
    }

    #[test]
    fn peak_hours_pick_busiest() {
        let hourly = records(&[260, 540, 300, 540, 410]);
        let peaks = KpiComputer::peak_hours(&hourly, 3);
        let hours: Vec<u8> = peaks.iter().map(|r| r.hour).collect();
        assert_eq!(hours, vec![1, 3, 4]);
    }

    #[test]
    fn display_formats_grouping_and_one_decimal() {
        let display = KpiDisplay::from_snapshot(&KpiSnapshot {
            total_trips: 9_876,
            avg_speed: 32.449,
            avg_fare: 15.0,
            p95_speed: 44.96,
        });
        assert_eq!(display.total_trips, "9,876");
        assert_eq!(display.avg_speed, "32.4");
        assert_eq!(display.avg_fare, "15.0");
        assert_eq!(display.p95_speed, "45.0");
        assert!(KpiDisplay::zero().is_zero());
    }

    #[test]
    fn grouping_handles_short_and_long_numbers() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(13_176), "13,176");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
    }
}
