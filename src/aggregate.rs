//! Forecast aggregation into per-day buckets
//!
//! Groups the flat 3-hourly forecast list returned by the API into calendar-day
//! buckets and computes min/max/average temperature for each bucket. These
//! aggregates back the current-conditions card and the weekly outlook.

use crate::data::forecast::ForecastSample;

/// Min/max/average temperature over one day bucket
#[derive(Debug, Clone, PartialEq)]
pub struct TempAverages {
    /// Lowest sampled temperature of the day
    pub min_temp: f64,
    /// Highest sampled temperature of the day
    pub max_temp: f64,
    /// Arithmetic mean over all samples of the day
    pub avg_temp: f64,
}

impl Default for TempAverages {
    /// Identity values for the reduction pass; a bucket is never published
    /// without at least one sample folded in.
    fn default() -> Self {
        Self {
            min_temp: f64::INFINITY,
            max_temp: f64::NEG_INFINITY,
            avg_temp: 0.0,
        }
    }
}

/// One forecast sample keyed by its time-of-day within a bucket
#[derive(Debug, Clone)]
pub struct TimedSample {
    /// Time portion of the sample's timestamp ("HH:MM:SS")
    pub time: String,
    /// The raw forecast sample
    pub data: ForecastSample,
}

/// All samples observed on one calendar date, plus derived aggregates
#[derive(Debug, Clone)]
pub struct DayGroup {
    /// Calendar date ("YYYY-MM-DD")
    pub date: String,
    /// Samples for this date, in original order
    pub forecasts: Vec<TimedSample>,
    /// Derived temperature aggregates
    pub averages: TempAverages,
}

/// Forecast samples grouped by calendar date
///
/// Dates iterate in order of first appearance in the input, matching the
/// chronological order of the upstream forecast list.
#[derive(Debug, Clone, Default)]
pub struct GroupedForecast {
    groups: Vec<DayGroup>,
}

impl GroupedForecast {
    /// Returns true if no samples were grouped
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct dates in the grouping
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// The earliest day bucket, if any
    pub fn first(&self) -> Option<&DayGroup> {
        self.groups.first()
    }

    /// Looks up the bucket for a specific date string
    pub fn get(&self, date: &str) -> Option<&DayGroup> {
        self.groups.iter().find(|g| g.date == date)
    }

    /// Iterates day buckets in first-appearance order
    pub fn iter(&self) -> std::slice::Iter<'_, DayGroup> {
        self.groups.iter()
    }
}

/// Groups a chronological forecast list into per-day buckets
///
/// The partitioning key is the date portion of each sample's `dt_txt`
/// (`"YYYY-MM-DD HH:MM:SS"`). Samples within a date keep their original
/// order. Aggregates are computed after all samples for a date are
/// collected. An empty input produces an empty grouping.
pub fn group_by_day(samples: &[ForecastSample]) -> GroupedForecast {
    let mut groups: Vec<DayGroup> = Vec::new();

    for sample in samples {
        let mut parts = sample.dt_txt.splitn(2, ' ');
        let date = parts.next().unwrap_or_default();
        let time = parts.next().unwrap_or_default();

        let entry = TimedSample {
            time: time.to_string(),
            data: sample.clone(),
        };

        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.forecasts.push(entry),
            None => groups.push(DayGroup {
                date: date.to_string(),
                forecasts: vec![entry],
                averages: TempAverages::default(),
            }),
        }
    }

    for group in &mut groups {
        let temps: Vec<f64> = group.forecasts.iter().map(|f| f.data.main.temp).collect();
        group.averages = compute_averages(&temps);
    }

    GroupedForecast { groups }
}

/// Reduces a non-empty temperature slice into min/max/mean
fn compute_averages(temps: &[f64]) -> TempAverages {
    let min_temp = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max_temp = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = temps.iter().sum();
    let avg_temp = sum / temps.len() as f64;

    TempAverages {
        min_temp,
        max_temp,
        avg_temp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::forecast::{MainReadings, WeatherDesc, Wind};

    /// Builds a minimal forecast sample for a timestamp and temperature
    fn sample(dt_txt: &str, temp: f64) -> ForecastSample {
        ForecastSample {
            dt: 0,
            dt_txt: dt_txt.to_string(),
            main: MainReadings {
                temp,
                feels_like: temp,
                humidity: 50,
            },
            weather: vec![WeatherDesc {
                icon: "01d".to_string(),
                description: "clear sky".to_string(),
            }],
            wind: Wind { speed: 3.0, deg: 90.0 },
            pop: 0.0,
        }
    }

    #[test]
    fn test_group_by_day_empty_input_yields_empty_grouping() {
        let grouped = group_by_day(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
        assert!(grouped.first().is_none());
    }

    #[test]
    fn test_group_by_day_worked_example() {
        let samples = vec![
            sample("2024-01-01 00:00:00", 10.0),
            sample("2024-01-01 03:00:00", 14.0),
            sample("2024-01-02 00:00:00", 8.0),
        ];

        let grouped = group_by_day(&samples);
        assert_eq!(grouped.len(), 2);

        let day1 = grouped.get("2024-01-01").expect("first day present");
        assert_eq!(day1.forecasts.len(), 2);
        assert!((day1.averages.min_temp - 10.0).abs() < f64::EPSILON);
        assert!((day1.averages.max_temp - 14.0).abs() < f64::EPSILON);
        assert!((day1.averages.avg_temp - 12.0).abs() < f64::EPSILON);

        let day2 = grouped.get("2024-01-02").expect("second day present");
        assert_eq!(day2.forecasts.len(), 1);
        assert!((day2.averages.min_temp - 8.0).abs() < f64::EPSILON);
        assert!((day2.averages.max_temp - 8.0).abs() < f64::EPSILON);
        assert!((day2.averages.avg_temp - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_by_day_preserves_first_appearance_order() {
        let samples = vec![
            sample("2024-03-05 21:00:00", 5.0),
            sample("2024-03-06 00:00:00", 4.0),
            sample("2024-03-06 03:00:00", 3.0),
            sample("2024-03-07 00:00:00", 6.0),
        ];

        let grouped = group_by_day(&samples);
        let dates: Vec<&str> = grouped.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-03-06", "2024-03-07"]);
    }

    #[test]
    fn test_group_by_day_preserves_sample_order_within_date() {
        let samples = vec![
            sample("2024-07-01 00:00:00", 15.0),
            sample("2024-07-01 03:00:00", 14.0),
            sample("2024-07-01 06:00:00", 16.0),
        ];

        let grouped = group_by_day(&samples);
        let day = grouped.first().expect("bucket present");
        let times: Vec<&str> = day.forecasts.iter().map(|f| f.time.as_str()).collect();
        assert_eq!(times, vec!["00:00:00", "03:00:00", "06:00:00"]);
    }

    #[test]
    fn test_group_by_day_aggregate_invariant() {
        let samples = vec![
            sample("2024-08-10 00:00:00", 21.3),
            sample("2024-08-10 03:00:00", 17.8),
            sample("2024-08-10 06:00:00", 25.1),
            sample("2024-08-10 09:00:00", 30.6),
            sample("2024-08-11 00:00:00", -4.0),
            sample("2024-08-11 03:00:00", -9.5),
        ];

        let grouped = group_by_day(&samples);
        for group in grouped.iter() {
            let a = &group.averages;
            assert!(
                a.min_temp <= a.avg_temp && a.avg_temp <= a.max_temp,
                "invariant violated for {}: {:?}",
                group.date,
                a
            );
        }
    }

    #[test]
    fn test_group_by_day_single_sample_bucket() {
        let samples = vec![sample("2024-12-31 12:00:00", 1.5)];
        let grouped = group_by_day(&samples);
        let day = grouped.first().expect("bucket present");

        assert_eq!(day.date, "2024-12-31");
        assert!((day.averages.min_temp - 1.5).abs() < f64::EPSILON);
        assert!((day.averages.max_temp - 1.5).abs() < f64::EPSILON);
        assert!((day.averages.avg_temp - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_by_day_lookup_missing_date() {
        let samples = vec![sample("2024-01-01 00:00:00", 10.0)];
        let grouped = group_by_day(&samples);
        assert!(grouped.get("2024-01-02").is_none());
    }
}
