//! Metrics derived from a weather snapshot before rule evaluation

use crate::models::{TempTrend, WeatherSnapshot};

/// Minimum mean-temperature change between consecutive 24h windows that
/// counts as a trend
const TREND_DELTA_CELSIUS: f64 = 2.0;

/// Derived metrics, computed once per snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub temp_current: f64,
    pub precip_current: f64,
    pub wind_current: f64,
    pub humidity: f64,
    pub precip_24h: f64,
    pub precip_48h: f64,
    pub precip_72h: f64,
    /// First value of the daily max-temperature series
    pub temp_max_today: f64,
    /// Highest value of the daily max-temperature series
    pub temp_max_daily: f64,
    pub temp_trend: TempTrend,
}

impl DerivedMetrics {
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        let precip: Vec<Option<f64>> = snapshot.hourly.iter().map(|h| h.precipitation_mm).collect();
        let temps: Vec<Option<f64>> = snapshot
            .hourly
            .iter()
            .map(|h| h.temperature_celsius)
            .collect();
        let daily_max: Vec<f64> = snapshot
            .daily
            .iter()
            .filter_map(|d| d.temp_max_celsius)
            .collect();

        Self {
            temp_current: snapshot.current.temperature(),
            precip_current: snapshot.current.precipitation(),
            wind_current: snapshot.current.wind_speed(),
            humidity: snapshot.current.humidity(),
            precip_24h: trailing_sum(&precip, 24),
            precip_48h: trailing_sum(&precip, 48),
            precip_72h: trailing_sum(&precip, 72),
            temp_max_today: snapshot
                .daily
                .first()
                .and_then(|d| d.temp_max_celsius)
                .unwrap_or(0.0),
            temp_max_daily: daily_max.iter().copied().reduce(f64::max).unwrap_or(0.0),
            temp_trend: temperature_trend(&temps),
        }
    }
}

/// Sum of the last `window` entries; 0 when the series is shorter than the
/// window. Missing entries count as 0.
pub fn trailing_sum(series: &[Option<f64>], window: usize) -> f64 {
    if series.len() < window {
        return 0.0;
    }
    series[series.len() - window..]
        .iter()
        .map(|v| v.unwrap_or(0.0))
        .sum()
}

/// Compare the mean of the last 24 hourly temperatures with the 24 before.
/// Needs at least 48 samples; otherwise the trend is stable.
pub fn temperature_trend(temps: &[Option<f64>]) -> TempTrend {
    if temps.len() < 48 {
        return TempTrend::Stable;
    }
    let end = temps.len();
    let recent = mean(&temps[end - 24..]);
    let previous = mean(&temps[end - 48..end - 24]);

    match (recent, previous) {
        (Some(recent), Some(previous)) if recent > previous + TREND_DELTA_CELSIUS => {
            TempTrend::Increasing
        }
        (Some(recent), Some(previous)) if recent < previous - TREND_DELTA_CELSIUS => {
            TempTrend::Decreasing
        }
        _ => TempTrend::Stable,
    }
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailySample, HourlySample};

    fn hourly(temps: &[f64], precip: &[f64]) -> Vec<HourlySample> {
        temps
            .iter()
            .zip(precip.iter())
            .map(|(t, p)| HourlySample {
                time: None,
                temperature_celsius: Some(*t),
                precipitation_mm: Some(*p),
            })
            .collect()
    }

    #[test]
    fn test_trailing_sum_uses_last_entries() {
        let mut series = vec![Some(10.0); 4];
        series.extend(vec![Some(1.0); 24]);
        assert_eq!(trailing_sum(&series, 24), 24.0);
    }

    #[test]
    fn test_trailing_sum_short_series_is_zero() {
        let series = vec![Some(5.0); 23];
        assert_eq!(trailing_sum(&series, 24), 0.0);
        assert_eq!(trailing_sum(&[], 24), 0.0);
    }

    #[test]
    fn test_trailing_sum_null_entries_count_as_zero() {
        let mut series = vec![None; 12];
        series.extend(vec![Some(2.0); 12]);
        assert_eq!(trailing_sum(&series, 24), 24.0);
    }

    #[test]
    fn test_trend_increasing() {
        let mut temps = vec![Some(2.0); 24];
        temps.extend(vec![Some(5.0); 24]);
        assert_eq!(temperature_trend(&temps), TempTrend::Increasing);
    }

    #[test]
    fn test_trend_decreasing() {
        let mut temps = vec![Some(6.0); 24];
        temps.extend(vec![Some(3.5); 24]);
        assert_eq!(temperature_trend(&temps), TempTrend::Decreasing);
    }

    #[test]
    fn test_trend_exactly_two_degrees_is_stable() {
        let mut temps = vec![Some(2.0); 24];
        temps.extend(vec![Some(4.0); 24]);
        assert_eq!(temperature_trend(&temps), TempTrend::Stable);
    }

    #[test]
    fn test_trend_needs_48_samples() {
        let mut temps = vec![Some(0.0); 23];
        temps.extend(vec![Some(20.0); 24]);
        assert_eq!(temperature_trend(&temps), TempTrend::Stable);
    }

    #[test]
    fn test_derived_metrics_from_snapshot() {
        let snapshot = WeatherSnapshot {
            current: CurrentConditions {
                temperature_celsius: Some(7.0),
                precipitation_mm: Some(1.5),
                wind_speed_kmh: Some(30.0),
                humidity_percent: None,
                ..Default::default()
            },
            hourly: hourly(&[4.0; 72], &[0.5; 72]),
            daily: vec![
                DailySample {
                    temp_max_celsius: Some(9.0),
                    ..Default::default()
                },
                DailySample {
                    temp_max_celsius: Some(13.0),
                    ..Default::default()
                },
            ],
        };

        let metrics = DerivedMetrics::from_snapshot(&snapshot);
        assert_eq!(metrics.temp_current, 7.0);
        assert_eq!(metrics.humidity, 0.0);
        assert_eq!(metrics.precip_24h, 12.0);
        assert_eq!(metrics.precip_48h, 24.0);
        assert_eq!(metrics.precip_72h, 36.0);
        assert_eq!(metrics.temp_max_today, 9.0);
        assert_eq!(metrics.temp_max_daily, 13.0);
        assert_eq!(metrics.temp_trend, TempTrend::Stable);
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let metrics = DerivedMetrics::from_snapshot(&WeatherSnapshot::default());
        assert_eq!(metrics, DerivedMetrics::default());
    }
}
