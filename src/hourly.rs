//! Hourly trend synthesis for a single day
//!
//! The forecast API delivers at most one sample every three hours. This module
//! densifies the first day's samples into an hour-by-hour series: known
//! samples pass through, gaps between them are filled by linear interpolation,
//! and the stretch from the last sample back around to the first sample's hour
//! is extrapolated with a small random walk.
//!
//! The random source is injected so callers (and tests) control determinism,
//! and malformed samples are reported through an event sink rather than
//! logged; the application decides how to surface them.

use rand::Rng;

/// Extrapolated temperatures are clamped to this physical range (°C)
const TEMP_FLOOR: f64 = -10.0;
const TEMP_CEIL: f64 = 50.0;

/// One sparse input sample: time-of-day, temperature and condition icon
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    /// Time of day ("HH:MM" or "HH:MM:SS")
    pub time: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Condition icon code (e.g. "10d")
    pub icon: String,
}

/// One slot of the synthesized hourly series
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySlot {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Temperature rounded to the nearest whole degree
    pub temperature: i32,
    /// Condition icon code carried over from the nearest real sample
    pub icon: String,
}

/// Events emitted while validating interpolator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HourlyEvent {
    /// A sample was dropped because its time field did not parse to an hour
    DiscardedSample { index: usize, time: String },
    /// No usable samples remained after filtering; the result is empty
    NoValidSamples,
}

/// Extracts the hour component from a "HH:MM[:SS]" time string
fn sample_hour(time: &str) -> Option<u8> {
    let hour: u8 = time.split(':').next()?.trim().parse().ok()?;
    (hour < 24).then_some(hour)
}

/// Formats an hour of day as a 12-hour clock label (e.g. "3 PM")
pub fn hour_label(hour: u8) -> String {
    let display = if hour % 12 == 0 { 12 } else { hour % 12 };
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    format!("{} {}", display, suffix)
}

/// Densifies sparse day samples into an hourly series
///
/// For each consecutive pair of valid samples the first is emitted (rounded),
/// then `gap - 1` linearly interpolated slots fill the intervening hours, with
/// the icon copied from the earlier sample. After the final sample, slots are
/// extrapolated one hour at a time — each a uniform `[-1, +1]` perturbation of
/// a running temperature clamped to `[-10, 50]` — until the series wraps back
/// to the first slot's hour.
///
/// Malformed samples are reported to `on_event` and skipped; if none survive,
/// the result is empty. The output length is governed by the input spacing
/// and can exceed 24 when hours repeat.
pub fn interpolate_day<R: Rng>(
    samples: &[HourlySample],
    rng: &mut R,
    mut on_event: impl FnMut(HourlyEvent),
) -> Vec<HourlySlot> {
    let valid: Vec<(u8, &HourlySample)> = samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| match sample_hour(&sample.time) {
            Some(hour) => Some((hour, sample)),
            None => {
                on_event(HourlyEvent::DiscardedSample {
                    index,
                    time: sample.time.clone(),
                });
                None
            }
        })
        .collect();

    if valid.is_empty() {
        on_event(HourlyEvent::NoValidSamples);
        return Vec::new();
    }

    let mut slots: Vec<HourlySlot> = Vec::new();

    for pair in valid.windows(2) {
        let (hour, current) = (pair[0].0, pair[0].1);
        let (next_hour, next) = (pair[1].0, pair[1].1);

        slots.push(HourlySlot {
            hour,
            temperature: current.temperature.round() as i32,
            icon: current.icon.clone(),
        });

        let gap = (i32::from(next_hour) - i32::from(hour) + 24) % 24;
        if gap > 1 {
            let step = (next.temperature - current.temperature) / f64::from(gap);
            for j in 1..gap {
                slots.push(HourlySlot {
                    hour: ((i32::from(hour) + j) % 24) as u8,
                    temperature: (current.temperature + step * f64::from(j)).round() as i32,
                    icon: current.icon.clone(),
                });
            }
        }
    }

    let Some(&(last_hour, last)) = valid.last() else {
        return slots;
    };
    slots.push(HourlySlot {
        hour: last_hour,
        temperature: last.temperature.round() as i32,
        icon: last.icon.clone(),
    });

    // Wrap-around: random-walk from the last emitted slot back to the first
    // slot's hour (exclusive), cyclic modulo 24.
    let first_hour = slots[0].hour;
    let icon = last.icon.clone();
    let mut running = f64::from(slots[slots.len() - 1].temperature);
    let mut hour = (last_hour + 1) % 24;

    while hour != first_hour {
        let change: f64 = rng.gen_range(-1.0..=1.0);
        running = (running + change).clamp(TEMP_FLOOR, TEMP_CEIL);
        slots.push(HourlySlot {
            hour,
            temperature: running.round() as i32,
            icon: icon.clone(),
        });
        hour = (hour + 1) % 24;
    }

    slots
}
