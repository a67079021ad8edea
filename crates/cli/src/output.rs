use chrono::{DateTime, TimeZone, Utc};
use kernel::{CompassStatus, PrayerName, PrayerSlot, QiblaReading};
use orchestrator::{MosqueEntry, TickReport};
use std::fmt::Display;
use std::io::{self, Write};

fn clock<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%H:%M").to_string()
}

/// One status line per tick: active prayer, next prayer, countdown.
pub fn write_report<Tz: TimeZone>(
    out: &mut impl Write,
    report: &TickReport,
    tz: &Tz,
) -> io::Result<()>
where
    Tz::Offset: Display,
{
    let active = match report.state.active {
        Some(slot) => slot.name.as_str(),
        None => "-",
    };
    writeln!(
        out,
        "{}  active: {:<7}  next: {} at {}  in {}",
        report.date,
        active,
        report.state.next,
        clock(report.state.next.slot.instant, tz),
        report.state.time_remaining(),
    )
}

/// The day's table, marking the active row.
pub fn write_day<Tz: TimeZone>(
    out: &mut impl Write,
    report: &TickReport,
    tz: &Tz,
    slots: &[PrayerSlot; 5],
) -> io::Result<()>
where
    Tz::Offset: Display,
{
    for name in PrayerName::ALL {
        let marker = if report.state.is_row_active(name) { ">" } else { " " };
        writeln!(
            out,
            "{marker} {:<8} {}",
            name,
            clock(slots[name.index()].instant, tz)
        )?;
    }
    Ok(())
}

pub fn write_reading(out: &mut impl Write, reading: &QiblaReading) -> io::Result<()> {
    writeln!(
        out,
        "qibla: {:.1} deg from north, {} km",
        reading.bearing_degrees,
        reading.distance_km_rounded()
    )
}

pub fn write_compass_status(out: &mut impl Write, status: &CompassStatus) -> io::Result<()> {
    match status {
        CompassStatus::Unavailable(reason) => writeln!(out, "compass unavailable: {reason}"),
        CompassStatus::Live(state) => writeln!(
            out,
            "heading {:.1}  turn {:.1}  {}",
            state.device_heading_degrees,
            state.relative_angle_degrees,
            if state.is_aligned { "aligned" } else { "not aligned" }
        ),
    }
}

pub fn write_mosques(out: &mut impl Write, ranked: &[(MosqueEntry, f64)]) -> io::Result<()> {
    if ranked.is_empty() {
        return writeln!(out, "no mosques configured");
    }
    for (mosque, distance) in ranked {
        match &mosque.city {
            Some(city) => writeln!(out, "{:>8.1} km  {} ({city})", distance, mosque.name)?,
            None => writeln!(out, "{:>8.1} km  {}", distance, mosque.name)?,
        }
    }
    Ok(())
}
