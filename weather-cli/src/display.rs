//! Text rendering for weather records and status banners.

use weather_core::{
    WeatherRecord,
    config::{SPEED_UNIT, TEMP_UNIT},
};

const BOX_WIDTH: usize = 41;
const RULE_WIDTH: usize = 45;

pub fn welcome() {
    println!("  Welcome to Weather CLI!");
    println!("  Get weather info for any city in the world.");
}

pub fn weather(record: &WeatherRecord) {
    for line in weather_lines(record) {
        println!("{line}");
    }
}

pub fn favorites_list(records: &[WeatherRecord], capacity: usize) {
    if records.is_empty() {
        println!("\n Your favorites list is empty.");
        println!("   Search for a city first, then add it to your favorites.");
        return;
    }

    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{rule}");
    println!("  Your Favorite Cities ({}/{})", records.len(), capacity);
    println!("{rule}");

    for (i, record) in records.iter().enumerate() {
        println!("\n  {}. {}, {}", i + 1, record.city, record.country);
        println!("     {}", compact_line(record));
    }

    println!("\n{rule}");
}

pub fn success(message: &str) {
    println!("\n ✔ {message}");
}

pub fn error(message: &str) {
    println!("\n ✖ {message}");
}

pub fn info(message: &str) {
    println!("\n ℹ {message}");
}

pub fn goodbye() {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{rule}");
    println!("  Thank you for using Weather CLI! Goodbye!");
    println!("{rule}\n");
}

/// Boxed multi-line rendering of one record.
fn weather_lines(record: &WeatherRecord) -> Vec<String> {
    let border = "─".repeat(BOX_WIDTH - 1);
    let rows = [
        format!("│   {}, {}", record.city, record.country),
        format!("│  Temperature:  {}{}", value(record.temperature), TEMP_UNIT),
        format!("│  Feels like:   {}{}", value(record.feels_like), TEMP_UNIT),
        format!("│  Humidity:     {}%", value(record.humidity)),
        format!("│  Condition:    {}", capitalize(&record.description)),
        format!("│  Wind speed:   {} {}", value(record.wind_speed), SPEED_UNIT),
    ];

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("┌{border}┐"));
    lines.extend(rows.iter().map(|row| format!("{row:<BOX_WIDTH$}│")));
    lines.push(format!("└{border}┘"));
    lines
}

/// `15.2°C | Light rain`
fn compact_line(record: &WeatherRecord) -> String {
    format!(
        "{}{} | {}",
        value(record.temperature),
        TEMP_UNIT,
        capitalize(&record.description)
    )
}

fn value(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
