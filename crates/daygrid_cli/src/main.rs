//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daygrid_core` linkage.
//! - Print the month grid for today or for a `YYYY-MM-DD` argument.

use chrono::{Datelike, Local};
use daygrid_core::{days_in_month, is_in_month, DateKey, WEEKDAY_LABELS};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("daygrid_core ping={}", daygrid_core::ping());
    println!("daygrid_core version={}", daygrid_core::core_version());

    let reference = match std::env::args().nth(1) {
        Some(raw) => match DateKey::parse(&raw) {
            Ok(key) => key.date(),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Local::now().date_naive(),
    };

    let Some(grid) = days_in_month(reference) else {
        eprintln!("month of {reference} is out of range");
        return ExitCode::FAILURE;
    };

    println!("{}", reference.format("%B %Y"));
    println!("{}", WEEKDAY_LABELS.map(|label| format!("{label:>4}")).join(""));
    for week in grid.chunks(7) {
        let row: String = week
            .iter()
            .map(|date| {
                if is_in_month(*date, reference) {
                    format!("{:>4}", date.day())
                } else {
                    "   .".to_string()
                }
            })
            .collect();
        println!("{row}");
    }
    ExitCode::SUCCESS
}
