//! Indonesian display formats for money and dates.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// `1250000` → `Rp 1.250.000`.
pub fn rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Long Indonesian date in the timestamp's own offset, e.g. `15 September 2024, 10:30`.
pub fn tanggal<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!(
        "{} {} {}, {:02}:{:02}",
        at.day(),
        BULAN[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}
