//! Bulgarian display formatting for money, areas and dates.

use chrono::{Datelike, NaiveDate};

/// bg-BG 千分位使用不換行空格
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// 少於五位數不分組（bg-BG 的 minimum grouping digits = 2）
const MIN_GROUPED_VALUE: u64 = 10_000;

pub fn format_grouped(value: i64) -> String {
    let magnitude = value.unsigned_abs();
    let digits = magnitude.to_string();

    let body = if magnitude < MIN_GROUPED_VALUE {
        digits
    } else {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(ch);
        }
        grouped
    };

    if value < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

pub fn format_money(value: i64, currency_suffix: &str) -> String {
    format!("{} {}", format_grouped(value), currency_suffix)
}

/// 單價顯示，例如 `25 лв/м²`
pub fn format_unit_price(price_per_sqm: f64, currency_suffix: &str, area_unit: &str) -> String {
    let shown = if price_per_sqm.fract() == 0.0 {
        format!("{}", price_per_sqm as i64)
    } else {
        format!("{}", price_per_sqm)
    };
    format!("{} {}/{}", shown, currency_suffix, area_unit)
}

pub fn format_area(area: u32, area_unit: &str) -> String {
    format!("{} {}", area, area_unit)
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{} г.", date.day(), date.month(), date.year())
}
