// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, Duration, Weekday};

pub const TODAY_LABEL: &str = "今日";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCell {
    pub label: String,
    pub day: u8,
    pub is_today: bool,
}

pub const fn weekday_char(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "日",
        Weekday::Monday => "月",
        Weekday::Tuesday => "火",
        Weekday::Wednesday => "水",
        Weekday::Thursday => "木",
        Weekday::Friday => "金",
        Weekday::Saturday => "土",
    }
}

pub fn date_strip(today: Date, window: usize) -> Vec<DateCell> {
    (0..window)
        .map(|offset| {
            let date = today.saturating_add(Duration::days(offset as i64));
            let label = if offset == 0 {
                TODAY_LABEL.to_owned()
            } else {
                weekday_char(date.weekday()).to_owned()
            };
            DateCell {
                label,
                day: date.day(),
                is_today: offset == 0,
            }
        })
        .collect()
}
