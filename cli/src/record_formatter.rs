// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use colored::Color;
use icsnorm_core::{CalendarEventRecord, EventKind};

use crate::arg::OutputFormat;
use crate::table::{Column, PaddingDirection, Table};

#[derive(Debug)]
pub struct RecordFormatter {
    columns: Vec<RecordColumn>,
    format: OutputFormat,
}

impl RecordFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            columns: vec![
                RecordColumn::Id,
                RecordColumn::Kind,
                RecordColumn::Date,
                RecordColumn::TimeRange,
                RecordColumn::Title,
            ],
            format,
        }
    }

    pub fn format(&self, records: &[CalendarEventRecord]) -> Result<String, Box<dyn Error>> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(Table::new(&self.columns, records).to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RecordColumn {
    Id,
    Kind,
    Date,
    TimeRange,
    Title,
}

impl Column<CalendarEventRecord> for RecordColumn {
    fn format(&self, record: &CalendarEventRecord) -> String {
        match self {
            RecordColumn::Id => record.id().to_string(),
            RecordColumn::Kind => record.kind().to_string(),
            RecordColumn::Date => format_dates(record),
            RecordColumn::TimeRange => format_time_range(record),
            RecordColumn::Title => record.title().to_string(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, record: &CalendarEventRecord) -> Option<Color> {
        match self {
            RecordColumn::Id => Some(Color::BrightBlack),
            RecordColumn::Kind => match record.kind() {
                EventKind::Single => Some(Color::Green),
                EventKind::Recurring => Some(Color::Cyan),
            },
            RecordColumn::Date | RecordColumn::TimeRange | RecordColumn::Title => None,
        }
    }
}

fn format_dates(record: &CalendarEventRecord) -> String {
    match record {
        CalendarEventRecord::Single(event) => match &event.end_date {
            Some(end_date) => format!("{} ~ {end_date}", event.date),
            None => event.date.clone(),
        },
        CalendarEventRecord::Recurring(event) => {
            let skipped = match event.skip_dates.len() {
                0 => String::new(),
                n => format!(", {n} skipped"),
            };
            format!("{} ({}{skipped})", event.start_date, event.rrule)
        }
    }
}

fn format_time_range(record: &CalendarEventRecord) -> String {
    match record.time() {
        None => "all day".to_string(),
        Some(time) => match &time.end_time {
            Some(end_time) => format!("{}~{end_time}", time.start_time),
            None => time.start_time.clone(),
        },
    }
}
