// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule as defined in RFC 5545 Section 3.3.10.

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::prelude::*;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{ValueDate, ValueDateTime, value_date, value_date_time};
use crate::value::{Extra, ValueError, ValueKind, number, parse_full, sign};

/// Recurrence rule
///
/// The [`Display`] form is canonical: parts are written in a fixed order, so two rules
/// with the same parts in a different order print identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRecurrenceRule {
    /// Frequency of recurrence
    pub freq: RecurrenceFrequency,
    /// Until date for recurrence
    pub until: Option<RecurrenceUntil>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Position in the set of occurrences
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<WeekDay>,
}

impl FromStr for ValueRecurrenceRule {
    type Err = ValueError;

    /// Parse a recurrence rule, rule part names and values are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        parse_full(ValueKind::Recur, value_rrule(), &upper).map_err(|err| ValueError {
            raw: s.to_string(),
            ..err
        })
    }
}

impl Display for ValueRecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if let Some(interval) = self.interval {
            write!(f, ";{KW_RRULE_INTERVAL}={interval}")?;
        }
        write_list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        write_list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        write_list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        write_list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        write_list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        write_list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(f, KW_RRULE_BYDAY, &self.by_day)?;
        write_list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
    let Some((first, rest)) = values.split_first() else {
        return Ok(());
    };
    write!(f, ";{name}={first}")?;
    for value in rest {
        write!(f, ",{value}")?;
    }
    Ok(())
}

/// End of a recurrence, either a date or a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceUntil {
    /// Inclusive last day
    Date(ValueDate),
    /// Inclusive last instant, UTC when the start is zoned
    DateTime(ValueDateTime),
}

impl Display for RecurrenceUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceUntil::Date(date) => Display::fmt(date, f),
            RecurrenceUntil::DateTime(date_time) => Display::fmt(date_time, f),
        }
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecurrenceFrequency::Secondly => KW_RRULE_FREQ_SECONDLY,
            RecurrenceFrequency::Minutely => KW_RRULE_FREQ_MINUTELY,
            RecurrenceFrequency::Hourly => KW_RRULE_FREQ_HOURLY,
            RecurrenceFrequency::Daily => KW_RRULE_FREQ_DAILY,
            RecurrenceFrequency::Weekly => KW_RRULE_FREQ_WEEKLY,
            RecurrenceFrequency::Monthly => KW_RRULE_FREQ_MONTHLY,
            RecurrenceFrequency::Yearly => KW_RRULE_FREQ_YEARLY,
        };
        f.write_str(s)
    }
}

/// Day of week with optional occurrence, e.g. `MO`, `1MO` or `-1FR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Occurrence within the month or year
    pub occurrence: Option<i8>,
    /// Day of the week
    pub day: WeekDay,
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WeekDay::Sunday => KW_DAY_SU,
            WeekDay::Monday => KW_DAY_MO,
            WeekDay::Tuesday => KW_DAY_TU,
            WeekDay::Wednesday => KW_DAY_WE,
            WeekDay::Thursday => KW_DAY_TH,
            WeekDay::Friday => KW_DAY_FR,
            WeekDay::Saturday => KW_DAY_SA,
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
enum Part {
    Freq(RecurrenceFrequency),
    Until(RecurrenceUntil),
    Count(u32),
    Interval(u32),
    BySecond(Vec<u8>),
    ByMinute(Vec<u8>),
    ByHour(Vec<u8>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<u8>),
    ByDay(Vec<WeekDayNum>),
    BySetPos(Vec<i16>),
    Wkst(WeekDay),
}

/// Format Definition:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
fn value_rrule<'src>() -> impl Parser<'src, &'src str, ValueRecurrenceRule, Extra<'src>> {
    rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .allow_trailing()
        .collect::<Vec<_>>()
        .try_map(|parts, span| build_from_parts(parts).map_err(|msg| Rich::custom(span, msg)))
}

fn build_from_parts(parts: Vec<Part>) -> Result<ValueRecurrenceRule, String> {
    macro_rules! set_once {
        ($slot:expr, $value:expr, $name:expr) => {{
            if $slot.is_some() {
                return Err(format!("duplicate rule part {}", $name));
            }
            $slot = Some($value);
        }};
    }

    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut by_second = None;
    let mut by_minute = None;
    let mut by_hour = None;
    let mut by_month_day = None;
    let mut by_year_day = None;
    let mut by_week_no = None;
    let mut by_month = None;
    let mut by_day = None;
    let mut by_set_pos = None;
    let mut wkst = None;

    for part in parts {
        match part {
            Part::Freq(v) => set_once!(freq, v, KW_RRULE_FREQ),
            Part::Until(v) => set_once!(until, v, KW_RRULE_UNTIL),
            Part::Count(v) => set_once!(count, v, KW_RRULE_COUNT),
            Part::Interval(v) => set_once!(interval, v, KW_RRULE_INTERVAL),
            Part::BySecond(v) => set_once!(by_second, v, KW_RRULE_BYSECOND),
            Part::ByMinute(v) => set_once!(by_minute, v, KW_RRULE_BYMINUTE),
            Part::ByHour(v) => set_once!(by_hour, v, KW_RRULE_BYHOUR),
            Part::ByMonthDay(v) => set_once!(by_month_day, v, KW_RRULE_BYMONTHDAY),
            Part::ByYearDay(v) => set_once!(by_year_day, v, KW_RRULE_BYYEARDAY),
            Part::ByWeekNo(v) => set_once!(by_week_no, v, KW_RRULE_BYWEEKNO),
            Part::ByMonth(v) => set_once!(by_month, v, KW_RRULE_BYMONTH),
            Part::ByDay(v) => set_once!(by_day, v, KW_RRULE_BYDAY),
            Part::BySetPos(v) => set_once!(by_set_pos, v, KW_RRULE_BYSETPOS),
            Part::Wkst(v) => set_once!(wkst, v, KW_RRULE_WKST),
        }
    }

    let freq = freq.ok_or_else(|| format!("missing required rule part {KW_RRULE_FREQ}"))?;
    if until.is_some() && count.is_some() {
        return Err(format!(
            "{KW_RRULE_UNTIL} and {KW_RRULE_COUNT} must not occur together"
        ));
    }

    Ok(ValueRecurrenceRule {
        freq,
        until,
        count,
        interval,
        by_second: by_second.unwrap_or_default(),
        by_minute: by_minute.unwrap_or_default(),
        by_hour: by_hour.unwrap_or_default(),
        by_month_day: by_month_day.unwrap_or_default(),
        by_year_day: by_year_day.unwrap_or_default(),
        by_week_no: by_week_no.unwrap_or_default(),
        by_month: by_month.unwrap_or_default(),
        by_day: by_day.unwrap_or_default(),
        by_set_pos: by_set_pos.unwrap_or_default(),
        wkst,
    })
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn rrule_part<'src>() -> impl Parser<'src, &'src str, Part, Extra<'src>> {
    let kw = |kw: &'static str| just(kw).ignore_then(just('='));
    let positive = || number(10, 1..=u32::MAX);

    // enddate = date / date-time
    let until = choice((
        value_date_time().map(RecurrenceUntil::DateTime),
        value_date().map(RecurrenceUntil::Date),
    ));

    choice((
        kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq),
        kw(KW_RRULE_UNTIL).ignore_then(until).map(Part::Until),
        kw(KW_RRULE_COUNT).ignore_then(positive()).map(Part::Count),
        kw(KW_RRULE_INTERVAL)
            .ignore_then(positive())
            .map(Part::Interval),
        kw(KW_RRULE_BYSECOND)
            .ignore_then(list(unsigned(2, 0..=60)))
            .map(Part::BySecond),
        kw(KW_RRULE_BYMINUTE)
            .ignore_then(list(unsigned(2, 0..=59)))
            .map(Part::ByMinute),
        kw(KW_RRULE_BYHOUR)
            .ignore_then(list(unsigned(2, 0..=23)))
            .map(Part::ByHour),
        kw(KW_RRULE_BYDAY)
            .ignore_then(list(weekday_num()))
            .map(Part::ByDay),
        kw(KW_RRULE_BYMONTHDAY)
            .ignore_then(list(signed(2, 31)))
            .map(Part::ByMonthDay),
        kw(KW_RRULE_BYYEARDAY)
            .ignore_then(list(signed(3, 366)))
            .map(Part::ByYearDay),
        kw(KW_RRULE_BYWEEKNO)
            .ignore_then(list(signed(2, 53)))
            .map(Part::ByWeekNo),
        kw(KW_RRULE_BYMONTH)
            .ignore_then(list(unsigned(2, 1..=12)))
            .map(Part::ByMonth),
        kw(KW_RRULE_BYSETPOS)
            .ignore_then(list(signed(3, 366)))
            .map(Part::BySetPos),
        kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst),
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src>() -> impl Parser<'src, &'src str, RecurrenceFrequency, Extra<'src>> + Clone {
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(RecurrenceFrequency::Secondly),
        just(KW_RRULE_FREQ_MINUTELY).to(RecurrenceFrequency::Minutely),
        just(KW_RRULE_FREQ_HOURLY).to(RecurrenceFrequency::Hourly),
        just(KW_RRULE_FREQ_DAILY).to(RecurrenceFrequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(RecurrenceFrequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(RecurrenceFrequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(RecurrenceFrequency::Yearly),
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn weekday_num<'src>() -> impl Parser<'src, &'src str, WeekDayNum, Extra<'src>> + Clone {
    signed(2, 53)
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { occurrence, day })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src>() -> impl Parser<'src, &'src str, WeekDay, Extra<'src>> + Clone {
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

fn list<'src, T>(
    item: impl Parser<'src, &'src str, T, Extra<'src>> + Clone,
) -> impl Parser<'src, &'src str, Vec<T>, Extra<'src>> + Clone {
    item.separated_by(just(',')).at_least(1).collect()
}

fn unsigned<'src, T: TryFrom<u32>>(
    max_digits: usize,
    range: std::ops::RangeInclusive<u32>,
) -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone {
    number(max_digits, range).try_map(|v, span| {
        T::try_from(v).map_err(|_| Rich::custom(span, "value out of range"))
    })
}

/// Non-zero value in `-max..=-1` or `1..=max`, with optional sign.
fn signed<'src, T: TryFrom<i32>>(
    max_digits: usize,
    max: u32,
) -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone {
    sign()
        .then(number(max_digits, 1..=max))
        .try_map(|(positive, v), span| {
            let v = i32::try_from(v).map_err(|_| Rich::custom(span, "value out of range"))?;
            let v = if positive { v } else { -v };
            T::try_from(v).map_err(|_| Rich::custom(span, "value out of range"))
        })
}
