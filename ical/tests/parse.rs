// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use icsnorm_ical::{DateTimeValue, ParseError, RecurrenceFrequency, parse};

const GOOGLE_EXPORT: &str = "\
BEGIN:VCALENDAR\r
PRODID:-//Google Inc//Google Calendar 70.9054//EN\r
VERSION:2.0\r
CALSCALE:GREGORIAN\r
X-WR-CALNAME:Work\r
X-WR-TIMEZONE:America/New_York\r
BEGIN:VTIMEZONE\r
TZID:America/New_York\r
X-LIC-LOCATION:America/New_York\r
BEGIN:DAYLIGHT\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
TZNAME:EDT\r
DTSTART:19700308T020000\r
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r
END:DAYLIGHT\r
BEGIN:STANDARD\r
TZOFFSETFROM:-0400\r
TZOFFSETTO:-0500\r
TZNAME:EST\r
DTSTART:19701101T020000\r
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
DTSTART;TZID=America/New_York:20250106T093000\r
DTEND;TZID=America/New_York:20250106T094500\r
RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR\r
EXDATE;TZID=America/New_York:20250120T093000\r
DTSTAMP:20250101T000000Z\r
UID:standup@example.com\r
SUMMARY:Daily standup\r
DESCRIPTION:Join at https://meet.example.com/abc-defg-hij or dial in\\, see\r
  notes\\nfor details\r
BEGIN:VALARM\r
ACTION:DISPLAY\r
TRIGGER:-PT10M\r
END:VALARM\r
END:VEVENT\r
END:VCALENDAR\r
";

#[test]
fn parses_real_world_export() {
    let roots = parse(GOOGLE_EXPORT).unwrap();
    assert_eq!(roots.len(), 1);

    let cal = &roots[0];
    assert_eq!(
        cal.property("x-wr-timezone").map(|p| p.value.as_str()),
        Some("America/New_York")
    );
    assert_eq!(cal.descendants_named("VTIMEZONE").len(), 1);
    assert_eq!(cal.descendants_named("VALARM").len(), 1);

    let tz = cal.child("VTIMEZONE").unwrap().as_timezone().unwrap();
    assert_eq!(tz.tz_id(), Some("America/New_York"));
    assert_eq!(tz.standard()[0].tz_name(), Some("EST"));

    let event = cal.child("VEVENT").unwrap().as_event().unwrap();
    assert_eq!(event.uid().as_deref(), Some("standup@example.com"));
    assert_eq!(event.summary().as_deref(), Some("Daily standup"));

    let rule = event.rrule().unwrap().unwrap();
    assert_eq!(rule.freq, RecurrenceFrequency::Weekly);
    assert_eq!(rule.to_string(), "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR");

    let ex_dates = event.ex_dates();
    assert_eq!(ex_dates.len(), 1);
    assert!(matches!(ex_dates[0], Ok(DateTimeValue::Zoned { .. })));

    let description = event.property("DESCRIPTION").unwrap();
    assert!(description.value.ends_with("see notes\\nfor details"));
}

#[test]
fn accepts_lf_line_endings() {
    let crlf = parse(GOOGLE_EXPORT).unwrap();
    let lf = parse(&GOOGLE_EXPORT.replace("\r\n", "\n")).unwrap();
    assert_eq!(crlf[0].properties.len(), lf[0].properties.len());
    assert_eq!(crlf[0].children.len(), lf[0].children.len());

    let event = lf[0].child("VEVENT").unwrap().as_event().unwrap();
    assert_eq!(event.summary().as_deref(), Some("Daily standup"));
}

#[test]
fn rejects_malformed_documents() {
    let cases = [
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VCALENDAR\r\n",
        "BEGIN:VCALENDAR\r\nNOT A PROPERTY\r\nEND:VCALENDAR\r\n",
        "END:VCALENDAR\r\n",
        "just some text",
        "",
    ];
    for src in cases {
        assert!(parse(src).is_err(), "{src:?} should fail");
    }
}

#[test]
fn reports_empty_document() {
    let errs = parse("\n").unwrap_err();
    assert_eq!(errs, [ParseError::Empty]);
}

#[test]
fn accepts_outlook_quirks() {
    // byte order mark and a blank common name
    let src = format!(
        "\u{feff}{}",
        GOOGLE_EXPORT.replace(
            "UID:standup@example.com\r\n",
            "UID:standup@example.com\r\nATTENDEE;CN=;RSVP=TRUE:mailto:x@example.com\r\n",
        )
    );
    let roots = parse(&src).unwrap();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].is("VCALENDAR"));

    let event = roots[0].child("VEVENT").unwrap();
    let attendee = event.property("ATTENDEE").unwrap();
    assert_eq!(attendee.parameter("CN"), Some(""));
    assert_eq!(attendee.value, "mailto:x@example.com");
}
