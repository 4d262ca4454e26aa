// File: ./src/date_format.rs
//! Date format strings compiled into a token table.
//!
//! Formats use the luxon token names that note-taking setups already carry in
//! their settings (`yyyy-MM-dd`, `kkkk-WW`, ...). A format is compiled once and
//! then drives three things: recognising the *shape* of a date inside a longer
//! text, parsing a matched date into a [`NaiveDate`], and formatting a date back.
use crate::error::FormatError;
use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    ShortYear,
    WeekYear,
    ShortWeekYear,
    Month,
    Day,
    Week,
    Ordinal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    /// Between `min` and `max` ASCII digits, consumed greedily.
    Numeric { field: Field, min: usize, max: usize },
    MonthName { long: bool },
}

/// Values captured by a shape match, not yet checked against the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Parts {
    year: Option<i32>,
    week_year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    week: Option<u32>,
    ordinal: Option<u32>,
}

impl Parts {
    fn set(&mut self, field: Field, value: u32) {
        match field {
            Field::Year => self.year = Some(value as i32),
            Field::ShortYear => self.year = Some(2000 + value as i32),
            Field::WeekYear => self.week_year = Some(value as i32),
            Field::ShortWeekYear => self.week_year = Some(2000 + value as i32),
            Field::Month => self.month = Some(value),
            Field::Day => self.day = Some(value),
            Field::Week => self.week = Some(value),
            Field::Ordinal => self.ordinal = Some(value),
        }
    }

    fn resolve(&self) -> Option<NaiveDate> {
        if let Some(week_year) = self.week_year {
            return NaiveDate::from_isoywd_opt(week_year, self.week.unwrap_or(1), Weekday::Mon);
        }
        let year = self.year?;
        if self.month.is_none() && self.day.is_none() {
            if let Some(ordinal) = self.ordinal {
                return NaiveDate::from_yo_opt(year, ordinal);
            }
            if let Some(week) = self.week {
                return NaiveDate::from_isoywd_opt(year, week, Weekday::Mon);
            }
        }
        NaiveDate::from_ymd_opt(year, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }
}

/// A date-shaped span found in some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    pub start: usize,
    pub end: usize,
    parts: Parts,
}

impl DateMatch {
    /// The calendar date the match denotes, or `None` for combinations such as
    /// month 13 or February 30th.
    pub fn date(&self) -> Option<NaiveDate> {
        self.parts.resolve()
    }
}

/// A compiled date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tokens: Vec<Token>,
}

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        let tokens = tokenize(pattern)?;
        let has_year = tokens.iter().any(|t| {
            matches!(
                t,
                Token::Numeric {
                    field: Field::Year | Field::ShortYear | Field::WeekYear | Field::ShortWeekYear,
                    ..
                }
            )
        });
        if !has_year {
            return Err(FormatError::MissingYear(pattern.to_string()));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
        })
    }

    /// `yyyy-MM-dd`, the default for line tags and daily note names.
    pub fn iso() -> Self {
        Self {
            pattern: "yyyy-MM-dd".to_string(),
            tokens: vec![
                Token::Numeric {
                    field: Field::Year,
                    min: 4,
                    max: 4,
                },
                Token::Literal("-".to_string()),
                Token::Numeric {
                    field: Field::Month,
                    min: 2,
                    max: 2,
                },
                Token::Literal("-".to_string()),
                Token::Numeric {
                    field: Field::Day,
                    min: 2,
                    max: 2,
                },
            ],
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matches the format's shape starting exactly at byte offset `pos`.
    ///
    /// Each token consumes as much as it can and the match never backtracks.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<DateMatch> {
        let mut cursor = pos;
        let mut parts = Parts::default();
        for token in &self.tokens {
            let rest = text.get(cursor..)?;
            match token {
                Token::Literal(lit) => {
                    if !rest.starts_with(lit.as_str()) {
                        return None;
                    }
                    cursor += lit.len();
                }
                Token::Numeric { field, min, max } => {
                    let digits = rest
                        .bytes()
                        .take(*max)
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    if digits < *min {
                        return None;
                    }
                    let value = rest[..digits].parse::<u32>().ok()?;
                    parts.set(*field, value);
                    cursor += digits;
                }
                Token::MonthName { long } => {
                    let names: &[&str] = if *long { &MONTHS_LONG } else { &MONTHS_SHORT };
                    let (idx, len) = names.iter().enumerate().find_map(|(i, name)| {
                        let candidate = rest.get(..name.len())?;
                        candidate.eq_ignore_ascii_case(name).then_some((i, name.len()))
                    })?;
                    parts.month = Some(idx as u32 + 1);
                    cursor += len;
                }
            }
        }
        Some(DateMatch {
            start: pos,
            end: cursor,
            parts,
        })
    }

    /// First date-shaped span in `text`.
    pub fn find(&self, text: &str) -> Option<DateMatch> {
        text.char_indices()
            .find_map(|(idx, _)| self.match_at(text, idx))
    }

    /// Parses `text` as a whole. Trailing input or an impossible date yields `None`.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let m = self.match_at(text, 0)?;
        if m.end != text.len() {
            return None;
        }
        m.date()
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(lit) => out.push_str(lit),
                Token::Numeric { field, min, .. } => {
                    let value = match field {
                        Field::Year => date.year(),
                        Field::ShortYear => date.year().rem_euclid(100),
                        Field::WeekYear => date.iso_week().year(),
                        Field::ShortWeekYear => date.iso_week().year().rem_euclid(100),
                        Field::Month => date.month() as i32,
                        Field::Day => date.day() as i32,
                        Field::Week => date.iso_week().week() as i32,
                        Field::Ordinal => date.ordinal() as i32,
                    };
                    out.push_str(&format!("{:0width$}", value, width = *min));
                }
                Token::MonthName { long } => {
                    let idx = date.month0() as usize;
                    out.push_str(if *long {
                        MONTHS_LONG[idx]
                    } else {
                        MONTHS_SHORT[idx]
                    });
                }
            }
        }
        out
    }

    /// Formats a sample date and parses it back.
    ///
    /// Week based formats only keep the Monday of a week, so the sample is a Monday.
    pub fn round_trips(&self) -> bool {
        let Some(sample) = NaiveDate::from_ymd_opt(2020, 5, 25) else {
            return false;
        };
        self.parse(&self.format(sample)) == Some(sample)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

fn push_literal(tokens: &mut Vec<Token>, s: &str) {
    if let Some(Token::Literal(last)) = tokens.last_mut() {
        last.push_str(s);
    } else {
        tokens.push(Token::Literal(s.to_string()));
    }
}

fn field_token(c: char, count: usize) -> Option<Token> {
    let numeric = |field, min, max| Some(Token::Numeric { field, min, max });
    match (c, count) {
        ('y', 1) => numeric(Field::Year, 1, 4),
        ('y', 4) => numeric(Field::Year, 4, 4),
        ('y', 2) => numeric(Field::ShortYear, 2, 2),
        ('k', 4) => numeric(Field::WeekYear, 4, 4),
        ('k', 2) => numeric(Field::ShortWeekYear, 2, 2),
        ('M' | 'L', 1) => numeric(Field::Month, 1, 2),
        ('M' | 'L', 2) => numeric(Field::Month, 2, 2),
        ('M' | 'L', 3) => Some(Token::MonthName { long: false }),
        ('M' | 'L', 4) => Some(Token::MonthName { long: true }),
        ('d', 1) => numeric(Field::Day, 1, 2),
        ('d', 2) => numeric(Field::Day, 2, 2),
        ('W', 1) => numeric(Field::Week, 1, 2),
        ('W', 2) => numeric(Field::Week, 2, 2),
        ('o', 1) => numeric(Field::Ordinal, 1, 3),
        ('o', 3) => numeric(Field::Ordinal, 3, 3),
        _ => None,
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, FormatError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            // Quoted literal; '' inside quotes is an escaped quote.
            let mut lit = String::new();
            let mut closed = false;
            while let Some(q) = chars.next() {
                if q == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        lit.push('\'');
                        continue;
                    }
                    closed = true;
                    break;
                }
                lit.push(q);
            }
            if !closed {
                return Err(FormatError::UnterminatedQuote(pattern.to_string()));
            }
            if lit.is_empty() {
                // Bare '' outside a literal is a single quote character.
                push_literal(&mut tokens, "'");
            } else {
                push_literal(&mut tokens, &lit);
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            match field_token(c, count) {
                Some(token) => tokens.push(token),
                None => push_literal(&mut tokens, &c.to_string().repeat(count)),
            }
            continue;
        }

        let mut buf = [0u8; 4];
        push_literal(&mut tokens, c.encode_utf8(&mut buf));
    }

    Ok(tokens)
}
