// File: ./src/model/date_tag.rs
use crate::date_format::{DateFormat, DateMatch};
use crate::error::ConfigError;
use chrono::NaiveDate;
use std::ops::Range;

/// Placeholder marking where the date sits inside a tag template.
pub const DATE_TOKEN: &str = "%date%";

/// Finds, parses and strips tags such as `#2021-02-16` or `#tbd-2021-07`.
///
/// A tag template is split around its single [`DATE_TOKEN`] into a literal
/// prefix and suffix. Both are compared verbatim, so characters like `*` or
/// `(` in user supplied templates have no special meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTagParser {
    template: String,
    prefix: String,
    suffix: String,
    format: DateFormat,
}

impl DateTagParser {
    pub fn new(template: &str, date_format: &str) -> Result<Self, ConfigError> {
        let format = DateFormat::new(date_format)?;
        Self::with_format(template, format)
    }

    pub fn with_format(template: &str, format: DateFormat) -> Result<Self, ConfigError> {
        let count = template.matches(DATE_TOKEN).count();
        if count == 0 {
            return Err(ConfigError::MissingDateToken(template.to_string()));
        }
        if count > 1 {
            return Err(ConfigError::DuplicateDateToken {
                template: template.to_string(),
                count,
            });
        }
        let (prefix, suffix) = template
            .split_once(DATE_TOKEN)
            .ok_or_else(|| ConfigError::MissingDateToken(template.to_string()))?;
        Ok(Self {
            template: template.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            format,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.format
    }

    fn find_match(&self, text: &str) -> Option<(Range<usize>, DateMatch)> {
        text.char_indices().find_map(|(idx, _)| {
            if !text[idx..].starts_with(self.prefix.as_str()) {
                return None;
            }
            let m = self.format.match_at(text, idx + self.prefix.len())?;
            if !text[m.end..].starts_with(self.suffix.as_str()) {
                return None;
            }
            Some((idx..m.end + self.suffix.len(), m))
        })
    }

    /// Byte range of the first complete tag in `text`.
    pub fn find_tag(&self, text: &str) -> Option<Range<usize>> {
        self.find_match(text).map(|(range, _)| range)
    }

    /// Date of the first tag in `text`.
    ///
    /// Only the first tag counts: if its date is impossible (`#2021-02-30`) the
    /// result is `None` even when a later tag would parse.
    pub fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        self.find_match(text).and_then(|(_, m)| m.date())
    }

    /// Removes the first tag together with the whitespace separating it from
    /// the surrounding words. Text without a tag comes back unchanged.
    ///
    /// A word glued to the end of the tag keeps the space in front of the tag.
    pub fn remove_date(&self, text: &str) -> String {
        let Some(range) = self.find_tag(text) else {
            return text.to_string();
        };
        let after = &text[range.end..];
        let before = if after.is_empty() || after.starts_with(char::is_whitespace) {
            text[..range.start].trim_end()
        } else {
            &text[..range.start]
        };
        let joined = if before.is_empty() {
            after.trim_start().to_string()
        } else {
            format!("{}{}", before, after)
        };
        joined.trim_end().to_string()
    }

    /// Renders the tag for `date`, e.g. `#2021-02-16`.
    pub fn format_tag(&self, date: NaiveDate) -> String {
        format!("{}{}{}", self.prefix, self.format.format(date), self.suffix)
    }
}
