//! Display formatting for amounts, percentages and dates.
//!
//! Brazilian Portuguese is the default locale: `R$ 1.234,56`, `12,5%`,
//! `31/12/2025`. US English is available for shared households.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NOT_A_NUMBER: &str = "-";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt-br", alias = "ptBR")]
    PtBr,
    #[serde(rename = "en-US", alias = "en-us", alias = "enUS")]
    EnUs,
}

impl Locale {
    fn decimal_separator(self) -> char {
        match self {
            Locale::PtBr => ',',
            Locale::EnUs => '.',
        }
    }

    fn group_separator(self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::EnUs => ',',
        }
    }

    fn currency_prefix(self) -> &'static str {
        match self {
            Locale::PtBr => "R$ ",
            Locale::EnUs => "$",
        }
    }

    fn date_pattern(self) -> &'static str {
        match self {
            Locale::PtBr => "%d/%m/%Y",
            Locale::EnUs => "%m/%d/%Y",
        }
    }

    fn compact_suffixes(self) -> [&'static str; 3] {
        match self {
            Locale::PtBr => [" mil", " mi", " bi"],
            Locale::EnUs => ["K", "M", "B"],
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

/// Formats `value` with grouped thousands and exactly `decimals` fraction digits.
pub fn format_number(value: f64, decimals: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    let (negative, digits) = unsigned_digits(value, decimals, locale);
    if negative {
        format!("-{digits}")
    } else {
        digits
    }
}

pub fn format_currency(value: f64, locale: Locale) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    let (negative, digits) = unsigned_digits(value, 2, locale);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{digits}", locale.currency_prefix())
}

pub fn format_percent(value: f64, decimals: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    format!("{}%", format_number(value, decimals, locale))
}

pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    date.format(locale.date_pattern()).to_string()
}

/// Short form for chart axes: `1,2 mil` / `1.2K`, `3,4 mi` / `3.4M`.
pub fn format_compact(value: f64, locale: Locale) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    let magnitude = value.abs();
    let suffixes = locale.compact_suffixes();
    let (scaled, suffix) = if magnitude >= 1e9 {
        (value / 1e9, suffixes[2])
    } else if magnitude >= 1e6 {
        (value / 1e6, suffixes[1])
    } else if magnitude >= 1e3 {
        (value / 1e3, suffixes[0])
    } else {
        return format_number(value, 0, locale);
    };

    let mut number = format_number(scaled, 1, locale);
    let trailing_zero = format!("{}0", locale.decimal_separator());
    if number.ends_with(&trailing_zero) {
        number.truncate(number.len() - trailing_zero.len());
    }
    format!("{number}{suffix}")
}

fn unsigned_digits(value: f64, decimals: usize, locale: Locale) -> (bool, String) {
    let rounded = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rounded.as_str(), None),
    };

    let grouped = group_thousands(int_part, locale.group_separator());
    let digits = match frac_part {
        Some(frac) => format!("{grouped}{}{frac}", locale.decimal_separator()),
        None => grouped,
    };

    let is_zero = rounded.chars().all(|c| c == '0' || c == '.');
    (value < 0.0 && !is_zero, digits)
}

fn group_thousands(int_part: &str, separator: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_in_both_locales() {
        assert_eq!(format_currency(1_234.56, Locale::PtBr), "R$ 1.234,56");
        assert_eq!(format_currency(1_234.56, Locale::EnUs), "$1,234.56");
        assert_eq!(format_currency(0.0, Locale::PtBr), "R$ 0,00");
        assert_eq!(format_currency(1_000_000.0, Locale::EnUs), "$1,000,000.00");
    }

    #[test]
    fn negative_currency_puts_sign_before_symbol() {
        assert_eq!(format_currency(-52.5, Locale::PtBr), "-R$ 52,50");
        assert_eq!(format_currency(-1_500.0, Locale::EnUs), "-$1,500.00");
    }

    #[test]
    fn rounding_to_zero_drops_the_sign() {
        assert_eq!(format_currency(-0.001, Locale::PtBr), "R$ 0,00");
        assert_eq!(format_number(-0.04, 1, Locale::EnUs), "0.0");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percent(12.5, 1, Locale::PtBr), "12,5%");
        assert_eq!(format_percent(12.5, 1, Locale::EnUs), "12.5%");
        assert_eq!(format_percent(-3.0, 0, Locale::EnUs), "-3%");
    }

    #[test]
    fn dates() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date");
        assert_eq!(format_date(date, Locale::PtBr), "31/12/2025");
        assert_eq!(format_date(date, Locale::EnUs), "12/31/2025");
    }

    #[test]
    fn compact_amounts() {
        assert_eq!(format_compact(950.0, Locale::PtBr), "950");
        assert_eq!(format_compact(1_200.0, Locale::PtBr), "1,2 mil");
        assert_eq!(format_compact(1_000.0, Locale::EnUs), "1K");
        assert_eq!(format_compact(3_400_000.0, Locale::EnUs), "3.4M");
        assert_eq!(format_compact(-2_500_000_000.0, Locale::PtBr), "-2,5 bi");
    }

    #[test]
    fn non_finite_values_render_as_placeholder() {
        assert_eq!(format_currency(f64::INFINITY, Locale::PtBr), "-");
        assert_eq!(format_percent(f64::NAN, 1, Locale::EnUs), "-");
        assert_eq!(format_compact(f64::NEG_INFINITY, Locale::EnUs), "-");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("pt-BR".parse::<Locale>(), Ok(Locale::PtBr));
        assert_eq!("en_us".parse::<Locale>(), Ok(Locale::EnUs));
        assert!("fr-FR".parse::<Locale>().is_err());
        assert_eq!(Locale::default().to_string(), "pt-BR");
    }

    #[test]
    fn locale_serde_uses_tags() {
        let locale: Locale = serde_json::from_str("\"en-US\"").expect("valid tag");
        assert_eq!(locale, Locale::EnUs);
        assert_eq!(
            serde_json::to_string(&Locale::PtBr).expect("serializes"),
            "\"pt-BR\""
        );
    }
}
