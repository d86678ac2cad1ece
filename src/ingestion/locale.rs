//! Brazilian locale normalization.
//!
//! Converts the currency and date text found in the sales export
//! (`"R$ 1.234,56"`, `"01 de Setembro"`) into [`Decimal`] and [`NaiveDate`]
//! values. Both functions are pure.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Currency prefix used by the export.
pub const CURRENCY_PREFIX: &str = "R$";

/// Portuguese month names, lowercased, in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A value that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The text is not a valid non-negative Brazilian amount.
    #[error("malformed currency '{value}'")]
    MalformedCurrency {
        /// The rejected text.
        value: String,
    },

    /// The text is not a valid `<dia> de <mês>` date.
    #[error("malformed date '{value}': {reason}")]
    MalformedDate {
        /// The rejected text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Parses a Brazilian-formatted amount.
///
/// The `R$` prefix and all whitespace are stripped, `.` is read as the
/// thousands separator and `,` as the decimal separator. Negative amounts,
/// empty text, misplaced separators and more than one `,` are rejected.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::parse_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_currency("R$ 1.234,56").unwrap(), Decimal::new(123456, 2));
/// assert_eq!(parse_currency("R$ 0,00").unwrap(), Decimal::ZERO);
/// assert!(parse_currency("R$ 1,2,3").is_err());
/// ```
pub fn parse_currency(text: &str) -> Result<Decimal, LocaleError> {
    let malformed = || LocaleError::MalformedCurrency {
        value: text.to_string(),
    };

    let trimmed = text.trim();
    let without_prefix = match trimmed.get(..CURRENCY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(CURRENCY_PREFIX) => {
            &trimmed[CURRENCY_PREFIX.len()..]
        }
        _ => trimmed,
    };
    let compact: String = without_prefix
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if compact.is_empty() {
        return Err(malformed());
    }

    let mut parts = compact.split(',');
    let integer_part = parts.next().unwrap_or("");
    let fraction_part = parts.next();
    if parts.next().is_some() {
        return Err(malformed());
    }

    let integer_digits = strip_thousands(integer_part).ok_or_else(malformed)?;

    let canonical = match fraction_part {
        Some(fraction) => {
            if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(malformed());
            }
            format!("{}.{}", integer_digits, fraction)
        }
        None => integer_digits,
    };

    Decimal::from_str(&canonical).map_err(|_| malformed())
}

/// Removes `.` thousands separators, checking that every group after the
/// first has exactly three digits.
fn strip_thousands(integer_part: &str) -> Option<String> {
    let mut groups = integer_part.split('.');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 && integer_part.contains('.') {
        return None;
    }
    if !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// Maps a Portuguese month name (any case) to its number.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::month_number;
///
/// assert_eq!(month_number("Setembro"), Some(9));
/// assert_eq!(month_number("MARÇO"), Some(3));
/// assert_eq!(month_number("September"), None);
/// ```
pub fn month_number(name: &str) -> Option<u32> {
    let lowered = name.trim().to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|month| *month == lowered)
        .map(|index| index as u32 + 1)
}

/// Parses a `<dia> de <mês>` date in the given year.
///
/// The day must exist in that month of `reference_year`, so `"30 de
/// Fevereiro"` and `"32 de Setembro"` are both rejected.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::parse_localized_date;
/// use chrono::NaiveDate;
///
/// let date = parse_localized_date("01 de Setembro", 2024).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
/// ```
pub fn parse_localized_date(text: &str, reference_year: i32) -> Result<NaiveDate, LocaleError> {
    let malformed = |reason: String| LocaleError::MalformedDate {
        value: text.to_string(),
        reason,
    };

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [day_text, connector, month_text] = tokens.as_slice() else {
        return Err(malformed("formato esperado '<dia> de <mês>'".to_string()));
    };
    if !connector.eq_ignore_ascii_case("de") {
        return Err(malformed("formato esperado '<dia> de <mês>'".to_string()));
    }

    if day_text.is_empty()
        || day_text.len() > 2
        || !day_text.chars().all(|c| c.is_ascii_digit())
    {
        return Err(malformed(format!("dia inválido '{}'", day_text)));
    }
    let day: u32 = day_text
        .parse()
        .map_err(|_| malformed(format!("dia inválido '{}'", day_text)))?;

    let month = month_number(month_text)
        .ok_or_else(|| malformed(format!("mês desconhecido '{}'", month_text)))?;

    NaiveDate::from_ymd_opt(reference_year, month, day)
        .ok_or_else(|| malformed("dia fora do intervalo".to_string()))
}
