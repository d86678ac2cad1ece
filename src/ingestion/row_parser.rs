//! Row parsing for the sales export.
//!
//! Columns are positional: date, operator name, cost, commission, sale value.
//! A row either becomes a [`ParsedSalesRecord`] or a [`RowError`] naming the
//! line and the first field that failed; it never aborts the run.

use crate::error::{RowError, RowErrorKind};
use crate::models::{EXPECTED_FIELDS, ParsedSalesRecord, RawRow};

use super::locale::{LocaleError, parse_currency, parse_localized_date};

/// Column names used in row error messages, in positional order.
pub const FIELD_NAMES: [&str; EXPECTED_FIELDS] = ["data", "funcionario", "custo", "comissao", "venda"];

/// Parses one raw row into a typed sales record.
///
/// Requires exactly five non-empty fields. The first failing field decides
/// the error.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::parse_row;
/// use sales_engine::models::RawRow;
/// use rust_decimal::Decimal;
///
/// let raw = RawRow::new(
///     2,
///     vec!["01 de Setembro", "RENATO", "R$ 33,70", "R$ 11,81", "R$ 45,51"]
///         .into_iter()
///         .map(String::from)
///         .collect(),
/// );
/// let record = parse_row(&raw, 2024).unwrap();
/// assert_eq!(record.commission_value, Decimal::new(1181, 2));
/// ```
pub fn parse_row(raw: &RawRow, reference_year: i32) -> Result<ParsedSalesRecord, RowError> {
    let row_error = |kind| RowError::new(raw.line, kind);

    if raw.fields.len() != EXPECTED_FIELDS {
        return Err(row_error(RowErrorKind::RowShape {
            found: format!("{} campos, esperado {}", raw.fields.len(), EXPECTED_FIELDS),
        }));
    }

    let fields: Vec<&str> = raw.fields.iter().map(|f| f.trim()).collect();
    if let Some(index) = fields.iter().position(|f| f.is_empty()) {
        return Err(row_error(RowErrorKind::RowShape {
            found: format!("campo '{}' vazio", FIELD_NAMES[index]),
        }));
    }

    let date = parse_localized_date(fields[0], reference_year).map_err(|err| {
        row_error(match err {
            LocaleError::MalformedDate { value, reason } => {
                RowErrorKind::MalformedDate { value, reason }
            }
            LocaleError::MalformedCurrency { value } => RowErrorKind::MalformedDate {
                value,
                reason: "formato inesperado".to_string(),
            },
        })
    })?;

    let money = |index: usize| {
        parse_currency(fields[index]).map_err(|_| {
            row_error(RowErrorKind::MalformedCurrency {
                field: FIELD_NAMES[index],
                value: fields[index].to_string(),
            })
        })
    };

    let cost_value = money(2)?;
    let commission_value = money(3)?;
    let sale_value = money(4)?;

    Ok(ParsedSalesRecord {
        line: raw.line,
        date,
        operator_name: fields[1].to_string(),
        cost_value,
        commission_value,
        sale_value,
    })
}

/// Rejoins amounts that an unquoted comma split in two.
///
/// The export writes `R$ 33,70` into a comma-delimited line, which reads as
/// `"R$ 33"` and `"70"`. When a line has more fields than expected, every
/// amount without a `,` that is followed by a one or two digit fragment is
/// glued back together. The date and name columns are left untouched.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::reassemble_amounts;
///
/// let fields = ["01 de Setembro", "RENATO", "R$ 33", "70", "R$ 11", "81", "R$ 45", "51"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// assert_eq!(
///     reassemble_amounts(fields),
///     vec!["01 de Setembro", "RENATO", "R$ 33,70", "R$ 11,81", "R$ 45,51"]
/// );
/// ```
pub fn reassemble_amounts(fields: Vec<String>) -> Vec<String> {
    if fields.len() <= EXPECTED_FIELDS {
        return fields;
    }

    let mut out = Vec::with_capacity(EXPECTED_FIELDS);
    let mut iter = fields.into_iter().peekable();

    for _ in 0..2 {
        if let Some(field) = iter.next() {
            out.push(field);
        }
    }

    while let Some(mut field) = iter.next() {
        let is_amount_head =
            !field.contains(',') && field.chars().any(|c| c.is_ascii_digit());
        if is_amount_head {
            if let Some(fragment) = iter.next_if(|next| is_cents_fragment(next)) {
                field = format!("{},{}", field, fragment.trim());
            }
        }
        out.push(field);
    }

    out
}

fn is_cents_fragment(text: &str) -> bool {
    let text = text.trim();
    (1..=2).contains(&text.len()) && text.chars().all(|c| c.is_ascii_digit())
}

/// Returns true when the row looks like a column header.
///
/// A header has a first field that neither starts with a digit nor parses as
/// a `<dia> de <mês>` date.
pub fn is_header_row(raw: &RawRow, reference_year: i32) -> bool {
    let first = raw.first_field();
    !first.is_empty()
        && !first.starts_with(|c: char| c.is_ascii_digit())
        && parse_localized_date(first, reference_year).is_err()
}

/// Returns true for the totals line that closes the export.
pub fn is_footer_row(raw: &RawRow) -> bool {
    raw.first_field().to_lowercase().starts_with("total")
}
