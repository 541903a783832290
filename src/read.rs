use crate::data::{Error, RawSale, Sale};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts we accept. Anything day-first or month-first is ambiguous
/// and left out on purpose.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// JSON importer for the sales table. The whole document is decoded first, so
/// a bad record anywhere means no table at all.
pub(crate) fn read_sales<R: std::io::Read>(reader: R) -> Result<Vec<Sale>, Error> {
    let raw: Vec<RawSale> = serde_json::from_reader(reader)?;
    let sales = raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| match parse_timestamp(&raw.date) {
            Some(timestamp) => Ok(Sale {
                timestamp,
                total: raw.total,
                extra: raw.extra,
            }),
            None => Err(Error::InvalidDate {
                index,
                value: raw.date,
            }),
        })
        .collect::<Result<Vec<_>, Error>>()?;
    log::debug!(
        "decoded {} sales, {} carrying extra fields",
        sales.len(),
        sales.iter().filter(|sale| !sale.extra.is_empty()).count()
    );
    Ok(sales)
}

/// Dates without a time of day become midnight; RFC 3339 timestamps keep
/// their local wall-clock reading.
pub(crate) fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
