use crate::data::{Error, Sale};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// How many days the ranking keeps.
pub const TOP_DAYS: usize = 5;

/// Sales summed per calendar day. A `BTreeMap` keeps the days sorted, which is
/// what the chart needs for its x-axis. The grand total is summed alongside,
/// with the same overflow check, so reading it back never fails.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DailySales {
    totals: BTreeMap<NaiveDate, Decimal>,
    total: Decimal,
}

impl DailySales {
    /// Fails with `Error::Overflow` when a daily total or the grand total
    /// leaves the range of `Decimal`.
    pub fn from_sales<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Result<Self, Error> {
        let mut totals = BTreeMap::new();
        let mut total = Decimal::ZERO;
        for sale in sales {
            let overflow = || Error::Overflow {
                date: sale.date(),
                amount: sale.total,
            };
            let day = totals.entry(sale.date()).or_insert(Decimal::ZERO);
            *day = day.checked_add(sale.total).ok_or_else(overflow)?;
            total = total.checked_add(sale.total).ok_or_else(overflow)?;
        }
        Ok(Self { totals, total })
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.totals.iter().map(|(date, total)| (*date, *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// First and last day with sales.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.totals.keys().next()?;
        let last = self.totals.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn max_total(&self) -> Option<Decimal> {
        self.totals.values().max().copied()
    }
}

/// The key figures printed after the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    /// Number of rows in the sales table, not number of days.
    pub records: usize,
    pub mean: Decimal,
    pub best_day: (NaiveDate, Decimal),
    pub top_days: Vec<(NaiveDate, Decimal)>,
}

impl Summary {
    /// `None` when there is no day to average over; the caller reports that
    /// instead of printing statistics.
    pub fn new(records: usize, daily: &DailySales) -> Option<Self> {
        if daily.is_empty() {
            return None;
        }
        let mean = daily.total() / Decimal::from(daily.len());
        // Stable sort over ascending dates: equal totals stay earliest first.
        let mut top_days: Vec<_> = daily.iter().collect();
        top_days.sort_by(|a, b| b.1.cmp(&a.1));
        top_days.truncate(TOP_DAYS);
        let best_day = *top_days.first()?;
        Some(Self {
            records,
            mean,
            best_day,
            top_days,
        })
    }
}
