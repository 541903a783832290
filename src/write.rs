use crate::{compute::Summary, data::CURRENCY_DIGITS};
use rust_decimal::{Decimal, RoundingStrategy};

/// Console exporter for the `Summary`: record count, mean, best day, then the
/// ranking.
pub(crate) fn write_summary<W: std::io::Write>(
    mut writer: W,
    summary: &Summary,
) -> Result<(), anyhow::Error> {
    writeln!(writer, "Total de vendas carregadas: {}", summary.records)?;
    writeln!(writer)?;
    writeln!(writer, "--- Resultados Chave ---")?;
    writeln!(writer, "Média Diária de Vendas: R$ {}", money(summary.mean))?;
    let (best_date, best_total) = summary.best_day;
    writeln!(
        writer,
        "Venda Máxima (Dia {}): R$ {}",
        best_date.format("%d/%m"),
        money(best_total)
    )?;
    writeln!(writer)?;
    writeln!(writer, "--- Top 5 Dias de Maior Venda ---")?;
    for (date, total) in &summary.top_days {
        writeln!(writer, "{}    R$ {}", date.format("%Y-%m-%d"), money(*total))?;
    }
    writer.flush()?;
    Ok(())
}

/// What gets printed instead of the statistics when the table is empty.
pub(crate) fn write_no_data<W: std::io::Write>(
    mut writer: W,
    records: usize,
) -> Result<(), anyhow::Error> {
    writeln!(writer, "Total de vendas carregadas: {records}")?;
    writeln!(writer, "Nenhum dado de venda para analisar.")?;
    writer.flush()?;
    Ok(())
}

/// Rounds half away from zero and always shows two decimals.
fn money(amount: Decimal) -> Decimal {
    let mut amount =
        amount.round_dp_with_strategy(CURRENCY_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(CURRENCY_DIGITS);
    amount
}
