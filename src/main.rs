use anyhow::Context;
use compute::{DailySales, Summary};
use config::Config;
use plot::ChartSeries;
use read::read_sales;
use std::io::Write;
use write::{write_no_data, write_summary};

mod compute;
mod config;
mod data;
mod plot;
mod read;
mod write;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let config = Config::from_args(std::env::args())?;
    run(&config, std::io::stdout().lock())
}

/// The whole report: load, aggregate, chart, then print the key figures.
/// An empty sales file is not an error, it just produces no chart.
pub(crate) fn run<W: Write>(config: &Config, mut out: W) -> Result<(), anyhow::Error> {
    let input = std::fs::File::open(&config.input)
        .with_context(|| format!("could not open {}", config.input.display()))?;
    let sales = read_sales(std::io::BufReader::new(input))
        .with_context(|| format!("could not load sales from {}", config.input.display()))?;
    log::info!("loaded {} sales from {}", sales.len(), config.input.display());
    writeln!(out, "Vendas carregadas e prontas para análise.")?;

    let daily = DailySales::from_sales(&sales).context("could not add up daily sales")?;
    log::info!("aggregated into {} days", daily.len());
    let (Some(summary), Some(series)) = (
        Summary::new(sales.len(), &daily),
        ChartSeries::new(&daily),
    ) else {
        return write_no_data(out, sales.len());
    };

    let chart_path = config.chart_path();
    series.render(&chart_path)?;
    writeln!(out)?;
    writeln!(
        out,
        "[SUCESSO] Gráfico de Vendas Diárias salvo em: {}",
        chart_path.display()
    )?;
    writeln!(out)?;
    write_summary(out, &summary)
}
