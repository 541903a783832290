use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "bdados_venda.json";
pub const OUTPUT_DIR: &str = "images";
pub const CHART_FILE: &str = "vendas_diarias.png";

/// Where the sales come from and where the chart goes. Only the input can be
/// changed, as the single optional command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

impl Config {
    /// `args` are the process arguments, program name first.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, anyhow::Error> {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "vendas".to_owned());
        let rest: Vec<String> = args.collect();
        match rest.as_slice() {
            [] => Ok(Self::default()),
            [input] => Ok(Self {
                input: PathBuf::from(input),
                ..Self::default()
            }),
            _ => anyhow::bail!("usage: {program} [{DEFAULT_INPUT}]"),
        }
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE)
    }
}
