use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Bed,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Bed => "bed",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = &'static str;
    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format {
            "tsv" => Ok(OutputFormat::Tsv),
            "bed" => Ok(OutputFormat::Bed),
            _ => Err("Invalid output format. Options are: tsv, bed"),
        }
    }
}
