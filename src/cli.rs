use crate::error::Result;
use crate::models::{RawSoilSample, SoilParameter};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nutriroot",
    version,
    about = "Soil diagnostics and crop suitability scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full soil report: parameter status, overall health, fertilizer plan and crop tip
    Analyze(SampleArgs),
    /// Only the warnings for a sample, most severe first
    Alerts(SampleArgs),
    /// Rank catalog crops by suitability for a sample
    Crops {
        #[command(flatten)]
        sample: SampleArgs,

        /// Read the crop catalog from this JSON/YAML file instead of the configured source
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Number of matches to list (defaults to display.top_matches)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Growing tip for a crop
    Tip {
        /// Crop name, e.g. Rice
        crop: String,
    },
    /// List the soil warning rules in evaluation order
    Rules,
    /// Re-run interactive setup
    Init,
    /// Validate config and test the crop catalog source
    Check,
}

/// A soil sample, from a JSON file, flags, or both (flags win).
///
/// Readings are taken as text so validation can report blank or non-numeric
/// input the same way for every source.
#[derive(Args, Debug, Default)]
pub struct SampleArgs {
    /// JSON file with nitrogen, phosphorus, potassium, ph, moisture, temperature and crop
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Nitrogen (mg/kg)
    #[arg(short = 'n', long)]
    pub nitrogen: Option<String>,

    /// Phosphorus (mg/kg)
    #[arg(short = 'p', long)]
    pub phosphorus: Option<String>,

    /// Potassium (mg/kg)
    #[arg(short = 'k', long)]
    pub potassium: Option<String>,

    /// Soil pH
    #[arg(long)]
    pub ph: Option<String>,

    /// Soil moisture (%)
    #[arg(short = 'm', long)]
    pub moisture: Option<String>,

    /// Soil temperature (°C)
    #[arg(short = 't', long)]
    pub temperature: Option<String>,

    /// Crop being grown, used in messages and for the crop tip
    #[arg(long)]
    pub crop: Option<String>,
}

impl SampleArgs {
    fn flag(&self, parameter: SoilParameter) -> Option<&String> {
        match parameter {
            SoilParameter::Nitrogen => self.nitrogen.as_ref(),
            SoilParameter::Phosphorus => self.phosphorus.as_ref(),
            SoilParameter::Potassium => self.potassium.as_ref(),
            SoilParameter::Ph => self.ph.as_ref(),
            SoilParameter::Moisture => self.moisture.as_ref(),
            SoilParameter::Temperature => self.temperature.as_ref(),
        }
    }

    /// Merge the input file and flags into an unvalidated sample.
    pub fn into_raw(self) -> Result<RawSoilSample> {
        let mut raw = match self.input {
            Some(ref path) => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str::<RawSoilSample>(&content)?
            }
            None => RawSoilSample::default(),
        };

        for parameter in SoilParameter::ALL {
            if let Some(value) = self.flag(parameter) {
                raw.set_field(parameter, Value::String(value.clone()));
            }
        }
        if self.crop.is_some() {
            raw.crop = self.crop;
        }

        Ok(raw)
    }
}
