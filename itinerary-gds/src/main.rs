use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use itinerary_gds::config::{ConvertOptions, DirectionFilter, parse_booking_class};
use itinerary_gds::convert::Converter;
use itinerary_gds::domain::Cabin;

#[derive(Parser)]
#[command(author, version, about = "Convert pasted flight itineraries to GDS commands", long_about = None)]
struct Cli {
    /// Itinerary text file; reads stdin when omitted
    input: Option<PathBuf>,

    /// JSON options file
    #[arg(short, long, env = "ITINERARY_GDS_OPTIONS")]
    options: Option<PathBuf>,

    /// Fallback booking letter
    #[arg(short = 'c', long, env = "ITINERARY_GDS_BOOKING_CLASS", value_parser = parse_booking_class)]
    booking_class: Option<char>,

    /// Segment status code, e.g. SS1 (empty to omit)
    #[arg(short, long, env = "ITINERARY_GDS_SEGMENT_STATUS")]
    status: Option<String>,

    /// all, outbound or inbound
    #[arg(short, long)]
    direction: Option<DirectionFilter>,

    /// 1-based journey number
    #[arg(short, long)]
    journey: Option<usize>,

    /// Inclusive segment index range
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    range: Option<Vec<usize>>,

    /// Cabin assumed for segments without one
    #[arg(long)]
    cabin: Option<Cabin>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print itinerary command lines
    Itinerary,
    /// Print the availability command
    Availability {
        /// Include departure time and layover minutes
        #[arg(long)]
        detailed: bool,
    },
    /// Print parsed segments and journeys as JSON
    Preview,
}

impl Cli {
    /// Options file first, then flag overrides.
    fn convert_options(&self) -> Result<ConvertOptions> {
        let mut options = match &self.options {
            Some(path) => ConvertOptions::from_path(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => ConvertOptions::default(),
        };
        if let Some(class) = self.booking_class {
            options.booking_class = class;
        }
        if let Some(status) = &self.status {
            options.segment_status = status.clone();
        }
        if let Some(direction) = self.direction {
            options.direction = direction;
        }
        if let Some(journey) = self.journey {
            options.journey_index = Some(journey);
        }
        if let Some([start, end]) = self.range.as_deref() {
            options.segment_range = Some((*start, *end));
        }
        if let Some(cabin) = self.cabin {
            options.auto_cabin = Some(cabin);
        }
        if let Commands::Availability { detailed: true } = self.command {
            options.detailed_availability = true;
        }
        Ok(options)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("reading stdin")?;
                Ok(text)
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.convert_options()?;
    let text = cli.read_input()?;
    let converter = Converter::builtin();

    let output = match cli.command {
        Commands::Itinerary => converter.itinerary(&text, &options)?,
        Commands::Availability { .. } => converter.availability(&text, &options)?,
        Commands::Preview => serde_json::to_string_pretty(&converter.preview(&text))?,
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "itinerary-gds",
            "--booking-class",
            "j",
            "--direction",
            "inbound",
            "--range",
            "0",
            "2",
            "--cabin",
            "premium economy",
            "availability",
            "--detailed",
        ])
        .unwrap();
        let options = cli.convert_options().unwrap();
        assert_eq!(options.booking_class, 'J');
        assert_eq!(options.direction, DirectionFilter::Inbound);
        assert_eq!(options.segment_range, Some((0, 2)));
        assert_eq!(options.auto_cabin, Some(Cabin::Premium));
        assert!(options.detailed_availability);
        assert_eq!(options.segment_status, "SS1");
    }

    #[test]
    fn options_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"segmentStatus": "HK1", "bookingClass": "M", "journeyIndex": 2}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["itinerary-gds", "--options", path, "--journey", "1", "itinerary"]).unwrap();
        let options = cli.convert_options().unwrap();
        assert_eq!(options.segment_status, "HK1");
        assert_eq!(options.booking_class, 'M');
        assert_eq!(options.journey_index, Some(1));
    }

    #[test]
    fn bad_options_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["itinerary-gds", "--options", path, "preview"]).unwrap();
        let err = cli.convert_options().unwrap_err();
        assert!(format!("{err:#}").contains(path));
    }

    #[test]
    fn reads_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Air France 7").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["itinerary-gds", path, "itinerary"]).unwrap();
        assert_eq!(cli.read_input().unwrap(), "Air France 7");
    }

    #[test]
    fn rejects_non_letter_booking_class() {
        assert!(Cli::try_parse_from(["itinerary-gds", "--booking-class", "7", "itinerary"]).is_err());
    }

    #[test]
    fn rejects_unknown_direction() {
        assert!(Cli::try_parse_from(["itinerary-gds", "--direction", "sideways", "itinerary"]).is_err());
    }
}
