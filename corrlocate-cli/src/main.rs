use clap::Parser;
use corrlocate::io::load_gray_image;
use corrlocate::{
    Correlator, DebugMode, LocateConfig, Location, Locator, MatchMetric, MatchRect,
    OwnedImage, ParallelCorrelator, ScalarCorrelator,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "CorrLocate CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    SqDiff,
    SqDiffNormed,
    Ccorr,
    CcorrNormed,
    Ccoeff,
    CcoeffNormed,
}

impl From<MetricConfig> for MatchMetric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::SqDiff => MatchMetric::SqDiff,
            MetricConfig::SqDiffNormed => MatchMetric::SqDiffNormed,
            MetricConfig::Ccorr => MatchMetric::CCorr,
            MetricConfig::CcorrNormed => MatchMetric::CCorrNormed,
            MetricConfig::Ccoeff => MatchMetric::CCoeff,
            MetricConfig::CcoeffNormed => MatchMetric::CCoeffNormed,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    Single,
    All,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum DebugConfig {
    Off,
    EachMatch,
    NotMatch,
}

impl From<DebugConfig> for DebugMode {
    fn from(value: DebugConfig) -> Self {
        match value {
            DebugConfig::Off => DebugMode::Off,
            DebugConfig::EachMatch => DebugMode::EachMatch,
            DebugConfig::NotMatch => DebugMode::NotMatch,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    metric: MetricConfig,
    confidence: f32,
    mode: ModeConfig,
    rects: bool,
    max_matches: Option<usize>,
    fill_value: u8,
    parallel: bool,
    debug: DebugConfig,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = LocateConfig::default();
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            metric: MetricConfig::CcoeffNormed,
            confidence: cfg.confidence,
            mode: ModeConfig::Single,
            rects: false,
            max_matches: cfg.max_matches,
            fill_value: cfg.fill_value,
            parallel: false,
            debug: DebugConfig::Off,
        }
    }
}

impl Config {
    fn locate_config(&self) -> LocateConfig {
        LocateConfig {
            metric: self.metric.into(),
            confidence: self.confidence,
            fill_value: self.fill_value,
            max_matches: self.max_matches,
            debug: self.debug.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LocationRecord {
    x: usize,
    y: usize,
}

impl From<Location> for LocationRecord {
    fn from(value: Location) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Serialize)]
struct RectRecord {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl From<MatchRect> for RectRecord {
    fn from(value: MatchRect) -> Self {
        Self {
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    metric: &'static str,
    found: bool,
    locations: Vec<LocationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rects: Option<Vec<RectRecord>>,
}

fn run<C: Correlator>(
    locator: &Locator<C>,
    config: &Config,
    image: &OwnedImage,
    template: &OwnedImage,
) -> Result<Output, Box<dyn std::error::Error>> {
    let (source, tpl) = (image.view(), template.view());
    let locations: Vec<Location> = match config.mode {
        ModeConfig::Single => locator.locate(source, tpl)?.into_iter().collect(),
        ModeConfig::All => locator.locate_all(source, tpl)?,
    };
    let rects = config.rects.then(|| {
        corrlocate::to_rects(&locations, tpl.width(), tpl.height())
            .into_iter()
            .map(RectRecord::from)
            .collect()
    });
    Ok(Output {
        metric: locator.config().metric.name(),
        found: !locations.is_empty(),
        locations: locations.into_iter().map(LocationRecord::from).collect(),
        rects,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("corrlocate=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }

    let image = load_gray_image(&config.image_path)?;
    let template = load_gray_image(&config.template_path)?;
    let locator = Locator::default().with_config(config.locate_config());

    let output = if config.parallel {
        run(
            &locator.with_correlator(ParallelCorrelator),
            &config,
            &image,
            &template,
        )?
    } else {
        run(
            &locator.with_correlator(ScalarCorrelator),
            &config,
            &image,
            &template,
        )?
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
