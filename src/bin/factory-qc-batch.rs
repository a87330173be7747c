//! Command-line batch runs against the inference service.

use std::path::PathBuf;

use factory_qc::batch::{self, DEFAULT_IMAGE_REPORT};
use factory_qc::config::{self, ApiSettings, DashboardConfig};
use factory_qc::inference::HttpInferenceClient;
use factory_qc::logging::{self, ConsoleTarget};
use factory_qc::sensors::SensorHistory;

fn main() {
    logging::local_offset();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Images { dir: PathBuf, out: PathBuf },
    Sensors { csv: PathBuf, limit: Option<usize> },
}

#[derive(Debug, PartialEq)]
struct CliOptions {
    command: Command,
    api_url: Option<String>,
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init_with(ConsoleTarget::Stderr) {
        eprintln!("Logging disabled: {err}");
    }
    let settings = api_settings(options.api_url.as_deref())?;
    let client = HttpInferenceClient::new(&settings).map_err(|err| err.to_string())?;
    let mut stdout = std::io::stdout();
    match options.command {
        Command::Images { dir, out } => {
            let images = batch::collect_images(&dir).map_err(|err| err.to_string())?;
            println!(
                "Running inference on {} images in {} via {}",
                images.len(),
                dir.display(),
                client.image_url()
            );
            let summary = batch::run_image_batch(&client, &images, &out, &mut stdout)
                .map_err(|err| err.to_string())?;
            println!();
            println!(
                "{} classified, {} defective, {} failed",
                summary.classified, summary.defects, summary.failures
            );
            println!("Results saved to {}", out.display());
        }
        Command::Sensors { csv, limit } => {
            let rows = batch::read_sensor_rows(&csv, limit).map_err(|err| err.to_string())?;
            println!(
                "Replaying {} readings from {} via {}",
                rows.len(),
                csv.display(),
                client.sensor_url()
            );
            let capacity = load_dashboard_config().sensor.history_capacity;
            let mut history = SensorHistory::with_capacity(capacity);
            let summary = batch::run_sensor_batch(&client, &rows, &mut history, &mut stdout)
                .map_err(|err| err.to_string())?;
            println!();
            println!(
                "{} analyzed, {} anomalies, {} failed",
                summary.analyzed, summary.anomalies, summary.failures
            );
            if summary.labelled > 0 {
                println!(
                    "Agreed with recorded labels on {}/{} rows",
                    summary.agreed, summary.labelled
                );
            }
            let recent = history.summary();
            if let (Some(mean), Some(max)) = (recent.mean_error, recent.max_error) {
                println!(
                    "Last {} readings: {} anomalies, mean error {mean:.4}, max error {max:.4}",
                    recent.count, recent.anomalies
                );
            }
        }
    }
    Ok(())
}

fn load_dashboard_config() -> DashboardConfig {
    config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default configuration: {err}");
        DashboardConfig::default()
    })
}

/// `--api-url` wins over the environment and the config file.
fn api_settings(api_url: Option<&str>) -> Result<ApiSettings, String> {
    let mut settings = load_dashboard_config().api;
    if let Some(url) = api_url {
        settings.base_url =
            config::normalize_base_url(url).map_err(|err| format!("--api-url: {err}"))?;
    }
    Ok(settings)
}

fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut out: Option<PathBuf> = None;
    let mut limit: Option<usize> = None;
    let mut api_url: Option<String> = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                out = Some(PathBuf::from(value));
            }
            "--limit" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--limit requires a value".to_string())?;
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --limit value: {value}"))?;
                limit = Some(parsed);
            }
            "--api-url" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--api-url requires a value".to_string())?;
                api_url = Some(value.clone());
            }
            unknown if unknown.starts_with("--") => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
            value => positional.push(value.to_string()),
        }
        idx += 1;
    }

    let command = match positional.as_slice() {
        [command, dir] if command == "images" => {
            if limit.is_some() {
                return Err("--limit only applies to the sensors command".to_string());
            }
            Command::Images {
                dir: PathBuf::from(dir),
                out: out.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_REPORT)),
            }
        }
        [command, csv] if command == "sensors" => {
            if out.is_some() {
                return Err("--out only applies to the images command".to_string());
            }
            Command::Sensors {
                csv: PathBuf::from(csv),
                limit,
            }
        }
        _ => return Err(help_text()),
    };
    Ok(Some(CliOptions { command, api_url }))
}

fn help_text() -> String {
    [
        "factory-qc-batch",
        "",
        "Usage:",
        "  factory-qc-batch images <dir> [--out <csv>] [--api-url <url>]",
        "  factory-qc-batch sensors <csv> [--limit <n>] [--api-url <url>]",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn images_command_defaults_report_path() {
        let options = parse_args(args(&["images", "test_images"])).unwrap().unwrap();
        assert_eq!(
            options.command,
            Command::Images {
                dir: PathBuf::from("test_images"),
                out: PathBuf::from(DEFAULT_IMAGE_REPORT),
            }
        );
        assert!(options.api_url.is_none());
    }

    #[test]
    fn sensors_command_reads_limit_and_api_url() {
        let options = parse_args(args(&[
            "sensors",
            "data.csv",
            "--limit",
            "50",
            "--api-url",
            "http://qc.local:9000",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(
            options.command,
            Command::Sensors {
                csv: PathBuf::from("data.csv"),
                limit: Some(50),
            }
        );
        assert_eq!(options.api_url.as_deref(), Some("http://qc.local:9000"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&["sensors", "data.csv", "--limit", "many"])).is_err());
        assert!(parse_args(args(&["images", "dir", "--limit", "3"])).is_err());
        assert!(parse_args(args(&["images"])).is_err());
        assert!(parse_args(args(&["images", "dir", "--verbose"])).is_err());
    }
}
