// ==========================================
// LTS 化验分析系统 - 命令行主入口
// ==========================================
// 子命令:
//   modules  列出模块及参数规格
//   analyze  判定测量值并生成 PDF 报告
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lts_lab_analyzer::api::{save_report, AnalysisApi, ReportInput};
use lts_lab_analyzer::config::ConfigManager;
use lts_lab_analyzer::domain::{Measurements, ModuleKind};
use lts_lab_analyzer::i18n::tr_with_args;
use lts_lab_analyzer::importer::parse_measurement;
use lts_lab_analyzer::logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: LTS_LAB_ANALYZER_CONFIG or the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Report language (es, en); overrides the configured locale
    #[arg(long, global = true)]
    locale: Option<String>,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules, parameters and acceptance ranges
    Modules,
    /// Evaluate measurements and write the PDF report
    Analyze {
        /// Module (natural_gas, gasoline, meg, teg, demin_water, amines)
        module: ModuleKind,
        /// Sample sheet (.csv/.xlsx/.xls) with parameter/value columns
        #[arg(long)]
        sheet: Option<PathBuf>,
        /// Measurement as key=number, repeatable
        #[arg(long = "value", value_name = "KEY=NUMBER", value_parser = parse_key_value)]
        values: Vec<(String, f64)>,
        /// Operator name
        #[arg(long)]
        operator: String,
        /// Free-text observations
        #[arg(long, default_value = "")]
        observations: String,
        /// Output directory (default: configured output dir)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the text report instead of writing the PDF
        #[arg(long)]
        preview: bool,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=NUMBER, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in '{}'", raw));
    }
    let value = parse_measurement(value).ok_or_else(|| format!("'{}' is not a number", value))?;
    Ok((key.to_string(), value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("LTS 化验分析系统 {}", lts_lab_analyzer::VERSION);

    let config = match &cli.config {
        Some(path) => ConfigManager::load(path),
        None => ConfigManager::from_default_path(),
    }
    .context("无法加载配置")?;

    let locale = match &cli.locale {
        Some(locale) => locale.clone(),
        None => config.get_locale()?,
    };
    let api = AnalysisApi::new(config.report_settings()?, &locale);

    match cli.command {
        Commands::Modules => {
            for module in api.list_modules() {
                println!("{} - {}", module.module, module.name);
                for param in module.parameters {
                    println!("    {:<16} {:<28} {}", param.key, param.label, param.specification);
                }
            }
        }
        Commands::Analyze {
            module,
            sheet,
            values,
            operator,
            observations,
            out,
            preview,
        } => {
            let results = match (sheet, values.is_empty()) {
                (Some(_), false) => bail!("--sheet 与 --value 不能同时使用"),
                (Some(path), true) => {
                    if !path.exists() {
                        let shown = path.display().to_string();
                        bail!(tr_with_args(api.locale(), "import.file_not_found", &[("path", shown.as_str())]));
                    }
                    api.analyze_sheet(module, &path)?
                }
                (None, false) => {
                    let measurements: Measurements = values.into_iter().collect();
                    api.analyze_measurements(module, &measurements)?
                }
                (None, true) => bail!("需要 --sheet 或至少一个 --value"),
            };

            for row in api.results_table(&results) {
                println!(
                    "{:<28} {:>10}  [{}]  {}",
                    row.label, row.value, row.specification, row.verdict
                );
            }

            let input = ReportInput {
                operator,
                results,
                observations,
                timestamp: Local::now().naive_local(),
                locale: None,
            };

            if preview {
                print!("{}", api.preview_report(&input)?);
                return Ok(());
            }

            let rendered = api.generate_report(&input)?;
            let dir = match out {
                Some(dir) => dir,
                None => config.get_output_dir()?,
            };
            let path = save_report(&rendered, &dir)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("h2s=2,1"), Ok(("h2s".to_string(), 2.1)));
        assert!(parse_key_value("h2s").is_err());
        assert!(parse_key_value("=1").is_err());
        assert!(parse_key_value("ph=neutral").is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "lts-lab-analyzer",
            "analyze",
            "meg",
            "--value",
            "ph=7",
            "--value",
            "concentration=70",
            "--operator",
            "Ana",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { module, values, .. } => {
                assert_eq!(module, ModuleKind::Meg);
                assert_eq!(values.len(), 2);
            }
            _ => panic!("Expected Analyze"),
        }
    }
}
