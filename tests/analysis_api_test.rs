// ==========================================
// AnalysisApi 端到端测试
// ==========================================
// 流程: 样品表导入 -> 校验 -> 判定 -> 报告 -> PDF 字节流 -> 保存
// ==========================================


use image::{Rgba, RgbaImage};
use lts_lab_analyzer::api::{save_report, AnalysisApi, ApiError, ReportInput, PDF_MIME};
use lts_lab_analyzer::config::{config_keys, ConfigManager};
use lts_lab_analyzer::domain::{ModuleKind, Verdict};
use lts_lab_analyzer::engine::ReportSettings;
use std::fs;
use tempfile::TempDir;
use test_helpers::{contains_bytes, fixed_timestamp, measurements, write_csv_sheet};

#[test]
fn test_sheet_import_to_pdf() {
    lts_lab_analyzer::logging::init_test();

    let (_dir, sheet) = write_csv_sheet(
        "Parámetro,Valor",
        &[("pH", "7,0"), ("Concentración (%wt)", "70"), ("chlorides", "50")],
    );

    let api = AnalysisApi::new(ReportSettings::default(), "es");
    let results = api.analyze_sheet(ModuleKind::Meg, &sheet).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|o| o.verdict == Verdict::Pass));

    let rendered = api
        .generate_report(&ReportInput {
            operator: "Ana".to_string(),
            results,
            observations: "Muestra tomada en la salida del regenerador.".to_string(),
            timestamp: fixed_timestamp(),
            locale: None,
        })
        .unwrap();

    assert_eq!(rendered.file_name, "MEG_Ana_20250601_0830.pdf");
    assert_eq!(rendered.mime, PDF_MIME);
    assert!(rendered.bytes.starts_with(b"%PDF-1.4"));
    assert!(contains_bytes(&rendered.bytes, b"(pH: 7.0 - OK) Tj"));
    assert!(contains_bytes(&rendered.bytes, b"%%EOF"));

    let out = TempDir::new().unwrap();
    let path = save_report(&rendered, out.path().join("informes")).unwrap();
    assert!(path.ends_with("MEG_Ana_20250601_0830.pdf"));
    assert_eq!(fs::read(&path).unwrap(), rendered.bytes);
}

#[test]
fn test_sheet_with_unknown_parameter_rejected() {
    let (_dir, sheet) = write_csv_sheet("parameter,value", &[("h2s", "1"), ("tvr", "3")]);

    let api = AnalysisApi::default();
    match api.analyze_sheet(ModuleKind::NaturalGas, &sheet) {
        Err(ApiError::ImportError(msg)) => assert!(msg.contains("tvr")),
        other => panic!("Expected ImportError, got {:?}", other),
    }
}

#[test]
fn test_missing_sheet_is_not_found() {
    let api = AnalysisApi::default();
    let result = api.analyze_sheet(ModuleKind::Teg, "no_existe/muestra.csv");
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_report_with_logo_from_config() {
    let dir = TempDir::new().unwrap();
    let logo_path = dir.path().join("logo.png");
    RgbaImage::from_pixel(40, 20, Rgba([0, 90, 160, 255]))
        .save(&logo_path)
        .unwrap();

    let config = ConfigManager::load(dir.path().join("config.json")).unwrap();
    config
        .set_config_value(config_keys::LOGO_PATH, logo_path.to_str().unwrap())
        .unwrap();
    config.set_config_value(config_keys::LOCALE, "en").unwrap();

    let api = AnalysisApi::from_config(&config).unwrap();
    assert_eq!(api.locale(), "en");

    let (results, rendered) = api
        .analyze_and_report(
            ModuleKind::NaturalGas,
            &measurements(&[("h2s", 2.2), ("co2", 2.1)]),
            "Luis",
            "",
            fixed_timestamp(),
        )
        .unwrap();

    assert_eq!(results.failed_count(), 2);
    assert!(contains_bytes(&rendered.bytes, b"/Subtype /Image"));
    assert!(contains_bytes(&rendered.bytes, b"/Im1 Do"));
    assert!(contains_bytes(&rendered.bytes, b"(H2S \\(ppm\\): 2.2 - NO) Tj"));
    assert!(contains_bytes(&rendered.bytes, b"(No observations.) Tj"));
}

#[test]
fn test_missing_logo_still_renders() {
    let api = AnalysisApi::new(
        ReportSettings {
            logo_path: Some("no_existe/logopetrogas.png".into()),
            ..ReportSettings::default()
        },
        "es",
    );

    let (_, rendered) = api
        .analyze_and_report(
            ModuleKind::DemineralizedWater,
            &measurements(&[("chlorides", 3.0)]),
            "Ana",
            "",
            fixed_timestamp(),
        )
        .unwrap();

    assert!(rendered.bytes.starts_with(b"%PDF"));
    assert!(!contains_bytes(&rendered.bytes, b"/Im1 Do"));
}
