use httpmock::prelude::*;
use small_dash::app;
use small_dash::config::{CliConfig, Command};
use small_dash::core::Growth;
use small_dash::{DashConfig, DashError, GdpSettings, GdpTable, HttpSource, LocalFileSource, YearRange};
use clap::Parser;
use std::time::Duration;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "\
Country Name,Country Code,Indicator Name,1960,1961,1962
Germany,DEU,GDP (current US$),100,120,150
France,FRA,GDP (current US$),0,40,80
\"Korea, Rep.\",KOR,GDP (current US$),,,90
";

fn bundled_data() -> String {
    format!("{}/data/gdp_data.csv", env!("CARGO_MANIFEST_DIR"))
}

async fn bundled_table() -> GdpTable {
    GdpTable::load(&LocalFileSource::new(bundled_data()), &GdpSettings::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_load_from_local_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gdp.csv");
    tokio::fs::write(&path, SAMPLE_CSV).await.unwrap();

    let table = GdpTable::load(&LocalFileSource::new(&path), &GdpSettings::default())
        .await
        .unwrap();

    assert_eq!(table.len(), 7);
    assert_eq!(table.country_name("KOR"), Some("Korea, Rep."));
    assert_eq!(table.year_bounds(), Some(YearRange::new(1960, 1962).unwrap()));
}

#[tokio::test]
async fn test_missing_file_is_fatal_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let source = LocalFileSource::new(temp_dir.path().join("nope.csv"));

    let err = GdpTable::load(&source, &GdpSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DashError::IoError(_)));
}

#[tokio::test]
async fn test_load_from_http_source() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/gdp.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(SAMPLE_CSV);
        })
        .await;

    let source = HttpSource::new(server.url("/gdp.csv"), Duration::from_secs(5)).unwrap();
    let table = GdpTable::load(&source, &GdpSettings::default())
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(table.gdp("DEU", 1962), Some(150.0));
}

#[tokio::test]
async fn test_http_failure_is_reported() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/failed");
            then.status(500);
        })
        .await;

    let source = HttpSource::new(server.url("/failed"), Duration::from_secs(5)).unwrap();
    let err = GdpTable::load(&source, &GdpSettings::default())
        .await
        .unwrap_err();

    api_mock.assert_async().await;
    assert!(matches!(err, DashError::HttpStatusError { status: 500, .. }));
}

#[tokio::test]
async fn test_filtered_records_stay_inside_range_and_selection() {
    let table = bundled_table().await;
    let selection = ["DEU", "JPN", "KOR"];

    for (from, to) in [(1960, 2022), (1975, 1975), (1990, 2005), (2020, 2022)] {
        let range = YearRange::new(from, to).unwrap();
        let rows = table.filter(&range, &selection);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| from <= r.year && r.year <= to));
        assert!(rows
            .iter()
            .all(|r| selection.contains(&r.country_code.as_str())));
    }
}

#[tokio::test]
async fn test_metrics_on_bundled_data() {
    let table = bundled_table().await;
    let range = YearRange::new(1960, 2022).unwrap();
    let metrics = table.metrics(&range, &["DEU", "TUV", "XXX"]);

    assert_eq!(metrics.len(), 2);
    assert!(metrics[0].growth.percent().unwrap() > 0.0);
    // no value in 1960
    assert_eq!(metrics[1].country_code, "TUV");
    assert_eq!(metrics[1].growth, Growth::NotAvailable);
}

#[tokio::test]
async fn test_run_gdp_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gdp.csv");
    tokio::fs::write(&path, SAMPLE_CSV).await.unwrap();
    let path = path.to_str().unwrap().to_string();

    let cli = CliConfig::try_parse_from([
        "small-dash",
        "gdp",
        "--data",
        path.as_str(),
        "--countries",
        "germany,FRA",
        "--format",
        "json",
    ])
    .unwrap();
    let Command::Gdp(args) = &cli.command else {
        panic!("expected gdp command");
    };

    let output = app::run_gdp(&DashConfig::default(), args).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["view"]["range"]["from"], 1960);
    assert_eq!(json["view"]["range"]["to"], 1962);
    assert_eq!(json["view"]["metrics"][0]["growth"]["percent"], 50.0);
    assert_eq!(json["view"]["metrics"][1]["growth"], "not_available");
    assert_eq!(json["series"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_run_gdp_text_with_empty_selection() {
    let cli = CliConfig::try_parse_from([
        "small-dash",
        "gdp",
        "--data",
        bundled_data().as_str(),
        "--countries",
        "Atlantis",
    ])
    .unwrap();
    let Command::Gdp(args) = &cli.command else {
        panic!("expected gdp command");
    };

    let output = app::run_gdp(&DashConfig::default(), args).await.unwrap();
    assert!(output.contains("No data for this selection."));
}

#[tokio::test]
async fn test_run_gdp_uses_default_countries() {
    let cli = CliConfig::try_parse_from([
        "small-dash",
        "gdp",
        "--data",
        bundled_data().as_str(),
        "--from",
        "2000",
        "--to",
        "2010",
    ])
    .unwrap();
    let Command::Gdp(args) = &cli.command else {
        panic!("expected gdp command");
    };

    let output = app::run_gdp(&DashConfig::default(), args).await.unwrap();
    for code in ["DEU", "FRA", "GBR", "BRA", "MEX", "JPN"] {
        assert!(output.contains(&format!("({})", code)), "missing {}", code);
    }
    assert!(!output.contains("(USA)"));
}

#[tokio::test]
async fn test_run_gdp_html_cards() {
    let cli = CliConfig::try_parse_from([
        "small-dash",
        "gdp",
        "--data",
        bundled_data().as_str(),
        "--countries",
        "DEU",
        "--format",
        "html",
    ])
    .unwrap();
    let Command::Gdp(args) = &cli.command else {
        panic!("expected gdp command");
    };

    let output = app::run_gdp(&DashConfig::default(), args).await.unwrap();
    assert!(output.starts_with("<div class=\"card\">"));
    assert!(output.contains("GDP from 1960 to 2022"));
    assert!(output.contains("Germany (DEU) GDP"));
    assert_eq!(output.matches("class=\"metric\"").count(), 1);
    assert!(output.trim_end().ends_with("</div>"));
}
