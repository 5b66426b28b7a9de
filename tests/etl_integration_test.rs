use anyhow::Result;
use httpmock::prelude::*;
use lfl_etl::core::OnError;
use lfl_etl::{CliConfig, EtlEngine, LocalStorage, LocationsPipeline};
use tempfile::TempDir;

fn test_config(listing_endpoint: String, output_path: String) -> CliConfig {
    CliConfig {
        listing_endpoint,
        detail_endpoint: "https://appapi.littlefreelibrary.org/libraries/{id}.json".to_string(),
        page_size: 100000,
        output_path,
        locations_file: "locations.csv".to_string(),
        libraries_file: "libraries.csv".to_string(),
        max_records: 10,
        on_error: OnError::Abort,
        retry_attempts: 3,
        retry_delay_ms: 1,
        timeout_seconds: 30,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_bulk_extraction() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let mock_data = serde_json::json!({
        "libraries": [
            {"id": 1, "Library_Geolocation__Latitude__s": 40.0, "Library_Geolocation__Longitude__s": -75.0},
            {"id": 2, "Library_Geolocation__Latitude__s": 41.5, "Library_Geolocation__Longitude__s": -80.25},
            {"id": 3, "Library_Geolocation__Latitude__s": 39.1, "Library_Geolocation__Longitude__s": -94.6}
        ]
    });

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/library/pin.json")
            .query_param("page_size", "100000");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let config = test_config(server.url("/library/pin.json"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = LocationsPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let summary = engine.run().await?;

    api_mock.assert();
    assert_eq!(summary.rows, 3);
    assert!(summary.halt.is_none());

    let csv_path = std::path::Path::new(&output_path).join("locations.csv");
    assert!(csv_path.exists());

    let content = std::fs::read_to_string(&csv_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4); // Header + 3 records
    assert_eq!(
        lines[0],
        "id,Library_Geolocation__Latitude__s,Library_Geolocation__Longitude__s"
    );
    assert_eq!(lines[1], "1,40.0,-75.0");
    assert_eq!(lines[3], "3,39.1,-94.6");

    Ok(())
}

#[tokio::test]
async fn test_extraction_overwrites_previous_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let csv_path = std::path::Path::new(&output_path).join("locations.csv");
    std::fs::write(&csv_path, "stale,content\nfrom,before\nmore,rows\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/library/pin.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "libraries": [
                    {"id": 9, "Library_Geolocation__Latitude__s": 40.0, "Library_Geolocation__Longitude__s": -75.0}
                ]
            }));
    });

    let config = test_config(server.url("/library/pin.json"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = LocationsPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    engine.run().await?;

    api_mock.assert();
    let content = std::fs::read_to_string(&csv_path)?;
    assert_eq!(
        content,
        "id,Library_Geolocation__Latitude__s,Library_Geolocation__Longitude__s\n9,40.0,-75.0\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_non_json_listing_body_fails_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/library/pin.json");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>gateway error</html>");
    });

    let config = test_config(server.url("/library/pin.json"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = LocationsPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await;

    api_mock.assert();
    assert!(result.is_err());

    // 失敗的運行不應留下輸出文件
    let csv_path = std::path::Path::new(&output_path).join("locations.csv");
    assert!(!csv_path.exists());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/library/pin.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "libraries": [
                    {"id": 1, "Library_Geolocation__Latitude__s": 40.0, "Library_Geolocation__Longitude__s": -75.0}
                ]
            }));
    });

    let config = test_config(server.url("/library/pin.json"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = LocationsPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, true);

    let summary = engine.run().await?;

    api_mock.assert();
    assert_eq!(summary.rows, 1);

    Ok(())
}
