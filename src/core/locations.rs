use crate::core::{
    ConfigProvider, Extraction, Pipeline, Record, Storage, TransformResult, PIN_PROJECTION,
};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// 批量提取管道:一次抓取完整的圖書館座標清單
pub struct LocationsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> LocationsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub fn with_client(storage: S, config: C, client: Client) -> Self {
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LocationsPipeline<S, C> {
    async fn extract(&self) -> Result<Extraction> {
        tracing::info!(
            "📥 Fetching library listing from: {}",
            self.config.listing_endpoint()
        );

        // 構建請求
        let request = self
            .client
            .get(self.config.listing_endpoint())
            .query(&[("page_size", self.config.page_size().to_string())])
            .timeout(std::time::Duration::from_secs(
                self.config.timeout_seconds(),
            ));

        // 執行請求
        let response = request.send().await?;
        tracing::debug!("Listing response status: {}", response.status());

        let mut json_data: serde_json::Value = response.json().await?;

        // 頂層必須有 libraries 陣列
        let libraries = match json_data.get_mut("libraries") {
            Some(value) => value.take(),
            None => {
                return Err(EtlError::MalformedResponseError {
                    message: "listing response has no 'libraries' key".to_string(),
                })
            }
        };

        let items = match libraries {
            serde_json::Value::Array(items) => items,
            _ => {
                return Err(EtlError::MalformedResponseError {
                    message: "'libraries' is not an array".to_string(),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match item {
                serde_json::Value::Object(obj) => records.push(Record::from_object(obj)),
                other => {
                    return Err(EtlError::MalformedResponseError {
                        message: format!("'libraries' entry is not an object: {}", other),
                    })
                }
            }
        }

        tracing::info!("📥 Fetched {} library records", records.len());
        Ok(Extraction::complete(records))
    }

    async fn transform(&self, data: Extraction) -> Result<TransformResult> {
        tracing::info!(
            "🔄 Projecting {} records through the {} projection",
            data.records.len(),
            PIN_PROJECTION.name
        );

        let mut rows = Vec::with_capacity(data.records.len());
        for record in &data.records {
            rows.push(PIN_PROJECTION.project(record)?);
        }

        Ok(TransformResult {
            header: PIN_PROJECTION.header(),
            rows,
            halt: data.halt,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!(
            "{}/{}",
            self.config.output_path(),
            self.config.locations_file()
        );

        let csv_data = result.to_csv_bytes()?;
        tracing::debug!("Writing {} bytes to storage", csv_data.len());
        self.storage
            .write_file(self.config.locations_file(), &csv_data)
            .await?;

        tracing::info!("💾 Locations saved: {}", output_path);
        Ok(output_path)
    }
}
