use crate::core::{
    ConfigProvider, Extraction, Halt, OnError, Pipeline, Record, Storage, TransformResult,
    DETAIL_PROJECTION,
};
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};

/// 詳情豐富管道:逐筆查詢座標清單中的圖書館詳細資料
pub struct DetailsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

enum LookupOutcome {
    Fetched(Record),
    Failed(u16),
}

impl<S: Storage, C: ConfigProvider> DetailsPipeline<S, C> {
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

    fn detail_url(&self, id: &str) -> String {
        self.config.detail_endpoint().replace("{id}", id)
    }

    /// 單筆詳情查詢,retry 策略下最多加查 retry_attempts 次
    async fn lookup_detail(&self, id: &str) -> Result<LookupOutcome> {
        let endpoint = self.detail_url(id);
        let attempts = match self.config.on_error() {
            OnError::Retry => 1 + self.config.retry_attempts(),
            _ => 1,
        };

        let mut last_status = 0u16;
        for attempt in 1..=attempts {
            if attempt > 1 {
                tracing::debug!(
                    "🔄 Retry {}/{} for record {}",
                    attempt - 1,
                    self.config.retry_attempts(),
                    id
                );
                tokio::time::sleep(std::time::Duration::from_millis(
                    self.config.retry_delay_ms(),
                ))
                .await;
            }

            let response = self
                .client
                .get(&endpoint)
                .timeout(std::time::Duration::from_secs(
                    self.config.timeout_seconds(),
                ))
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::OK {
                let json_data: serde_json::Value = response.json().await?;
                return match json_data {
                    serde_json::Value::Object(obj) => {
                        Ok(LookupOutcome::Fetched(Record::from_object(obj)))
                    }
                    _ => Err(EtlError::MalformedResponseError {
                        message: format!("detail response for record {} is not a JSON object", id),
                    }),
                };
            }

            last_status = status.as_u16();
        }

        Ok(LookupOutcome::Failed(last_status))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DetailsPipeline<S, C> {
    async fn extract(&self) -> Result<Extraction> {
        tracing::info!(
            "📂 Reading location ids from: {}",
            self.config.locations_file()
        );

        let input = self.storage.read_file(self.config.locations_file()).await?;
        let mut reader = csv::Reader::from_reader(input.as_slice());

        // 第一欄是 id,標頭列由 reader 自動跳過
        let mut ids = Vec::new();
        for row in reader.records() {
            let row = row?;
            match row.get(0) {
                Some(id) if !id.is_empty() => ids.push(id.to_string()),
                _ => continue,
            }
        }

        tracing::info!("📂 Found {} location ids", ids.len());

        let cap = self.config.max_records();
        let mut records = Vec::new();
        let mut halt = None;

        for id in &ids {
            match self.lookup_detail(id).await? {
                LookupOutcome::Fetched(record) => {
                    tracing::debug!("✅ Fetched details for record {}", id);
                    records.push(record);
                }
                LookupOutcome::Failed(status) => match self.config.on_error() {
                    OnError::Skip => {
                        tracing::warn!(
                            "⏭️ Got status code {} for record {}, skipping",
                            status,
                            id
                        );
                        continue;
                    }
                    _ => {
                        tracing::warn!(
                            "⚠️ Got status code {} for record {}, stopping detail lookups",
                            status,
                            id
                        );
                        halt = Some(Halt::HttpStatus(status));
                        break;
                    }
                },
            }

            if let Some(limit) = cap {
                if records.len() >= limit {
                    tracing::info!("✅ Record cap of {} reached, stopping detail lookups", limit);
                    halt = Some(Halt::RecordCap(limit));
                    break;
                }
            }
        }

        Ok(Extraction { records, halt })
    }

    async fn transform(&self, data: Extraction) -> Result<TransformResult> {
        tracing::info!(
            "🔄 Projecting {} records through the {} projection",
            data.records.len(),
            DETAIL_PROJECTION.name
        );

        let mut rows = Vec::with_capacity(data.records.len());
        for record in &data.records {
            rows.push(DETAIL_PROJECTION.project(record)?);
        }

        Ok(TransformResult {
            header: DETAIL_PROJECTION.header(),
            rows,
            halt: data.halt,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!(
            "{}/{}",
            self.config.output_path(),
            self.config.libraries_file()
        );

        let csv_data = result.to_csv_bytes()?;
        self.storage
            .write_file(self.config.libraries_file(), &csv_data)
            .await?;

        tracing::info!("💾 Libraries saved: {}", output_path);
        Ok(output_path)
    }
}
