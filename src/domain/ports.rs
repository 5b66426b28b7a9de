use crate::domain::model::{Extraction, OnError, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_endpoint(&self) -> &str;
    fn detail_endpoint(&self) -> &str;
    fn page_size(&self) -> usize;
    fn output_path(&self) -> &str;
    fn locations_file(&self) -> &str;
    fn libraries_file(&self) -> &str;
    fn max_records(&self) -> Option<usize>;
    fn on_error(&self) -> OnError;
    fn retry_attempts(&self) -> usize;
    fn retry_delay_ms(&self) -> u64;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extraction>;
    async fn transform(&self, data: Extraction) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
