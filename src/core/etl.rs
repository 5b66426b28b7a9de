use crate::core::{Halt, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub rows: usize,
    pub halt: Option<Halt>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting ETL process");
        self.monitor.log_stats("Startup");

        // Extract
        tracing::info!("📥 Extracting data");
        let extraction = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} records", extraction.records.len());
        if let Some(halt) = &extraction.halt {
            tracing::warn!("⚠️ Extraction stopped early: {}", halt);
        }
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("🔄 Transforming data");
        let result = self.pipeline.transform(extraction).await?;
        tracing::info!("🔄 Transformed {} rows", result.rows.len());
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("💾 Loading data");
        let halt = result.halt.clone();
        let rows = result.rows.len();
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            rows,
            halt,
        })
    }
}
