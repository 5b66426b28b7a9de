use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn from_object(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut data = HashMap::new();
        for (key, value) in obj {
            data.insert(key, value);
        }
        Self { data }
    }

    /// id 字段用於日誌與錯誤訊息
    pub fn display_id(&self) -> String {
        match self.data.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => "<unknown>".to_string(),
        }
    }
}

/// 提取階段提前結束的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    HttpStatus(u16),
    RecordCap(usize),
}

impl std::fmt::Display for Halt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Halt::HttpStatus(status) => write!(f, "got status code {}", status),
            Halt::RecordCap(limit) => write!(f, "record cap of {} reached", limit),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub halt: Option<Halt>,
}

impl Extraction {
    pub fn complete(records: Vec<Record>) -> Self {
        Self {
            records,
            halt: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub halt: Option<Halt>,
}

impl TransformResult {
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        writer.into_inner().map_err(|e| EtlError::ProcessingError {
            message: format!("Failed to finalize CSV output: {}", e),
        })
    }
}

/// 非 200 回應的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    Abort,
    Skip,
    Retry,
}

impl std::str::FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(OnError::Abort),
            "skip" => Ok(OnError::Skip),
            "retry" => Ok(OnError::Retry),
            other => Err(format!(
                "unknown error policy '{}' (expected abort, skip or retry)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_id_variants() {
        let mut data = HashMap::new();
        data.insert(
            "id".to_string(),
            serde_json::Value::String("42".to_string()),
        );
        assert_eq!(Record { data }.display_id(), "42");

        let mut data = HashMap::new();
        data.insert("id".to_string(), serde_json::Value::Number(42.into()));
        assert_eq!(Record { data }.display_id(), "42");

        let record = Record {
            data: HashMap::new(),
        };
        assert_eq!(record.display_id(), "<unknown>");
    }

    #[test]
    fn test_to_csv_bytes_quotes_embedded_commas() {
        let result = TransformResult {
            header: vec!["id".to_string(), "Name".to_string()],
            rows: vec![vec!["1".to_string(), "Main St, Springfield".to_string()]],
            halt: None,
        };

        let bytes = result.to_csv_bytes().unwrap();
        let output = String::from_utf8(bytes).unwrap();

        assert_eq!(output, "id,Name\n1,\"Main St, Springfield\"\n");
    }

    #[test]
    fn test_on_error_parsing() {
        assert_eq!("abort".parse::<OnError>().unwrap(), OnError::Abort);
        assert_eq!("SKIP".parse::<OnError>().unwrap(), OnError::Skip);
        assert_eq!("retry".parse::<OnError>().unwrap(), OnError::Retry);
        assert!("ignore".parse::<OnError>().is_err());
    }

    #[test]
    fn test_halt_display() {
        assert_eq!(Halt::HttpStatus(500).to_string(), "got status code 500");
        assert_eq!(Halt::RecordCap(10).to_string(), "record cap of 10 reached");
    }
}
