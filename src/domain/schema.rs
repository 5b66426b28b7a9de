use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};

/// 兩條管道共用的欄位投影定義
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

/// 批量列表端點的地理座標投影
pub const PIN_PROJECTION: Projection = Projection {
    name: "pin",
    fields: &[
        "id",
        "Library_Geolocation__Latitude__s",
        "Library_Geolocation__Longitude__s",
    ],
};

/// 詳情端點的完整投影
pub const DETAIL_PROJECTION: Projection = Projection {
    name: "detail",
    fields: &[
        "id",
        "Name",
        "Street__c",
        "City__c",
        "State_Province_Region__c",
        "Postal_Zip_Code__c",
        "Country__c",
        "Traveling_Library__c",
        "Official_Charter_Number__c",
        "First_Map_Date__c",
        "Map_Me__c",
        "Map_Date__c",
        "Duplicate_Charter_Number__c",
        "Count_of_Primary_Stewards__c",
        "Latitude_MapAnything__c",
        "Longitude_MapAnything__c",
        "Library_Geolocation__Latitude__s",
        "Library_Geolocation__Longitude__s",
        "check_in_count",
    ],
};

impl Projection {
    pub fn header(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.to_string()).collect()
    }

    /// 缺少欄位視為致命錯誤,null 輸出為空欄
    pub fn project(&self, record: &Record) -> Result<Vec<String>> {
        let mut row = Vec::with_capacity(self.fields.len());

        for field in self.fields {
            let value =
                record
                    .data
                    .get(*field)
                    .ok_or_else(|| EtlError::MissingFieldError {
                        record_id: record.display_id(),
                        field: field.to_string(),
                    })?;
            row.push(render_cell(value));
        }

        Ok(row)
    }
}

fn render_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
