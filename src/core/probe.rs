use crate::utils::error::Result;
use reqwest::Client;

/// 列表端點連通性探測結果
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub status: u16,
    pub success: bool,
    pub headers: Vec<(String, String)>,
}

/// 對列表端點發出一次 GET,回報狀態與全部回應標頭
pub async fn probe_endpoint(
    client: &Client,
    endpoint: &str,
    page_size: usize,
) -> Result<ProbeReport> {
    tracing::debug!("Probing endpoint: {}", endpoint);

    let response = client
        .get(endpoint)
        .query(&[("page_size", page_size.to_string())])
        .send()
        .await?;

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).to_string(),
            )
        })
        .collect();

    Ok(ProbeReport {
        status: status.as_u16(),
        success: status == reqwest::StatusCode::OK,
        headers,
    })
}
