use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::ApiError;

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    message: String,
}

/// Ask a JSON-RPC wallet provider for its chain id (`eth_chainId`).
pub async fn chain_id(http: &Client, rpc_url: &str) -> Result<u64, ApiError> {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "method": "eth_chainId", "params": [] });
    let resp = http.post(rpc_url).json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Server { status: status.as_u16(), message: None });
    }
    let parsed: RpcResponse = resp
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    if let Some(err) = parsed.error {
        return Err(ApiError::Server { status: status.as_u16(), message: Some(err.message) });
    }
    let hex_id = parsed
        .result
        .ok_or_else(|| ApiError::Decode("missing result".to_string()))?;
    parse_chain_id(&hex_id).ok_or_else(|| ApiError::Decode(format!("bad chain id {hex_id}")))
}

fn parse_chain_id(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x")?;
    u64::from_str_radix(digits, 16).ok()
}
