//! Tool protocol session: newline-delimited JSON-RPC 2.0 over stdio.
//!
//! Messages are handled strictly one at a time. Notifications get no reply;
//! hard tool failures surface as JSON-RPC errors, everything else as content.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::tools::{Arguments, ToolRegistry};

pub const SERVER_NAME: &str = "neodb";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn new(id: Value, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };

        Self {
            jsonrpc: "2.0",
            id,
            result,
            error,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    #[serde(default)]
    protocol_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Arguments>,
}

fn parse_params<T>(params: Option<Value>) -> Result<T, JsonRpcError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn invalid_request(id: Value, reason: impl std::fmt::Display) -> JsonRpcResponse {
    log::warn!("Invalid request from host: {}", reason);
    JsonRpcResponse::new(
        id,
        Err(JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {}", reason))),
    )
}

/// Serves the tool registry to a host over a line-oriented JSON-RPC stream.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Run the session on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read from host")?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    log::debug!("<- {}", line.trim_end());
                    self.handle_line(line).await
                }
                Err(e) => {
                    log::warn!("Frame from host is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::new(
                        Value::Null,
                        Err(JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e))),
                    ))
                }
            };

            if let Some(response) = response {
                let mut frame =
                    serde_json::to_string(&response).context("Failed to encode response")?;
                log::debug!("-> {}", frame);
                frame.push('\n');

                writer
                    .write_all(frame.as_bytes())
                    .await
                    .context("Failed to write to host")?;
                writer.flush().await.context("Failed to flush to host")?;
            }
        }

        log::info!("Host closed the session");
        Ok(())
    }

    /// Handle one raw frame; `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Unparseable frame from host: {}", e);
                return Some(JsonRpcResponse::new(
                    Value::Null,
                    Err(JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e))),
                ));
            }
        };

        // Replies from the host carry no method and need no answer.
        if message.get("method").is_none()
            && (message.get("result").is_some() || message.get("error").is_some())
        {
            return None;
        }

        if !message.is_object() {
            return Some(invalid_request(Value::Null, "expected a single request object"));
        }

        let id = message.get("id").cloned();
        if id == Some(Value::Null) {
            return Some(invalid_request(Value::Null, "id must not be null"));
        }

        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(_) if id.is_none() => None,
            Err(e) => Some(invalid_request(id.unwrap_or(Value::Null), e)),
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            log::debug!("Notification: {}", request.method);
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.list_tools() })),
            "tools/call" => self.call_tool(request.params).await,
            method => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        };

        Some(JsonRpcResponse::new(id, outcome))
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => parse_params(Some(params))?,
            None => InitializeParams::default(),
        };
        let protocol_version = params
            .protocol_version
            .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string());

        log::info!("Host initialized session (protocol {})", protocol_version);

        Ok(json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false },
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        }))
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = parse_params(params)?;
        let arguments = params.arguments.unwrap_or_default();

        match self.registry.invoke(&params.name, &arguments).await {
            Ok(content) => Ok(json!({ "content": content, "isError": false })),
            Err(e) => {
                log::warn!("{}: {}", params.name, e);
                Err(JsonRpcError::new(INVALID_PARAMS, e.to_string()))
            }
        }
    }
}
