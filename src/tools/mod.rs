pub mod format;
pub mod get_book;
pub mod search_books;
pub mod user_info;

pub use get_book::GetBook;
pub use search_books::SearchBooks;
pub use user_info::UserInfo;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::neodb::CatalogApi;

/// Named arguments passed to a tool invocation.
pub type Arguments = Map<String, Value>;

/// Text returned when the server was started without a base URL or token.
pub const MISSING_CONFIGURATION: &str = "Server configuration missing API base URL or access token";

/// Hard failures that abort a tool call and propagate to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Missing {0} parameter")]
    MissingArgument(&'static str),
}

/// Static description of a tool as advertised to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Names listed under the schema's `required` key.
    #[cfg(test)]
    pub fn required(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A unit of tool output. Only text is ever produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    #[cfg(test)]
    pub fn as_text(&self) -> &str {
        match self {
            Content::Text { text } => text,
        }
    }
}

/// Tool trait for host-orchestrated catalog operations.
///
/// Object-safe so the registry can dispatch by name.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn descriptor(&self) -> ToolDescriptor;
    async fn run(&self, api: &dyn CatalogApi, args: &Arguments) -> Result<Vec<Content>, ToolError>;
}

/// Fetch a required string argument; absent, null, non-string and empty all count as missing.
pub fn required_str<'a>(args: &'a Arguments, key: &'static str) -> Result<&'a str, ToolError> {
    match args.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ToolError::MissingArgument(key)),
    }
}

/// Map a non-200 status through a tool's known messages, with a generic fallback.
pub fn status_message(status: u16, known: &[(u16, &str)]) -> String {
    known
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| format!("Request failed with status code: {}", status))
}

/// Owns the three catalog tools and dispatches invocations by name.
pub struct ToolRegistry {
    config: Config,
    api: Arc<dyn CatalogApi>,
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(config: Config, api: Arc<dyn CatalogApi>) -> Self {
        Self {
            config,
            api,
            tools: vec![Box::new(UserInfo), Box::new(SearchBooks), Box::new(GetBook)],
        }
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|tool| tool.descriptor()).collect()
    }

    pub async fn invoke(&self, name: &str, args: &Arguments) -> Result<Vec<Content>, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        if !self.config.is_complete() {
            log::warn!("{}: refusing to run, configuration incomplete", name);
            return Ok(vec![Content::text(MISSING_CONFIGURATION)]);
        }

        log::info!("{}: invoked", name);
        tool.run(&*self.api, args).await
    }
}
