use async_trait::async_trait;
use serde_json::{json, Value};

use super::format::format_book;
use super::{required_str, status_message, Arguments, Content, Tool, ToolDescriptor, ToolError};
use crate::neodb::{CatalogApi, Endpoint};

const STATUS_MESSAGES: &[(u16, &str)] = &[(400, "Bad request")];

/// Searches the catalog, first page only.
pub struct SearchBooks;

#[async_trait]
impl Tool for SearchBooks {
    fn name(&self) -> &'static str {
        "search-books"
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: "Search items in catalog",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query for books",
                    }
                },
                "required": ["query"],
            }),
        }
    }

    async fn run(&self, api: &dyn CatalogApi, args: &Arguments) -> Result<Vec<Content>, ToolError> {
        let query = required_str(args, "query")?;

        let response = api.fetch(&Endpoint::catalog_search(query)).await;

        if !response.is_success() {
            return Ok(vec![Content::text(status_message(response.status, STATUS_MESSAGES))]);
        }

        let Some(results) = response.usable_body() else {
            log::warn!("SearchBooks: empty search payload for '{}'", query);
            return Ok(vec![Content::text("Failed to search books")]);
        };

        let books = results
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if books.is_empty() {
            log::info!("SearchBooks: no results for '{}'", query);
            return Ok(vec![Content::text(format!("No books found for query: {}", query))]);
        }

        log::info!("SearchBooks: {} result(s) for '{}'", books.len(), query);

        let formatted: Vec<String> = books.iter().map(format_book).collect();
        let text = format!("Search results for '{}':\n\n{}", query, formatted.join("\n"));

        Ok(vec![Content::text(text)])
    }
}
