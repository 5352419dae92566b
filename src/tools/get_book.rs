use async_trait::async_trait;
use serde_json::json;

use super::format::format_book;
use super::{required_str, Arguments, Content, Tool, ToolDescriptor, ToolError};
use crate::neodb::{CatalogApi, Endpoint};

/// Fetches a single book by its catalog ID.
pub struct GetBook;

#[async_trait]
impl Tool for GetBook {
    fn name(&self) -> &'static str {
        "get-book"
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: "Get detailed information about a specific book",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "book_id": {
                        "type": "string",
                        "description": "The ID of the book to retrieve",
                    },
                },
                "required": ["book_id"],
            }),
        }
    }

    async fn run(&self, api: &dyn CatalogApi, args: &Arguments) -> Result<Vec<Content>, ToolError> {
        let book_id = required_str(args, "book_id")?;

        let response = api.fetch(&Endpoint::book(book_id)).await;

        // Any status other than 200 reads the same to the caller as an empty body.
        let book = match response.usable_body() {
            Some(book) if response.is_success() => book,
            _ => {
                log::warn!("GetBook: no book {} (status {})", book_id, response.status);
                return Ok(vec![Content::text(format!(
                    "Failed to retrieve book with ID: {}",
                    book_id
                ))]);
            }
        };

        Ok(vec![Content::text(format_book(book))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neodb::ApiResponse;
    use crate::tools::testing::RecordingApi;

    fn book_id(id: &str) -> Arguments {
        let mut args = Arguments::new();
        args.insert("book_id".to_string(), json!(id));
        args
    }

    #[tokio::test]
    async fn test_missing_book_id_skips_network() {
        let api = RecordingApi::new(ApiResponse::ok(json!({"title": "Dune"})));

        let err = GetBook.run(&api, &Arguments::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing book_id parameter");

        let err = GetBook.run(&api, &book_id("")).await.unwrap_err();
        assert_eq!(err, ToolError::MissingArgument("book_id"));

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_book_found() {
        let api = RecordingApi::new(ApiResponse::ok(json!({
            "title": "Dune",
            "author": ["Frank Herbert"],
        })));
        let content = GetBook.run(&api, &book_id("3Jk9")).await.unwrap();

        assert_eq!(
            content,
            vec![Content::text(
                "Title: Dune\n\
                Author: Frank Herbert\n\
                Rating: N/A\n\
                Description: No description available\n\
                ---"
            )]
        );
        assert_eq!(api.calls(), vec![Endpoint::book("3Jk9")]);
        assert_eq!(api.calls()[0].path(), "/api/book/3Jk9");
    }

    #[tokio::test]
    async fn test_failed_status() {
        for status in [404, 401, 500] {
            let api = RecordingApi::new(ApiResponse::failed(status));
            let content = GetBook.run(&api, &book_id("missing")).await.unwrap();
            assert_eq!(
                content,
                vec![Content::text("Failed to retrieve book with ID: missing")]
            );
        }
    }

    #[tokio::test]
    async fn test_empty_body() {
        let api = RecordingApi::new(ApiResponse::ok(json!({})));
        let content = GetBook.run(&api, &book_id("x")).await.unwrap();
        assert_eq!(content, vec![Content::text("Failed to retrieve book with ID: x")]);
    }
}
