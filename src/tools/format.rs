use serde_json::Value;

/// Line terminating every formatted book block.
pub const SEPARATOR: &str = "---";

/// Render `record[key]` as display text, or `default` when the field is absent or null.
///
/// Strings are shown verbatim and arrays of strings (NeoDB lists authors that way)
/// are joined with `", "`. Anything else falls back to its JSON text.
pub fn field(record: &Value, key: &str, default: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Format a book into a concise four-line block.
pub fn format_book(book: &Value) -> String {
    format!(
        "Title: {}\nAuthor: {}\nRating: {}\nDescription: {}\n{}",
        field(book, "title", "Unknown"),
        field(book, "author", "Unknown"),
        field(book, "rating", "N/A"),
        field(book, "description", "No description available"),
        SEPARATOR
    )
}

/// Format the `/api/me` payload as a labeled summary.
pub fn format_user(user: &Value) -> String {
    format!(
        "User Information:\n\
        Username: {}\n\
        Display Name: {}\n\
        Email: {}\n\
        URL: {}\n\
        Account Created: {}\n",
        field(user, "username", "Unknown"),
        field(user, "display_name", "Unknown"),
        field(user, "email", "Not provided"),
        field(user, "url", "Not provided"),
        field(user, "created_at", "Unknown"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_book_all_fields() {
        let book = json!({
            "title": "Dune",
            "author": ["Frank Herbert"],
            "rating": 8.7,
            "description": "Desert planet."
        });
        assert_eq!(
            format_book(&book),
            "Title: Dune\nAuthor: Frank Herbert\nRating: 8.7\nDescription: Desert planet.\n---"
        );
    }

    #[test]
    fn test_format_book_missing_fields() {
        let text = format_book(&json!({}));
        assert!(text.contains("Title: Unknown"));
        assert!(text.contains("Author: Unknown"));
        assert!(text.contains("Rating: N/A"));
        assert!(text.contains("Description: No description available"));
        assert!(text.ends_with("\n---"));
    }

    #[test]
    fn test_format_book_null_and_non_object() {
        let text = format_book(&json!({"title": null, "rating": null}));
        assert!(text.contains("Title: Unknown"));
        assert!(text.contains("Rating: N/A"));

        // Not a mapping at all: still formats with defaults.
        assert_eq!(format_book(&json!("oops")), format_book(&json!({})));
    }

    #[test]
    fn test_field_multiple_authors() {
        let book = json!({"author": ["Neil Gaiman", "Terry Pratchett"]});
        assert_eq!(field(&book, "author", "Unknown"), "Neil Gaiman, Terry Pratchett");
    }

    #[test]
    fn test_format_user_partial() {
        let text = format_user(&json!({"username": "alice"}));
        assert_eq!(
            text,
            "User Information:\n\
            Username: alice\n\
            Display Name: Unknown\n\
            Email: Not provided\n\
            URL: Not provided\n\
            Account Created: Unknown\n"
        );
    }
}
