use apicall::messages::Catalog;
use apicall::ErrorCategory;

use crate::output::{print_categories_table, print_json, CategoryRow, OutputFormat};

pub fn run(format: &OutputFormat) {
    let rows = build_rows();
    match format {
        OutputFormat::Table => print_categories_table(rows),
        OutputFormat::Json => print_json(&rows),
    }
}

/// One row per built-in category: detected ones in precedence order first,
/// then the categories never detected from a response.
pub fn build_rows() -> Vec<CategoryRow> {
    let catalog = Catalog::global();
    let precedence = &apicall::classifier::PRECEDENCE;
    let ranked = precedence
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, category)| (Some(index + 1), category));
    let unranked = ErrorCategory::ALL
        .into_iter()
        .filter(|category| !precedence.contains(category))
        .map(|category| (None, category));

    ranked
        .chain(unranked)
        .map(|(rank, category)| CategoryRow {
            precedence: rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: status_label(&category),
            error: error_name(&category),
            message: catalog.category_message(&category),
            category: category.to_string(),
        })
        .collect()
}

fn status_label(category: &ErrorCategory) -> String {
    match category {
        ErrorCategory::ServerError => ">= 500".to_string(),
        ErrorCategory::ClientError => ">= 400".to_string(),
        other => other
            .status_code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string()),
    }
}

/// `not_found` → `NotFound`, the `ServiceError` variant it raises by default.
fn error_name(category: &ErrorCategory) -> String {
    let tag = category.as_str();
    let base = match category {
        ErrorCategory::ValidationError
        | ErrorCategory::RequestError
        | ErrorCategory::ClientError
        | ErrorCategory::ServerError => tag.trim_end_matches("_error"),
        _ => tag,
    };
    base.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
