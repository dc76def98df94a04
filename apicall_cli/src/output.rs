use apicall::{Outcome, Response};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
pub struct CheckRow {
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Success")]
    #[serde(rename = "Success")]
    pub success: bool,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Errors")]
    #[serde(rename = "Errors")]
    pub errors: String,
}

impl CheckRow {
    pub fn success(response: &Response) -> Self {
        Self {
            status: response.status.to_string(),
            success: true,
            category: "-".to_string(),
            errors: String::new(),
        }
    }

    pub fn from_outcome(outcome: &Outcome) -> Self {
        Self {
            status: outcome
                .response()
                .map(|r| r.status.to_string())
                .unwrap_or_else(|| "-".to_string()),
            success: outcome.is_success(),
            category: outcome
                .category()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            errors: outcome.errors().full_messages().join(", "),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct CategoryRow {
    #[tabled(rename = "#")]
    #[serde(rename = "Precedence")]
    pub precedence: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Error")]
    #[serde(rename = "Error")]
    pub error: String,
    #[tabled(rename = "Message")]
    #[serde(rename = "Message")]
    pub message: String,
}

// -- Table output --

pub fn print_check_table(rows: Vec<CheckRow>) {
    println!("{}", Table::new(rows));
}

pub fn print_categories_table(rows: Vec<CategoryRow>) {
    println!("{}", Table::new(rows));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
