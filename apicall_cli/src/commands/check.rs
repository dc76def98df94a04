use anyhow::Result;
use apicall::apicall_http::{self, Method};
use apicall::validation::{validate_inclusion, validate_presence};
use apicall::{call, try_call, ApiService, Connection, Response, ValidationErrors};
use clap::Args;

use crate::output::{print_check_table, print_json, CheckRow, OutputFormat};

const METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

#[derive(Args)]
pub struct CheckArgs {
    /// Absolute URL, or a path resolved against APICALL_BASE_URL
    pub url: String,

    /// HTTP method: GET, POST, PUT, DELETE
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// JSON request body
    #[arg(long)]
    pub data: Option<String>,

    /// Fail with the typed error instead of reporting the outcome
    #[arg(long)]
    pub strict: bool,

    /// Treat 4xx and 5xx statuses as raised HTTP errors before classification
    #[arg(long)]
    pub raise_for_status: bool,
}

/// A one-off request assembled from command line arguments.
pub struct AdHocRequest {
    connection: Connection,
    method: String,
    path: String,
    data: Option<String>,
}

impl AdHocRequest {
    pub fn new(connection: Connection, method: &str, path: &str, data: Option<&str>) -> Self {
        Self {
            connection,
            method: method.trim().to_uppercase(),
            path: path.to_string(),
            data: data.map(str::to_string),
        }
    }

    fn body(&self) -> Option<serde_json::Value> {
        self.data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

impl ApiService for AdHocRequest {
    fn connection(&self) -> &Connection {
        &self.connection
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        validate_presence(errors, "url", Some(self.path.as_str()));
        validate_inclusion(errors, "method", &self.method, METHODS);
        if self.data.is_some() && self.body().is_none() {
            errors.add("data", "invalid");
        }
    }

    async fn perform(&self, connection: &Connection) -> Result<Response, apicall_http::Error> {
        let method = match self.method.as_str() {
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            _ => Method::GET,
        };
        connection
            .request(method, &self.path, &[], self.body().as_ref())
            .await
    }
}

pub async fn run(args: &CheckArgs, format: &OutputFormat) -> Result<()> {
    let connection = Connection::builder_from_env()
        .raise_for_status(args.raise_for_status)
        .build()?;
    let request = AdHocRequest::new(connection, &args.method, &args.url, args.data.as_deref());

    if args.strict {
        let response = try_call(&request).await?;
        let row = CheckRow::success(&response);
        match format {
            OutputFormat::Table => print_check_table(vec![row]),
            OutputFormat::Json => print_json(&response),
        }
        return Ok(());
    }

    let outcome = call(&request).await;
    match format {
        OutputFormat::Table => print_check_table(vec![CheckRow::from_outcome(&outcome)]),
        OutputFormat::Json => print_json(&outcome),
    }
    Ok(())
}
