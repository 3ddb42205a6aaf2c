use crate::infra::{parse_date, JsonContextRenderer};
use chrono::{Local, NaiveDate};
use clap::Args;
use patent_filing::config::AppConfig;
use patent_filing::error::AppError;
use patent_filing::workflows::filing::{FilingService, FilingServiceError, FormFields};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").required(true).args(["form", "form_file"]))]
pub(crate) struct FormArgs {
    /// Flat form fields as a JSON object, e.g. '{"applicationType":"Complete"}'
    #[arg(long)]
    pub(crate) form: Option<String>,
    /// Path to a JSON file holding the flat form fields
    #[arg(long)]
    pub(crate) form_file: Option<PathBuf>,
}

impl FormArgs {
    fn fields(&self) -> Result<FormFields, AppError> {
        let raw = match (&self.form, &self.form_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => "{}".to_string(),
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ContextArgs {
    #[command(flatten)]
    pub(crate) form: FormArgs,
    /// Filing date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

fn filing_service() -> Result<FilingService<JsonContextRenderer>, AppError> {
    let config = AppConfig::load()?;
    let rules = config.filing.rules()?;
    Ok(FilingService::new(Arc::new(rules), Arc::new(JsonContextRenderer)))
}

fn quote_json(
    service: &FilingService<JsonContextRenderer>,
    args: &FormArgs,
) -> Result<String, AppError> {
    let breakdown = service.quote(&args.fields()?).map_err(into_app_error)?;
    Ok(serde_json::to_string_pretty(&breakdown)?)
}

fn context_json(
    service: &FilingService<JsonContextRenderer>,
    args: &ContextArgs,
) -> Result<String, AppError> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let context = service
        .prepare(&args.form.fields()?, date)
        .map_err(into_app_error)?;
    Ok(serde_json::to_string_pretty(&context)?)
}

fn into_app_error(error: FilingServiceError) -> AppError {
    match error {
        FilingServiceError::Intake(violation) => AppError::Intake(violation),
        FilingServiceError::Render(render) => AppError::Io(std::io::Error::other(render)),
    }
}

pub(crate) fn run_fees(args: FormArgs) -> Result<(), AppError> {
    let service = filing_service()?;
    println!("{}", quote_json(&service, &args)?);
    Ok(())
}

pub(crate) fn run_context(args: ContextArgs) -> Result<(), AppError> {
    let service = filing_service()?;
    println!("{}", context_json(&service, &args)?);
    Ok(())
}
