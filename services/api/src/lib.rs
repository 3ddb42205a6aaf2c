mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use patent_filing::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
