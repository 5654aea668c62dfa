mod cli;
mod infra;
mod render;
mod routes;
mod server;

use layoff_trends::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
