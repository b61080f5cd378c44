mod cli;
mod infra;
mod report;

use family_quest::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
