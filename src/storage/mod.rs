mod repository;
pub mod workbook;

pub use repository::*;

use std::path::PathBuf;

/// File name of the persisted spreadsheet.
pub const DATA_FILE_NAME: &str = "FinancialDashboard.xlsx";

/// Default location of the data file: the application's own directory under
/// the platform data dir, falling back to the current directory.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("findash")
        .join(DATA_FILE_NAME)
}
