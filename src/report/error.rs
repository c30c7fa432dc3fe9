use std::io;
use thiserror::Error;
use crate::fitting::FitError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}, column {column}: cannot parse '{value}' as a number")]
    Parse {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("Line {line} has {found} column(s), at least 2 are needed")]
    MissingColumns { line: u64, found: usize },

    #[error("Invalid data: {0}")]
    InvalidData(#[from] FitError),

    #[error("Nothing to plot")]
    EmptyData,

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
