//! CSV tables and PNG charts for profiles and peak fits

pub mod error;
pub mod plot;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{ReportError, Result};
pub use plot::{plot_fit, plot_profile, FIT_CURVE_POINTS};
pub use table::{read_xy_columns, write_channel_profile, write_fit_parameters};
