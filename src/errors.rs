use thiserror::Error;

/// Error kinds surfaced by the alignment core.
///
/// `MalformedTimeToken` is recoverable by default (the offending record is
/// dropped from axis and selection); `EmptyAxis` means there is nothing to
/// render for this run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("malformed time token '{0}': not a valid calendar date")]
    MalformedTimeToken(String),
    #[error("no usable time buckets in input")]
    EmptyAxis,
}
