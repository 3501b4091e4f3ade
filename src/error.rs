// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Invalid input to an analysis. Returned before any work is done;
/// no partial output is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid option: {0} must be a finite, positive number")]
    InvalidOptions(&'static str),

    #[error("the road layer contains no segments")]
    EmptyNetwork,

    #[error("no points were provided")]
    EmptyPoints,

    #[error("at least 2 points must resolve to the road network, got {0}")]
    InsufficientPoints(usize),

    #[error("cost threshold must be a positive number, got {0}")]
    NonPositiveThreshold(f64),

    #[error("none of the facilities resolve to the road network")]
    NoFacilities,
}
