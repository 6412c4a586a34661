use std::fmt;

use thiserror::Error;

/// The three startup documents. Used to name the failing one in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    WorldGeometry,
    CaseCounts,
    IsoLookup,
}

impl DatasetKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WorldGeometry => "world geometry",
            Self::CaseCounts => "case counts",
            Self::IsoLookup => "iso lookup",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Startup load failure. Any one of these aborts the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{dataset} request failed: {message}")]
    Fetch {
        dataset: DatasetKind,
        message: String,
    },
    #[error("{dataset} returned HTTP {status}")]
    Status { dataset: DatasetKind, status: u16 },
    #[error("{dataset} is malformed: {message}")]
    Parse {
        dataset: DatasetKind,
        message: String,
    },
}

impl LoadError {
    pub fn dataset(&self) -> DatasetKind {
        match self {
            Self::Fetch { dataset, .. } | Self::Status { dataset, .. } | Self::Parse { dataset, .. } => {
                *dataset
            }
        }
    }

    pub(crate) fn parse(dataset: DatasetKind, err: impl fmt::Display) -> Self {
        Self::Parse {
            dataset,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DatasetKind, LoadError};

    #[test]
    fn messages_name_the_dataset() {
        let err = LoadError::Status {
            dataset: DatasetKind::IsoLookup,
            status: 404,
        };
        assert_eq!(err.to_string(), "iso lookup returned HTTP 404");
        assert_eq!(err.dataset(), DatasetKind::IsoLookup);
    }

    #[test]
    fn parse_helper_keeps_source_message() {
        let err = LoadError::parse(DatasetKind::CaseCounts, "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "case counts is malformed: expected value at line 1"
        );
    }
}
