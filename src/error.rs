use std::{error, fmt, io};

/// Reasons an import file is rejected. Messages are shown to the user.
#[derive(Debug)]
pub enum ImportError {
    Io(io::Error),
    Parse(serde_json::Error),
    MissingVisitedIds,
}

impl error::Error for ImportError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::MissingVisitedIds => None,
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Could not read import file: {}", err),
            Self::Parse(err) => write!(f, "Import file is not valid JSON: {}", err),
            Self::MissingVisitedIds => {
                write!(f, "Invalid file format: missing visitedParkIds array")
            }
        }
    }
}

impl From<io::Error> for ImportError {
    fn from(err: io::Error) -> ImportError {
        ImportError::Io(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> ImportError {
        ImportError::Parse(err)
    }
}
