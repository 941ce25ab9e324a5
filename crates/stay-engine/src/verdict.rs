//! The verdict record returned by every evaluation.

use serde::{Deserialize, Serialize};

use crate::blocklist::IGNORED_WARNING;
use crate::error::{Rejection, RequestError, ValidationFailure};

/// Outcome of one evaluation.
///
/// `message` carries business-rule text meant for the end user;
/// `error_message` carries malformed-input detail meant for the caller's
/// developer. On acceptance both are empty, except that the blocklist
/// warning rides along when blocked-date entries had to be ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: bool,
    pub message: String,
    pub error_message: String,
}

impl Verdict {
    pub(crate) fn accept(warning: Option<&str>) -> Self {
        Verdict {
            status: true,
            message: if warning.is_some() {
                IGNORED_WARNING.to_owned()
            } else {
                String::new()
            },
            error_message: warning.unwrap_or_default().to_owned(),
        }
    }

    pub(crate) fn reject(rejection: Rejection, warning: Option<&str>) -> Self {
        Verdict {
            status: false,
            message: rejection.to_string(),
            error_message: warning.unwrap_or_default().to_owned(),
        }
    }

    pub(crate) fn fault(error: RequestError) -> Self {
        Verdict {
            status: false,
            message: String::new(),
            error_message: error.to_string(),
        }
    }
}

impl From<ValidationFailure> for Verdict {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::Fault(error) => Verdict::fault(error),
            ValidationFailure::Reject(rejection) => Verdict::reject(rejection, None),
        }
    }
}
