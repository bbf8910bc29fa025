//! Action routing for the test-operations endpoint.

use std::str::FromStr;

use crate::api_errors::{RouteMessages, TEST_SERVICE_UNREACHABLE};

/// Operations the `/api/test` endpoint multiplexes onto the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestAction {
    /// Read-only, driven by query parameters.
    LoadData,
    Evaluate,
    BatchPredict,
}

impl TestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestAction::LoadData => "load-data",
            TestAction::Evaluate => "evaluate",
            TestAction::BatchPredict => "batch-predict",
        }
    }

    /// Path on the prediction service.
    pub fn upstream_path(&self) -> &'static str {
        match self {
            TestAction::LoadData => "/load-test-data",
            TestAction::Evaluate => "/evaluate",
            TestAction::BatchPredict => "/batch-predict",
        }
    }

    /// Whether the action is served on GET (query) rather than POST (body).
    pub fn is_read(&self) -> bool {
        matches!(self, TestAction::LoadData)
    }

    pub fn messages(&self) -> RouteMessages {
        let fallback = match self {
            TestAction::LoadData => "Failed to load test data",
            TestAction::Evaluate | TestAction::BatchPredict => "Request failed",
        };
        RouteMessages {
            fallback,
            unreachable: TEST_SERVICE_UNREACHABLE,
        }
    }

    /// Parse an action that must be served by GET.
    pub fn for_read(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| s.parse().ok()).filter(TestAction::is_read)
    }

    /// Parse an action that must be served by POST.
    pub fn for_write(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| s.parse::<TestAction>().ok())
            .filter(|a| !a.is_read())
    }
}

impl FromStr for TestAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load-data" => Ok(TestAction::LoadData),
            "evaluate" => Ok(TestAction::Evaluate),
            "batch-predict" => Ok(TestAction::BatchPredict),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_bound_to_their_method() {
        assert_eq!(TestAction::for_read(Some("load-data")), Some(TestAction::LoadData));
        assert_eq!(TestAction::for_read(Some("evaluate")), None);
        assert_eq!(TestAction::for_write(Some("batch-predict")), Some(TestAction::BatchPredict));
        assert_eq!(TestAction::for_write(Some("load-data")), None);
        assert_eq!(TestAction::for_write(None), None);
    }

    #[test]
    fn wire_names_parse_back() {
        for action in [TestAction::LoadData, TestAction::Evaluate, TestAction::BatchPredict] {
            assert_eq!(action.as_str().parse::<TestAction>(), Ok(action));
        }
    }

    #[test]
    fn matching_is_exact() {
        assert!("Evaluate".parse::<TestAction>().is_err());
        assert!(" evaluate".parse::<TestAction>().is_err());
    }
}
