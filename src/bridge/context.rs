//! Active table selector

use super::VerbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which table relational verbs address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveContext {
    #[default]
    Nodes,
    Edges,
}

impl ActiveContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveContext::Nodes => "nodes",
            ActiveContext::Edges => "edges",
        }
    }
}

impl fmt::Display for ActiveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveContext {
    type Err = VerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nodes" => Ok(ActiveContext::Nodes),
            "edges" => Ok(ActiveContext::Edges),
            other => Err(VerbError::InvalidContext(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("nodes".parse::<ActiveContext>().unwrap(), ActiveContext::Nodes);
        assert_eq!("edges".parse::<ActiveContext>().unwrap(), ActiveContext::Edges);
        assert_eq!(
            "vertices".parse::<ActiveContext>().unwrap_err(),
            VerbError::InvalidContext("vertices".to_string())
        );
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(ActiveContext::default(), ActiveContext::Nodes);
        assert_eq!(ActiveContext::Edges.to_string(), "edges");
    }
}
