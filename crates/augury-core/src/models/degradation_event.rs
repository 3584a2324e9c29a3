use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Records a fallback from a failed component to a labeled stand-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}
