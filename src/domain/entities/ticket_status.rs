use serde::{Deserialize, Serialize};

/// Lifecycle label of a queue ticket.
///
/// Nothing in the estimation flow moves a ticket past `Waiting`; the
/// transitions below only run when a client edits a ticket's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Waiting,
    InProgress,
    Completed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Waiting => "waiting",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Completed => "completed",
        }
    }

    /// Waiting -> InProgress
    pub fn start(self) -> Option<Self> {
        match self {
            TicketStatus::Waiting => Some(TicketStatus::InProgress),
            _ => None,
        }
    }

    /// InProgress -> Completed
    pub fn complete(self) -> Option<Self> {
        match self {
            TicketStatus::InProgress => Some(TicketStatus::Completed),
            _ => None,
        }
    }

    /// Resolve a requested status change through the transition functions.
    /// Requesting the current status is a no-op and always allowed.
    pub fn transition_to(self, next: TicketStatus) -> Result<Self, String> {
        if self == next {
            return Ok(self);
        }
        let moved = match next {
            TicketStatus::InProgress => self.start(),
            TicketStatus::Completed => self.complete(),
            TicketStatus::Waiting => None,
        };
        moved.ok_or_else(|| {
            format!(
                "Cannot move ticket from {} to {}",
                self.as_str(),
                next.as_str()
            )
        })
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "waiting" => Ok(TicketStatus::Waiting),
            "in_progress" => Ok(TicketStatus::InProgress),
            "completed" => Ok(TicketStatus::Completed),
            _ => Err(format!(
                "Invalid status: {}. Must be waiting, in_progress or completed",
                s
            )),
        }
    }
}
