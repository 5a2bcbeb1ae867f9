//! Ticket domain vocabulary.
//!
//! Remote help-desk systems each use their own state names; imported
//! tickets are normalized into this closed vocabulary before persistence.
//! The database stores the lowercase wire strings, so every enum here
//! carries an `as_str` and a `parse` that round-trip them.

use serde::{Deserialize, Serialize};

// ── TicketStatus ─────────────────────────────────────────────────────

/// Lifecycle status of a local ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    New,
    Active,
    Waiting,
    OnHold,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Active => "active",
            Self::Waiting => "waiting",
            Self::OnHold => "on-hold",
            Self::Closed => "closed",
        }
    }

    /// Parse a stored status string. `None` for anything outside the
    /// vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "active" => Some(Self::Active),
            "waiting" => Some(Self::Waiting),
            "on-hold" => Some(Self::OnHold),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TicketPriority ───────────────────────────────────────────────────

/// Priority of a local ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Normal,
    Medium,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Self::Normal),
            "medium" => Some(Self::Medium),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PersonType ───────────────────────────────────────────────────────

/// Which side of a ticket a person sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Customer,
    Agent,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Agent => "agent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Self::Customer),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }
}

impl std::fmt::Display for PersonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SourceKind ───────────────────────────────────────────────────────

/// Category of a remote source system.
///
/// The wire value `"sass"` is a historical spelling carried over from the
/// system this service replaces; renaming it would break stats consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "sass")]
    Saas,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saas => "sass",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // -- TicketStatus tests --

    #[test]
    fn test_status_round_trip() {
        for status in [
            TicketStatus::New,
            TicketStatus::Active,
            TicketStatus::Waiting,
            TicketStatus::OnHold,
            TicketStatus::Closed,
        ] {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_unknown_string() {
        assert_eq!(TicketStatus::parse("open"), None);
        assert_eq!(TicketStatus::parse(""), None);
        assert_eq!(TicketStatus::parse("Active"), None);
    }

    #[test]
    fn test_on_hold_uses_hyphen() {
        assert_eq!(TicketStatus::OnHold.as_str(), "on-hold");
    }

    // -- TicketPriority tests --

    #[test]
    fn test_priority_round_trip() {
        for priority in [
            TicketPriority::Normal,
            TicketPriority::Medium,
            TicketPriority::Critical,
        ] {
            assert_eq!(TicketPriority::parse(priority.as_str()), Some(priority));
        }
    }

    #[test]
    fn test_priority_unknown_string() {
        assert_eq!(TicketPriority::parse("urgent"), None);
        assert_eq!(TicketPriority::parse("high"), None);
    }

    // -- PersonType tests --

    #[test]
    fn test_person_type_round_trip() {
        assert_eq!(PersonType::parse("customer"), Some(PersonType::Customer));
        assert_eq!(PersonType::parse("agent"), Some(PersonType::Agent));
        assert_eq!(PersonType::parse("user"), None);
    }

    // -- SourceKind tests --

    #[test]
    fn test_source_kind_wire_value() {
        assert_eq!(SourceKind::Saas.as_str(), "sass");
        assert_eq!(SourceKind::Saas.to_string(), "sass");
    }
}
