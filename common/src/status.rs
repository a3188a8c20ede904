//! Lifecycle types for work orders and VNI work orders.
//!
//! Statuses are stored lowercase by the backend but show up with assorted
//! casings in older records, so parsing is case-insensitive while writes
//! always emit the canonical lowercase form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

/// A lifecycle transition that the state machine does not permit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// User-facing operations a work order exposes. Which of these are
/// enabled at any moment is a pure function of the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Approve,
    Reject,
    Execute,
    Update,
    Delete,
    ExportExcel,
}

/// Status of a VM provisioning work order.
///
/// `Pending` orders await review, `Approved` orders may be executed, and
/// `Executing` orders are resolved to `Completed` or `Failed` by the
/// backend. `Rejected`, `Completed`, and `Failed` are terminal for
/// user-initiated transitions; records stay editable but do not re-enter
/// the approval flow on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOrderStatus {
    Pending,
    Approved,
    Rejected,
    Executing,
    Completed,
    Failed,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Executing => "executing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Statuses this one may move to through a user-initiated transition.
    pub fn next_statuses(&self) -> &'static [WorkOrderStatus] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Executing],
            Self::Executing => &[Self::Completed, Self::Failed],
            Self::Rejected | Self::Completed | Self::Failed => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Failed)
    }

    /// Actions rendered for an order in this status. Editing and deletion
    /// stay available on terminal records; approval is only offered while
    /// pending and execution only once approved.
    pub fn available_actions(&self) -> &'static [OrderAction] {
        match self {
            Self::Pending => &[
                OrderAction::Approve,
                OrderAction::Reject,
                OrderAction::Update,
                OrderAction::Delete,
            ],
            Self::Approved => &[
                OrderAction::Execute,
                OrderAction::Update,
                OrderAction::Delete,
            ],
            _ => &[OrderAction::Update, OrderAction::Delete],
        }
    }

    pub fn can_transition_to(&self, next: WorkOrderStatus) -> bool {
        *self == next || self.next_statuses().contains(&next)
    }

    /// Validates a requested transition before it is dispatched. A
    /// same-status write is a no-op, not an error.
    pub fn ensure_transition(&self, next: WorkOrderStatus) -> Result<(), TransitionError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError {
                from: self.as_str().into(),
                to: next.as_str().into(),
            })
        }
    }
}

impl FromStr for WorkOrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "executing" => Ok(Self::Executing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseStatusError(s.into())),
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkOrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkOrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Status of a VNI work order. Same lifecycle as [`WorkOrderStatus`] with
/// an extra `Draft` state that precedes submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VniStatus {
    Pending,
    Approved,
    Rejected,
    Draft,
    Executing,
    Completed,
    Failed,
}

impl VniStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Draft => "draft",
            Self::Executing => "executing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Every status the dedicated status endpoint accepts.
    pub const ALL: &'static [VniStatus] = &[
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Draft,
        Self::Executing,
        Self::Completed,
        Self::Failed,
    ];

    pub fn next_statuses(&self) -> &'static [VniStatus] {
        match self {
            Self::Draft => &[Self::Pending],
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Executing],
            Self::Executing => &[Self::Completed, Self::Failed],
            Self::Rejected | Self::Completed | Self::Failed => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Failed)
    }

    pub fn available_actions(&self) -> &'static [OrderAction] {
        match self {
            Self::Pending => &[
                OrderAction::Approve,
                OrderAction::Reject,
                OrderAction::Update,
                OrderAction::Delete,
                OrderAction::ExportExcel,
            ],
            Self::Approved => &[
                OrderAction::Execute,
                OrderAction::Update,
                OrderAction::Delete,
                OrderAction::ExportExcel,
            ],
            _ => &[
                OrderAction::Update,
                OrderAction::Delete,
                OrderAction::ExportExcel,
            ],
        }
    }

    pub fn can_transition_to(&self, next: VniStatus) -> bool {
        *self == next || self.next_statuses().contains(&next)
    }

    pub fn ensure_transition(&self, next: VniStatus) -> Result<(), TransitionError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError {
                from: self.as_str().into(),
                to: next.as_str().into(),
            })
        }
    }
}

impl FromStr for VniStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "draft" => Ok(Self::Draft),
            "executing" => Ok(Self::Executing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseStatusError(s.into())),
        }
    }
}

impl fmt::Display for VniStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VniStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VniStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Priority assigned to a VNI work order. Older records and one of the
/// entry forms say `medium` where the rest of the system says `normal`;
/// both parse to [`Priority::Normal`] and `normal` is what gets written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" | "medium" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseStatusError(s.into())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
