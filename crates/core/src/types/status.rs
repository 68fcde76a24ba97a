//! Order status and status filtering.

use serde::{Deserialize, Serialize};

/// Order delivery status as stored in the content lake.
///
/// The store keeps status as a free-form, optional string. Only the three
/// known values are selectable through the dashboard's status controls;
/// anything else the store happens to hold is preserved verbatim as
/// [`OrderStatus::Unknown`] so the divergence between stored and selectable
/// values stays visible instead of being silently rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Awaiting dispatch.
    Pending,
    /// Handed to the courier.
    Dispatch,
    /// Delivered.
    Success,
    /// A stored value outside the selectable set, kept verbatim.
    Unknown(String),
    /// The document has no status field (absent or null).
    #[default]
    Unset,
}

impl OrderStatus {
    /// Interpret a status string as stored by the content lake.
    #[must_use]
    pub fn from_stored(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "dispatch" => Self::Dispatch,
            "success" => Self::Success,
            _ => Self::Unknown(value),
        }
    }

    /// The wire representation, or `None` for [`OrderStatus::Unset`].
    #[must_use]
    pub fn as_wire_str(&self) -> Option<&str> {
        match self {
            Self::Pending => Some("pending"),
            Self::Dispatch => Some("dispatch"),
            Self::Success => Some("success"),
            Self::Unknown(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Whether this status can be written through the status-change
    /// controls. `Unknown` values render but are never selectable.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        matches!(self, Self::Pending | Self::Dispatch | Self::Success)
    }

    /// The statuses offered by the status-change controls.
    pub const SELECTABLE: [Self; 3] = [Self::Pending, Self::Dispatch, Self::Success];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire_str().unwrap_or("unset"))
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "dispatch" => Ok(Self::Dispatch),
            "success" => Ok(Self::Success),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

// Wire form is an optional string field on the order document.
impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_wire_str() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::Unset, Self::from_stored))
    }
}

/// Selector for the orders view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    Pending,
    Dispatch,
    Success,
}

impl StatusFilter {
    /// Whether an order with the given status passes this filter.
    ///
    /// `Unset` and `Unknown` statuses never match a non-`All` filter.
    #[must_use]
    pub fn matches(self, status: &OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => *status == OrderStatus::Pending,
            Self::Dispatch => *status == OrderStatus::Dispatch,
            Self::Success => *status == OrderStatus::Success,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Dispatch => "dispatch",
            Self::Success => "success",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "dispatch" => Ok(Self::Dispatch),
            "success" => Ok(Self::Success),
            _ => Err(format!("invalid status filter: {s}")),
        }
    }
}
