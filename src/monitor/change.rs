//! Change classification against the last accepted observation.

use crate::observation::{Observation, Origin};

/// A change of public address, with values for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressChange {
    /// Address of the last accepted observation.
    pub before: String,
    /// Address just observed.
    pub after: String,
}

/// A change of origin, with values for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginChange {
    /// Origin of the last accepted observation.
    pub before: Origin,
    /// Origin just observed.
    pub after: Origin,
}

/// Outcome of comparing a new observation with the last accepted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// There is no previous observation.
    FirstObservation,
    /// Only the address differs.
    AddressChanged(AddressChange),
    /// Only the origin differs.
    OriginChanged(OriginChange),
    /// Both address and origin differ.
    Both {
        /// The address change.
        address: AddressChange,
        /// The origin change.
        origin: OriginChange,
    },
    /// Address and origin are identical.
    Unchanged,
}

impl Change {
    /// Returns true if the new observation must be appended to the history.
    #[must_use]
    pub const fn requires_append(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Returns the address change, if any.
    #[must_use]
    pub const fn address_change(&self) -> Option<&AddressChange> {
        match self {
            Self::AddressChanged(change) | Self::Both { address: change, .. } => Some(change),
            _ => None,
        }
    }

    /// Returns the origin change, if any.
    #[must_use]
    pub const fn origin_change(&self) -> Option<&OriginChange> {
        match self {
            Self::OriginChanged(change) | Self::Both { origin: change, .. } => Some(change),
            _ => None,
        }
    }
}

/// Classifies `current` against the last accepted observation.
///
/// Only the single most recent record is consulted: no debouncing and no
/// tolerance for transient lookup failures. An unknown origin that differs
/// from a previously known one is an origin change.
#[must_use]
pub fn classify(last: Option<&Observation>, current: &Observation) -> Change {
    let Some(last) = last else {
        return Change::FirstObservation;
    };

    let address = (last.address != current.address).then(|| AddressChange {
        before: last.address.clone(),
        after: current.address.clone(),
    });
    let origin = (last.origin != current.origin).then(|| OriginChange {
        before: last.origin.clone(),
        after: current.origin.clone(),
    });

    match (address, origin) {
        (None, None) => Change::Unchanged,
        (Some(address), None) => Change::AddressChanged(address),
        (None, Some(origin)) => Change::OriginChanged(origin),
        (Some(address), Some(origin)) => Change::Both { address, origin },
    }
}
