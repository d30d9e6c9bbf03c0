//! Service identifier type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when constructing an invalid service identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service id: {reason}")]
pub struct InvalidServiceId {
    reason: &'static str,
}

/// Identifier shared by every calendar record of one service, as in a
/// timetable feed's `service_id` column.
///
/// Records from different feeds are never compared by content, so the id is
/// kept verbatim; only the empty string is refused.
///
/// # Examples
///
/// ```
/// use service_calendar::domain::ServiceId;
///
/// let id = ServiceId::new("WEEKDAY").unwrap();
/// assert_eq!(id.as_str(), "WEEKDAY");
/// assert!(ServiceId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidServiceId> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidServiceId {
                reason: "service id cannot be empty",
            });
        }
        Ok(ServiceId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceId({})", self.0)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ServiceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ServiceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ServiceId::new(s).map_err(serde::de::Error::custom)
    }
}
