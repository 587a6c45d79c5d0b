//! Three-valued override flag

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An override flag that is either unset, explicitly on, or explicitly off.
///
/// `Unset` means "let the baseline decide" and is serialized as an absent or
/// `null` field. It is never treated as `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Enablement {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl Enablement {
    pub fn is_set(&self) -> bool {
        !self.is_unset()
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Enablement::Unset)
    }

    /// True only for an explicit `Enabled`
    pub fn is_enabled(&self) -> bool {
        matches!(self, Enablement::Enabled)
    }

    pub fn as_option(&self) -> Option<bool> {
        match self {
            Enablement::Unset => None,
            Enablement::Enabled => Some(true),
            Enablement::Disabled => Some(false),
        }
    }
}

impl From<Option<bool>> for Enablement {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Enablement::Unset,
            Some(true) => Enablement::Enabled,
            Some(false) => Enablement::Disabled,
        }
    }
}

impl From<bool> for Enablement {
    fn from(value: bool) -> Self {
        Enablement::from(Some(value))
    }
}

impl Serialize for Enablement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Enablement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Enablement::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        assert_eq!(Enablement::default(), Enablement::Unset);
        assert!(!Enablement::default().is_set());
    }

    #[test]
    fn test_disabled_is_set_but_not_enabled() {
        assert!(Enablement::Disabled.is_set());
        assert!(!Enablement::Disabled.is_enabled());
        assert_eq!(Enablement::Disabled.as_option(), Some(false));
    }

    #[test]
    fn test_option_round_trip() {
        for value in [None, Some(true), Some(false)] {
            assert_eq!(Enablement::from(value).as_option(), value);
        }
    }

    #[test]
    fn test_serde_uses_nullable_bool() {
        assert_eq!(serde_json::to_string(&Enablement::Enabled).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Enablement::Unset).unwrap(), "null");
        let parsed: Enablement = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, Enablement::Disabled);
        let parsed: Enablement = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Enablement::Unset);
    }
}
