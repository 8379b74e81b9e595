//! Free-form flag bag carried by definitions and applied effects.
//!
//! The marker, overlay and exhaustion stamps are typed fields on
//! `EffectFlags`. Anything else a definition carries onto the actor
//! (module integration flags, host hints) lives in a `FlagBag` and is
//! copied verbatim.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Flag key, conventionally `<scope>.<name>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlagKey(pub String);

impl FlagKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for FlagKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for FlagKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Opaque flag payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagValue {
    Int(i64),
    Bool(bool),
    Text(String),
    TextList(Vec<String>),
}

impl From<bool> for FlagValue {
    fn from(on: bool) -> Self {
        Self::Bool(on)
    }
}

impl From<&str> for FlagValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

pub type FlagBag = FxHashMap<FlagKey, FlagValue>;

/// Copy `overlay` into `base`; the overlay wins on shared keys.
pub fn merge_flags(base: &mut FlagBag, overlay: &FlagBag) {
    base.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversions_agree() {
        let key: FlagKey = "midi-qol.disadvantage.all".into();
        assert_eq!(key, FlagKey::new("midi-qol.disadvantage.all"));
        assert_eq!(FlagKey::from(String::from("dae.stackable")), FlagKey::new("dae.stackable"));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut base = FlagBag::default();
        base.insert("a".into(), FlagValue::Int(1));
        base.insert("b".into(), true.into());

        let mut overlay = FlagBag::default();
        overlay.insert("a".into(), FlagValue::Int(2));
        overlay.insert("c".into(), FlagValue::TextList(vec!["x".into()]));

        merge_flags(&mut base, &overlay);

        assert_eq!(base.len(), 3);
        assert_eq!(base[&FlagKey::new("a")], FlagValue::Int(2));
        assert_eq!(base[&FlagKey::new("b")], FlagValue::Bool(true));
    }
}
