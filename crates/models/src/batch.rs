use serde::Serialize;

use crate::{Patch, PatchError};

/// An ordered list of patches submitted together as one PATCH request.
///
/// The first value that fails to serialize is remembered and returned from
/// [`PatchBatch::into_patches`]; later calls are ignored.
#[derive(Debug)]
pub struct PatchBatch {
    res: Result<Vec<Patch>, PatchError>,
}

impl Default for PatchBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchBatch {
    pub fn new() -> Self {
        Self { res: Ok(vec![]) }
    }

    #[must_use]
    pub fn push(mut self, patch: Patch) -> Self {
        if let Ok(patch_list) = &mut self.res {
            patch_list.push(patch);
        }
        self
    }

    #[must_use]
    pub fn add<T: Serialize>(self, path: impl Into<String>, value: &T) -> Self {
        self.push_with(|| Patch::add(path, value))
    }

    #[must_use]
    pub fn replace<T: Serialize>(self, path: impl Into<String>, value: &T) -> Self {
        self.push_with(|| Patch::replace(path, value))
    }

    #[must_use]
    pub fn test<T: Serialize>(self, path: impl Into<String>, value: &T) -> Self {
        self.push_with(|| Patch::test(path, value))
    }

    #[must_use]
    pub fn remove(self, path: impl Into<String>) -> Self {
        self.push(Patch::remove(path))
    }

    #[must_use]
    pub fn move_to(self, from: impl Into<String>, path: impl Into<String>) -> Self {
        self.push(Patch::move_to(from, path))
    }

    #[must_use]
    pub fn copy_to(self, from: impl Into<String>, path: impl Into<String>) -> Self {
        self.push(Patch::copy_to(from, path))
    }

    pub fn into_patches(self) -> Result<Vec<Patch>, PatchError> {
        self.res
    }

    fn push_with(mut self, f: impl FnOnce() -> Result<Patch, PatchError>) -> Self {
        self.res = self.res.and_then(|mut patch_list| {
            patch_list.push(f()?);
            Ok(patch_list)
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::ser::{Error, Serializer};
    use serde_json::json;

    use super::*;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn keeps_order() {
        let patches = PatchBatch::new()
            .test("/state", &"created")
            .replace("/transactions/0/description", &"updated")
            .add("/transactions/0/invoice_number", &"INV-1")
            .remove("/transactions/0/payee")
            .copy_to("/transactions/0/amount", "/transactions/1/amount")
            .move_to("/a", "/b")
            .into_patches()
            .unwrap();

        let ops: Vec<_> = patches.iter().map(|patch| patch.op.as_str()).collect();
        assert_eq!(ops, ["test", "replace", "add", "remove", "copy", "move"]);
        assert_eq!(patches[1].value, Some(json!("updated")));
        assert_eq!(patches[4].from.as_deref(), Some("/transactions/0/amount"));
    }

    #[test]
    fn first_error_wins() {
        let mut map = BTreeMap::new();
        map.insert("total", "7");

        let res = PatchBatch::new()
            .replace("/transactions/0/amount", &map)
            .add("/broken", &Unserializable)
            .remove("/after")
            .into_patches();
        assert!(matches!(res, Err(PatchError::Json(_))));
    }

    #[test]
    fn default_is_empty() {
        assert!(PatchBatch::default().into_patches().unwrap().is_empty());
    }
}
