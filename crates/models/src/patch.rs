use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{parse_pointer, PatchError};

const KNOWN_OPS: &[&str] = &["add", "remove", "replace", "move", "copy", "test"];

/// One JSON Patch operation against a remote resource.
///
/// Nothing is checked when a patch is built or sent: the operation name and
/// pointers are forwarded verbatim and the remote service decides whether
/// they make sense. Use [`Patch::validate`] to check a patch locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Patch {
    pub op: String,
    pub path: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

// An explicit `null` is a value, not an absent field.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Patch {
    pub fn new(op: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            path: path.into(),
            value: None,
            from: None,
        }
    }

    #[must_use]
    pub fn value(self, value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..self
        }
    }

    #[must_use]
    pub fn from(self, from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            ..self
        }
    }

    pub fn add<T: Serialize>(path: impl Into<String>, value: &T) -> Result<Self, PatchError> {
        Ok(Self::new("add", path).value(serde_json::to_value(value)?))
    }

    pub fn replace<T: Serialize>(path: impl Into<String>, value: &T) -> Result<Self, PatchError> {
        Ok(Self::new("replace", path).value(serde_json::to_value(value)?))
    }

    pub fn test<T: Serialize>(path: impl Into<String>, value: &T) -> Result<Self, PatchError> {
        Ok(Self::new("test", path).value(serde_json::to_value(value)?))
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::new("remove", path)
    }

    pub fn move_to(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new("move", path).from(from)
    }

    pub fn copy_to(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new("copy", path).from(from)
    }

    /// Checks the patch against RFC 6902 without contacting the service.
    pub fn validate(&self) -> Result<(), PatchError> {
        if !KNOWN_OPS.contains(&self.op.as_str()) {
            return Err(PatchError::UnknownOp {
                op: self.op.clone(),
            });
        }
        parse_pointer(&self.path)?;

        match self.op.as_str() {
            "move" | "copy" => match &self.from {
                Some(from) => {
                    parse_pointer(from)?;
                }
                None => {
                    return Err(PatchError::MissingFrom {
                        op: self.op.clone(),
                    })
                }
            },
            "add" | "replace" | "test" if self.value.is_none() => {
                return Err(PatchError::MissingValue {
                    op: self.op.clone(),
                })
            }
            _ => {}
        }

        Ok(())
    }
}
