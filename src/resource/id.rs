//! Resource identifiers used by the BigML API.

use serde::de::Unexpected;
use serde::{self, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use url::Url;

use super::Resource;
use crate::errors::*;

/// A strongly-typed "resource ID" like `dataset/53e3dd0fffa0440f4300a95c`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id<R: Resource> {
    /// The ID of the resource, including the type prefix.
    id: String,
    /// Mentions `R` so the compiler knows what kind of resource this is.
    _phantom: PhantomData<R>,
}

impl<R: Resource> Id<R> {
    /// Get this resource as a string.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// The part of the ID after the type prefix, which is what BigML calls
    /// the resource's hex ID.
    pub fn hex_id(&self) -> &str {
        &self.id[R::id_prefix().len()..]
    }

    /// Get a URL pointing at the human-readable version of this resource.
    pub fn dashboard_url(&self) -> Url {
        Url::parse(&format!("https://bigml.com/dashboard/{}", self))
            // This should never fail to parse.
            .expect("dashboard URL unexpectedly failed to parse")
    }
}

impl<R: Resource> FromStr for Id<R> {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self> {
        if id == R::id_prefix() {
            Err(Error::EmptyResourceId {})
        } else if id.starts_with(R::id_prefix()) {
            Ok(Id {
                id: id.to_owned(),
                _phantom: PhantomData,
            })
        } else {
            Err(Error::WrongResourceType {
                expected: R::id_prefix(),
                found: id.to_owned(),
            })
        }
    }
}

impl<R: Resource> fmt::Debug for Id<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", &self.id)
    }
}

impl<R: Resource> fmt::Display for Id<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", &self.id)
    }
}

impl<'de, R: Resource> Deserialize<'de> for Id<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id: String = String::deserialize(deserializer)?;
        if id.starts_with(R::id_prefix()) && id.len() > R::id_prefix().len() {
            Ok(Id {
                id,
                _phantom: PhantomData,
            })
        } else {
            let unexpected = Unexpected::Str(&id);
            let expected = format!(
                "a BigML resource ID starting with '{}' and followed by an ID",
                R::id_prefix()
            );
            Err(<D::Error as serde::de::Error>::invalid_value(
                unexpected,
                &&expected[..],
            ))
        }
    }
}

impl<R: Resource> Serialize for Id<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.id.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Dataset;

    #[test]
    fn parse_dataset_id() {
        let id: Id<Dataset> = "dataset/53e3dd0fffa0440f4300a95c".parse().unwrap();
        assert_eq!(id.as_str(), "dataset/53e3dd0fffa0440f4300a95c");
        assert_eq!(id.hex_id(), "53e3dd0fffa0440f4300a95c");
        assert_eq!(
            id.dashboard_url().as_str(),
            "https://bigml.com/dashboard/dataset/53e3dd0fffa0440f4300a95c"
        );
    }

    #[test]
    fn reject_id_of_wrong_type() {
        let err = "source/53e3dd010af5e83906003c02"
            .parse::<Id<Dataset>>()
            .unwrap_err();
        match err {
            Error::WrongResourceType { expected, found } => {
                assert_eq!(expected, "dataset/");
                assert_eq!(found, "source/53e3dd010af5e83906003c02");
            }
            other => panic!("unexpected error: {}", other),
        }

        let json = r#""source/53e3dd010af5e83906003c02""#;
        assert!(serde_json::from_str::<Id<Dataset>>(json).is_err());
    }

    #[test]
    fn reject_id_with_nothing_after_prefix() {
        let err = "dataset/".parse::<Id<Dataset>>().unwrap_err();
        assert!(matches!(err, Error::EmptyResourceId { .. }));
        assert!(serde_json::from_str::<Id<Dataset>>(r#""dataset/""#).is_err());
    }
}
