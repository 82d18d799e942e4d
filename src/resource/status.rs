//! Types represesting the status of a BigML resource.

use serde::{self, Deserialize, Deserializer, Serialize, Serializer};
use std::result;

/// A BigML status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// BigML is waiting on another resource before processing this one.
    Waiting,
    /// The processing job has been added to the queue.
    Queued,
    /// Actual processing has started.
    Started,
    /// Part of the job has been performed.
    InProgress,
    /// Summary statistics for a dataset are available.
    Summarized,
    /// The resource is ready.
    Finished,
    /// Something went wrong processing the task.
    Faulty,
    /// Something has gone wrong in BigML, perhaps an outage.
    Unknown,
}

impl StatusCode {
    /// Is BigML still working on ingesting and processing this resource?
    pub fn is_working(self) -> bool {
        use self::StatusCode::*;
        matches!(self, Waiting | Queued | Started | InProgress | Summarized)
    }

    /// Has BigML successfully finished processing this resource?
    pub fn is_ready(self) -> bool {
        self == StatusCode::Finished
    }

    /// Did something go wrong while processing this resource?
    pub fn is_err(self) -> bool {
        self == StatusCode::Faulty || self == StatusCode::Unknown
    }

    fn to_code(self) -> i64 {
        match self {
            StatusCode::Waiting => 0,
            StatusCode::Queued => 1,
            StatusCode::Started => 2,
            StatusCode::InProgress => 3,
            StatusCode::Summarized => 4,
            StatusCode::Finished => 5,
            StatusCode::Faulty => -1,
            StatusCode::Unknown => -2,
        }
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match i64::deserialize(deserializer)? {
            0 => Ok(StatusCode::Waiting),
            1 => Ok(StatusCode::Queued),
            2 => Ok(StatusCode::Started),
            3 => Ok(StatusCode::InProgress),
            4 => Ok(StatusCode::Summarized),
            5 => Ok(StatusCode::Finished),
            -1 => Ok(StatusCode::Faulty),
            -2 => Ok(StatusCode::Unknown),
            code => Err(<D::Error as serde::de::Error>::invalid_value(
                serde::de::Unexpected::Signed(code),
                &"a BigML status code between -2 and 5",
            )),
        }
    }
}

impl Serialize for StatusCode {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_code().serialize(serializer)
    }
}

/// Status of a resource.  BigML sends a few extra keys for datasets, which
/// we ignore.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GenericStatus {
    /// Status code.
    pub code: StatusCode,

    /// Human-readable status message.
    pub message: String,

    /// Number of milliseconds which were needed to create this resource.
    pub elapsed: Option<u64>,

    /// Number between 0.0 and 1.0 representing the progress of creating
    /// this resource.
    pub progress: Option<f32>,
}

#[test]
fn deserialize_dataset_status() {
    // Extra keys like `bytes` and `serialized_rows` are ignored.
    let json = r#"{"bytes": 499443, "code": 5, "elapsed": 1741, "field_errors": [], "message": "The dataset has been created", "row_format_errors": [], "serialized_rows": 6791}"#;
    let status: GenericStatus = serde_json::from_str(json).unwrap();
    assert!(status.code.is_ready());
    assert!(!status.code.is_working());
    assert_eq!(status.message, "The dataset has been created");
    assert_eq!(status.elapsed, Some(1741));
    assert_eq!(status.progress, None);
}

#[test]
fn status_codes_round_trip_through_integers() {
    for code in -2..=5 {
        let status: StatusCode = serde_json::from_str(&code.to_string()).unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), code.to_string());
    }
    assert!(serde_json::from_str::<StatusCode>("-1").unwrap().is_err());
    assert!(serde_json::from_str::<StatusCode>("3").unwrap().is_working());
    assert!(serde_json::from_str::<StatusCode>("6").is_err());
}
