//! BigML dataset support.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::id::*;
use super::meta::Meta;
use super::status::*;
use super::Resource;

/// The format BigML uses for `created` and `updated`. There's no time zone,
/// but the values are UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A BigML dataset. Basically a table of data with named columns.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Dataset {
    /// The ID of this resource.
    pub resource: Id<Dataset>,

    /// The current status of this dataset, if BigML sent one.
    #[serde(default)]
    pub status: Option<GenericStatus>,

    /// Were all the fields of the source used to build this dataset?
    pub all_fields: bool,

    /// Used to classify by industry or category.  0 is "Miscellaneous".
    pub category: i64,

    /// An HTTP status code, typically either 201 or 200.
    pub code: u16,

    /// The number of columns in the dataset.
    pub columns: usize,

    /// The time this resource was created, as sent by BigML.
    pub created: String,

    /// The credits spent building this dataset.
    pub credits: f64,

    /// Text describing this resource.  May contain limited Markdown.
    pub description: String,

    /// Was this created in development mode?
    pub dev: bool,

    /// Field IDs excluded when building this dataset.
    #[serde(default)]
    pub excluded_fields: Vec<String>,

    /// The number of fields of each type. This includes a few odd things
    /// like "preferred" and "total", so we key it by string.
    pub field_types: HashMap<String, u64>,

    /// Metadata describing each field, keyed by field ID. List responses
    /// leave this out, and so does BigML while the dataset is being created.
    #[serde(default)]
    pub fields: HashMap<String, Field>,

    /// Field IDs included when building this dataset.
    #[serde(default)]
    pub input_fields: Vec<String>,

    /// The locale of the data, like `en_US`.
    pub locale: String,

    /// The number of rows with at least one missing numeric value.
    pub missing_numeric_rows: u64,

    /// The name of this resource.
    pub name: String,

    /// How many batch centroids were built from this dataset.
    #[serde(rename = "number_of_batchcentroids")]
    pub number_of_batch_centroids: u64,

    /// How many batch predictions were built from this dataset.
    #[serde(rename = "number_of_batchpredictions")]
    pub number_of_batch_predictions: u64,

    /// How many clusters were built from this dataset.
    pub number_of_clusters: u64,

    /// How many ensembles were built from this dataset.
    pub number_of_ensembles: u64,

    /// How many evaluations used this dataset.
    pub number_of_evaluations: u64,

    /// How many models were built from this dataset.
    pub number_of_models: u64,

    /// How many predictions were made using this dataset.
    pub number_of_predictions: u64,

    /// The field we're trying to predict.
    pub objective_field: Field,

    /// What it costs to use this dataset.
    pub price: f64,

    /// Is this dataset private?
    pub private: bool,

    /// The number of rows in this dataset.
    pub rows: usize,

    /// Has this been shared using a private link?
    pub shared: bool,

    /// The size of the data in bytes.
    pub size: u64,

    /// The ID of the source this dataset was built from.
    pub source: String,

    /// Is the source still available?
    pub source_status: bool,

    /// Was this created using a subscription plan?
    #[serde(default)]
    pub subscription: bool,

    /// User-defined tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// The maximum number of terms used in text analysis.
    pub term_limit: Option<u64>,

    /// The last time this was updated, as sent by BigML.
    pub updated: String,
}

impl Dataset {
    /// Look up a field by its ID.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Find the full description of our objective field in `fields`. This
    /// returns `None` if `fields` wasn't sent, as in list responses.
    pub fn objective_field_details(&self) -> Option<&Field> {
        self.objective_field
            .id
            .as_deref()
            .and_then(|id| self.field(id))
    }

    /// Parse `created` as a UTC timestamp.
    pub fn created_at(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(&self.created, TIMESTAMP_FORMAT)
    }

    /// Parse `updated` as a UTC timestamp.
    pub fn updated_at(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(&self.updated, TIMESTAMP_FORMAT)
    }
}

impl Resource for Dataset {
    fn id_prefix() -> &'static str {
        "dataset/"
    }

    fn id(&self) -> &Id<Self> {
        &self.resource
    }
}

/// Information about a field in a dataset.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Field {
    /// The position of this column in the uploaded source.
    pub column_number: u64,

    /// The storage type, like `string` or `int16`.
    pub datatype: String,

    /// The ID of this field. Only `objective_field` carries this; entries
    /// in `Dataset::fields` are keyed by it instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The name of this field.
    pub name: String,

    /// How BigML treats this field, like `categorical` or `numeric`.
    pub optype: String,

    /// The position of this field in the dataset.
    pub order: u64,

    /// Text analysis settings. Numeric fields leave this out.
    #[serde(default)]
    pub term_analysis: TermAnalysis,
}

/// Text analysis settings for a field.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct TermAnalysis {
    /// Is term analysis turned on?
    #[serde(default)]
    pub enabled: bool,
}

/// One page of datasets, as returned by `Client::list_datasets`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct DatasetResponse {
    /// Where this page sits in the full list.
    pub meta: Meta,

    /// The datasets on this page, in the order BigML sent them.
    #[serde(rename = "objects")]
    pub datasets: Vec<Dataset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    static DATASET: &str = include_str!("../../tests/fixtures/dataset.json");
    static DATASET_LIST: &str = include_str!("../../tests/fixtures/dataset_list.json");

    #[test]
    fn deserialize_single_dataset() {
        let dataset: Dataset = serde_json::from_str(DATASET).unwrap();
        assert_eq!(dataset.id().as_str(), "dataset/53e3dd0fffa0440f4300a95c");
        assert!(dataset.all_fields);
        assert_eq!(dataset.name, "ultimate_7k's dataset");
        assert_eq!(dataset.locale, "en_US");
        assert_eq!(dataset.columns, 16);
        assert_eq!(dataset.rows, 6791);
        assert_eq!(dataset.size, 499443);
        assert_eq!(dataset.number_of_models, 1);
        assert_eq!(dataset.number_of_predictions, 502);
        assert_eq!(dataset.field_types["numeric"], 7);
        assert_eq!(dataset.field_types["total"], 16);
        assert_eq!(dataset.fields.len(), 16);
        assert_eq!(dataset.input_fields.len(), 16);
        assert_eq!(dataset.term_limit, Some(32));
        assert!(dataset.status.unwrap().code.is_ready());
    }

    #[test]
    fn status_is_optional() {
        let mut json: serde_json::Value = serde_json::from_str(DATASET).unwrap();
        json.as_object_mut().unwrap().remove("status");
        let dataset: Dataset = serde_json::from_value(json).unwrap();
        assert!(dataset.status.is_none());
        assert!(dataset.all_fields);
    }

    #[test]
    fn term_analysis_without_enabled_is_disabled() {
        let json = r#"{"column_number": 0, "datatype": "string", "name": "notes", "optype": "text", "order": 0, "term_analysis": {}}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert!(!field.term_analysis.enabled);
    }

    #[test]
    fn objective_field_is_a_known_field() {
        let dataset: Dataset = serde_json::from_str(DATASET).unwrap();
        assert_eq!(dataset.objective_field.id.as_deref(), Some("00000f"));
        assert_eq!(dataset.objective_field.name, "status");
        assert!(dataset.objective_field.term_analysis.enabled);

        let details = dataset.objective_field_details().unwrap();
        assert_eq!(details.name, dataset.objective_field.name);
        assert_eq!(details.column_number, 15);
        assert_eq!(details.optype, "categorical");
    }

    #[test]
    fn numeric_fields_have_term_analysis_disabled() {
        let dataset: Dataset = serde_json::from_str(DATASET).unwrap();
        let field = dataset.field("00000e").unwrap();
        assert_eq!(field.name, "total_voicemail");
        assert_eq!(field.datatype, "int16");
        assert_eq!(field.optype, "numeric");
        assert_eq!(field.id, None);
        assert!(!field.term_analysis.enabled);
        assert!(dataset.field("ffffff").is_none());
    }

    #[test]
    fn timestamps_parse() {
        let dataset: Dataset = serde_json::from_str(DATASET).unwrap();
        let created = dataset.created_at().unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2014, 8, 7));
        assert_eq!((created.hour(), created.minute(), created.second()), (20, 9, 51));
        assert!(dataset.updated_at().unwrap() > created);
    }

    #[test]
    fn deserialize_dataset_list() {
        let page: DatasetResponse = serde_json::from_str(DATASET_LIST).unwrap();
        assert_eq!(page.meta.limit, 20);
        assert_eq!(page.meta.offset, 0);
        assert_eq!(page.meta.total_count, 1);
        assert_eq!(page.datasets.len(), 1);

        let dataset = &page.datasets[0];
        assert!(dataset.all_fields);
        // List responses don't include per-field details.
        assert!(dataset.fields.is_empty());
        assert!(dataset.objective_field_details().is_none());
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let json = DATASET.replace(r#""rows": 6791"#, r#""rows": "many""#);
        assert!(serde_json::from_str::<Dataset>(&json).is_err());
    }
}
