//! A client connection to BigML.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument};
use url::{form_urlencoded, Url};

use crate::errors::*;
use crate::resource::{Dataset, DatasetResponse, Id, Resource};

/// The default domain to use for making API requests to BigML.
pub const DEFAULT_BIGML_DOMAIN: &str = "bigml.io";

/// A client connection to BigML.
///
/// Cloning a `Client` is cheap, and clones share the same HTTP connection
/// pool.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    username: String,
    api_key: String,
    dev_mode: bool,
    http: reqwest::Client,
}

impl Client {
    /// Create a new `Client` talking to [`DEFAULT_BIGML_DOMAIN`]. If
    /// `dev_mode` is true, requests go to BigML's free development area.
    ///
    /// This doesn't touch the network.
    pub fn new<S1, S2>(username: S1, api_key: S2, dev_mode: bool) -> Result<Client>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::new_with_domain(DEFAULT_BIGML_DOMAIN, username, api_key, dev_mode)
    }

    /// Create a new `Client`, specifying the BigML domain to connect to. This
    /// is useful for people with private BigML deployments.
    pub fn new_with_domain<S1, S2>(
        domain: &str,
        username: S1,
        api_key: S2,
        dev_mode: bool,
    ) -> Result<Client>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let base_url = Url::parse(&format!("https://{}/", domain))
            .map_err(|e| Error::could_not_parse_url_with_domain(domain, e))?;
        Ok(Client {
            base_url,
            username: username.into(),
            api_key: api_key.into(),
            dev_mode,
            http: reqwest::Client::new(),
        })
    }

    /// Send requests to `base_url` instead, scheme and port included.
    pub fn with_base_url(mut self, base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: url_without_api_key(&base_url),
            });
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Use `http` to send requests. Configure timeouts, proxies and TLS
    /// there.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Fetch the first page of our datasets.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_datasets(&self) -> Result<DatasetResponse> {
        let url = self.url(&["dataset"])?;
        self.get(&url).await
    }

    /// Fetch the dataset with the hex ID `id`. This is the part after
    /// `dataset/`; to fetch using a full resource ID, see `Client::fetch`.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_dataset(&self, id: &str) -> Result<Dataset> {
        if id.is_empty() {
            return Err(Error::EmptyResourceId {});
        }
        let url = self.url(&["dataset", id])?;
        self.get(&url).await
    }

    /// Fetch an existing resource.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch<R: Resource>(&self, resource: &Id<R>) -> Result<R> {
        let segments = resource.as_str().split('/').collect::<Vec<_>>();
        let url = self.url(&segments)?;
        self.get(&url).await
    }

    /// The first path segment, which selects development or production mode.
    fn mode_segment(&self) -> &'static str {
        if self.dev_mode {
            "dev"
        } else {
            "prod"
        }
    }

    /// Format our BigML auth credentials as a query string, sorted by key.
    fn auth(&self) -> String {
        let mut params = BTreeMap::new();
        params.insert("username", self.username.as_str());
        params.insert("api_key", self.api_key.as_str());
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish()
    }

    /// Generate an authenticated URL with the specified path segments. Each
    /// segment is percent-encoded on its own.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: url_without_api_key(&self.base_url),
            })?
            .pop_if_empty()
            .push(self.mode_segment())
            .extend(segments);
        url.set_query(Some(&self.auth()));
        Ok(url)
    }

    /// Send a `GET` request and deserialize the response.
    async fn get<T>(&self, url: &Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", url_without_api_key(url));
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::could_not_access_url(url, e))?;
        self.handle_response_and_deserialize(url, res).await
    }

    /// Handle a response from the server, deserializing it as the
    /// appropriate type.
    async fn handle_response_and_deserialize<T>(
        &self,
        url: &Url,
        res: reqwest::Response,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = res.status();
        // `text` consumes `res`, which hands the connection back to the pool
        // before we try to decode anything.
        let body = res
            .text()
            .await
            .map_err(|e| Error::could_not_access_url(url, e))?;
        if status.is_success() {
            debug!("Success body: {}", &body);
            serde_json::from_str(&body)
                .map_err(|e| Error::could_not_decode_response(url, e))
        } else {
            debug!("Error status: {} body: {}", status, body);
            Err(Error::from_http_status(url, status, body))
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("api_key", &"*****")
            .field("dev_mode", &self.dev_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_url_is_sanitizable() {
        let client = Client::new("example", "secret", true).unwrap();
        let err = Error::from_http_status(
            &client.url(&["test"]).unwrap(),
            reqwest::StatusCode::NOT_FOUND,
            String::new(),
        );
        let err_str = format!("{}", err);
        println!("err_str = {:?}", err_str);
        assert!(!err_str.contains("secret"));
    }

    #[test]
    fn auth_is_sorted_by_key() {
        let client = Client::new("U", "K", true).unwrap();
        assert_eq!(client.auth(), "api_key=K&username=U");
    }

    #[test]
    fn auth_is_percent_encoded() {
        let client = Client::new("me@example.com", "a b&c=d", false).unwrap();
        assert_eq!(
            client.auth(),
            "api_key=a+b%26c%3Dd&username=me%40example.com"
        );
    }

    #[test]
    fn dev_mode_selects_path_prefix() {
        let dev = Client::new("U", "K", true).unwrap();
        assert_eq!(
            dev.url(&["dataset"]).unwrap().as_str(),
            "https://bigml.io/dev/dataset?api_key=K&username=U"
        );

        let prod = Client::new("U", "K", false).unwrap();
        assert_eq!(
            prod.url(&["dataset", "53e3dd0fffa0440f4300a95c"])
                .unwrap()
                .as_str(),
            "https://bigml.io/prod/dataset/53e3dd0fffa0440f4300a95c?api_key=K&username=U"
        );
    }

    #[test]
    fn ids_are_a_single_path_segment() {
        let client = Client::new("U", "K", true).unwrap();
        let url = client.url(&["dataset", "../source?x"]).unwrap();
        assert_eq!(url.path(), "/dev/dataset/..%2Fsource%3Fx");
        assert_eq!(url.query(), Some("api_key=K&username=U"));
    }

    #[test]
    fn custom_domain_and_base_url() {
        let client = Client::new_with_domain("bigml.example.com", "U", "K", true).unwrap();
        assert_eq!(
            client.url(&["dataset"]).unwrap().as_str(),
            "https://bigml.example.com/dev/dataset?api_key=K&username=U"
        );

        let base = Url::parse("http://127.0.0.1:8080/api/").unwrap();
        let client = client.with_base_url(base).unwrap();
        assert_eq!(
            client.url(&["dataset"]).unwrap().as_str(),
            "http://127.0.0.1:8080/api/dev/dataset?api_key=K&username=U"
        );
    }

    #[test]
    fn bad_domains_and_base_urls_are_rejected() {
        let err = Client::new_with_domain("not a domain", "U", "K", true).unwrap_err();
        assert!(matches!(err, Error::CouldNotParseUrlWithDomain { .. }));

        let client = Client::new("U", "K", true).unwrap();
        let err = client
            .with_base_url(Url::parse("mailto:someone@example.com").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = Client::new("example", "secret", true).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("example"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn client_can_be_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
