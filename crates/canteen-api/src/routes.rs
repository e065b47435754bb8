// Backend routing table.
//
// Every request names a `Backend`. Each backend resolves to
// `<host><path-prefix>`; in single-backend mode they all share one base.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use url::Url;

use crate::error::Error;

/// Named API surface a request is routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    /// Authentication and user profile.
    Common,
    /// Reference data: dishes, warehouses, units, students.
    Refs,
    /// Warehouse documents: invoices, write-offs, movements, sales.
    Docs,
    /// Report generation.
    Reports,
}

/// Path prefixes per backend, appended to the host in multi-backend mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePrefixes {
    pub common: String,
    pub refs: String,
    pub docs: String,
    pub reports: String,
}

impl Default for RoutePrefixes {
    fn default() -> Self {
        Self {
            common: "/api".into(),
            refs: "/api/refs".into(),
            docs: "/api/docs".into(),
            reports: "/api/reports".into(),
        }
    }
}

/// Resolved base URL for each backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    common: Url,
    refs: Url,
    docs: Url,
    reports: Url,
}

impl RouteTable {
    /// Route every backend to the same base URL.
    pub fn single(base: Url) -> Self {
        Self {
            common: base.clone(),
            refs: base.clone(),
            docs: base.clone(),
            reports: base,
        }
    }

    /// Route each backend to `<host><prefix>`.
    pub fn multi(host: &Url, prefixes: &RoutePrefixes) -> Result<Self, Error> {
        Ok(Self {
            common: with_prefix(host, &prefixes.common)?,
            refs: with_prefix(host, &prefixes.refs)?,
            docs: with_prefix(host, &prefixes.docs)?,
            reports: with_prefix(host, &prefixes.reports)?,
        })
    }

    /// The base URL for a backend.
    pub fn base(&self, backend: Backend) -> &Url {
        match backend {
            Backend::Common => &self.common,
            Backend::Refs => &self.refs,
            Backend::Docs => &self.docs,
            Backend::Reports => &self.reports,
        }
    }

    /// Resolve a backend by its configuration key (`"docs"`, `"refs"`, ...).
    pub fn base_for_key(&self, key: &str) -> Result<&Url, Error> {
        let backend: Backend = key
            .parse()
            .map_err(|_| Error::UnknownBackend(key.to_owned()))?;
        Ok(self.base(backend))
    }

    /// Join a relative path onto a backend base.
    ///
    /// The base path is kept: `https://h/api/docs` + `/incoming-invoices/`
    /// gives `https://h/api/docs/incoming-invoices/`. Trailing slashes on
    /// `path` are preserved (the server redirects without them).
    pub fn url(&self, backend: Backend, path: &str) -> Result<Url, Error> {
        let base = self.base(backend).as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

fn with_prefix(host: &Url, prefix: &str) -> Result<Url, Error> {
    let host = host.as_str().trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        Ok(Url::parse(host)?)
    } else {
        Ok(Url::parse(&format!("{host}/{prefix}"))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn single_routes_everything_to_one_base() {
        let table = RouteTable::single(Url::parse("http://localhost:8000").unwrap());
        let docs = table.url(Backend::Docs, "/incoming-invoices/").unwrap();
        let refs = table.url(Backend::Refs, "dishes/7/").unwrap();
        assert_eq!(docs.as_str(), "http://localhost:8000/incoming-invoices/");
        assert_eq!(refs.as_str(), "http://localhost:8000/dishes/7/");
    }

    #[test]
    fn multi_applies_prefixes() {
        let host = Url::parse("https://canteen.example/").unwrap();
        let table = RouteTable::multi(&host, &RoutePrefixes::default()).unwrap();
        assert_eq!(
            table.url(Backend::Docs, "/write-off-from-warehouses/").unwrap().as_str(),
            "https://canteen.example/api/docs/write-off-from-warehouses/"
        );
        assert_eq!(
            table.url(Backend::Common, "/token/").unwrap().as_str(),
            "https://canteen.example/api/token/"
        );
    }

    #[test]
    fn empty_prefix_means_host_root() {
        let host = Url::parse("https://canteen.example").unwrap();
        let prefixes = RoutePrefixes {
            common: String::new(),
            ..RoutePrefixes::default()
        };
        let table = RouteTable::multi(&host, &prefixes).unwrap();
        assert_eq!(
            table.url(Backend::Common, "user-data/").unwrap().as_str(),
            "https://canteen.example/user-data/"
        );
    }

    #[test]
    fn base_for_key_rejects_unknown() {
        let table = RouteTable::single(Url::parse("http://localhost:8000").unwrap());
        assert!(table.base_for_key("DOCS").is_ok());
        assert!(matches!(
            table.base_for_key("billing"),
            Err(Error::UnknownBackend(k)) if k == "billing"
        ));
    }
}
