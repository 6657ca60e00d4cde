//! Endpoint and credential catalog.
//!
//! Named targets are resolved against an external directory: an endpoint
//! definition (host/port/timeout options) plus a per-caller credential
//! mapping (user/password options), mirroring a foreign-server / user-mapping
//! catalog. The catalog itself lives outside this crate; it is consumed
//! through the [`Directory`] trait, read-only.

/// Named option set of one endpoint definition.
///
/// Recognized options are `host`, `port` and `timeout`; unknown option names
/// are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointDef {
    /// Option names and values, as stored in the catalog
    pub options: Vec<(String, String)>,
}

/// Named option set of one caller ↔ endpoint credential mapping.
///
/// Recognized options are `user` and `password`; unknown option names are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMapping {
    /// Option names and values, as stored in the catalog
    pub options: Vec<(String, String)>,
}

/// Read-only view of the endpoint/credential catalog.
pub trait Directory {
    /// Look up an endpoint definition by name.
    fn endpoint(&self, name: &str) -> Option<&EndpointDef>;

    /// Look up the credential mapping of `caller` for the named endpoint.
    fn user_mapping(&self, caller: &str, endpoint: &str) -> Option<&UserMapping>;
}

/// In-memory [`Directory`] implementation.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    endpoints: Vec<(String, EndpointDef)>,
    mappings: Vec<(String, String, UserMapping)>,
}

impl StaticDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint definition.
    pub fn add_endpoint<'a>(
        &mut self,
        name: &str,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let def = EndpointDef {
            options: options
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        self.endpoints.push((name.to_string(), def));
    }

    /// Register a credential mapping for a caller against an endpoint.
    pub fn add_mapping<'a>(
        &mut self,
        caller: &str,
        endpoint: &str,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let mapping = UserMapping {
            options: options
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        self.mappings
            .push((caller.to_string(), endpoint.to_string(), mapping));
    }
}

impl Directory for StaticDirectory {
    fn endpoint(&self, name: &str) -> Option<&EndpointDef> {
        self.endpoints
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, def)| def)
    }

    fn user_mapping(&self, caller: &str, endpoint: &str) -> Option<&UserMapping> {
        self.mappings
            .iter()
            .find(|(c, e, _)| c == caller && e == endpoint)
            .map(|(_, _, m)| m)
    }
}
