use std::collections::{BTreeMap, HashMap, HashSet};

use mc_config::EvalConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::value::Value;

// ---------------------------------------------------------------------------
// RequestContext
// ---------------------------------------------------------------------------

/// Read-only view of the incoming request. Header names are stored
/// lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    pub body: Value,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Body kept as raw text.
    pub fn with_body_text(mut self, text: impl Into<String>) -> Self {
        self.body = Value::Str(text.into());
        self
    }

    /// Body parsed as JSON; text that is not JSON is kept raw.
    pub fn with_body_json(mut self, text: &str) -> Self {
        self.body = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json) => json.into(),
            Err(_) => Value::Str(text.to_string()),
        };
        self
    }

    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub(crate) fn headers_value(&self) -> Value {
        string_map(&self.headers)
    }

    pub(crate) fn query_value(&self) -> Value {
        string_map(&self.query)
    }

    /// The `request` table seen by expressions.
    pub(crate) fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        map.insert("method".to_string(), Value::from(self.method.as_str()));
        map.insert("path".to_string(), Value::from(self.path.as_str()));
        map.insert("query".to_string(), self.query_value());
        map.insert("headers".to_string(), self.headers_value());
        map.insert("body".to_string(), self.body.clone());
        Value::Map(map)
    }
}

fn string_map(map: &BTreeMap<String, String>) -> Value {
    Value::Map(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// ExecutionContext
// ---------------------------------------------------------------------------

/// Per-request evaluation state: the request, the endpoint's call counter,
/// variables bound by `>>`, and the random source for `random*` builtins.
#[derive(Debug)]
pub struct ExecutionContext {
    pub call_count: u64,
    request: RequestContext,
    variables: HashMap<String, Value>,
    /// Variables bound to the whole headers table; their keys stay
    /// case-insensitive.
    header_tables: HashSet<String>,
    rng: StdRng,
}

impl ExecutionContext {
    /// Fresh context with an entropy-seeded RNG.
    pub fn new(call_count: u64, request: RequestContext) -> Self {
        Self::with_rng(call_count, request, StdRng::from_os_rng())
    }

    /// Fresh context with a reproducible RNG.
    pub fn seeded(call_count: u64, request: RequestContext, seed: u64) -> Self {
        Self::with_rng(call_count, request, StdRng::seed_from_u64(seed))
    }

    /// Seeded when `[eval] seed` is configured, entropy otherwise.
    pub fn from_config(call_count: u64, request: RequestContext, config: &EvalConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(call_count, request, seed),
            None => Self::new(call_count, request),
        }
    }

    fn with_rng(call_count: u64, request: RequestContext, rng: StdRng) -> Self {
        Self {
            call_count,
            request,
            variables: HashMap::new(),
            header_tables: HashSet::new(),
            rng,
        }
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Bound variable rendered as text, for response-template interpolation.
    pub fn variable_text(&self, name: &str) -> Option<String> {
        self.variables.get(name).map(Value::to_string)
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.header_tables.remove(&name);
        self.variables.insert(name, value);
    }

    /// Bind `name` to a copy of the headers table.
    pub(crate) fn bind_headers(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.header_tables.insert(name.clone());
        self.variables.insert(name, value);
    }

    pub(crate) fn is_header_table(&self, name: &str) -> bool {
        self.header_tables.contains(name)
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
