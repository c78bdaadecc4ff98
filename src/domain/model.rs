use chrono::{DateTime, Utc};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A string-keyed map that keeps insertion order.
///
/// Serializes as a JSON object. When deserializing, a repeated key keeps the
/// position of its first occurrence and the value of its last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts or replaces in place. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn first(&self) -> Option<(&str, &V)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// One configured scrape target.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SiteConfig {
    pub url: String,
    /// field name -> CSS selector
    pub selectors: OrderedMap<String>,
}

/// Site name -> config, in config file order.
pub type SiteMap = OrderedMap<SiteConfig>;

/// Outcome of scraping a single site.
///
/// `error` is set exactly when the scrape failed; the constructors are the
/// only way to build one.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScrapeResult {
    site: String,
    url: String,
    scraped_at: DateTime<Utc>,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    data: OrderedMap<Option<String>>,
}

impl ScrapeResult {
    pub fn succeeded(site: &str, url: &str, data: OrderedMap<Option<String>>) -> Self {
        Self {
            site: site.to_string(),
            url: url.to_string(),
            scraped_at: Utc::now(),
            success: true,
            error: None,
            data,
        }
    }

    pub fn failed(site: &str, url: &str, error: impl Into<String>) -> Self {
        Self {
            site: site.to_string(),
            url: url.to_string(),
            scraped_at: Utc::now(),
            success: false,
            error: Some(error.into()),
            data: OrderedMap::new(),
        }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> &OrderedMap<Option<String>> {
        &self.data
    }
}

/// Aggregated output of one run, keyed by site name in config order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct RunResult(OrderedMap<ScrapeResult>);

impl RunResult {
    pub fn new() -> Self {
        Self(OrderedMap::new())
    }

    pub fn record(&mut self, site: impl Into<String>, result: ScrapeResult) {
        self.0.insert(site, result);
    }

    pub fn get(&self, site: &str) -> Option<&ScrapeResult> {
        self.0.get(site)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScrapeResult)> {
        self.0.iter()
    }

    pub fn total(&self) -> usize {
        self.0.len()
    }

    pub fn succeeded(&self) -> usize {
        self.0.values().filter(|r| r.is_success()).count()
    }

    /// Two-space indented JSON, the on-disk format of both output files.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
