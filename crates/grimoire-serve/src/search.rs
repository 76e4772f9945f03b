//! Full-text search client for resolving entry names.
//!
//! One query per name against the backend's `_search` endpoint. The query
//! scores the literal string `"<name> type:(spell OR cantrip)"` across the
//! name/alias/text/trait/type fields, filters out remastered duplicates
//! and excluded documents, and asks for the top 50 hits by relevance -
//! but only the first hit is ever consumed.

use std::time::Duration;

use reqwest::header;
use serde::Deserialize;
use serde_json::{Value, json};

use grimoire_core::SpellRecord;

use crate::config::Config;
use crate::error::CardError;

/// The backend sits behind a CORS-fronted gateway that rejects anonymous
/// clients, so requests carry browser-like identification headers.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) \
     Gecko/20100101 Firefox/124.0";
const SITE_ORIGIN: &str = "https://2e.aonprd.com";

/// Client for the external search backend.
#[derive(Debug)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    /// Build a client against the configured endpoint.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.search_url.clone(),
        })
    }

    /// Look up one entry by name, returning the top hit's record.
    ///
    /// An empty result set is `Ok(None)`, not an error. A malformed
    /// response body is logged and also treated as absent. A failed round
    /// trip or non-success status is a transport error.
    pub async fn search(&self, name: &str) -> Result<Option<SpellRecord>, CardError> {
        let query = build_query(name);

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::ORIGIN, SITE_ORIGIN)
            .header(header::REFERER, format!("{SITE_ORIGIN}/"))
            .json(&query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(CardError::SearchStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(parse_response(&body))
    }
}

/// Build the search query body for one entry name.
pub fn build_query(name: &str) -> Value {
    json!({
        "query": {
            "function_score": {
                "query": {
                    "bool": {
                        "should": [
                            {
                                "query_string": {
                                    "query": format!("{name} type:(spell OR cantrip)"),
                                    "default_operator": "AND",
                                    "fields": [
                                        "name",
                                        "legacy_name",
                                        "remaster_name",
                                        "text^0.1",
                                        "trait_raw",
                                        "type"
                                    ]
                                }
                            }
                        ],
                        "filter": [
                            {
                                "bool": {
                                    "must_not": {
                                        "exists": { "field": "remaster_id" }
                                    }
                                }
                            }
                        ],
                        "must_not": [
                            { "term": { "exclude_from_search": true } }
                        ],
                        "minimum_should_match": 1
                    }
                },
                "boost_mode": "multiply",
                "functions": [
                    {
                        "filter": { "terms": { "type": ["Ancestry", "Class"] } },
                        "weight": 1.1
                    },
                    {
                        "filter": { "terms": { "type": ["Trait"] } },
                        "weight": 1.05
                    }
                ]
            }
        },
        "size": 50,
        "sort": ["_score", "_doc"],
        "_source": { "excludes": ["text"] }
    })
}

/// Pull the top hit's `_source` out of a response body.
///
/// Anything that does not parse as the expected shape is reported and
/// treated as no hit.
pub fn parse_response(body: &[u8]) -> Option<SpellRecord> {
    #[derive(Debug, Default, Deserialize)]
    struct HitsEnvelope {
        #[serde(default)]
        hits: Vec<Hit>,
    }

    #[derive(Debug, Deserialize)]
    struct Hit {
        #[serde(rename = "_source")]
        source: SpellRecord,
    }

    #[derive(Debug, Deserialize)]
    struct SearchResponse {
        #[serde(default)]
        hits: HitsEnvelope,
    }

    match serde_json::from_slice::<SearchResponse>(body) {
        Ok(response) => response.hits.hits.into_iter().next().map(|hit| hit.source),
        Err(e) => {
            tracing::warn!(error = %e, "malformed search response");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_scores_the_literal_name_string() {
        let query = build_query("Fireball");
        let qs = &query["query"]["function_score"]["query"]["bool"]["should"][0]["query_string"];
        assert_eq!(
            qs["query"].as_str().unwrap(),
            "Fireball type:(spell OR cantrip)"
        );
        assert_eq!(qs["default_operator"].as_str().unwrap(), "AND");
    }

    #[test]
    fn query_searches_name_alias_text_trait_type() {
        let query = build_query("Heal");
        let fields = query["query"]["function_score"]["query"]["bool"]["should"][0]
            ["query_string"]["fields"]
            .as_array()
            .unwrap();
        let fields: Vec<&str> = fields.iter().filter_map(Value::as_str).collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "legacy_name",
                "remaster_name",
                "text^0.1",
                "trait_raw",
                "type"
            ]
        );
    }

    #[test]
    fn query_filters_remastered_and_excluded() {
        let query = build_query("Heal");
        let boolean = &query["query"]["function_score"]["query"]["bool"];
        assert_eq!(
            boolean["filter"][0]["bool"]["must_not"]["exists"]["field"]
                .as_str()
                .unwrap(),
            "remaster_id"
        );
        assert_eq!(
            boolean["must_not"][0]["term"]["exclude_from_search"].as_bool(),
            Some(true)
        );
    }

    #[test]
    fn query_boosts_ancestry_class_and_trait() {
        let query = build_query("Heal");
        let functions = query["query"]["function_score"]["functions"]
            .as_array()
            .unwrap();
        assert_eq!(functions[0]["weight"].as_f64().unwrap(), 1.1);
        assert_eq!(functions[1]["weight"].as_f64().unwrap(), 1.05);
    }

    #[test]
    fn query_asks_for_top_fifty_by_relevance() {
        let query = build_query("Heal");
        assert_eq!(query["size"].as_i64().unwrap(), 50);
        let sort: Vec<&str> = query["sort"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(sort, vec!["_score", "_doc"]);
    }

    #[test]
    fn parse_takes_the_first_hit() {
        let body = br#"{
            "hits": {
                "hits": [
                    {"_source": {"name": "Fireball", "spell_type": "Spell", "level": 3}},
                    {"_source": {"name": "Fire Shield", "spell_type": "Spell", "level": 4}}
                ]
            }
        }"#;
        let record = parse_response(body).unwrap();
        assert_eq!(record.name, "Fireball");
        assert_eq!(record.level, Some(3));
    }

    #[test]
    fn parse_empty_hits_is_absent() {
        assert!(parse_response(br#"{"hits": {"hits": []}}"#).is_none());
        assert!(parse_response(br#"{"hits": {}}"#).is_none());
        assert!(parse_response(br#"{}"#).is_none());
    }

    #[test]
    fn parse_malformed_body_is_absent() {
        assert!(parse_response(b"<html>gateway error</html>").is_none());
        assert!(parse_response(b"").is_none());
        assert!(parse_response(br#"{"hits": "nope"}"#).is_none());
    }
}
