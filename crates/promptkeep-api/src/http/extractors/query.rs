//! Query string parameters for the read endpoints.
//!
//! Every field is optional so a missing parameter reaches the handler and is
//! reported in the JSON body instead of as an extractor rejection.

use serde::Deserialize;

/// `?key=`
#[derive(Debug, Deserialize, Default)]
pub struct KeyQuery {
    pub key: Option<String>,
}

/// `?keys=a,b,c`
#[derive(Debug, Deserialize, Default)]
pub struct KeysQuery {
    pub keys: Option<String>,
}

impl KeysQuery {
    /// Comma-separated keys, verbatim. An absent parameter is no keys.
    pub fn split(&self) -> Vec<String> {
        match self.keys.as_deref() {
            Some(keys) => keys.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        }
    }
}

/// `?key=&index=`
#[derive(Debug, Deserialize, Default)]
pub struct ListItemQuery {
    pub key: Option<String>,
    pub index: Option<i64>,
}

/// `?type=`
#[derive(Debug, Deserialize, Default)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_query_splits_verbatim() {
        let query = KeysQuery {
            keys: Some("a, a,,c ".to_string()),
        };
        assert_eq!(query.split(), vec!["a", " a", "", "c "]);
    }

    #[test]
    fn keys_query_absent_is_empty() {
        assert!(KeysQuery::default().split().is_empty());
    }
}
