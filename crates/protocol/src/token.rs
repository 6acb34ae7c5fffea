use crate::error::{ProtocolError, Result};

/// Conservative ceiling on a button callback payload, in bytes.
pub const MAX_TOKEN_BYTES: usize = 64;

const DELIMITER: char = '|';

/// Replayable request state carried by an inline button.
///
/// Encodes to a short delimited string. The free-text field always sits last,
/// so decoding is a bounded `splitn` and stays unambiguous even when the
/// query contains odd characters; delimiters inside the query itself are
/// normalized to spaces at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    /// Step back to `page` of the results for `query`.
    Prev { query: String, page: usize },
    /// Step forward to `page` of the results for `query`.
    Next { query: String, page: usize },
    /// Re-check the gate, then show page 0 for `query`.
    VerifySearch { query: String },
    /// Re-check the gate, then show the record behind `key`.
    VerifyItem { key: String },
}

impl CallbackToken {
    /// Serialize to the wire form.
    ///
    /// Payloads over [`MAX_TOKEN_BYTES`] are refused rather than truncated;
    /// a truncated token would decode to a different query and break the
    /// round-trip guarantee.
    pub fn encode(&self) -> Result<String> {
        let raw = match self {
            Self::Prev { query, page } => format!("p|{page}|{}", normalize(query)),
            Self::Next { query, page } => format!("n|{page}|{}", normalize(query)),
            Self::VerifySearch { query } => format!("vs|{}", normalize(query)),
            Self::VerifyItem { key } => format!("vi|{}", normalize(key)),
        };
        if raw.len() > MAX_TOKEN_BYTES {
            return Err(ProtocolError::Oversize { len: raw.len() });
        }
        Ok(raw)
    }

    /// Parse the wire form produced by [`encode`](Self::encode).
    pub fn parse(raw: &str) -> Result<Self> {
        let (tag, rest) = raw
            .split_once(DELIMITER)
            .ok_or_else(|| ProtocolError::Malformed(raw.to_string()))?;
        match tag {
            "p" | "n" => {
                let (page, query) = rest
                    .split_once(DELIMITER)
                    .ok_or_else(|| ProtocolError::Malformed(raw.to_string()))?;
                let page = page
                    .parse()
                    .map_err(|_| ProtocolError::Malformed(raw.to_string()))?;
                let query = query.to_string();
                Ok(if tag == "p" {
                    Self::Prev { query, page }
                } else {
                    Self::Next { query, page }
                })
            }
            "vs" => Ok(Self::VerifySearch {
                query: rest.to_string(),
            }),
            "vi" => Ok(Self::VerifyItem {
                key: rest.to_string(),
            }),
            _ => Err(ProtocolError::UnknownTag(tag.to_string())),
        }
    }
}

fn normalize(text: &str) -> String {
    text.replace(DELIMITER, " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_every_variant() {
        let tokens = [
            CallbackToken::Prev {
                query: "sholay 1975".to_string(),
                page: 3,
            },
            CallbackToken::Next {
                query: "dil".to_string(),
                page: 0,
            },
            CallbackToken::VerifySearch {
                query: "mughal e azam".to_string(),
            },
            CallbackToken::VerifyItem {
                key: "tt0073707".to_string(),
            },
        ];

        for token in tokens {
            let wire = token.encode().expect("encode");
            assert_eq!(CallbackToken::parse(&wire).expect("parse"), token);
        }
    }

    #[test]
    fn delimiter_in_query_is_normalized_not_ambiguous() {
        let token = CallbackToken::Next {
            query: "piku|2015".to_string(),
            page: 1,
        };
        let wire = token.encode().expect("encode");

        let parsed = CallbackToken::parse(&wire).expect("parse");
        assert_eq!(
            parsed,
            CallbackToken::Next {
                query: "piku 2015".to_string(),
                page: 1,
            }
        );
    }

    #[test]
    fn query_may_contain_spaces_and_digits() {
        // splitn semantics: everything after the page field belongs to the
        // query, including what looks like more fields.
        let parsed = CallbackToken::parse("n|2|hum aapke hain koun").expect("parse");
        assert_eq!(
            parsed,
            CallbackToken::Next {
                query: "hum aapke hain koun".to_string(),
                page: 2,
            }
        );
    }

    #[test]
    fn oversize_payload_is_refused() {
        let token = CallbackToken::VerifySearch {
            query: "x".repeat(MAX_TOKEN_BYTES),
        };
        assert!(matches!(
            token.encode(),
            Err(ProtocolError::Oversize { .. })
        ));

        let max_fit = CallbackToken::VerifySearch {
            query: "x".repeat(MAX_TOKEN_BYTES - 3),
        };
        let wire = max_fit.encode().expect("fits exactly");
        assert_eq!(wire.len(), MAX_TOKEN_BYTES);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            CallbackToken::parse("no-delimiter"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            CallbackToken::parse("zz|whatever"),
            Err(ProtocolError::UnknownTag(_))
        ));
        assert!(matches!(
            CallbackToken::parse("p|notanumber|query"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            CallbackToken::parse("n|5"),
            Err(ProtocolError::Malformed(_))
        ));
    }
}
