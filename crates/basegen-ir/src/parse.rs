use crate::node::ValueNode;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a single node tree from JSON.
pub fn parse_node(json: &str) -> Result<ValueNode, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an ordered parameter list (a JSON array of node trees).
pub fn parse_nodes(json: &str) -> Result<Vec<ValueNode>, ParseError> {
    Ok(serde_json::from_str(json)?)
}
