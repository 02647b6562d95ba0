// JSON encoding: `{"totalCount":"N","imdata":[{"<class>":{"attributes":{..},"children":[..]}}]}`

use serde_json::{Map, Value};

use super::{Encoding, Node, ROOT_CLASS, Tree};
use crate::error::Error;

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedResponse {
        encoding: Encoding::Json,
        message: message.into(),
    }
}

/// Attribute values are strings on the wire, but tolerate scalars.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convert one `{"<class>": {...}}` wrapper into nodes (normally exactly one).
fn wrapped_nodes(wrapper: &Value, out: &mut Vec<Node>) {
    let Some(map) = wrapper.as_object() else {
        return;
    };
    for (class, body) in map {
        out.push(node(class, body));
    }
}

fn node(class: &str, body: &Value) -> Node {
    let mut node = Node::new(class);
    let Some(body) = body.as_object() else {
        return node;
    };

    if let Some(attrs) = body.get("attributes").and_then(Value::as_object) {
        for (key, value) in attrs {
            if let Some(value) = scalar(value) {
                node.set_attr(key.clone(), value);
            }
        }
    }

    if let Some(children) = body.get("children").and_then(Value::as_array) {
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            wrapped_nodes(child, &mut nodes);
        }
        for child in nodes {
            node.push_child(child);
        }
    }

    node
}

fn envelope(map: &Map<String, Value>) -> Result<Tree, Error> {
    let imdata = map
        .get(ROOT_CLASS)
        .ok_or_else(|| malformed("missing imdata"))?
        .as_array()
        .ok_or_else(|| malformed("imdata is not an array"))?;

    let mut root = Node::new(ROOT_CLASS);
    if let Some(total) = map.get("totalCount").and_then(scalar) {
        root.set_attr("totalCount".into(), total);
    }

    let mut records = Vec::with_capacity(imdata.len());
    for wrapper in imdata {
        wrapped_nodes(wrapper, &mut records);
    }
    for record in records {
        root.push_child(record);
    }

    Ok(Tree::from_root(root))
}

pub(super) fn from_value(value: &Value) -> Result<Tree, Error> {
    let map = value
        .as_object()
        .ok_or_else(|| malformed("top-level value is not an object"))?;
    envelope(map)
}

pub(super) fn parse(body: &str) -> Result<Tree, Error> {
    let value: Value = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    from_value(&value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn listing_keeps_record_order() {
        let value = json!({
            "totalCount": "2",
            "imdata": [
                {"fvTenant": {"attributes": {"name": "common"}}},
                {"fvTenant": {"attributes": {"name": "T1"}}}
            ]
        });
        let tree = from_value(&value).unwrap();
        let names: Vec<_> = tree
            .records()
            .iter()
            .filter_map(|n| n.attribute("name"))
            .collect();
        assert_eq!(names, ["common", "T1"]);
    }

    #[test]
    fn missing_children_and_attributes_are_empty() {
        let value = json!({"imdata": [{"fvCEp": {}}]});
        let tree = from_value(&value).unwrap();
        let cep = &tree.records()[0];
        assert!(cep.children().is_empty());
        assert!(cep.attributes().is_empty());
        assert_eq!(tree.total_count(), None);
    }

    #[test]
    fn numeric_attributes_are_stringified() {
        let value = json!({"totalCount": 1, "imdata": [{"fvBD": {"attributes": {"mtu": 9000, "descr": null}}}]});
        let tree = from_value(&value).unwrap();
        assert_eq!(tree.total_count(), Some(1));
        let bd = &tree.records()[0];
        assert_eq!(bd.attribute("mtu"), Some("9000"));
        assert_eq!(bd.attribute("descr"), None);
    }

    #[test]
    fn missing_imdata_is_malformed() {
        assert!(matches!(
            from_value(&json!({"data": []})),
            Err(Error::MalformedResponse {
                encoding: Encoding::Json,
                ..
            })
        ));
        assert!(from_value(&json!([1, 2])).is_err());
    }
}
