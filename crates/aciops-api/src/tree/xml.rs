// XML encoding: `<imdata totalCount="N"><class attr=".."/>...</imdata>`

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{Encoding, Node, ROOT_CLASS, Tree};
use crate::error::Error;

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedResponse {
        encoding: Encoding::Xml,
        message: message.into(),
    }
}

fn element(start: &BytesStart<'_>) -> Result<Node, Error> {
    let class = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = Node::new(class);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(format!("bad attribute value for {key}: {e}")))?
            .into_owned();
        node.set_attr(key, value);
    }
    Ok(node)
}

pub(super) fn parse(body: &str) -> Result<Tree, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut top: Vec<Node> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(element(&start)?),
            Ok(Event::Empty(start)) => {
                let node = element(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(node),
                    None => top.push(node),
                }
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without opening tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(node),
                    None => top.push(node),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(malformed(format!(
                    "{e} at byte {}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.class())));
    }

    let mut top = top.into_iter();
    let root = match (top.next(), top.next()) {
        (Some(root), None) if root.class() == ROOT_CLASS => root,
        // A bare object without the imdata wrapper: treat it as the only record.
        (Some(record), None) => Node::new(ROOT_CLASS)
            .with_attr("totalCount", "1")
            .with_child(record),
        (None, _) => return Err(malformed("document has no root element")),
        (Some(_), Some(_)) => return Err(malformed("document has more than one root element")),
    };

    Ok(Tree::from_root(root))
}
