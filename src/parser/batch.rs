//! Splitting an EFetch batch into independently parseable records

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{Result, SearchError};

const ROOT_ELEMENT: &[u8] = b"PubmedArticleSet";
const RECORD_ELEMENT: &[u8] = b"PubmedArticle";

/// Slice out every top-level `<PubmedArticle>` record of the document
///
/// The whole document is walked once, so a malformed document is rejected
/// before any record is handed to the deserializer. Other record kinds under
/// the root (book articles, deletion notices) are ignored.
pub(super) fn split_records(xml: &str) -> Result<Vec<&str>> {
    let mut reader = Reader::from_str(xml);

    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut record_start: Option<usize> = None;

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            SearchError::XmlError(format!(
                "malformed document at byte {}: {}",
                reader.error_position(),
                e
            ))
        })?;

        match event {
            Event::Start(ref e) => {
                if depth == 0 {
                    check_root(e.name().as_ref(), root_seen)?;
                    root_seen = true;
                } else if depth == 1 && e.name().as_ref() == RECORD_ELEMENT {
                    record_start = Some(position);
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    if let Some(start) = record_start.take() {
                        records.push(&xml[start..reader.buffer_position() as usize]);
                    }
                }
            }
            Event::Empty(ref e) => {
                if depth == 0 {
                    check_root(e.name().as_ref(), root_seen)?;
                    root_seen = true;
                } else if depth == 1 && e.name().as_ref() == RECORD_ELEMENT {
                    debug!("Skipping empty PubmedArticle element");
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(SearchError::XmlError(
            "unexpected end of document inside an open element".to_string(),
        ));
    }
    if !root_seen {
        return Err(SearchError::XmlError(
            "document has no PubmedArticleSet root element".to_string(),
        ));
    }

    Ok(records)
}

fn check_root(name: &[u8], root_seen: bool) -> Result<()> {
    if root_seen {
        return Err(SearchError::XmlError(
            "document has more than one root element".to_string(),
        ));
    }
    if name != ROOT_ELEMENT {
        return Err(SearchError::XmlError(format!(
            "unexpected root element <{}>, expected <PubmedArticleSet>",
            String::from_utf8_lossy(name)
        )));
    }
    Ok(())
}
