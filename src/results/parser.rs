//! Appliance XML response parser
//!
//! The appliance answers with a `GSP` envelope:
//!
//! ```xml
//! <GSP VER="3.2">
//!   <Q>rust</Q>
//!   <RES SN="1" EN="2">
//!     <M>2</M>
//!     <NB><NU>/search?...</NU></NB>
//!     <R N="1"><U>http://...</U><T>Title</T><S>Snippet</S></R>
//!   </RES>
//! </GSP>
//! ```
//!
//! Only the fields above are read; everything else is skipped.

use super::types::{Document, SearchResult};
use crate::error::{GsaError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse an appliance XML response
pub fn parse_response(xml: &str) -> Result<SearchResult> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut parser = ResponseParser::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close()?;
            }
            Event::End(_) => parser.close()?,
            Event::Text(e) => {
                if parser.stack.is_empty() {
                    return Err(GsaError::Parse("text outside of root element".to_string()));
                }
                parser.text.push_str(&e.unescape()?);
            }
            Event::CData(e) => {
                parser.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

#[derive(Default)]
struct ResponseParser {
    stack: Vec<Vec<u8>>,
    text: String,
    seen_root: bool,
    seen_res: bool,
    result: SearchResult,
    current: Option<Document>,
}

impl ResponseParser {
    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if self.stack.is_empty() {
            if self.seen_root {
                return Err(GsaError::Parse("multiple root elements".to_string()));
            }
            self.seen_root = true;
        }
        let name = e.name().as_ref().to_vec();
        let parent = self.stack.last().cloned();

        match (name.as_slice(), parent.as_deref()) {
            (b"RES", _) if !self.seen_res => {
                self.seen_res = true;
                self.result.start_index = numeric_attr(e, "SN")?.unwrap_or(0);
                self.result.end_index = numeric_attr(e, "EN")?.unwrap_or(0);
            }
            (b"R", Some(b"RES")) => {
                let index = numeric_attr(e, "N")?.unwrap_or(0);
                self.current = Some(Document::new(index));
            }
            (b"PU", Some(b"NB")) => self.result.has_previous = true,
            (b"NU", Some(b"NB")) => self.result.has_next = true,
            (b"M" | b"Q" | b"T" | b"U" | b"S", _) => self.text.clear(),
            _ => {}
        }

        self.stack.push(name);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let name = self
            .stack
            .pop()
            .ok_or_else(|| GsaError::Parse("unbalanced end tag".to_string()))?;
        let parent = self.stack.last().cloned();
        let is_root_child = self.stack.len() == 1;
        let text = std::mem::take(&mut self.text);

        match (name.as_slice(), parent.as_deref()) {
            (b"M", Some(b"RES")) => {
                self.result.total_count = parse_number("M", text.trim())?;
            }
            (b"Q", Some(b"RES")) => self.result.query = text,
            (b"Q", _) if is_root_child => self.result.query = text,
            (b"T", Some(b"R")) => set_field(&mut self.current, |d| d.title = text),
            (b"U", Some(b"R")) => set_field(&mut self.current, |d| d.url = text),
            (b"S", Some(b"R")) => set_field(&mut self.current, |d| d.summary = text),
            (b"R", Some(b"RES")) => {
                if let Some(doc) = self.current.take() {
                    self.result.documents.push(doc);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<SearchResult> {
        if !self.stack.is_empty() {
            return Err(GsaError::Parse(format!(
                "unexpected end of document inside <{}>",
                String::from_utf8_lossy(&self.stack[self.stack.len() - 1])
            )));
        }
        if !self.seen_root {
            return Err(GsaError::Parse("empty response".to_string()));
        }

        if self.result.total_count == 0 {
            let query = std::mem::take(&mut self.result.query);
            return Ok(SearchResult::empty(query));
        }
        Ok(self.result)
    }
}

fn set_field(current: &mut Option<Document>, apply: impl FnOnce(&mut Document)) {
    if let Some(doc) = current.as_mut() {
        apply(doc);
    }
}

fn numeric_attr(e: &BytesStart<'_>, name: &str) -> Result<Option<u64>> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|err| GsaError::Parse(err.to_string()))?;
    match attr {
        Some(attr) => {
            let value = attr.unescape_value()?;
            parse_number(name, value.trim()).map(Some)
        }
        None => Ok(None),
    }
}

fn parse_number(field: &str, value: &str) -> Result<u64> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| GsaError::Parse(format!("{} is not a number: {:?}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RESULTS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<GSP VER="3.2">
<TM>0.052</TM>
<Q>open day</Q>
<PARAM name="q" value="open day" original_value="open+day"/>
<RES SN="1" EN="2">
<M>2</M>
<FI/>
<R N="1">
<U>http://www.example.ac.uk/open-days/</U>
<UE>http://www.example.ac.uk/open-days/</UE>
<T>&lt;b&gt;Open days&lt;/b&gt; » University</T>
<RK>10</RK>
<S>Book a place on an &lt;b&gt;open day&lt;/b&gt;.&lt;br&gt;Tours run daily.</S>
<LANG>en</LANG>
</R>
<R N="2">
<U>http://www.example.ac.uk/visit/</U>
<T>Visit us</T>
<S><![CDATA[Campus tours & maps]]></S>
</R>
</RES>
</GSP>"#;

    #[test]
    fn test_parse_two_results() {
        let result = parse_response(TWO_RESULTS).unwrap();
        assert_eq!(result.total_count, 2);
        assert_eq!(result.query, "open day");
        assert_eq!(result.start_index, 1);
        assert_eq!(result.end_index, 2);
        assert!(!result.has_previous);
        assert!(!result.has_next);
        assert_eq!(result.documents.len(), 2);

        let first = &result.documents[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.no, "1");
        assert_eq!(first.url, "http://www.example.ac.uk/open-days/");
        assert_eq!(first.title, "<b>Open days</b> » University");
        assert_eq!(
            first.summary,
            "Book a place on an <b>open day</b>.<br>Tours run daily."
        );

        let second = &result.documents[1];
        assert_eq!(second.index, 2);
        assert_eq!(second.title, "Visit us");
        assert_eq!(second.summary, "Campus tours & maps");
    }

    #[test]
    fn test_parse_navigation_flags() {
        let xml = r#"<GSP><Q>rust</Q><RES SN="11" EN="20"><M>53</M>
            <NB><PU>/search?start=0</PU><NU>/search?start=20</NU></NB>
            <R N="11"><U>http://a/</U><T>A</T><S></S></R></RES></GSP>"#;
        let result = parse_response(xml).unwrap();
        assert_eq!(result.total_count, 53);
        assert_eq!(result.start_index, 11);
        assert!(result.has_previous);
        assert!(result.has_next);
        assert_eq!(result.documents[0].summary, "");
    }

    #[test]
    fn test_parse_bare_res_root() {
        let xml = r#"<RES SN="1" EN="1"><M>1</M><Q>x</Q><R N="1"><T>t</T><U>http://u/</U><S>s</S></R></RES>"#;
        let result = parse_response(xml).unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.query, "x");
        assert_eq!(result.documents.len(), 1);
    }

    #[test]
    fn test_parse_no_results() {
        let xml = r#"<GSP VER="3.2"><TM>0.01</TM><Q>zzzz</Q></GSP>"#;
        let result = parse_response(xml).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.query, "zzzz");
        assert!(result.documents.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_response("<GSP><RES SN=\"1\"><M>2</M></GSP>"),
            Err(GsaError::Parse(_))
        ));
        assert!(matches!(
            parse_response("<GSP><RES>"),
            Err(GsaError::Parse(_))
        ));
        assert!(matches!(parse_response(""), Err(GsaError::Parse(_))));
        assert!(matches!(
            parse_response("Service Unavailable"),
            Err(GsaError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_bad_number() {
        let xml = r#"<GSP><RES SN="one" EN="2"><M>2</M></RES></GSP>"#;
        assert!(matches!(parse_response(xml), Err(GsaError::Parse(_))));
    }
}
