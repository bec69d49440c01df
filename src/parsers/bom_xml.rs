//! XML BOM extractor.
//!
//! Two layouts are recognised:
//!
//! - `<DETAILS><RECORD><REFDES>R1</REFDES><PART-NUM>...</PART-NUM>...</RECORD></DETAILS>`
//! - `<Component><Reference>R1</Reference><PartNumber>...</PartNumber>...</Component>`
//!
//! `RECORD` elements directly under a `DETAILS` element win when any of them
//! carries a reference designator; otherwise every `Component` element is
//! used. Fields are the direct child elements of the container (attributes on
//! the container are accepted too). Field names are resolved through a fixed
//! alias table, so nothing downstream sees source-specific names.

use super::traits::{ExtractError, FormatConfidence, RecordExtractor};
use crate::model::{parse_quantity, ComponentRecord, FileKind, RecordSet};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Source field names for each canonical attribute, in priority order.
pub const REFERENCE_ALIASES: &[&str] = &["REFDES", "Reference"];
pub const PART_NUMBER_ALIASES: &[&str] = &["PART-NUM", "PartNumber"];
pub const QUANTITY_ALIASES: &[&str] = &["QTY", "Quantity", "Value"];
pub const FOOTPRINT_ALIASES: &[&str] = &["PACKAGE", "Package", "Footprint"];
pub const DESCRIPTION_ALIASES: &[&str] = &["DESCRIPTION", "Description"];
pub const MANUFACTURER_ALIASES: &[&str] = &["CORP-NUM", "Manufacturer"];
pub const OPTION_ALIASES: &[&str] = &["OPT"];
pub const PART_NAME_ALIASES: &[&str] = &["PART-NAME", "PartName"];
pub const VALUE_ALIASES: &[&str] = &["Value"];

const DETAILS: &str = "DETAILS";
const RECORD: &str = "RECORD";
const COMPONENT: &str = "Component";

/// Which repeating container a field map was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    DetailsRecord,
    Component,
}

/// A container currently being read
#[derive(Debug)]
struct OpenContainer {
    kind: ContainerKind,
    /// Stack depth of the container element itself
    depth: usize,
    fields: IndexMap<String, String>,
}

impl OpenContainer {
    fn new(kind: ContainerKind, depth: usize, start: &BytesStart<'_>) -> Self {
        let mut fields = IndexMap::new();
        for attr in start.attributes().flatten() {
            let key = local_name(attr.key.as_ref());
            let value = attr
                .unescape_value()
                .map(|v| v.to_string())
                .unwrap_or_default();
            fields.insert(key, value);
        }
        Self {
            kind,
            depth,
            fields,
        }
    }

    /// Record a field value. The first non-empty occurrence of a name wins.
    fn set_field(&mut self, name: String, value: String) {
        let value = value.trim().to_string();
        match self.fields.get_mut(&name) {
            Some(existing) if existing.trim().is_empty() => *existing = value,
            Some(_) => {}
            None => {
                self.fields.insert(name, value);
            }
        }
    }
}

/// Extractor for XML BOM exports
#[derive(Debug, Clone, Copy, Default)]
pub struct BomXmlExtractor;

impl BomXmlExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Walk the document once, collecting field maps for both layouts.
    fn collect(
        content: &str,
    ) -> Result<(Vec<IndexMap<String, String>>, Vec<IndexMap<String, String>>), ExtractError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut element_stack: Vec<String> = Vec::new();
        let mut open: Option<OpenContainer> = None;
        let mut current_text = String::new();
        let mut details_records = Vec::new();
        let mut components = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = local_name(e.name().as_ref());
                    let parent = element_stack.last().map(String::as_str);
                    if open.is_none() {
                        open = container_kind(&name, parent)
                            .map(|kind| OpenContainer::new(kind, element_stack.len() + 1, e));
                    }
                    element_stack.push(name);
                    current_text.clear();
                }
                Ok(Event::Empty(ref e)) => {
                    let name = local_name(e.name().as_ref());
                    let parent = element_stack.last().map(String::as_str);
                    match open.as_mut() {
                        Some(container) if element_stack.len() == container.depth => {
                            container.set_field(name, String::new());
                        }
                        Some(_) => {}
                        None => {
                            if let Some(kind) = container_kind(&name, parent) {
                                let container =
                                    OpenContainer::new(kind, element_stack.len() + 1, e);
                                push_container(container, &mut details_records, &mut components);
                            }
                        }
                    }
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractError::XmlError(err.to_string()))?;
                    current_text.push_str(&text);
                }
                Ok(Event::CData(ref e)) => {
                    current_text.push_str(&String::from_utf8_lossy(e));
                }
                Ok(Event::End(_)) => {
                    let depth = element_stack.len();
                    let name = element_stack.pop().unwrap_or_default();
                    if let Some(container) = open.as_mut() {
                        if depth == container.depth + 1 {
                            container.set_field(name, std::mem::take(&mut current_text));
                        } else if depth == container.depth {
                            if let Some(done) = open.take() {
                                push_container(done, &mut details_records, &mut components);
                            }
                        }
                    }
                    current_text.clear();
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractError::XmlError(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(ExtractError::XmlError(format!(
                "unexpected end of document inside <{}>",
                element_stack.join("/")
            )));
        }

        Ok((details_records, components))
    }
}

impl RecordExtractor for BomXmlExtractor {
    fn kind(&self) -> FileKind {
        FileKind::BomXml
    }

    fn try_extract(&self, content: &str, source: &str) -> Result<RecordSet, ExtractError> {
        let (details_records, components) = Self::collect(content)?;

        let use_details = details_records
            .iter()
            .any(|fields| !resolve(fields, REFERENCE_ALIASES).is_empty());
        let chosen = if use_details || components.is_empty() {
            details_records
        } else {
            components
        };

        tracing::debug!(
            "Extracted {} XML record(s) from {} using <{}> containers",
            chosen.len(),
            source,
            if use_details { RECORD } else { COMPONENT }
        );

        let mut set = RecordSet::new(source).with_kind(FileKind::BomXml);
        for fields in &chosen {
            set.push(to_record(fields, source));
        }
        Ok(set)
    }

    fn detect(&self, content: &str) -> FormatConfidence {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        if !trimmed.starts_with('<') {
            return FormatConfidence::NONE;
        }
        if trimmed.contains("<RECORD") || trimmed.contains("<Component") {
            FormatConfidence::CERTAIN
        } else {
            FormatConfidence::HIGH
        }
    }
}

fn container_kind(name: &str, parent: Option<&str>) -> Option<ContainerKind> {
    match (name, parent) {
        (RECORD, Some(DETAILS)) => Some(ContainerKind::DetailsRecord),
        (COMPONENT, _) => Some(ContainerKind::Component),
        _ => None,
    }
}

fn push_container(
    container: OpenContainer,
    details_records: &mut Vec<IndexMap<String, String>>,
    components: &mut Vec<IndexMap<String, String>>,
) {
    match container.kind {
        ContainerKind::DetailsRecord => details_records.push(container.fields),
        ContainerKind::Component => components.push(container.fields),
    }
}

/// First non-empty value among `aliases`, trimmed.
fn resolve(fields: &IndexMap<String, String>, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|alias| fields.get(*alias))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn to_record(fields: &IndexMap<String, String>, source: &str) -> ComponentRecord {
    ComponentRecord {
        reference: resolve(fields, REFERENCE_ALIASES),
        part_number: resolve(fields, PART_NUMBER_ALIASES),
        quantity: parse_quantity(&resolve(fields, QUANTITY_ALIASES)),
        footprint: resolve(fields, FOOTPRINT_ALIASES),
        description: resolve(fields, DESCRIPTION_ALIASES),
        manufacturer: resolve(fields, MANUFACTURER_ALIASES),
        value: resolve(fields, VALUE_ALIASES),
        option: resolve(fields, OPTION_ALIASES),
        part_name: resolve(fields, PART_NAME_ALIASES),
        source_file: source.to_string(),
    }
}

/// Extract local name from qualified XML name (strips namespace prefix)
fn local_name(name: &[u8]) -> String {
    let name_str = String::from_utf8_lossy(name);
    name_str
        .rfind(':')
        .map_or_else(|| name_str.to_string(), |idx| name_str[idx + 1..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAILS_XML: &str = r#"<?xml version="1.0"?>
<BOM>
  <DETAILS>
    <RECORD>
      <REFDES> R1 </REFDES>
      <PART-NUM>RES-10K</PART-NUM>
      <QTY>2</QTY>
      <OPT>STD</OPT>
      <PACKAGE>0603</PACKAGE>
      <PART-NAME>RES_0603</PART-NAME>
      <CORP-NUM>Yageo</CORP-NUM>
      <DESCRIPTION>Resistor 10k &amp; 1%</DESCRIPTION>
    </RECORD>
    <RECORD>
      <REFDES>C1</REFDES>
      <PART-NUM>CAP-100N</PART-NUM>
      <QTY>n/a</QTY>
      <PACKAGE/>
    </RECORD>
  </DETAILS>
</BOM>"#;

    const COMPONENT_XML: &str = r#"<Design>
  <Components>
    <Component>
      <Reference>U1</Reference>
      <PartNumber>STM32F4</PartNumber>
      <Value>1</Value>
      <Package>LQFP64</Package>
      <Manufacturer>ST</Manufacturer>
      <Description>MCU</Description>
    </Component>
    <Component Reference="U2" PartNumber="LM317"/>
  </Components>
</Design>"#;

    #[test]
    fn test_details_record_layout() {
        let set = BomXmlExtractor::new().extract(DETAILS_XML, "old.xml");
        assert_eq!(set.len(), 2);
        let r1 = &set.records()[0];
        assert_eq!(r1.reference, "R1");
        assert_eq!(r1.part_number, "RES-10K");
        assert_eq!(r1.quantity, 2);
        assert_eq!(r1.footprint, "0603");
        assert_eq!(r1.manufacturer, "Yageo");
        assert_eq!(r1.description, "Resistor 10k & 1%");
        assert_eq!(r1.option, "STD");
        assert_eq!(r1.part_name, "RES_0603");
        assert_eq!(r1.source_file, "old.xml");

        let c1 = &set.records()[1];
        assert_eq!(c1.quantity, 0);
        assert_eq!(c1.footprint, "");
        assert_eq!(c1.manufacturer, "");
    }

    #[test]
    fn test_component_layout_with_attributes() {
        let set = BomXmlExtractor::new().extract(COMPONENT_XML, "new.xml");
        assert_eq!(set.len(), 2);
        let u1 = &set.records()[0];
        assert_eq!(u1.reference, "U1");
        assert_eq!(u1.quantity, 1);
        assert_eq!(u1.footprint, "LQFP64");
        assert_eq!(u1.manufacturer, "ST");
        let u2 = &set.records()[1];
        assert_eq!(u2.reference, "U2");
        assert_eq!(u2.part_number, "LM317");
    }

    #[test]
    fn test_details_preferred_over_components() {
        let xml = r"<Root>
            <DETAILS><RECORD><REFDES>R1</REFDES></RECORD></DETAILS>
            <Component><Reference>U9</Reference></Component>
        </Root>";
        let set = BomXmlExtractor::new().extract(xml, "x.xml");
        let refs: Vec<_> = set.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(refs, vec!["R1"]);
    }

    #[test]
    fn test_falls_back_when_details_have_no_refdes() {
        let xml = r"<Root>
            <DETAILS><RECORD><PART-NUM>X</PART-NUM></RECORD></DETAILS>
            <Component><Reference>U9</Reference></Component>
        </Root>";
        let set = BomXmlExtractor::new().extract(xml, "x.xml");
        let refs: Vec<_> = set.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(refs, vec!["U9"]);
    }

    #[test]
    fn test_record_outside_details_ignored() {
        let xml = "<Root><RECORD><REFDES>R1</REFDES></RECORD></Root>";
        let set = BomXmlExtractor::new().extract(xml, "x.xml");
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_fields_dropped_and_nested_ignored() {
        let xml = r"<DETAILS><RECORD>
            <REFDES>R1</REFDES>
            <COLOR>blue</COLOR>
            <EXTRA><PART-NUM>nested</PART-NUM></EXTRA>
        </RECORD></DETAILS>";
        let set = BomXmlExtractor::new().extract(xml, "x.xml");
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].part_number, "");
    }

    #[test]
    fn test_alias_priority() {
        let xml = r"<Component>
            <Reference>R5</Reference>
            <Quantity>4</Quantity>
            <Value>10k</Value>
            <Footprint>0402</Footprint>
        </Component>";
        let set = BomXmlExtractor::new().extract(xml, "x.xml");
        let r5 = &set.records()[0];
        assert_eq!(r5.quantity, 4);
        assert_eq!(r5.value, "10k");
        assert_eq!(r5.footprint, "0402");
    }

    #[test]
    fn test_malformed_is_empty_when_lenient() {
        let xml = "<DETAILS><RECORD><REFDES>R1</REFDES></DETAILS>";
        let set = BomXmlExtractor::new().extract(xml, "bad.xml");
        assert!(set.is_empty());
        assert_eq!(set.kind, Some(FileKind::BomXml));
    }

    #[test]
    fn test_malformed_is_error_when_strict() {
        let xml = "<DETAILS><RECORD><REFDES>R1</REFDES>";
        let result = BomXmlExtractor::new().try_extract(xml, "bad.xml");
        assert!(matches!(result, Err(ExtractError::XmlError(_))));
    }

    #[test]
    fn test_no_container_is_empty_not_error() {
        let result = BomXmlExtractor::new().try_extract("<Root><Other/></Root>", "x.xml");
        assert!(result.map(|s| s.is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_detect() {
        let extractor = BomXmlExtractor::new();
        assert_eq!(extractor.detect(DETAILS_XML), FormatConfidence::CERTAIN);
        assert_eq!(extractor.detect("<html></html>"), FormatConfidence::HIGH);
        assert_eq!(extractor.detect("R1,10k,1"), FormatConfidence::NONE);
    }
}
