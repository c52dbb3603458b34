//! Relationship management for the document part
//!
//! OOXML maps relationship IDs to targets through `_rels/*.rels`
//! files. The document part references its stylesheet and every
//! embedded image this way; pictures point at their media part through
//! an `r:embed` ID. Hyperlink-styled runs carry no relationship, so no
//! other types are needed here.

use std::collections::HashMap;

use quick_xml::escape::escape;

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs used by the packager
impl Relationships {
    /// Image relationship type
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
}

/// A relationship target with its type
#[derive(Debug, Clone)]
struct RelationshipTarget {
    target: String,
    rel_type: String,
}

/// Relationships for one document part
///
/// Maintains insertion order for deterministic XML serialization.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Ordered list of relationship IDs (maintains insertion order)
    order: Vec<String>,
    /// Map of relationship ID to target (for fast lookups)
    map: HashMap<String, RelationshipTarget>,
    /// Counter for generating unique IDs (starts at 1)
    next_id_counter: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
            next_id_counter: 1, // IDs start at rId1
        }
    }
}

impl Relationships {
    /// Create an empty relationships map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return the generated ID
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;

        self.order.push(id.clone());
        self.map.insert(
            id.clone(),
            RelationshipTarget {
                target: target.into(),
                rel_type: rel_type.into(),
            },
        );

        id
    }

    /// Add an image relationship and return the generated ID
    ///
    /// # Example
    ///
    /// ```
    /// use md2docx_ooxml::relationships::Relationships;
    ///
    /// let mut rels = Relationships::new();
    /// let id = rels.add_image("media/image1.png");
    /// assert_eq!(id, "rId1");
    /// ```
    pub fn add_image(&mut self, target: impl Into<String>) -> String {
        self.add(target, Self::TYPE_IMAGE)
    }

    /// Get the target for a relationship ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(|r| r.target.as_str())
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Serialize relationships to OOXML format
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        // Iterate in insertion order for deterministic output
        for id in &self.order {
            if let Some(rel) = self.map.get(id) {
                xml.push_str(&format!(
                    r#"  <Relationship Id="{}" Type="{}" Target="{}"/>"#,
                    escape(id.as_str()),
                    escape(rel.rel_type.as_str()),
                    escape(rel.target.as_str())
                ));
                xml.push('\n');
            }
        }

        xml.push_str("</Relationships>");
        xml
    }
}
