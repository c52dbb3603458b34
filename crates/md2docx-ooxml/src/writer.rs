//! DOCX writer
//!
//! Serializes a `md2docx_model::Document` into a complete DOCX
//! archive: `word/document.xml` generated block by block, a minimal
//! stylesheet with the heading hierarchy, package relationships,
//! content types, and embedded media parts.
//!
//! # Example
//!
//! ```
//! use md2docx_model::{Block, Document, Paragraph, Spacing, TextRun};
//! use md2docx_ooxml::DocxWriter;
//!
//! let mut doc = Document::new();
//! doc.push(Block::Paragraph(Paragraph {
//!     runs: vec![TextRun::new("Hello")],
//!     spacing: Spacing::after(120),
//! }));
//! let bytes = DocxWriter::generate(&doc)?;
//! # Ok::<(), md2docx_ooxml::OoxmlError>(())
//! ```

use std::borrow::Cow;
use std::io::Cursor;

use md2docx_model::{
    Alignment, Block, CodeBlock, Document, Heading, ImageBlock, ImagePlaceholder, ListItem,
    Paragraph, Quote, Spacing, Table, TextRun,
};
use quick_xml::escape::escape;

use crate::archive::DocxArchive;
use crate::error::Result;
use crate::relationships::Relationships;

/// EMUs (English Metric Units) per inch
pub const EMU_PER_INCH: i64 = 914400;

/// Twips (twentieths of a point) per inch
pub const TWIPS_PER_INCH: i64 = 1440;

/// EMUs per twip (635)
pub const EMU_PER_TWIP: i64 = EMU_PER_INCH / TWIPS_PER_INCH;

/// Convert a twip length to EMUs
pub fn twips_to_emu(twips: u32) -> i64 {
    twips as i64 * EMU_PER_TWIP
}

/// Background fill behind code block paragraphs
const CODE_SHADING: &str = "F5F5F5";

/// Code block font size in half-points
const CODE_SIZE: u32 = 20;

/// Header row cell fill
const HEADER_SHADING: &str = "E7E6E6";

/// Muted color for image placeholder text
const PLACEHOLDER_COLOR: &str = "808080";

/// A4 page size in twips
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;

/// DOCX writer for serializing the document model
pub struct DocxWriter {
    /// XML output buffer for word/document.xml
    output: String,
    /// Document relationships (word/_rels/document.xml.rels)
    relationships: Relationships,
    /// Media files to embed (path, bytes)
    media_files: Vec<(String, Vec<u8>)>,
    /// Next image ID for unique part naming
    next_image_id: usize,
    /// Next drawing ID for docPr
    next_drawing_id: usize,
    /// Running ordinal across consecutive ordered list items
    ordered_index: usize,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    /// Create a new DocxWriter
    pub fn new() -> Self {
        let mut relationships = Relationships::new();
        relationships.add("styles.xml", Relationships::TYPE_STYLES);
        Self {
            output: String::new(),
            relationships,
            media_files: Vec::new(),
            next_image_id: 1,
            next_drawing_id: 1,
            ordered_index: 0,
        }
    }

    /// Generate a complete DOCX file from a document model
    pub fn generate(doc: &Document) -> Result<Vec<u8>> {
        let mut writer = DocxWriter::new();
        let document_xml = writer.generate_document_xml(doc);

        let mut archive = DocxArchive::new();
        archive.set_string("[Content_Types].xml", writer.content_types_xml());
        archive.set_string("_rels/.rels", root_relationships_xml());
        archive.set_string("word/document.xml", document_xml);
        archive.set_string("word/styles.xml", styles_xml());
        archive.set_string(
            "word/_rels/document.xml.rels",
            writer.relationships.to_xml(),
        );
        for (path, data) in &writer.media_files {
            archive.set(path.clone(), data.clone());
        }

        let mut output = Cursor::new(Vec::new());
        archive.write_to(&mut output)?;
        Ok(output.into_inner())
    }

    /// Generate the [Content_Types].xml part
    fn content_types_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
"#,
        );

        // One Default entry per media extension actually present
        let mut extensions: Vec<&str> = self
            .media_files
            .iter()
            .filter_map(|(path, _)| path.rsplit('.').next())
            .collect();
        extensions.sort();
        extensions.dedup();
        for ext in extensions {
            xml.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                ext,
                content_type_for_extension(ext)
            ));
        }

        xml.push_str(
            r#"  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#,
        );
        xml
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &Document) -> String {
        self.output.clear();

        // XML declaration and document root with all required namespaces
        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(r#"<w:document "#);
        self.output
            .push_str(r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#);
        self.output.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        );
        self.output.push_str(
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
        );
        self.output
            .push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        self.output
            .push_str(r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#);
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        for block in &doc.blocks {
            // Ordered-item numbering restarts whenever the run of
            // consecutive ordered items is broken
            match block {
                Block::ListItem(item) if item.ordered => self.ordered_index += 1,
                _ => self.ordered_index = 0,
            }
            self.generate_block(block);
        }

        self.generate_section_properties(doc);

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        self.output.clone()
    }

    /// Generate the section properties (page size and margins)
    fn generate_section_properties(&mut self, doc: &Document) {
        self.output.push_str("<w:sectPr>\n");
        self.output.push_str(&format!(
            "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>\n",
            PAGE_WIDTH, PAGE_HEIGHT
        ));
        self.output.push_str(&format!(
            "<w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\n",
            doc.page.margin_top, doc.page.margin_right, doc.page.margin_bottom, doc.page.margin_left
        ));
        self.output.push_str("</w:sectPr>\n");
    }

    /// Generate XML for a single block
    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Heading(heading) => self.generate_heading(heading),
            Block::Paragraph(para) => self.generate_paragraph(para),
            Block::Table(table) => self.generate_table(table),
            Block::ListItem(item) => self.generate_list_item(item),
            Block::Quote(quote) => self.generate_quote(quote),
            Block::CodeBlock(code) => self.generate_code_block(code),
            Block::Image(image) => self.generate_image(image),
            Block::ImagePlaceholder(placeholder) => self.generate_placeholder(placeholder),
            Block::Rule => self.generate_rule(),
        }
    }

    /// Generate XML for a heading
    fn generate_heading(&mut self, heading: &Heading) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output.push_str(&format!(
            "<w:pStyle w:val=\"Heading{}\"/>\n",
            heading.level
        ));
        self.push_spacing(heading.spacing);
        self.output.push_str("</w:pPr>\n");
        self.generate_runs(&heading.runs);
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a paragraph
    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.push_spacing(para.spacing);
        self.output.push_str("</w:pPr>\n");
        self.generate_runs(&para.runs);
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a list item paragraph
    fn generate_list_item(&mut self, item: &ListItem) {
        let marker = if item.ordered {
            format!("{}. ", self.ordered_index)
        } else {
            "\u{2022} ".to_string()
        };

        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.push_spacing(Spacing::after(120));
        self.output.push_str("</w:pPr>\n");
        self.generate_run(&TextRun::new(marker).with_bold());
        self.generate_runs(&item.runs);
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a quote paragraph
    fn generate_quote(&mut self, quote: &Quote) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output
            .push_str(&format!("<w:ind w:left=\"{}\"/>\n", quote.indent));
        self.push_spacing(Spacing::after(120));
        self.output.push_str("</w:pPr>\n");
        self.generate_runs(&quote.runs);
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a code block paragraph
    fn generate_code_block(&mut self, code: &CodeBlock) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output.push_str(&format!(
            "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>\n",
            CODE_SHADING
        ));
        self.push_spacing(Spacing::new(120, 120));
        self.output.push_str("</w:pPr>\n");
        self.generate_run(
            &TextRun::new(&code.text)
                .with_font("Courier New")
                .with_size(CODE_SIZE),
        );
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for an image placeholder paragraph
    fn generate_placeholder(&mut self, placeholder: &ImagePlaceholder) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.push_spacing(Spacing::after(120));
        self.output.push_str("</w:pPr>\n");
        self.generate_run(
            &TextRun::new(format!("[image: {}]", placeholder.alt))
                .with_italic()
                .with_color(PLACEHOLDER_COLOR),
        );
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a horizontal rule
    fn generate_rule(&mut self) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output.push_str(
            "<w:pBdr><w:bottom w:val=\"single\" w:sz=\"6\" w:space=\"1\" w:color=\"auto\"/></w:pBdr>\n",
        );
        self.push_spacing(Spacing::new(120, 120));
        self.output.push_str("</w:pPr>\n");
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a table
    fn generate_table(&mut self, table: &Table) {
        self.output.push_str("<w:tbl>\n");

        self.output.push_str("<w:tblPr>\n");
        self.output.push_str(&format!(
            "<w:tblW w:w=\"{}\" w:type=\"dxa\"/>\n",
            table.total_width()
        ));
        self.output.push_str("<w:tblBorders>\n");
        for edge in [
            "top",
            "left",
            "bottom",
            "right",
            "insideH",
            "insideV",
        ] {
            self.output.push_str(&format!(
                "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"000000\"/>\n",
                edge
            ));
        }
        self.output.push_str("</w:tblBorders>\n");
        self.output.push_str("</w:tblPr>\n");

        self.output.push_str("<w:tblGrid>\n");
        for width in &table.column_widths {
            self.output
                .push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", width));
        }
        self.output.push_str("</w:tblGrid>\n");

        for row in &table.rows {
            self.output.push_str("<w:tr>\n");
            if row.header {
                self.output.push_str("<w:trPr>\n<w:tblHeader/>\n</w:trPr>\n");
            }

            for (index, cell) in row.cells.iter().enumerate() {
                // Cells past the measured columns fall back to the floor width
                let width = table.column_widths.get(index).copied().unwrap_or(1000);
                let fill = if row.header { HEADER_SHADING } else { "FFFFFF" };

                self.output.push_str("<w:tc>\n<w:tcPr>\n");
                self.output
                    .push_str(&format!("<w:tcW w:w=\"{}\" w:type=\"dxa\"/>\n", width));
                self.output.push_str(&format!(
                    "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>\n",
                    fill
                ));
                self.output.push_str("<w:vAlign w:val=\"center\"/>\n");
                self.output.push_str("</w:tcPr>\n");

                for runs in &cell.paragraphs {
                    self.output.push_str("<w:p>\n");
                    self.generate_runs(runs);
                    self.output.push_str("</w:p>\n");
                }
                // A cell must contain at least one paragraph
                if cell.paragraphs.is_empty() {
                    self.output.push_str("<w:p/>\n");
                }

                self.output.push_str("</w:tc>\n");
            }

            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
    }

    /// Generate XML for an embedded image paragraph
    fn generate_image(&mut self, image: &ImageBlock) {
        let image_id = self.next_image_id;
        self.next_image_id += 1;
        let drawing_id = self.next_drawing_id;
        self.next_drawing_id += 1;

        let extension = image_extension(&image.data);
        let filename = format!("image{}.{}", image_id, extension);
        self.media_files
            .push((format!("word/media/{}", filename), image.data.clone()));
        let rel_id = self.relationships.add_image(format!("media/{}", filename));

        let cx = twips_to_emu(image.width);
        let cy = twips_to_emu(image.height);
        let align = match image.alignment {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };

        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output
            .push_str(&format!("<w:jc w:val=\"{}\"/>\n", align));
        self.push_spacing(Spacing::new(120, 120));
        self.output.push_str("</w:pPr>\n");
        self.output.push_str("<w:r>\n<w:drawing>\n");
        self.output.push_str(&format!(
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0">
<wp:extent cx="{}" cy="{}"/>
<wp:docPr id="{}" name="Image {}"/>
<a:graphic>
<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
<pic:pic>
<pic:nvPicPr>
<pic:cNvPr id="{}" name="{}"/>
<pic:cNvPicPr/>
</pic:nvPicPr>
<pic:blipFill>
<a:blip r:embed="{}"/>
<a:stretch><a:fillRect/></a:stretch>
</pic:blipFill>
<pic:spPr>
<a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</pic:spPr>
</pic:pic>
</a:graphicData>
</a:graphic>
</wp:inline>
"#,
            cx,
            cy,
            drawing_id,
            drawing_id,
            drawing_id,
            escape(filename.as_str()),
            rel_id,
            cx,
            cy
        ));
        self.output.push_str("</w:drawing>\n</w:r>\n</w:p>\n");
    }

    /// Generate runs for a run sequence
    fn generate_runs(&mut self, runs: &[TextRun]) {
        for run in runs {
            self.generate_run(run);
        }
    }

    /// Generate a single <w:r> element with its properties
    fn generate_run(&mut self, run: &TextRun) {
        self.output.push_str("<w:r>\n");

        let has_props = run.bold
            || run.italic
            || run.strike
            || run.underline
            || run.font.is_some()
            || run.color.is_some()
            || run.shading.is_some()
            || run.size.is_some();

        if has_props {
            self.output.push_str("<w:rPr>\n");
            if let Some(ref font) = run.font {
                self.output.push_str(&format!(
                    "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\"/>\n",
                    escape(font.as_str()),
                    escape(font.as_str())
                ));
            }
            if run.bold {
                self.output.push_str("<w:b/>\n");
            }
            if run.italic {
                self.output.push_str("<w:i/>\n");
            }
            if run.strike {
                self.output.push_str("<w:strike/>\n");
            }
            if run.underline {
                self.output.push_str("<w:u w:val=\"single\"/>\n");
            }
            if let Some(ref color) = run.color {
                self.output
                    .push_str(&format!("<w:color w:val=\"{}\"/>\n", escape(color.as_str())));
            }
            if let Some(size) = run.size {
                self.output.push_str(&format!("<w:sz w:val=\"{}\"/>\n", size));
                self.output
                    .push_str(&format!("<w:szCs w:val=\"{}\"/>\n", size));
            }
            if let Some(ref shading) = run.shading {
                self.output.push_str(&format!(
                    "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>\n",
                    escape(shading.as_str())
                ));
            }
            self.output.push_str("</w:rPr>\n");
        }

        self.output.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>\n",
            escape_text(&run.text)
        ));
        self.output.push_str("</w:r>\n");
    }

    /// Emit a <w:spacing> element when any value is set
    fn push_spacing(&mut self, spacing: Spacing) {
        if spacing.before == 0 && spacing.after == 0 {
            return;
        }
        self.output.push_str("<w:spacing");
        if spacing.before > 0 {
            self.output
                .push_str(&format!(" w:before=\"{}\"", spacing.before));
        }
        if spacing.after > 0 {
            self.output
                .push_str(&format!(" w:after=\"{}\"", spacing.after));
        }
        self.output.push_str("/>\n");
    }
}

/// Generate the package-level _rels/.rels part
fn root_relationships_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
        crate::relationships::RELATIONSHIPS_NS
    )
}

/// Generate a minimal word/styles.xml with the heading hierarchy
fn styles_xml() -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal">
<w:name w:val="Normal"/>
<w:qFormat/>
</w:style>
"#,
    );

    // Heading sizes in half-points, largest first
    let sizes = [32u32, 28, 26, 24, 22, 20];
    for (index, size) in sizes.iter().enumerate() {
        let level = index + 1;
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}">
<w:name w:val="heading {level}"/>
<w:basedOn w:val="Normal"/>
<w:qFormat/>
<w:pPr><w:keepNext/><w:outlineLvl w:val="{outline}"/></w:pPr>
<w:rPr><w:b/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>
</w:style>
"#,
            level = level,
            outline = index,
            size = size
        ));
    }

    xml.push_str("</w:styles>");
    xml
}

/// Escape text content for a <w:t> element
fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// Sniff the image format from its magic bytes
fn image_extension(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        "png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpeg"
    } else if data.starts_with(b"GIF8") {
        "gif"
    } else if data.starts_with(b"BM") {
        "bmp"
    } else {
        "png"
    }
}

/// Get the MIME content type for an image extension
fn content_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
