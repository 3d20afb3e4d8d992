//! Slide and relationship XML parsing.

use roxmltree::{Document, Node};

use super::elements::{
    Formatting, ImageRef, ListElement, ListItem, Position, Run, SlideElement, TableCell, TableElement, TableRow,
    TextElement,
};
use crate::error::{KreuzbergError, Result};

const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn node_position(node: Node) -> Position {
    for child in node.descendants() {
        if child.has_tag_name((A_NS, "off")) {
            let x = child.attribute("x").and_then(|v| v.parse().ok()).unwrap_or(0);
            let y = child.attribute("y").and_then(|v| v.parse().ok()).unwrap_or(0);
            return Position { x, y };
        }
    }
    Position::default()
}

fn parse_run(node: Node) -> Option<Run> {
    let text = node.descendants().find(|n| n.has_tag_name((A_NS, "t")))?.text()?.to_string();

    let mut formatting = Formatting::default();
    if let Some(rpr) = node.children().find(|n| n.has_tag_name((A_NS, "rPr"))) {
        formatting.bold = rpr.attribute("b") == Some("1");
        formatting.italic = rpr.attribute("i") == Some("1");
        formatting.underline = rpr.attribute("u").is_some_and(|v| v != "none");
    }

    Some(Run { text, formatting })
}

fn parse_paragraph_runs(para: Node) -> Vec<Run> {
    para.children()
        .filter(|n| n.has_tag_name((A_NS, "r")))
        .filter_map(parse_run)
        .collect()
}

fn list_level_and_ordered(para: Node) -> Option<(u32, bool)> {
    let p_pr = para.children().find(|n| n.has_tag_name((A_NS, "pPr")))?;
    let level = p_pr.attribute("lvl").and_then(|v| v.parse::<u32>().ok()).unwrap_or(0) + 1;
    let is_ordered = p_pr.children().any(|n| n.has_tag_name((A_NS, "buAutoNum")));
    let has_bullet = is_ordered || p_pr.children().any(|n| n.has_tag_name((A_NS, "buChar")));
    if has_bullet { Some((level, is_ordered)) } else { None }
}

fn parse_tx_body(tx_body: Node, position: Position) -> Option<SlideElement> {
    let paragraphs: Vec<Node> = tx_body.children().filter(|n| n.has_tag_name((A_NS, "p"))).collect();
    if paragraphs.is_empty() {
        return None;
    }

    let list_items: Vec<ListItem> = paragraphs
        .iter()
        .filter_map(|p| {
            list_level_and_ordered(*p).map(|(level, is_ordered)| ListItem {
                level,
                is_ordered,
                runs: parse_paragraph_runs(*p),
            })
        })
        .collect();

    if list_items.len() == paragraphs.len() && !list_items.is_empty() {
        return Some(SlideElement::List(ListElement { items: list_items }, position));
    }

    let mut runs = Vec::new();
    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            runs.push(Run {
                text: "\n".to_string(),
                formatting: Formatting::default(),
            });
        }
        runs.extend(parse_paragraph_runs(*para));
    }

    if runs.is_empty() {
        None
    } else {
        Some(SlideElement::Text(TextElement { runs }, position))
    }
}

fn parse_table(tbl: Node, position: Position) -> SlideElement {
    let rows = tbl
        .children()
        .filter(|n| n.has_tag_name((A_NS, "tr")))
        .map(|tr| {
            let cells = tr
                .children()
                .filter(|n| n.has_tag_name((A_NS, "tc")))
                .map(|tc| {
                    let runs = tc
                        .children()
                        .filter(|n| n.has_tag_name((A_NS, "txBody")))
                        .flat_map(|tx| tx.children().filter(|n| n.has_tag_name((A_NS, "p"))))
                        .flat_map(parse_paragraph_runs)
                        .collect();
                    TableCell { runs }
                })
                .collect();
            TableRow { cells }
        })
        .collect();

    SlideElement::Table(TableElement { rows }, position)
}

fn parse_image(pic: Node, position: Position) -> Option<SlideElement> {
    let blip = pic.descendants().find(|n| n.has_tag_name((A_NS, "blip")))?;
    let id = blip.attribute((R_NS, "embed")).map(str::to_string)?;
    Some(SlideElement::Image(
        ImageRef {
            id,
            target: String::new(),
        },
        position,
    ))
}

/// Parses a slide XML part into its ordered, positioned elements.
///
/// Image references carry only the relationship id here; [`parse_slide_rels`]
/// resolves the id to a package-relative target path.
pub(super) fn parse_slide_xml(xml_data: &[u8]) -> Result<Vec<SlideElement>> {
    let xml_str =
        std::str::from_utf8(xml_data).map_err(|e| KreuzbergError::parsing(format!("Invalid UTF-8 in slide XML: {}", e)))?;

    let doc = Document::parse(xml_str).map_err(|e| KreuzbergError::parsing(format!("Failed to parse slide XML: {}", e)))?;

    let sp_tree = doc
        .descendants()
        .find(|n| n.has_tag_name((P_NS, "spTree")))
        .ok_or_else(|| KreuzbergError::parsing("Slide XML missing <p:spTree>".to_string()))?;

    let mut elements = Vec::new();
    for node in sp_tree.children() {
        let position = node_position(node);
        let element = if node.has_tag_name((P_NS, "sp")) {
            node.children()
                .find(|n| n.has_tag_name((P_NS, "txBody")))
                .and_then(|tx| parse_tx_body(tx, position))
        } else if node.has_tag_name((P_NS, "graphicFrame")) {
            node.descendants()
                .find(|n| n.has_tag_name((A_NS, "tbl")))
                .map(|tbl| parse_table(tbl, position))
        } else if node.has_tag_name((P_NS, "pic")) {
            parse_image(node, position)
        } else {
            None
        };

        if let Some(element) = element {
            elements.push(element);
        }
    }

    Ok(elements)
}

fn resolve_image_targets(rels_data: &[u8]) -> Result<Vec<ImageRef>> {
    let xml_str =
        std::str::from_utf8(rels_data).map_err(|e| KreuzbergError::parsing(format!("Invalid UTF-8 in rels XML: {}", e)))?;

    let doc =
        Document::parse(xml_str).map_err(|e| KreuzbergError::parsing(format!("Failed to parse rels XML: {}", e)))?;

    let mut images = Vec::new();
    for node in doc.descendants() {
        if node.has_tag_name("Relationship")
            && let Some(rel_type) = node.attribute("Type")
            && rel_type.contains("image")
            && let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target"))
        {
            images.push(ImageRef {
                id: id.to_string(),
                target: target.to_string(),
            });
        }
    }

    Ok(images)
}

/// Parses a slide's `.rels` part into its image relationship targets.
pub(super) fn parse_slide_rels(rels_data: &[u8]) -> Result<Vec<ImageRef>> {
    resolve_image_targets(rels_data)
}

/// Parses `ppt/_rels/presentation.xml.rels`, returning slide part paths in
/// presentation order (falling back to directory listing order when this
/// part is absent or contains no slide relationships).
pub(super) fn parse_presentation_rels(rels_data: &[u8]) -> Result<Vec<String>> {
    let xml_str = std::str::from_utf8(rels_data)
        .map_err(|e| KreuzbergError::parsing(format!("Invalid UTF-8 in presentation rels: {}", e)))?;

    let doc = Document::parse(xml_str)
        .map_err(|e| KreuzbergError::parsing(format!("Failed to parse presentation rels: {}", e)))?;

    let mut slide_paths = Vec::new();
    for node in doc.descendants() {
        if node.has_tag_name("Relationship")
            && let Some(rel_type) = node.attribute("Type")
            && rel_type.contains("slide")
            && !rel_type.contains("slideMaster")
            && !rel_type.contains("slideLayout")
            && let Some(target) = node.attribute("Target")
        {
            slide_paths.push(format!("ppt/{}", target));
        }
    }

    Ok(slide_paths)
}
