//! List conversion
//!
//! Each `listItem` child becomes one marker-prefixed paragraph block.
//! The item's paragraph children are flattened into a single run
//! sequence; nested lists are not treated specially. The source list's
//! `ordered` flag rides along on the block so the packager can pick a
//! bullet glyph or numbering.

use markdown::mdast::{List as MdList, Node};
use md2docx_model::ListItem;

use crate::inline;

/// Build one list-item block per `listItem` child
pub fn build_list(list: &MdList) -> Vec<ListItem> {
    let mut items = Vec::new();

    for child in &list.children {
        if let Node::ListItem(item) = child {
            let mut runs = Vec::new();
            for block in &item.children {
                if let Node::Paragraph(paragraph) = block {
                    runs.extend(inline::convert_inlines(&paragraph.children));
                }
            }
            items.push(ListItem {
                ordered: list.ordered,
                runs,
            });
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast::{ListItem as MdListItem, Paragraph, Text};

    fn item(text: &str) -> Node {
        Node::ListItem(MdListItem {
            children: vec![Node::Paragraph(Paragraph {
                children: vec![Node::Text(Text {
                    value: text.to_string(),
                    position: None,
                })],
                position: None,
            })],
            spread: false,
            checked: None,
            position: None,
        })
    }

    fn list(ordered: bool, items: Vec<Node>) -> MdList {
        MdList {
            children: items,
            ordered,
            start: None,
            spread: false,
            position: None,
        }
    }

    #[test]
    fn test_one_block_per_item() {
        let md = list(false, vec![item("alpha"), item("beta")]);
        let items = build_list(&md);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].runs[0].text, "alpha");
        assert_eq!(items[1].runs[0].text, "beta");
    }

    #[test]
    fn test_ordered_flag_carried_through() {
        let ordered = build_list(&list(true, vec![item("first")]));
        let unordered = build_list(&list(false, vec![item("first")]));
        assert!(ordered[0].ordered);
        assert!(!unordered[0].ordered);
    }

    #[test]
    fn test_non_item_children_skipped() {
        let md = list(
            false,
            vec![
                item("kept"),
                Node::Text(Text {
                    value: "stray".to_string(),
                    position: None,
                }),
            ],
        );
        let items = build_list(&md);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_multi_paragraph_item_flattens() {
        let md_item = Node::ListItem(MdListItem {
            children: vec![
                Node::Paragraph(Paragraph {
                    children: vec![Node::Text(Text {
                        value: "first ".to_string(),
                        position: None,
                    })],
                    position: None,
                }),
                Node::Paragraph(Paragraph {
                    children: vec![Node::Text(Text {
                        value: "second".to_string(),
                        position: None,
                    })],
                    position: None,
                }),
            ],
            spread: false,
            checked: None,
            position: None,
        });
        let items = build_list(&list(false, vec![md_item]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].runs.len(), 2);
        assert_eq!(items[0].runs[1].text, "second");
    }
}
