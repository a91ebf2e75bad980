//! Tests for structural element nodes

#[cfg(test)]
mod tests {
    use crate::models::{
        Direction, DrawingNode, ElementNode, HeadingNode, HeadingTag, LineBreakNode,
        ListItemNode, ListNode, ListType, Node, NodeKind, PollNode, StructureError, TextFormat,
        TextNode, ValidationError,
    };
    use serde_json::json;

    #[test]
    fn test_heading_tag_parsing() {
        assert_eq!("h3".parse::<HeadingTag>(), Ok(HeadingTag::H3));
        assert_eq!("H1".parse::<HeadingTag>(), Ok(HeadingTag::H1));
        assert_eq!(
            "h7".parse::<HeadingTag>(),
            Err(ValidationError::InvalidHeadingTag("h7".to_string()))
        );
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(NodeKind::Drawing.type_name(), "excalidraw");
        assert_eq!(NodeKind::from_type_name("unknown"), None);
    }

    #[test]
    fn test_custom_kinds() {
        assert!(NodeKind::Poll.is_custom());
        assert!(NodeKind::Mention.is_custom());
        assert!(!NodeKind::Paragraph.is_custom());
    }

    #[test]
    fn test_paragraph_accepts_inline_children_and_decorators() {
        let mut paragraph = Node::paragraph(Vec::new());
        paragraph.append_child(Node::text("a")).unwrap();
        paragraph
            .append_child(Node::LineBreak(LineBreakNode::default()))
            .unwrap();
        paragraph.append_child(Node::Poll(PollNode::default())).unwrap();
        paragraph
            .append_child(Node::Drawing(DrawingNode::default()))
            .unwrap();

        let result = paragraph.append_child(Node::paragraph(Vec::new()));
        assert_eq!(
            result,
            Err(StructureError::InvalidChild {
                parent: NodeKind::Paragraph,
                child: NodeKind::Paragraph,
            })
        );
        assert_eq!(paragraph.children().map(|c| c.len()), Some(4));
    }

    #[test]
    fn test_decorators_fit_every_text_container() {
        for kind in [NodeKind::Drawing, NodeKind::Poll] {
            assert!(kind.is_block_decorator());
            assert!(!kind.is_inline());
            for parent in [
                NodeKind::Root,
                NodeKind::Paragraph,
                NodeKind::Heading,
                NodeKind::Quote,
                NodeKind::ListItem,
            ] {
                assert!(parent.accepts_child(kind), "{} in {}", kind, parent);
            }
            assert!(!NodeKind::List.accepts_child(kind));
        }
    }

    #[test]
    fn test_decorator_in_paragraph_adds_no_text() {
        let paragraph = Node::paragraph(vec![
            Node::text("Vote: "),
            Node::Poll(PollNode::default()),
            Node::text("done"),
        ]);
        assert_eq!(paragraph.text_content(), "Vote: done");
    }

    #[test]
    fn test_leaf_nodes_reject_children() {
        let mut text = Node::text("a");
        assert_eq!(
            text.append_child(Node::text("b")),
            Err(StructureError::NotAnElement {
                kind: NodeKind::Text
            })
        );
    }

    #[test]
    fn test_list_accepts_list_items_only() {
        let mut list = Node::List(ListNode::new(ListType::Bullet));
        assert!(list.append_child(Node::text("x")).is_err());
        list.append_child(Node::ListItem(ListItemNode::new(1, vec![Node::text("x")])))
            .unwrap();

        let mut item = Node::ListItem(ListItemNode::new(1, Vec::new()));
        item.append_child(Node::List(ListNode::new(ListType::Number)))
            .unwrap();
    }

    #[test]
    fn test_text_content_separates_blocks() {
        let root = ElementNode::with_children(vec![
            Node::heading(HeadingTag::H1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("line one"),
                Node::LineBreak(LineBreakNode::default()),
                Node::text("line two"),
            ]),
            Node::Drawing(DrawingNode::new("data:image/png;base64,AAAA")),
            Node::paragraph_with_text("end"),
        ]);

        assert_eq!(root.text_content(), "Title\n\nline one\nline two\n\nend");
    }

    #[test]
    fn test_list_text_content() {
        let list = Node::List(ListNode::with_items(
            ListType::Number,
            vec![vec![Node::text("one")], vec![Node::text("two")]],
        ));
        assert_eq!(list.text_content(), "one\n\ntwo");
    }

    #[test]
    fn test_paragraph_export_dom() {
        let mut element = ElementNode::with_children(vec![
            Node::text("plain "),
            Node::Text(TextNode::new("bold").with_format(TextFormat::BOLD)),
        ]);
        element.format = "center".to_string();
        element.direction = Some(Direction::Ltr);

        assert_eq!(
            Node::Paragraph(element).export_dom().to_html(),
            "<p dir=\"ltr\" style=\"text-align: center;\">plain <strong>bold</strong></p>"
        );
    }

    #[test]
    fn test_empty_paragraph_exports_line_break() {
        assert_eq!(
            Node::paragraph(Vec::new()).export_dom().to_html(),
            "<p><br></p>"
        );
    }

    #[test]
    fn test_numbered_list_export_dom() {
        let mut list = ListNode::with_items(
            ListType::Number,
            vec![vec![Node::text("a")], vec![Node::text("b")]],
        );
        list.start = 3;
        let html = Node::List(list).export_dom().to_html();
        assert_eq!(
            html,
            "<ol start=\"3\"><li value=\"1\">a</li><li value=\"2\">b</li></ol>"
        );
    }

    #[test]
    fn test_heading_record_shape() {
        let heading = Node::Heading(HeadingNode::new(HeadingTag::H2, vec![Node::text("Hi")]));
        let record = serde_json::to_value(&heading).unwrap();

        assert_eq!(record["type"], "heading");
        assert_eq!(record["tag"], "h2");
        assert_eq!(record["version"], 1);
        assert_eq!(record["children"][0]["type"], "text");
        assert_eq!(record["children"][0]["text"], "Hi");
        assert_eq!(record["direction"], json!(null));
    }
}
