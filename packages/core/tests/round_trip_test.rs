//! Codec Round-Trip Tests
//!
//! Integration tests for encoding and decoding node records through the
//! default registry.
//!
//! ## Test Coverage
//! - Every registered variant survives encode → decode unchanged
//! - Unknown types fail closed with `UnknownVariant`
//! - Records from newer versions keep their extra fields
//! - Whole editor states survive `to_json` → `from_json`

#[cfg(test)]
mod round_trip_tests {
    use anyhow::Result;
    use docnode_core::behaviors::{default_registry, CodecError};
    use docnode_core::models::{
        DrawingNode, EditorState, EmojiNode, EquationNode, HeadingTag, ImageNode, LineBreakNode,
        ListNode, ListType, MentionNode, Node, NodeKind, NodePath, PollNode, TextFormat, TextNode,
    };
    use serde_json::json;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// One populated instance of every variant
    fn sample_nodes() -> Result<Vec<Node>> {
        let mut poll = PollNode::builder("Lunch?").options(["Pizza", "Pizza", "Soup"]).build();
        poll.cast_vote(2)?;

        Ok(vec![
            Node::Root(Default::default()),
            Node::paragraph(vec![
                Node::Text(TextNode::new("bold").with_format(TextFormat::BOLD)),
                Node::LineBreak(LineBreakNode::default()),
                Node::Mention(MentionNode::new("Ada Lovelace")),
                Node::Emoji(EmojiNode::new("👨‍👩‍👧")?),
                Node::Equation(EquationNode::new(r"\sum_{i=0}^n i")),
                Node::Image(ImageNode::new("https://a.test/cat.png", "cat").with_size(64, 48)),
            ]),
            Node::heading(HeadingTag::H3, vec![Node::text("Heading")]),
            Node::quote(vec![Node::text("Quoted")]),
            Node::List(ListNode::with_items(
                ListType::Check,
                vec![vec![Node::text("one")], vec![Node::text("two")]],
            )),
            Node::text("plain"),
            Node::Mention(MentionNode::new("Grace")),
            Node::Emoji(EmojiNode::default()),
            Node::Equation(EquationNode::new("")),
            Node::Drawing(DrawingNode::new("data:image/png;base64,iVBORw0KGgo=")),
            Node::Drawing(DrawingNode::default()),
            Node::Poll(poll),
            Node::Image(ImageNode::default()),
        ])
    }

    #[test]
    fn test_every_variant_round_trips() -> Result<()> {
        init_tracing();
        let registry = default_registry();

        let nodes = sample_nodes()?;
        let mut covered: Vec<NodeKind> = Vec::new();
        for node in &nodes {
            let record = registry.encode(node)?;
            assert_eq!(record["type"], node.type_name());
            assert_eq!(record["version"], 1);

            let decoded = registry.decode(&record)?;
            assert_eq!(&decoded, node, "round trip changed {}", node.type_name());

            covered.push(node.kind());
            if let Some(children) = node.children() {
                covered.extend(children.iter().map(Node::kind));
            }
        }

        for kind in NodeKind::ALL {
            if kind != NodeKind::ListItem {
                assert!(covered.contains(&kind), "no sample for {}", kind);
            }
        }
        Ok(())
    }

    #[test]
    fn test_default_instances_round_trip() -> Result<()> {
        let registry = default_registry();
        for type_name in registry.type_names() {
            let node = registry.create_default(type_name)?;
            let decoded = registry.decode(&registry.encode(&node)?)?;
            assert_eq!(decoded, node);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_type_fails_closed() {
        let result = default_registry().decode(&json!({"type": "doesNotExist", "version": 1}));
        assert_eq!(
            result,
            Err(CodecError::UnknownVariant {
                type_name: "doesNotExist".to_string()
            })
        );
    }

    #[test]
    fn test_future_version_passes_through() -> Result<()> {
        init_tracing();
        let record = json!({
            "type": "mention",
            "mention": "Ada",
            "text": "Ada",
            "format": 0,
            "detail": 0,
            "mode": "segmented",
            "style": "",
            "version": 3,
            "userId": "u-42"
        });

        let registry = default_registry();
        let node = registry.decode(&record)?;
        assert_eq!(node.version(), 3);
        assert_eq!(registry.encode(&node)?, record);
        Ok(())
    }

    #[test]
    fn test_editor_state_round_trip() -> Result<()> {
        let mut state = EditorState::empty();
        for node in sample_nodes()? {
            if NodeKind::Root.accepts_child(node.kind()) {
                state.append_block(node)?;
            }
        }

        let json = state.to_json();
        let restored = EditorState::from_json(&json, default_registry())?;
        assert_eq!(restored, state);
        assert_eq!(restored.text_content(), state.text_content());
        Ok(())
    }

    #[test]
    fn test_hosting_editor_record_decodes() -> Result<()> {
        // Shape written by the hosting editor itself
        let json = json!({
            "root": {
                "children": [{
                    "children": [
                        {"detail": 0, "format": 0, "mode": "normal", "style": "", "text": "Hello ", "type": "text", "version": 1},
                        {"type": "emoji", "emoji": "👋", "version": 1}
                    ],
                    "direction": "ltr",
                    "format": "",
                    "indent": 0,
                    "type": "paragraph",
                    "version": 1,
                    "textFormat": 0
                }],
                "direction": "ltr",
                "format": "",
                "indent": 0,
                "type": "root",
                "version": 1
            }
        });

        let state = EditorState::from_json(&json, default_registry())?;
        assert_eq!(state.text_content(), "Hello ");
        assert_eq!(state.to_json(), json);
        Ok(())
    }

    #[test]
    fn test_decorators_inside_paragraph_decode() -> Result<()> {
        init_tracing();
        // Polls and drawings inserted at the cursor land inside the paragraph
        let json = json!({
            "root": {
                "children": [{
                    "children": [
                        {"detail": 0, "format": 0, "mode": "normal", "style": "", "text": "Vote: ", "type": "text", "version": 1},
                        {"type": "poll", "question": "Lunch?", "options": [{"label": "Pizza", "votes": 2}, {"label": "Soup", "votes": 0}], "version": 1},
                        {"type": "excalidraw", "src": "data:image/png;base64,AAAA", "version": 1}
                    ],
                    "direction": "ltr",
                    "format": "",
                    "indent": 0,
                    "type": "paragraph",
                    "version": 1,
                    "textFormat": 0
                }],
                "direction": "ltr",
                "format": "",
                "indent": 0,
                "type": "root",
                "version": 1
            }
        });

        let state = EditorState::from_json(&json, default_registry())?;
        assert_eq!(state.paths_of(NodeKind::Poll), vec![NodePath::new(vec![0, 1])]);
        assert_eq!(state.paths_of(NodeKind::Drawing), vec![NodePath::new(vec![0, 2])]);
        assert_eq!(state.text_content(), "Vote: ");
        assert_eq!(state.to_json(), json);
        Ok(())
    }
}
