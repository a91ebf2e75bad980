//! Import Pipeline Tests
//!
//! Integration tests for importing JSON editor states, HTML and plain text
//! into an editor session, and for export → import round trips.

#[cfg(test)]
mod import_pipeline_tests {
    use anyhow::Result;
    use docnode_core::config::EditorConfig;
    use docnode_core::models::{ImageNode, Node, NodeKind, NodePath};
    use docnode_core::services::{
        Editor, EditorCommand, EditorError, ExportFormat, ImportError, ImportKind,
    };
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A document using every custom variant
    fn rich_editor() -> Result<Editor> {
        let mut editor = Editor::default();
        editor.update(|state| {
            state.clear();
            state.append_block(Node::paragraph_with_text("Intro"))
        })?;
        editor.dispatch(EditorCommand::InsertMention {
            mention: "Ada".to_string(),
        })?;
        editor.dispatch(EditorCommand::InsertEmoji {
            glyph: "🎉".to_string(),
        })?;
        editor.dispatch(EditorCommand::InsertEquation {
            latex: "e^{i\\pi}".to_string(),
        })?;
        editor.dispatch(EditorCommand::InsertImage(ImageNode::new(
            "https://a.test/x.png",
            "X",
        )))?;
        editor.dispatch(EditorCommand::InsertDrawing {
            src: "data:image/png;base64,AAAA".to_string(),
        })?;
        let poll = editor.dispatch(EditorCommand::InsertPoll {
            question: "Lunch?".to_string(),
            options: vec!["Pizza".to_string(), "Soup".to_string()],
        })?;
        if let Some(path) = poll.inserted_path() {
            editor.cast_vote(path, 1)?;
        }
        Ok(editor)
    }

    #[test]
    fn test_empty_import_yields_one_empty_paragraph() -> Result<()> {
        init_tracing();
        let mut editor = rich_editor()?;
        let outcome = editor.import("")?;

        assert_eq!(outcome.kind, ImportKind::PlainText);
        assert_eq!(outcome.blocks, 1);
        editor.read(|state| {
            assert_eq!(state.blocks(), &[Node::paragraph(Vec::new())]);
        });
        Ok(())
    }

    #[test]
    fn test_json_export_then_import_restores_structure() -> Result<()> {
        init_tracing();
        let source = rich_editor()?;
        let exported = source.export(ExportFormat::Json)?;

        let mut target = Editor::default();
        let revision = target.revision();
        let outcome = target.import(&exported.content)?;

        assert_eq!(outcome.kind, ImportKind::EditorState);
        assert_eq!(target.state(), source.state());
        assert_eq!(target.revision(), revision + 1);
        Ok(())
    }

    #[test]
    fn test_html_export_then_import_keeps_custom_nodes() -> Result<()> {
        let source = rich_editor()?;
        let html = source.export(ExportFormat::Html)?.content;

        let mut target = Editor::default();
        let outcome = target.import(&html)?;
        assert_eq!(outcome.kind, ImportKind::Html);

        for kind in NodeKind::CUSTOM {
            let expected = source.state().paths_of(kind);
            let actual = target.state().paths_of(kind);
            assert_eq!(actual, expected, "{} nodes moved", kind);
        }

        let poll = target
            .state()
            .node_at(&NodePath::block(2))
            .and_then(Node::as_poll)
            .ok_or_else(|| anyhow::anyhow!("poll missing"))?;
        assert_eq!(poll.options[1].votes, 1);
        assert_eq!(target.text_content(), source.text_content());
        Ok(())
    }

    #[test]
    fn test_invalid_state_leaves_document_untouched() -> Result<()> {
        let mut editor = rich_editor()?;
        let before = editor.state().clone();
        let revision = editor.revision();

        let result = editor.import(r#"{"root": {"type": "root", "children": [{"type": "doesNotExist"}]}}"#);
        assert!(matches!(
            result,
            Err(EditorError::Import(ImportError::InvalidEditorState(_)))
        ));
        assert_eq!(editor.state(), &before);
        assert_eq!(editor.revision(), revision);
        Ok(())
    }

    #[test]
    fn test_oversized_import_is_rejected() -> Result<()> {
        let config = EditorConfig {
            max_import_bytes: 16,
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);

        let result = editor.import("this input is longer than sixteen bytes");
        assert!(matches!(
            result,
            Err(EditorError::Import(ImportError::TooLarge { limit: 16, .. }))
        ));
        assert_eq!(editor.revision(), 0);
        Ok(())
    }

    #[test]
    fn test_pasted_html_document() -> Result<()> {
        let mut editor = Editor::default();
        let outcome = editor.import(concat!(
            "<!DOCTYPE html><html><head><title>Notes</title></head><body>",
            "<h2>Agenda</h2><ul><li>Budget</li><li><b>Hiring</b></li></ul>",
            "<p>See <a href=\"https://a.test\">the doc</a>.</p>",
            "</body></html>"
        ))?;

        assert_eq!(outcome.blocks, 3);
        assert_eq!(
            editor.text_content(),
            "Agenda\n\nBudget\n\nHiring\n\nSee the doc."
        );
        Ok(())
    }

    #[test]
    fn test_plain_text_lines() -> Result<()> {
        let mut editor = Editor::default();
        let outcome = editor.import("one\ntwo\n\nfour")?;

        assert_eq!(outcome.kind, ImportKind::PlainText);
        assert_eq!(outcome.blocks, 4);
        assert_eq!(editor.text_content(), "one\n\ntwo\n\n\n\nfour");
        Ok(())
    }

    #[test]
    fn test_state_with_poll_inside_paragraph_imports() -> Result<()> {
        init_tracing();
        let input = serde_json::json!({
            "root": {
                "type": "root",
                "version": 1,
                "children": [{
                    "type": "paragraph",
                    "version": 1,
                    "children": [
                        {"type": "text", "text": "Pick one ", "format": 0, "detail": 0, "mode": "normal", "style": "", "version": 1},
                        {"type": "poll", "question": "Tea?", "options": [{"label": "Yes", "votes": 0}, {"label": "No", "votes": 1}], "version": 1},
                        {"type": "excalidraw", "src": "data:image/png;base64,AAAA", "version": 1}
                    ]
                }]
            }
        })
        .to_string();

        let mut editor = Editor::default();
        let outcome = editor.import(&input)?;
        assert_eq!(outcome.kind, ImportKind::EditorState);
        assert_eq!(outcome.blocks, 1);

        let path = NodePath::new(vec![0, 1]);
        assert_eq!(editor.cast_vote(&path, 1)?, 2);
        assert_eq!(editor.text_content(), "Pick one ");
        Ok(())
    }

    #[test]
    fn test_pasted_named_references_are_decoded() -> Result<()> {
        let mut editor = Editor::default();
        let outcome = editor.import("<p>It&rsquo;s &mdash; caf&eacute; &hellip; &copy;</p>")?;

        assert_eq!(outcome.kind, ImportKind::Html);
        assert_eq!(
            editor.text_content(),
            "It\u{2019}s \u{2014} caf\u{e9} \u{2026} \u{a9}"
        );
        Ok(())
    }
}
