//! Performance benchmarks for DocNode core operations
//!
//! Run with: `cargo bench -p docnode-core`
//!
//! These benchmarks measure critical path performance:
//! - JSON/HTML/Markdown export of a large document
//! - JSON and HTML import throughput (1000-block documents)
//! - Transactional vote casting

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docnode_core::config::EditorConfig;
use docnode_core::models::{
    EmojiNode, EquationNode, HeadingTag, MentionNode, Node, NodePath, PollNode, TextFormat,
    TextNode,
};
use docnode_core::services::{Editor, ExportFormat};
use tempfile::TempDir;

/// Generate an editor holding roughly `block_count` mixed blocks
fn generate_large_document(block_count: usize) -> Editor {
    let config = EditorConfig {
        max_import_bytes: usize::MAX,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config);
    let sections = block_count / 4;

    editor
        .update(|state| {
            state.clear();
            for i in 0..sections {
                state.append_block(Node::heading(
                    HeadingTag::H2,
                    vec![Node::text(format!("Section {}", i + 1))],
                ))?;
                state.append_block(Node::paragraph(vec![
                    Node::text(format!("Paragraph {} mentions ", i + 1)),
                    Node::Mention(MentionNode::new(format!("User {}", i % 17))),
                    Node::Text(TextNode::new(" with emphasis ").with_format(TextFormat::ITALIC)),
                    Node::Emoji(EmojiNode::default()),
                ]))?;
                state.append_block(Node::paragraph(vec![Node::Equation(EquationNode::new(
                    format!(r"\frac{{{}}}{{2}}", i),
                ))]))?;
                state.append_block(Node::Poll(
                    PollNode::builder(format!("Question {}?", i + 1))
                        .options(["Yes", "No", "Later"])
                        .build(),
                ))?;
            }
            Ok::<_, docnode_core::models::StructureError>(())
        })
        .unwrap();
    editor
}

/// Benchmark exports of a 1000-block document
fn bench_export(c: &mut Criterion) {
    let editor = generate_large_document(1000);

    let mut group = c.benchmark_group("export");
    for format in ExportFormat::ALL {
        group.bench_function(format.to_string(), |b| {
            b.iter(|| black_box(editor.export(format).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark 1000-block imports
///
/// Measures throughput of the JSON and HTML import branches.
fn bench_import(c: &mut Criterion) {
    let source = generate_large_document(1000);
    let json = source.export(ExportFormat::Json).unwrap().content;
    let html = source.export(ExportFormat::Html).unwrap().content;

    let mut group = c.benchmark_group("import");
    group.sample_size(20); // Fewer samples for expensive operations

    group.bench_function("json_1000_blocks", |b| {
        b.iter(|| {
            let mut editor = Editor::new(source.config().clone());
            black_box(editor.import(&json).unwrap());
        });
    });

    group.bench_function("html_1000_blocks", |b| {
        b.iter(|| {
            let mut editor = Editor::new(source.config().clone());
            black_box(editor.import(&html).unwrap());
        });
    });

    group.finish();
}

/// Benchmark vote casting on a large document
///
/// Every vote clones the working copy, so this tracks transaction overhead.
fn bench_cast_vote(c: &mut Criterion) {
    let mut editor = generate_large_document(1000);
    let path = NodePath::block(3);

    c.bench_function("cast_vote_1000_blocks", |b| {
        b.iter(|| black_box(editor.cast_vote(&path, 0).unwrap()));
    });
}

/// Benchmark writing all three artifacts to disk
fn bench_write_artifacts(c: &mut Criterion) {
    let editor = generate_large_document(1000);
    let temp_dir = TempDir::new().unwrap();

    c.bench_function("write_artifacts", |b| {
        b.iter(|| {
            for format in ExportFormat::ALL {
                let artifact = editor.export(format).unwrap();
                black_box(artifact.write_to_dir(temp_dir.path()).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_export,
    bench_import,
    bench_cast_vote,
    bench_write_artifacts
);
criterion_main!(benches);
