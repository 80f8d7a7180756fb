use super::{AudioVisibility, Fragment, FragmentNode};
use pretty_assertions::assert_eq;

fn contents(fragment: &Fragment) -> Vec<&str> {
    fragment
        .nodes()
        .iter()
        .map(FragmentNode::html)
        .collect()
}

#[test]
fn test_empty_source_has_no_nodes() {
    let fragment = Fragment::parse("", AudioVisibility::Keep);
    assert!(fragment.is_empty());
    assert_eq!(fragment.heading_count(), 0);
    assert!(fragment.paragraphs(3).is_empty());

    let fragment = Fragment::parse("  \n\t ", AudioVisibility::Keep);
    assert!(fragment.is_empty());
}

#[test]
fn test_top_level_nodes_keep_document_order() {
    let fragment = Fragment::parse(
        "<h2>要約</h2>\n<p>A</p>\n<ul><li>x</li></ul>",
        AudioVisibility::Keep,
    );

    assert_eq!(
        contents(&fragment),
        vec!["<h2>要約</h2>", "<p>A</p>", "<ul><li>x</li></ul>"]
    );
    assert_eq!(fragment.heading_count(), 1);
}

#[test]
fn test_heading_label_is_normalised() {
    let fragment = Fragment::parse("<h3>  Summary <em>Notes</em> </h3>", AudioVisibility::Keep);

    match &fragment.nodes()[0] {
        FragmentNode::Heading(heading) => {
            assert_eq!(heading.level, 3);
            assert_eq!(heading.label, "summary notes");
        }
        FragmentNode::Content(html) => panic!("expected heading, got {html}"),
    }
}

#[test]
fn test_attributes_are_preserved_in_order() {
    let source = r#"<figure class="kg-card kg-image-card" data-id="7"><img src="a.png" alt="A &amp; B"></figure>"#;
    let fragment = Fragment::parse(source, AudioVisibility::Keep);

    assert_eq!(contents(&fragment), vec![source]);
}

#[test]
fn test_attribute_order_is_stable_across_parses() {
    let source = r#"<div id="player" class="kg-card" data-src="a.mp3" data-title="Intro" style="color: red;" title="t" aria-label="audio" data-duration="61"></div>"#;

    for _ in 0..50 {
        let fragment = Fragment::parse(source, AudioVisibility::Keep);
        assert_eq!(contents(&fragment), vec![source]);
    }
}

#[test]
fn test_namespaced_attributes_keep_their_prefix() {
    let source = r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#icon"></use></svg>"##;
    let fragment = Fragment::parse(source, AudioVisibility::Hide);

    assert_eq!(contents(&fragment), vec![source]);
}

#[test]
fn test_text_nodes_are_escaped_and_whitespace_dropped() {
    let fragment = Fragment::parse("loose 1 &lt; 2 <p>x</p>   ", AudioVisibility::Keep);

    assert_eq!(contents(&fragment), vec!["loose 1 &lt; 2 ", "<p>x</p>"]);
}

#[test]
fn test_comments_between_elements_are_dropped() {
    let fragment = Fragment::parse("<!-- kg-card-begin --><p>x</p>", AudioVisibility::Keep);

    assert_eq!(contents(&fragment), vec!["<p>x</p>"]);
}

#[test]
fn test_raw_text_is_not_escaped() {
    let source = "<script>if (a < b) { go(); }</script>";
    let fragment = Fragment::parse(source, AudioVisibility::Keep);

    assert_eq!(contents(&fragment), vec![source]);
}

#[test]
fn test_paragraphs_include_nested() {
    let fragment = Fragment::parse(
        "<blockquote><p>quoted</p></blockquote><p>one</p><p>two</p><p>three</p>",
        AudioVisibility::Keep,
    );

    assert_eq!(
        fragment.paragraphs(3),
        ["<p>quoted</p>", "<p>one</p>", "<p>two</p>"]
    );
    assert_eq!(fragment.paragraphs(10).len(), 4);
    assert!(fragment.paragraphs(0).is_empty());
}

#[test]
fn test_heading_count_includes_nested_headings() {
    let fragment = Fragment::parse(
        r#"<div class="kg-toggle-card"><h4>Notes</h4><p>A</p></div><p>B</p>"#,
        AudioVisibility::Keep,
    );

    assert_eq!(fragment.heading_count(), 1);
    assert!(fragment
        .nodes()
        .iter()
        .all(|node| matches!(node, FragmentNode::Content(_))));
}

#[test]
fn test_to_html_joins_top_level_nodes() {
    let fragment = Fragment::parse(
        "<h2>Notes</h2>\n<!-- c -->\n<p>A</p>",
        AudioVisibility::Keep,
    );

    assert_eq!(fragment.to_html(), "<h2>Notes</h2><p>A</p>");
}

#[test]
fn test_malformed_markup_degrades_gracefully() {
    let fragment = Fragment::parse("<p>open <b>bold</p><h2>解説", AudioVisibility::Keep);

    assert_eq!(fragment.heading_count(), 1);
    assert!(fragment.parse_errors() > 0);
}

#[test]
fn test_audio_cards_hidden_at_any_depth() {
    let source = r#"<div class="kg-card kg-audio-card"><audio src="a.mp3"></audio></div><section><div class="kg-audio-card kg-card" style="color: red;"></div></section>"#;

    let kept = Fragment::parse(source, AudioVisibility::Keep);
    assert_eq!(
        contents(&kept)[0],
        r#"<div class="kg-card kg-audio-card"><audio src="a.mp3"></audio></div>"#
    );

    let hidden = Fragment::parse(source, AudioVisibility::Hide);
    assert_eq!(
        contents(&hidden),
        vec![
            r#"<div class="kg-card kg-audio-card" style="display: none;"><audio src="a.mp3"></audio></div>"#,
            r#"<section><div class="kg-audio-card kg-card" style="color: red; display: none;"></div></section>"#,
        ]
    );
}
