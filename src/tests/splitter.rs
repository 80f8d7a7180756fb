use super::{partition, HeadingMode, SplitOptions, Splitter};
use crate::fragment::AudioVisibility;
use crate::keywords::KeywordTable;
use crate::section::{Partition, SectionLabel};
use pretty_assertions::assert_eq;

fn including_headings() -> Splitter {
    Splitter::new(
        KeywordTable::default(),
        SplitOptions {
            headings: HeadingMode::Include,
            ..SplitOptions::default()
        },
    )
}

#[test]
fn test_empty_input_yields_empty_partition() {
    let result = partition("");
    assert_eq!(result, Partition::default());
    assert!(result.is_empty());
}

#[test]
fn test_japanese_headings() {
    let result = partition("<h2>要約</h2><p>A</p><h2>解説</h2><p>B</p>");

    assert_eq!(result.summary, "<p>A</p>");
    assert_eq!(result.explanation, "<p>B</p>");
}

#[test]
fn test_japanese_headings_included() {
    let result = including_headings().partition("<h2>要約</h2><p>A</p><h2>解説</h2><p>B</p>");

    assert_eq!(result.summary, "<h2>要約</h2><p>A</p>");
    assert_eq!(result.explanation, "<h2>解説</h2><p>B</p>");
}

#[test]
fn test_no_headings_falls_back_to_paragraphs() {
    let result = partition("<p>only text</p>");

    assert_eq!(result.summary, "<p>only text</p>");
    assert_eq!(result.explanation, "");
}

#[test]
fn test_fallback_takes_at_most_three_paragraphs() {
    let result = partition("<p>1</p><ul><li>skip</li></ul><p>2</p><p>3</p><p>4</p>");

    assert_eq!(result.summary, "<p>1</p><p>2</p><p>3</p>");
    assert_eq!(result.explanation, "");
}

#[test]
fn test_fallback_can_be_disabled() {
    let splitter = Splitter::new(
        KeywordTable::default(),
        SplitOptions {
            fallback_paragraphs: 0,
            ..SplitOptions::default()
        },
    );

    assert!(splitter.partition("<p>1</p><p>2</p>").is_empty());
}

#[test]
fn test_single_summary_heading_collects_everything_after_it() {
    let source = "<h1>Summary</h1><p>a</p><ul><li>b</li></ul><blockquote>c</blockquote>";

    let result = partition(source);
    assert_eq!(result.summary, "<p>a</p><ul><li>b</li></ul><blockquote>c</blockquote>");
    assert_eq!(result.explanation, "");

    let result = including_headings().partition(source);
    assert!(result.summary.starts_with("<h1>Summary</h1>"));
}

#[test]
fn test_unrecognised_heading_truncates_open_section() {
    let source = "<h2>要約</h2><p>first</p><h2>Related posts</h2><p>dropped</p><h2>Explanation</h2><p>last</p>";

    let result = partition(source);
    assert_eq!(result.summary, "<p>first</p>");
    assert_eq!(result.explanation, "<p>last</p>");
}

#[test]
fn test_headings_without_summary_leave_it_empty() {
    let result = partition("<p>intro</p><h2>解説</h2><p>body</p>");

    assert_eq!(result.summary, "");
    assert_eq!(result.explanation, "<p>body</p>");
}

#[test]
fn test_only_unrecognised_headings_disable_fallback() {
    let result = partition("<h3>Introduction</h3><p>one</p><p>two</p>");
    assert!(result.is_empty());
}

#[test]
fn test_content_before_first_heading_is_dropped() {
    let result = partition("<p>preamble</p><h2>summary</h2><p>kept</p>");
    assert_eq!(result.summary, "<p>kept</p>");
}

#[test]
fn test_repeated_label_appends_in_order() {
    let result =
        partition("<h2>Summary</h2><p>1</p><h2>解説</h2><p>2</p><h2>要約 (続き)</h2><p>3</p>");

    assert_eq!(result.summary, "<p>1</p><p>3</p>");
    assert_eq!(result.explanation, "<p>2</p>");
}

#[test]
fn test_heading_levels_one_through_six_delimit() {
    for level in 1..=6 {
        let source = format!("<h{level}>Summary</h{level}><p>x</p>");
        assert_eq!(partition(&source).summary, "<p>x</p>", "level {level}");
    }
}

#[test]
fn test_summary_output_round_trips_through_fallback() {
    let first = partition("<h2>要約</h2><p>A</p><p>B</p><h2>解説</h2><p>C</p>");
    let second = partition(&first.summary);

    assert_eq!(second.summary, first.summary);
    assert_eq!(second.explanation, "");
}

#[test]
fn test_sections_expose_untagged_runs() {
    let splitter = Splitter::default();
    let fragment = splitter.parse("<p>pre</p><h2>要約</h2><p>a</p><h3>Aside</h3><p>b</p>");
    let sections = splitter.sections(&fragment);

    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].label, None);
    assert!(sections[0].heading.is_none());
    assert_eq!(sections[0].nodes, vec!["<p>pre</p>".to_string()]);
    assert_eq!(sections[1].label, Some(SectionLabel::Summary));
    assert_eq!(sections[2].label, None);
    assert_eq!(sections[2].heading.as_ref().map(|h| h.level), Some(3));
}

#[test]
fn test_custom_keyword_table() {
    let keywords = KeywordTable::empty()
        .with(SectionLabel::Summary, ["tl;dr"])
        .with(SectionLabel::Explanation, ["details"]);
    let splitter = Splitter::new(keywords, SplitOptions::default());

    let result = splitter
        .partition("<h2>TL;DR</h2><p>a</p><h2>Summary</h2><p>b</p><h2>Details</h2><p>c</p>");
    assert_eq!(result.summary, "<p>a</p>");
    assert_eq!(result.explanation, "<p>c</p>");
}

#[test]
fn test_audio_cards_hidden_inside_sections() {
    let splitter = Splitter::new(
        KeywordTable::default(),
        SplitOptions {
            audio: AudioVisibility::Hide,
            ..SplitOptions::default()
        },
    );

    let result = splitter.partition(
        r#"<h2>解説</h2><div class="kg-card kg-audio-card"><audio src="a.mp3"></audio></div><p>B</p>"#,
    );
    assert_eq!(
        result.explanation,
        r#"<div class="kg-card kg-audio-card" style="display: none;"><audio src="a.mp3"></audio></div><p>B</p>"#
    );
}

#[test]
fn test_malformed_input_does_not_panic() {
    let result = partition("<h2>要約<p>unclosed <b>bold</h2><p>after");
    assert!(result.explanation.is_empty());
}

#[test]
fn test_nested_heading_disables_fallback() {
    let result = partition(r#"<div class="kg-toggle-card"><h4>Notes</h4><p>A</p></div><p>B</p>"#);

    assert_eq!(result.summary, "");
    assert_eq!(result.explanation, "");
}

#[test]
fn test_nested_heading_does_not_open_a_section() {
    let result = partition(
        r#"<h2>要約</h2><div class="kg-toggle-card"><h4>解説</h4><p>A</p></div><p>B</p>"#,
    );

    assert_eq!(
        result.summary,
        r#"<div class="kg-toggle-card"><h4>解説</h4><p>A</p></div><p>B</p>"#
    );
    assert!(result.explanation.is_empty());
}

#[test]
fn test_section_content_keeps_namespaced_attributes() {
    let result = partition(r##"<h2>要約</h2><svg><use xlink:href="#icon"></use></svg>"##);

    assert_eq!(result.summary, r##"<svg><use xlink:href="#icon"></use></svg>"##);
}
