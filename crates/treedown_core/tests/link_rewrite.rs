use pretty_assertions::assert_eq;
use treedown_core::{normalize_markdown, rewrite_image_links};

fn rewrite(input: &str) -> String {
    rewrite_image_links(input).markdown
}

#[test]
fn plain_reference_gets_resource_prefix() {
    assert_eq!(
        rewrite("![logo](logo_files/a.png)"),
        "![logo](src_files/logo_files/a.png)"
    );
    assert_eq!(rewrite("![x](a.png)"), "![x](src_files/a.png)");
}

#[test]
fn data_uri_is_left_untouched() {
    let input = "![x](data:image/png;base64,AAAA)";
    assert_eq!(rewrite(input), input);
}

#[test]
fn double_bracket_caption_is_preserved() {
    assert_eq!(
        rewrite("![[Figure 1]](img.png)"),
        "![[Figure 1]](src_files/img.png)"
    );
}

#[test]
fn empty_and_cjk_captions_match() {
    assert_eq!(rewrite("![](a_files/1.png)"), "![](src_files/a_files/1.png)");
    assert_eq!(
        rewrite("![图片：示例。](a_files/2.png)"),
        "![图片：示例。](src_files/a_files/2.png)"
    );
}

#[test]
fn every_reference_in_the_text_is_rewritten() {
    let input = "# Title\n\n![a](x_files/1.png)\n\ntext ![b](x_files/2.gif) more\n\n![c](data:image/gif;base64,R0l)\n";
    let expected = "# Title\n\n![a](src_files/x_files/1.png)\n\ntext ![b](src_files/x_files/2.gif) more\n\n![c](data:image/gif;base64,R0l)\n";
    let out = rewrite_image_links(input);
    assert_eq!(out.markdown, expected);
    assert_eq!(out.rewritten, 2);
    assert_eq!(out.untouched, 1);
}

#[test]
fn rewrite_is_idempotent() {
    let once = rewrite("![a](a_files/1.png) ![b](data:image/png;base64,AA)");
    assert_eq!(rewrite(&once), once);
}

#[test]
fn captions_outside_the_allowed_set_are_not_rewritten() {
    let input = "![a/b](x.png)";
    assert_eq!(rewrite(input), input);
}

#[test]
fn normalize_then_rewrite_fixes_escaped_paths() {
    let converted = r"![shot](page\_files/img\_1.png)";
    assert_eq!(
        rewrite(&normalize_markdown(converted)),
        "![shot](src_files/page_files/img_1.png)"
    );
}
