use treedown_core::{is_html, is_resource_file, is_resource_folder, resource_folder_name};

#[test]
fn html_extensions_are_recognized_case_insensitively() {
    for name in ["a.html", "a.htm", "a.xhtml", "a.xhtm", "a.shtml", "A.HTML", "Page.HtM"] {
        assert!(is_html(name), "{name} should be html");
    }
}

#[test]
fn other_extensions_are_not_html() {
    for name in ["a.md", "a.html.bak", "a.php", "html", "a_html", "a.png"] {
        assert!(!is_html(name), "{name} should not be html");
    }
}

#[test]
fn resource_files_cover_images_and_pdf() {
    for name in ["a.png", "B.JPG", "c.jpeg", "d.gif", "e.svg", "f.bmp", "g.pdf", "h.ico", "i.webp", "j.avif", "k.tif"] {
        assert!(is_resource_file(name), "{name} should be a resource");
    }
    for name in ["b.txt", "s.js", "style.css", "page.html", "png"] {
        assert!(!is_resource_file(name), "{name} should not be a resource");
    }
}

#[test]
fn resource_folders_end_in_files_suffix() {
    assert!(is_resource_folder("doc_files"));
    assert!(is_resource_folder("Page_Files"));
    assert!(is_resource_folder("src_files"));
    assert!(!is_resource_folder("files"));
    assert!(!is_resource_folder("doc_files_old"));
    assert!(!is_resource_folder("doc-files"));
}

#[test]
fn resource_folder_name_matches_the_predicate() {
    let name = resource_folder_name("index");
    assert_eq!(name, "index_files");
    assert!(is_resource_folder(&name));
}
