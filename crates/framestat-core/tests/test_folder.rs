use std::fs;
use std::path::Path;

use framestat_core::io::folder::{is_image_file, list_images};

#[test]
fn test_extension_match_is_case_insensitive() {
    for name in ["a.png", "b.PNG", "c.Jpg", "d.jpeg", "e.BMP"] {
        assert!(is_image_file(Path::new(name)), "{name}");
    }
    for name in ["f.tif", "g.png.txt", "noext", "h.gif"] {
        assert!(!is_image_file(Path::new(name)), "{name}");
    }
}

#[test]
fn test_lists_only_image_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.PNG", "a.jpg", "c.txt", "d.JpEg", "e.bmp"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("nested.png")).unwrap();

    let paths = list_images(dir.path(), true);
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.jpg", "b.PNG", "d.JpEg", "e.bmp"]);
    assert!(paths.iter().all(|p| p.is_absolute()));
}

#[test]
fn test_unsorted_listing_has_same_members() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["z.png", "y.png", "x.png"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    let mut unsorted = list_images(dir.path(), false);
    unsorted.sort();
    assert_eq!(unsorted, list_images(dir.path(), true));
}

#[test]
fn test_missing_or_non_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_images(&dir.path().join("missing"), true).is_empty());

    let file = dir.path().join("file.png");
    fs::write(&file, b"x").unwrap();
    assert!(list_images(&file, true).is_empty());
}
