// Fixture trees shared by the integration tests. Archives are written at test
// time so the repository does not need to carry binary fixtures.
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use assert_fs::TempDir;
use zip::write::SimpleFileOptions;

pub const JPEG_BYTES: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01,
];
pub const RAR_BYTES: &[u8] = &[
    b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x00, 0xCF, 0x90, 0x73, 0x00, 0x00,
];

/// Write a zip at `path` with the given directory entries and files.
pub fn write_zip(path: &Path, dirs: &[&str], files: &[(&str, Vec<u8>)]) {
    let mut zw = zip::ZipWriter::new(File::create(path).unwrap());
    let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for d in dirs {
        zw.add_directory(*d, opts).unwrap();
    }
    for (name, data) in files {
        zw.start_file(*name, opts).unwrap();
        zw.write_all(data).unwrap();
    }
    zw.finish().unwrap();
}

/// The four-entry tree:
///
/// ```text
/// Inner directory/test-txt
/// test-zip.zip          (Inner directory/readme.txt)
/// test-image.jpg
/// rar-archive.rar
/// ```
pub fn sample_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("Inner directory")).unwrap();
    fs::write(root.join("Inner directory").join("test-txt"), "plain text content").unwrap();
    write_zip(
        &root.join("test-zip.zip"),
        &["Inner directory/"],
        &[("Inner directory/readme.txt", b"inside the archive".to_vec())],
    );
    fs::write(root.join("test-image.jpg"), JPEG_BYTES).unwrap();
    fs::write(root.join("rar-archive.rar"), RAR_BYTES).unwrap();
    temp
}

/// A zip holding another zip plus a small directory tree.
pub fn nested_zip_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let inner = root.join("inner.tmp");
    write_zip(&inner, &["Inner directory/"], &[]);
    let inner_bytes = fs::read(&inner).unwrap();
    fs::remove_file(&inner).unwrap();

    write_zip(
        &root.join("zip-with-inner-zip.zip"),
        &[],
        &[
            ("test-zip.zip", inner_bytes),
            ("docs/guide/intro.txt", b"welcome".to_vec()),
            ("docs/photo.jpg", JPEG_BYTES.to_vec()),
        ],
    );
    temp
}
