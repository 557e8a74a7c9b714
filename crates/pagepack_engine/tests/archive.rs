use std::io::{Cursor, Read};

use bytes::Bytes;
use pagepack_engine::{build_archive, ArchiveError, Image};
use zip::ZipArchive;

fn image(name: &str, content: &[u8]) -> Image {
    Image {
        name: name.to_string(),
        content: Bytes::copy_from_slice(content),
    }
}

#[test]
fn archive_round_trips_named_payloads() {
    let images = vec![image("0-a.png", b"abc"), image("1-b.png", b"xy")];

    let blob = build_archive(images).expect("archive ok");

    let mut archive = ZipArchive::new(Cursor::new(blob)).expect("readable zip");
    assert_eq!(archive.len(), 2);

    let mut payload = Vec::new();
    archive
        .by_name("0-a.png")
        .expect("entry 0-a.png")
        .read_to_end(&mut payload)
        .unwrap();
    assert_eq!(payload, b"abc");

    payload.clear();
    archive
        .by_name("1-b.png")
        .expect("entry 1-b.png")
        .read_to_end(&mut payload)
        .unwrap();
    assert_eq!(payload, b"xy");
}

#[test]
fn archive_preserves_binary_payloads() {
    let blob = build_archive(vec![image("0-raw.bin", &[0u8, 255, 1, 254, 127])]).unwrap();

    let mut archive = ZipArchive::new(Cursor::new(blob)).unwrap();
    let mut payload = Vec::new();
    archive
        .by_name("0-raw.bin")
        .unwrap()
        .read_to_end(&mut payload)
        .unwrap();
    assert_eq!(payload, vec![0u8, 255, 1, 254, 127]);
}

#[test]
fn duplicate_entry_names_are_rejected() {
    let images = vec![image("0-a.png", b"abc"), image("0-a.png", b"xy")];

    let err = build_archive(images).unwrap_err();
    match err {
        ArchiveError::DuplicateEntry { name } => assert_eq!(name, "0-a.png"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_image_set_builds_an_empty_archive() {
    let blob = build_archive(Vec::new()).expect("archive ok");
    let archive = ZipArchive::new(Cursor::new(blob)).expect("readable zip");
    assert_eq!(archive.len(), 0);
}
