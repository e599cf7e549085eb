//! Integration tests for mesh discovery and combination on real files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use atlasmesh::{
    combine_meshes, combine_to_file, discover_region_meshes, read_mz3, write_mz3, AtlasMeshError,
    ColorTable,
};

/// Write a single-region mesh the way the surface-extraction step would.
/// The color and scalar sections only pad the file; the reader discards them.
fn write_region_mesh(dir: &Path, name: &str, faces: &[i32], vertices: &[f32]) -> PathBuf {
    let num_vertices = vertices.len() / 3;
    let rgba = vec![0u8; num_vertices * 4];
    let scalars = vec![0.0f32; num_vertices];
    let path = dir.join(name);
    write_mz3(&path, faces, vertices, &rgba, &scalars).unwrap();
    path
}

fn write_color_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

#[test]
fn two_region_meshes_are_combined_with_offsets_colors_and_labels() {
    let dir = tempfile::tempdir().unwrap();

    // Region 1: 3 vertices, 1 face. Region 2: 2 vertices, no faces.
    write_region_mesh(
        dir.path(),
        "A_1.mz3",
        &[0, 1, 2],
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    );
    write_region_mesh(dir.path(), "A_2.mz3", &[], &[5.0, 5.0, 5.0, 6.0, 5.0, 5.0]);
    let colors = write_color_lines(dir.path(), "colors.txt", &["255 0 0", "0 255 0"]);

    let set = discover_region_meshes(dir.path()).unwrap();
    assert_eq!("A", set.prefix);
    assert_eq!(vec![1, 2], set.files.iter().map(|(i, _)| *i).collect::<Vec<u32>>());

    let table = ColorTable::from_file(&colors).unwrap();
    let combined = combine_meshes(&set, &table).unwrap();

    assert_eq!(5, combined.num_vertices());
    assert_eq!(1, combined.num_faces());
    assert_eq!(vec![0, 1, 2], combined.faces);

    // Region 1 vertices carry the first color line and scalar 1.0, region 2
    // the second line and scalar 2.0.
    assert_eq!(vec![1.0, 1.0, 1.0, 2.0, 2.0], combined.scalars);
    assert_eq!(&[255, 0, 0, 255], &combined.rgba[0..4]);
    assert_eq!(&[255, 0, 0, 255], &combined.rgba[8..12]);
    assert_eq!(&[0, 255, 0, 255], &combined.rgba[12..16]);
    assert_eq!(&[0, 255, 0, 255], &combined.rgba[16..20]);
}

#[test]
fn faces_of_later_regions_are_offset_by_the_running_vertex_count() {
    let dir = tempfile::tempdir().unwrap();

    write_region_mesh(
        dir.path(),
        "A_1.mz3",
        &[0, 1, 2],
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    );
    // A degenerate face referencing the region's own vertices 0 and 1.
    write_region_mesh(
        dir.path(),
        "A_2.mz3",
        &[0, 1, 0],
        &[5.0, 5.0, 5.0, 6.0, 5.0, 5.0],
    );
    let colors = write_color_lines(dir.path(), "colors.txt", &["255 0 0", "0 255 0"]);

    let set = discover_region_meshes(dir.path()).unwrap();
    let table = ColorTable::from_file(&colors).unwrap();
    let combined = combine_meshes(&set, &table).unwrap();

    // Region 2 comes after 3 vertices, so its face indices shift by +3.
    assert_eq!(vec![0, 1, 2, 3, 4, 3], combined.faces);
}

#[test]
fn combine_to_file_writes_a_readable_mesh_and_deletes_the_inputs() {
    let dir = tempfile::tempdir().unwrap();

    let in_1 = write_region_mesh(
        dir.path(),
        "aseg_1.mz3",
        &[0, 1, 2],
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    );
    let in_2 = write_region_mesh(dir.path(), "aseg_2.mz3", &[], &[5.0, 5.0, 5.0]);
    let colors = write_color_lines(dir.path(), "colors.txt", &["10 20 30", "40 50 60"]);

    let out_path = dir.path().join("combined_atlas.mz3");
    combine_to_file(dir.path(), &colors, &out_path, true).unwrap();

    let mesh = read_mz3(out_path.as_path()).unwrap();
    assert_eq!(4, mesh.num_vertices());
    assert_eq!(1, mesh.num_faces());
    assert_eq!(15, mesh.header.attr);

    // Inputs are gone, the combined mesh is not.
    assert!(!in_1.exists());
    assert!(!in_2.exists());
    assert!(out_path.exists());
}

#[test]
fn mixed_prefixes_in_one_directory_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    write_region_mesh(dir.path(), "A_1.mz3", &[], &[0.0, 0.0, 0.0]);
    write_region_mesh(dir.path(), "A_2.mz3", &[], &[0.0, 0.0, 0.0]);
    write_region_mesh(dir.path(), "B_1.mz3", &[], &[0.0, 0.0, 0.0]);

    match discover_region_meshes(dir.path()) {
        Err(AtlasMeshError::AmbiguousMeshPrefix(prefixes)) => {
            assert!(prefixes.contains('A') && prefixes.contains('B'));
        }
        other => panic!("expected AmbiguousMeshPrefix, got {:?}", other),
    }
}

#[test]
fn a_directory_without_region_meshes_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::File::create(dir.path().join("notes.txt")).unwrap();
    fs::File::create(dir.path().join("combined_atlas.mz3")).unwrap();

    match discover_region_meshes(dir.path()) {
        Err(AtlasMeshError::NoMeshInputs) => (),
        other => panic!("expected NoMeshInputs, got {:?}", other),
    }
}

#[test]
fn a_too_small_color_table_fails_before_any_mesh_is_decoded() {
    let dir = tempfile::tempdir().unwrap();

    // Garbage content: if combine tried to decode it, the error would be
    // InvalidMz3Format instead of the expected pre-flight failure.
    fs::File::create(dir.path().join("A_5.mz3"))
        .unwrap()
        .write_all(b"this is not a mesh")
        .unwrap();
    let colors = write_color_lines(dir.path(), "colors.txt", &["1 2 3", "4 5 6", "7 8 9"]);

    let set = discover_region_meshes(dir.path()).unwrap();
    let table = ColorTable::from_file(&colors).unwrap();

    match combine_meshes(&set, &table) {
        Err(AtlasMeshError::ColorTableTooSmall(num_defined, max_index)) => {
            assert_eq!(3, num_defined);
            assert_eq!(5, max_index);
        }
        other => panic!("expected ColorTableTooSmall, got {:?}", other),
    }
}

#[test]
fn a_hole_in_the_color_table_is_reported_for_the_affected_index() {
    let dir = tempfile::tempdir().unwrap();

    write_region_mesh(dir.path(), "A_1.mz3", &[], &[0.0, 0.0, 0.0]);
    write_region_mesh(dir.path(), "A_2.mz3", &[], &[0.0, 0.0, 0.0]);
    // Line 2 is malformed, so index 2 has no color although two colors are
    // defined overall (line 3 fills in for the count, not for the index).
    let colors = write_color_lines(
        dir.path(),
        "colors.txt",
        &["255 0 0", "not a color", "0 0 255"],
    );

    let set = discover_region_meshes(dir.path()).unwrap();
    let table = ColorTable::from_file(&colors).unwrap();

    match combine_meshes(&set, &table) {
        Err(AtlasMeshError::MissingColor(2)) => (),
        other => panic!("expected MissingColor(2), got {:?}", other),
    }
}
