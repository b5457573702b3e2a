//! Drives the `cat`, `convert`, and `lines` subcommands through `cli::run`.

use std::fs;
use std::path::Path;

use compress::CompressionAlgorithm;
use stream::{ReadStream, WriteStream};

fn run(args: &[&str]) -> (i32, Vec<u8>, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = cli::run(args.iter().copied(), &mut stdout, &mut stderr);
    (code, stdout, String::from_utf8(stderr).expect("utf8 stderr"))
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

fn write_encoded(path: &Path, data: &[u8]) {
    let mut writer = WriteStream::create(path, None).expect("create");
    writer.write(data).expect("write");
    writer.close().expect("close");
}

fn read_decoded(path: &Path, algorithm: Option<CompressionAlgorithm>) -> Vec<u8> {
    let mut reader = ReadStream::open(path, algorithm).expect("open");
    let mut output = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        let copied = reader.read(&mut chunk).expect("read");
        if copied == 0 {
            return output;
        }
        output.extend_from_slice(&chunk[..copied]);
    }
}

// ============================================================================
// cat
// ============================================================================

#[test]
fn cat_decodes_and_concatenates() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("one.txt");
    let gz = dir.path().join("two.gz");
    fs::write(&plain, b"first\n").unwrap();
    write_encoded(&gz, b"second\n");

    let (code, stdout, stderr) = run(&["zbuf", "cat", path_str(&plain), path_str(&gz)]);
    assert_eq!(code, cli::EXIT_SUCCESS, "{stderr}");
    assert_eq!(stdout, b"first\nsecond\n");
}

#[test]
fn cat_with_small_buffer_matches_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.gz");
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 97) as u8).collect();
    write_encoded(&path, &data);

    let (code, stdout, _) = run(&["zbuf", "--buffer-size", "3", "cat", path_str(&path)]);
    assert_eq!(code, cli::EXIT_SUCCESS);
    assert_eq!(stdout, data);
}

#[test]
fn cat_forced_algorithm_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let disguised = dir.path().join("looks-plain.txt");
    let compressed = compress::gzip::compress_to_vec(b"hidden gzip", compress::CompressionLevel::Fast)
        .expect("compress");
    fs::write(&disguised, compressed).unwrap();

    let (code, stdout, _) = run(&["zbuf", "cat", "-a", "gzip", path_str(&disguised)]);
    assert_eq!(code, cli::EXIT_SUCCESS);
    assert_eq!(stdout, b"hidden gzip");
}

#[test]
fn cat_continues_after_a_failed_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, b"ok").unwrap();
    let missing = dir.path().join("missing.txt");

    let (code, stdout, stderr) = run(&["zbuf", "cat", path_str(&missing), path_str(&good)]);
    assert_eq!(code, cli::EXIT_FAILURE);
    assert_eq!(stdout, b"ok");
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("zbuf: "));
    assert!(stderr.contains("missing.txt"));
}

#[test]
fn cat_reports_unallocatable_buffer_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.txt");
    fs::write(&path, b"tiny").unwrap();

    let (code, stdout, stderr) = run(&[
        "zbuf",
        "--buffer-size",
        "9223372036854775807",
        "cat",
        path_str(&path),
    ]);
    assert_eq!(code, cli::EXIT_FAILURE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to allocate buffer"), "{stderr}");
}

#[test]
fn cat_rejects_directories() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(&["zbuf", "cat", path_str(dir.path())]);
    assert_eq!(code, cli::EXIT_FAILURE);
    assert!(stderr.contains("cannot determine compression algorithm"));
}

// ============================================================================
// convert
// ============================================================================

#[test]
fn convert_between_every_pair() {
    let dir = tempfile::tempdir().unwrap();
    let data = b"convert me across codecs\n".repeat(200);

    for from in CompressionAlgorithm::available() {
        for to in CompressionAlgorithm::available() {
            let input = dir.path().join(format!("in-{from}{}", from.extension().unwrap_or("")));
            let output = dir.path().join(format!("out-{from}-{to}{}", to.extension().unwrap_or("")));
            write_encoded(&input, &data);

            let (code, stdout, stderr) = run(&["zbuf", "convert", path_str(&input), path_str(&output)]);
            assert_eq!(code, cli::EXIT_SUCCESS, "{from} -> {to}: {stderr}");
            assert!(stdout.is_empty());
            assert_eq!(read_decoded(&output, Some(to)), data, "{from} -> {to}");
        }
    }
}

#[test]
fn convert_honours_explicit_algorithms_and_level() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.raw");
    let output = dir.path().join("output.raw");
    fs::write(&input, b"explicit algorithms").unwrap();

    let (code, _, stderr) = run(&[
        "zbuf",
        "convert",
        "-i",
        "plain",
        "-a",
        "gzip",
        "-l",
        "9",
        path_str(&input),
        path_str(&output),
    ]);
    assert_eq!(code, cli::EXIT_SUCCESS, "{stderr}");
    let written = fs::read(&output).unwrap();
    assert_eq!(&written[..2], &[0x1f, 0x8b]);
    assert_eq!(
        read_decoded(&output, Some(CompressionAlgorithm::Gzip)),
        b"explicit algorithms"
    );
}

#[test]
fn convert_reports_unallocatable_buffer_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.gz");
    fs::write(&input, b"tiny").unwrap();

    let (code, _, stderr) = run(&[
        "zbuf",
        "--buffer-size",
        "9223372036854775807",
        "convert",
        path_str(&input),
        path_str(&output),
    ]);
    assert_eq!(code, cli::EXIT_FAILURE);
    assert!(stderr.contains("failed to allocate buffer"), "{stderr}");
}

#[test]
fn convert_reports_corrupt_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.gz");
    let output = dir.path().join("out.txt");
    fs::write(&input, b"this is not gzip data at all").unwrap();

    let (code, _, stderr) = run(&["zbuf", "convert", path_str(&input), path_str(&output)]);
    assert_eq!(code, cli::EXIT_FAILURE);
    assert!(stderr.contains("broken.gz"));
}

#[test]
fn convert_rejects_bad_level() {
    let (code, _, stderr) = run(&["zbuf", "convert", "-l", "0", "a", "b"]);
    assert_eq!(code, cli::EXIT_USAGE);
    assert!(stderr.starts_with("zbuf: "));
}

// ============================================================================
// lines
// ============================================================================

#[test]
fn lines_counts_records_per_file_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.gz");
    fs::write(&a, b"1\n2\n3\n").unwrap();
    write_encoded(&b, b"x\ny");

    let (code, stdout, _) = run(&["zbuf", "lines", path_str(&a), path_str(&b)]);
    assert_eq!(code, cli::EXIT_SUCCESS);
    let text = String::from_utf8(stdout).unwrap();
    let expected = format!("3\t{}\n2\t{}\n5\ttotal\n", a.display(), b.display());
    assert_eq!(text, expected);
}

#[test]
fn lines_uses_custom_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.bin");
    fs::write(&path, b"a\0bb\0ccc\0").unwrap();

    let (code, stdout, _) = run(&["zbuf", "lines", "-d", "\\0", path_str(&path)]);
    assert_eq!(code, cli::EXIT_SUCCESS);
    assert_eq!(String::from_utf8(stdout).unwrap(), format!("3\t{}\n", path.display()));
}

#[test]
fn lines_of_empty_file_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, b"").unwrap();

    let (code, stdout, _) = run(&["zbuf", "lines", path_str(&path)]);
    assert_eq!(code, cli::EXIT_SUCCESS);
    assert_eq!(String::from_utf8(stdout).unwrap(), format!("0\t{}\n", path.display()));
}
