use super::*;
use crate::kernel::services::ports::search::SearchPattern;

fn create_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn args_as_strings(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_tool_args_fixed_prefix() {
    let options = SearchOptions::new(SearchPattern::new("foo", false));
    let args = tool_args(&options, &[PathBuf::from("/p")]);
    assert_eq!(
        args_as_strings(&args),
        vec!["-U", "--hidden", "--nogroup", "--nocolor", "foo", "/p"]
    );
}

#[test]
fn test_tool_args_flags_before_pattern() {
    let options = SearchOptions::new(SearchPattern::new("a.b", true)).with_whole_word(true);
    let args = tool_args(
        &options,
        &[PathBuf::from("/p/src"), PathBuf::from("/q/src")],
    );
    assert_eq!(
        args_as_strings(&args),
        vec![
            "-U",
            "--hidden",
            "--nogroup",
            "--nocolor",
            "-i",
            "-w",
            "a.b",
            "/p/src",
            "/q/src"
        ]
    );
}

#[test]
fn test_tool_args_whole_word_only() {
    let options = SearchOptions::new(SearchPattern::new("x", false)).with_whole_word(true);
    let args = args_as_strings(&tool_args(&options, &[]));
    assert!(args.contains(&"-w".to_string()));
    assert!(!args.contains(&"-i".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("x"));
}

#[test]
fn test_output_lines_split_and_close() {
    let rt = create_runtime();
    rt.block_on(async {
        let data: &[u8] = b"a:1:x\r\nb:2:y\n\xffz";
        let mut lines = OutputLines::new(Some(data));
        assert!(lines.is_open());
        assert_eq!(lines.next_line().await.as_deref(), Some("a:1:x"));
        assert_eq!(lines.next_line().await.as_deref(), Some("b:2:y"));
        assert_eq!(lines.next_line().await.as_deref(), Some("\u{fffd}z"));
        assert_eq!(lines.next_line().await, None);
        assert!(!lines.is_open());
        assert_eq!(lines.next_line().await, None);
    });
}

#[test]
fn test_output_lines_without_stream() {
    let rt = create_runtime();
    rt.block_on(async {
        let mut lines = OutputLines::<&[u8]>::new(None);
        assert!(!lines.is_open());
        assert_eq!(lines.next_line().await, None);
    });
}

#[test]
fn test_start_missing_program_is_not_found() {
    let rt = create_runtime();
    let dir = tempfile::tempdir().unwrap();
    let program = dir.path().join("definitely-not-pt");
    let err = rt
        .block_on(async { ToolProcess::start(&program, &[]) })
        .err()
        .unwrap();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}
