use super::*;

#[test]
fn test_defaults() {
    let args = CliArgs::try_parse_from(["tylo-lower", "fixture.json"]).expect("valid args");
    assert_eq!(args.fixture, PathBuf::from("fixture.json"));
    assert_eq!(args.format, OutputFormat::Text);
    assert!(!args.parallel);
}

#[test]
fn test_format_and_parallel() {
    let args = CliArgs::try_parse_from(["tylo-lower", "f.json", "--format", "JSON", "--parallel"])
        .expect("valid args");
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.parallel);
}

#[test]
fn test_fixture_is_required() {
    assert!(CliArgs::try_parse_from(["tylo-lower"]).is_err());
}
