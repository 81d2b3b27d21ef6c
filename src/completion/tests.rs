use super::*;
use crate::command::Param;

fn build_run_tree() -> CommandNode {
    CommandNode::group("prog")
        .subcommand(CommandNode::leaf("build"))
        .subcommand(CommandNode::leaf("run").param(Param::flag("verbose").long("verbose")))
}

fn level_tree() -> CommandNode {
    CommandNode::group("prog")
        .param(
            Param::option("level")
                .long("level")
                .choices(["low", "medium", "high"]),
        )
        .param(Param::flag("color").long("color").negation("no-color"))
        .subcommand(
            CommandNode::group("remote")
                .subcommand(CommandNode::leaf("add").param(Param::flag("force").long("force")))
                .subcommand(CommandNode::leaf("remove")),
        )
        .subcommand(
            CommandNode::leaf("deploy")
                .param(Param::argument("env").choices(["staging", "production"])),
        )
}

fn complete(root: &CommandNode, words: &[&str], cword: usize) -> Vec<String> {
    CompletionEngine::new(root, "prog").complete(&CompletionQuery::new(words.iter().copied(), cword))
}

fn dispatch_to_string(root: &CommandNode, request: &Request<'_>) -> String {
    let mut out = Vec::new();
    dispatch(root, "prog", request, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_scenario_build_and_run() {
    let root = build_run_tree();
    assert_eq!(complete(&root, &["prog", "b"], 1), vec!["build"]);
    assert_eq!(complete(&root, &["prog", "run", "--"], 2), vec!["--verbose"]);
}

#[test]
fn test_scenario_missing_value_offers_domain() {
    let root = level_tree();
    assert_eq!(
        complete(&root, &["prog", "--level"], 2),
        vec!["low", "medium", "high"]
    );
}

#[test]
fn test_scenario_empty_inline_value_offers_domain() {
    let root = level_tree();
    assert_eq!(
        complete(&root, &["prog", "--level="], 1),
        vec!["low", "medium", "high"]
    );
}

#[test]
fn test_scenario_invalid_value_offers_domain() {
    let root = level_tree();
    assert_eq!(
        complete(&root, &["prog", "--level", "xyz"], 3),
        vec!["low", "medium", "high"]
    );
}

#[test]
fn test_scenario_partial_inline_value_filters_domain() {
    let root = level_tree();
    assert_eq!(complete(&root, &["prog", "--level=m"], 1), vec!["medium"]);
}

#[test]
fn test_partial_separate_value_filters_domain() {
    let root = level_tree();
    assert_eq!(complete(&root, &["prog", "--level", "h"], 2), vec!["high"]);
}

#[test]
fn test_shell_split_equals_sign() {
    let root = level_tree();
    assert_eq!(
        complete(&root, &["prog", "--level", "="], 2),
        vec!["low", "medium", "high"]
    );
}

#[test]
fn test_positional_choice_completion() {
    let root = level_tree();
    assert_eq!(complete(&root, &["prog", "deploy", "pro"], 2), vec!["production"]);
}

#[test]
fn test_option_completion_includes_negations() {
    let root = level_tree();
    assert_eq!(
        complete(&root, &["prog", "--"], 1),
        vec!["--level", "--color", "--no-color"]
    );
    assert_eq!(complete(&root, &["prog", "--no"], 1), vec!["--no-color"]);
}

#[test]
fn test_nested_group_children() {
    let root = level_tree();
    assert_eq!(complete(&root, &["prog", "remote"], 2), vec!["add", "remove"]);
    assert_eq!(complete(&root, &["prog", "remote", "re"], 2), vec!["remove"]);
    assert_eq!(
        complete(&root, &["prog", "--color", "remote", "add", "-"], 4),
        vec!["--force"]
    );
}

#[test]
fn test_unresolvable_child_yields_nothing() {
    let root = level_tree();
    assert!(complete(&root, &["prog", "bogus"], 2).is_empty());
    assert!(complete(&root, &["prog", "bogus", "--"], 2).is_empty());
    assert!(complete(&root, &["prog", "remote", "bogus", "a"], 3).is_empty());
}

#[test]
fn test_first_error_wins() {
    let root = level_tree();
    // The unknown option comes first, so the domain of --level is never
    // offered and completion falls back to the command structure.
    assert_eq!(
        complete(&root, &["prog", "--bogus", "--level"], 3),
        vec!["remote", "deploy"]
    );
}

#[test]
fn test_candidates_are_prefix_matches() {
    let root = level_tree();
    let cases = vec![
        (vec!["prog", "r"], 1),
        (vec!["prog", "--l"], 1),
        (vec!["prog", "--level", "m"], 2),
        (vec!["prog", "remote", "a"], 2),
        (vec!["prog", "deploy", "s"], 2),
    ];
    for (words, cword) in cases {
        let query = CompletionQuery::new(words.iter().copied(), cword);
        let incomplete = query.incomplete().to_string();
        let candidates = CompletionEngine::new(&root, "prog").complete(&query);
        assert!(!candidates.is_empty(), "no candidates for {words:?}");
        for candidate in candidates {
            assert!(
                candidate.starts_with(&incomplete),
                "{candidate} does not extend {incomplete}"
            );
        }
    }
}

#[test]
fn test_same_query_same_output() {
    let root = level_tree();
    let query = CompletionQuery::new(["prog", "--level", ""], 2);
    let engine = CompletionEngine::new(&root, "prog");
    assert_eq!(engine.complete(&query), engine.complete(&query));
}

#[test]
fn test_dispatch_complete_writes_lines() {
    let root = build_run_tree();
    let request = Request::Complete(CompletionQuery::from_line("prog ", 1));
    assert_eq!(dispatch_to_string(&root, &request), "build\nrun\n");
}

#[test]
fn test_dispatch_complete_without_candidates_writes_nothing() {
    let root = build_run_tree();
    let request = Request::Complete(CompletionQuery::from_line("prog zzz", 2));
    assert_eq!(dispatch_to_string(&root, &request), "");
}

#[test]
fn test_dispatch_source_writes_script() {
    let root = build_run_tree();
    let request = Request::Source(ScriptTemplate::new("prog", "_PROG_COMPLETE"));
    let output = dispatch_to_string(&root, &request);
    assert!(output.ends_with("complete -F _prog_completion -o default prog;\n"));
}

#[test]
fn test_instruction_parse() {
    assert_eq!(Instruction::parse("source"), Some(Instruction::Source));
    assert_eq!(Instruction::parse("complete"), Some(Instruction::Complete));
    assert_eq!(Instruction::parse("bogus"), None);
}
