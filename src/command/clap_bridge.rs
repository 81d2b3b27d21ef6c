//! Conversion from clap command definitions

use clap::{Arg, ArgAction};

use super::{CommandNode, Param};

impl CommandNode {
    /// Build a command tree from a clap command
    ///
    /// The command should already be built (`clap::Command::build`) so that
    /// generated arguments like `--help` are present and positional ranges
    /// are resolved.
    pub fn from_clap(cmd: &clap::Command) -> Self {
        let mut node = if cmd.has_subcommands() {
            CommandNode::group(cmd.get_name())
        } else {
            CommandNode::leaf(cmd.get_name())
        };

        if let Some(about) = cmd.get_about() {
            node = node.about(about.to_string());
        }
        node = node.hidden(cmd.is_hide_set());

        for arg in cmd.get_arguments() {
            node = node.param(param_from_arg(arg));
        }

        for sub in cmd.get_subcommands() {
            node = node.subcommand(CommandNode::from_clap(sub));
        }

        node
    }
}

fn param_from_arg(arg: &Arg) -> Param {
    let name = arg.get_id().as_str();

    let mut param = if arg.is_positional() {
        let multiple = matches!(arg.get_action(), ArgAction::Append)
            || arg.get_num_args().is_some_and(|range| range.max_values() > 1);
        Param::argument(name).multiple(multiple)
    } else if arg.get_action().takes_values() {
        Param::option(name)
    } else {
        Param::flag(name)
    };

    if let Some(short) = arg.get_short() {
        param = param.short(short);
    }
    if let Some(long) = arg.get_long() {
        param = param.long(long);
    }
    for alias in arg.get_visible_aliases().unwrap_or_default() {
        param = param.long(alias);
    }

    if arg.get_action().takes_values() {
        let choices: Vec<String> = arg
            .get_possible_values()
            .iter()
            .filter(|pv| !pv.is_hide_set())
            .map(|pv| pv.get_name().to_string())
            .collect();
        if !choices.is_empty() {
            param = param.choices(choices);
        }
    }

    param.hidden(arg.is_hide_set())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ParamKind, ValueDomain};

    fn clap_tree() -> clap::Command {
        let mut cmd = clap::Command::new("tool")
            .disable_help_subcommand(true)
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue),
            )
            .subcommand(
                clap::Command::new("run")
                    .about("Run the thing")
                    .arg(
                        Arg::new("level")
                            .long("level")
                            .value_parser(["low", "medium", "high"]),
                    )
                    .arg(Arg::new("files").num_args(1..)),
            )
            .subcommand(clap::Command::new("internal").hide(true));
        cmd.build();
        cmd
    }

    #[test]
    fn test_from_clap_structure() {
        let root = CommandNode::from_clap(&clap_tree());
        assert_eq!(root.name(), "tool");
        assert!(root.is_container());
        assert_eq!(root.list_commands(), vec!["run"]);
        assert!(root.get_command("internal").is_some_and(CommandNode::is_hidden));
    }

    #[test]
    fn test_from_clap_flags() {
        let root = CommandNode::from_clap(&clap_tree());
        let quiet = root.find_option("--quiet").unwrap();
        assert_eq!(quiet.kind(), ParamKind::Flag);
        assert_eq!(quiet.opts(), ["-q", "--quiet"]);
        assert!(root.find_option("--help").is_some());
    }

    #[test]
    fn test_from_clap_closed_domain() {
        let root = CommandNode::from_clap(&clap_tree());
        let run = root.get_command("run").unwrap();
        assert_eq!(run.about_text(), Some("Run the thing"));

        let level = run.find_option("--level").unwrap();
        assert!(level.takes_value());
        assert_eq!(
            level.domain(),
            &ValueDomain::Closed(vec!["low".into(), "medium".into(), "high".into()])
        );
    }

    #[test]
    fn test_from_clap_positional() {
        let root = CommandNode::from_clap(&clap_tree());
        let run = root.get_command("run").unwrap();
        let files = run.find_param("files").unwrap();
        assert_eq!(files.kind(), ParamKind::Argument);
        assert!(files.is_multiple());
        assert_eq!(files.domain(), &ValueDomain::Open);
    }
}
