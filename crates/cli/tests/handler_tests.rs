#[cfg(test)]
mod tests {
    use shell_cuts_cli::handlers::{self, GitOptions};
    use shell_cuts_cli::registry::Registry;
    use shell_cuts_core::command_file::CommandFile;
    use shell_cuts_core::config::{Profile, ProfileStore, YamlProfileStore, DEFAULT_CONTEXT};
    use shell_cuts_core::error::{Error, Result};
    use shell_cuts_core::interaction::Interaction;
    use shell_cuts_core::repository::get_list;
    use shell_cuts_core::vcs::{Git, VcsHook};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeTerminal {
        answers: VecDeque<String>,
        confirmations: VecDeque<bool>,
        selection: usize,
        prompts: Vec<String>,
        shown: Vec<Vec<String>>,
        infos: Vec<String>,
    }

    impl FakeTerminal {
        fn answering(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }
    }

    impl Interaction for FakeTerminal {
        fn prompt(&mut self, message: &str, default: &str) -> Result<String> {
            self.prompts.push(message.to_string());
            match self.answers.pop_front() {
                Some(answer) if !answer.is_empty() => Ok(answer),
                _ => Ok(default.to_string()),
            }
        }

        fn confirm(&mut self, _message: &str) -> Result<bool> {
            Ok(self.confirmations.pop_front().unwrap_or(false))
        }

        fn show_commands(&mut self, commands: &[CommandFile]) -> Result<()> {
            self.shown
                .push(commands.iter().map(|c| c.f_name.clone()).collect());
            Ok(())
        }

        fn select_command(&mut self, commands: &[CommandFile]) -> Result<usize> {
            self.show_commands(commands)?;
            Ok(self.selection)
        }

        fn info(&mut self, message: &str) {
            self.infos.push(message.to_string());
        }

        fn warn(&mut self, _message: &str) {}
    }

    /// Records commit messages instead of running git.
    #[derive(Default)]
    struct RecordingVcs {
        commits: RefCell<Vec<(PathBuf, String, String)>>,
    }

    impl VcsHook for RecordingVcs {
        fn commit(&self, root: &Path, message: &str, branch: &str) -> Result<()> {
            self.commits
                .borrow_mut()
                .push((root.to_path_buf(), message.to_string(), branch.to_string()));
            Ok(())
        }
    }

    fn profile_in(dir: &TempDir, git_enabled: bool) -> Profile {
        let mut profile = Profile {
            path: dir.path().join("commands").to_string_lossy().to_string(),
            ..Profile::default()
        };
        profile.git.enabled = git_enabled;
        fs::create_dir_all(profile.root()).unwrap();
        profile
    }

    fn store_in(dir: &TempDir) -> YamlProfileStore {
        YamlProfileStore::new(dir.path().join("config.yml").to_string_lossy().to_string())
    }

    #[test]
    fn test_init_saves_context_and_creates_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(&temp_dir);
        let root = temp_dir.path().join("work-commands");
        let mut terminal = FakeTerminal::default();

        let profile = handlers::init(
            &store,
            &mut terminal,
            "WORK",
            Some(root.to_str().unwrap()),
        )
        .unwrap();

        assert!(root.is_dir());
        assert_eq!(store.load("WORK").unwrap(), Some(profile));
        assert_eq!(terminal.infos, vec!["Application initialized"]);
    }

    #[test]
    fn test_init_prompts_for_empty_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(&temp_dir);
        let root = temp_dir.path().join("prompted");
        let mut terminal = FakeTerminal::answering(&[root.to_str().unwrap()]);

        handlers::init(&store, &mut terminal, DEFAULT_CONTEXT, Some("  ")).unwrap();

        assert_eq!(terminal.prompts, vec!["Path"]);
        assert!(root.is_dir());
    }

    #[test]
    fn test_init_git_prompts_and_writes_attributes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(&temp_dir);
        let profile = profile_in(&temp_dir, false);
        store.save(DEFAULT_CONTEXT, &profile).unwrap();

        // `true` stands in for git and accepts every invocation
        let git = Git::with_program("true");
        let mut terminal = FakeTerminal::answering(&["me", "me@example.com", ""]);
        let options = GitOptions {
            repo: "git@example.com:me/commands.git".to_string(),
            ..GitOptions::default()
        };

        let saved = handlers::init_git(&store, &git, &mut terminal, DEFAULT_CONTEXT, &options).unwrap();

        assert_eq!(
            terminal.prompts,
            vec!["Git username", "Git email", "Git branch"]
        );
        assert!(saved.git.enabled);
        assert_eq!(saved.git.user, "me");
        assert_eq!(saved.git.branch, "main");
        assert_eq!(store.load(DEFAULT_CONTEXT).unwrap(), Some(saved));
        assert_eq!(
            fs::read_to_string(profile.root().join(".gitattributes")).unwrap(),
            "*.sh diff=sh"
        );
        assert_eq!(terminal.infos, vec!["Git initialized"]);
    }

    #[test]
    fn test_init_git_pull_skips_attributes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(&temp_dir);
        let profile = profile_in(&temp_dir, false);
        store.save(DEFAULT_CONTEXT, &profile).unwrap();

        let git = Git::with_program("true");
        let mut terminal = FakeTerminal::default();
        let options = GitOptions {
            repo: "r".to_string(),
            user: "u".to_string(),
            mail: "m".to_string(),
            branch: "trunk".to_string(),
            pull: true,
        };

        let saved = handlers::init_git(&store, &git, &mut terminal, DEFAULT_CONTEXT, &options).unwrap();

        assert!(terminal.prompts.is_empty());
        assert_eq!(saved.git.branch, "trunk");
        assert!(!profile.root().join(".gitattributes").exists());
    }

    #[test]
    fn test_new_creates_file_and_commits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, true);
        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::answering(&["Say hello"]);

        handlers::new(
            &profile,
            &vcs,
            &mut terminal,
            "greet",
            "",
            &["name, Who to greet, World".to_string()],
        )
        .unwrap();

        assert_eq!(terminal.prompts, vec!["Command description"]);
        let items = get_list(&profile.root(), "").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].desc, "Say hello");
        assert_eq!(items[0].params[0].default, "World");

        let commits = vcs.commits.borrow();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].0, profile.root());
        assert_eq!(commits[0].1, "Create command file <greet>");
        assert_eq!(commits[0].2, "main");
        assert_eq!(terminal.infos, vec!["File created"]);
    }

    #[test]
    fn test_new_refuses_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, true);
        fs::write(profile.root().join("greet.sh"), "#!/bin/bash\n").unwrap();
        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::default();

        let result = handlers::new(&profile, &vcs, &mut terminal, "greet", "Hi", &[]);

        assert!(matches!(result, Err(Error::CommandFileExists(_))));
        assert!(vcs.commits.borrow().is_empty());
    }

    #[test]
    fn test_new_requires_a_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::default();

        let result = handlers::new(&profile, &vcs, &mut terminal, "", "desc", &[]);

        assert!(matches!(result, Err(Error::InvalidInput(m)) if m == "Command name"));
    }

    #[test]
    fn test_delete_selected_file_when_confirmed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, true);
        fs::create_dir_all(profile.root().join("a")).unwrap();
        fs::write(profile.root().join("a/build.sh"), "").unwrap();
        fs::write(profile.root().join("build.sh"), "").unwrap();

        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal {
            confirmations: VecDeque::from(vec![true]),
            selection: 1,
            ..FakeTerminal::default()
        };

        handlers::delete(&profile, &vcs, &mut terminal, "build").unwrap();

        // Root files are listed before subdirectories
        assert!(profile.root().join("build.sh").exists());
        assert!(!profile.root().join("a/build.sh").exists());
        assert_eq!(vcs.commits.borrow()[0].1, "Delete command file <build>");
        assert_eq!(terminal.infos, vec!["File deleted"]);
    }

    #[test]
    fn test_delete_declined_is_cancelled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, true);
        fs::write(profile.root().join("old.sh"), "").unwrap();

        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::default();

        let result = handlers::delete(&profile, &vcs, &mut terminal, "old");

        assert!(
            matches!(result, Err(Error::Cancelled(m)) if m == "Command deletion has been cancelled")
        );
        assert!(profile.root().join("old.sh").exists());
        assert!(vcs.commits.borrow().is_empty());
    }

    #[test]
    fn test_delete_without_match() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::default();

        let result = handlers::delete(&profile, &vcs, &mut terminal, "nothing");

        assert!(matches!(result, Err(Error::NoMatchingCommand(f)) if f == "nothing"));
    }

    #[test]
    fn test_edit_runs_editor_without_commit_when_git_disabled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        fs::write(profile.root().join("deploy.sh"), "").unwrap();

        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::default();

        handlers::edit(&profile, &vcs, &mut terminal, "dep", "true").unwrap();

        assert!(vcs.commits.borrow().is_empty());
        assert_eq!(terminal.infos, vec!["File edited"]);
    }

    #[test]
    fn test_edit_commits_when_git_enabled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, true);
        fs::write(profile.root().join("deploy.sh"), "").unwrap();

        let vcs = RecordingVcs::default();
        let mut terminal = FakeTerminal::default();

        handlers::edit(&profile, &vcs, &mut terminal, "", "true").unwrap();

        assert_eq!(vcs.commits.borrow()[0].1, "Update command file <deploy>");
    }

    #[test]
    fn test_list_shows_matches_then_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        fs::write(profile.root().join("deploy.sh"), "").unwrap();
        fs::write(profile.root().join("backup.sh"), "").unwrap();

        let mut terminal = FakeTerminal::default();
        handlers::list(&profile, &mut terminal, "").unwrap();

        assert_eq!(terminal.shown, vec![vec!["backup", "deploy"]]);
        assert_eq!(terminal.infos, vec![profile.path.clone()]);
    }

    #[test]
    fn test_git_command_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, true);

        let result = handlers::git(
            &profile,
            &Git::with_program("false"),
            shell_cuts_cli::cli_args::GitCommand::Sync,
        );

        assert!(matches!(result, Err(Error::VcsCommand(c)) if c == "pull"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_prefers_stdin_then_flags_then_prompt() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        let output = temp_dir.path().join("out.txt");
        let script = profile.root().join("show.sh");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\n#PARAM a\n#PARAM b, B value\n#PARAM c, C value, fallback\nread a\nread b\nread c\nprintf '%s %s %s' \"$a\" \"$b\" \"$c\" > '{}'\n",
                output.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let registry = Registry::new(get_list(&profile.root(), "").unwrap());
        let selection = registry.parse(["show", "--b", "from-flag"]).unwrap();
        let mut terminal = FakeTerminal::default();

        handlers::run(&selection, &["piped".to_string()], &mut terminal).unwrap();

        // `c` has a flag default, so nothing is prompted
        assert!(terminal.prompts.is_empty());
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "piped from-flag fallback"
        );
    }

    #[test]
    fn test_run_missing_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        fs::write(profile.root().join("need.sh"), "#PARAM target, Build target\n").unwrap();

        let registry = Registry::new(get_list(&profile.root(), "").unwrap());
        let selection = registry.parse(["need"]).unwrap();
        let mut terminal = FakeTerminal::default();

        let result = handlers::run(&selection, &[], &mut terminal);

        assert_eq!(terminal.prompts, vec!["Build target"]);
        assert!(matches!(result, Err(Error::MissingValue(name)) if name == "target"));
    }

    #[test]
    fn test_run_file_removed_after_listing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        let script = profile.root().join("gone.sh");
        fs::write(&script, "").unwrap();

        let registry = Registry::new(get_list(&profile.root(), "").unwrap());
        let selection = registry.parse(["gone"]).unwrap();
        fs::remove_file(&script).unwrap();

        let result = handlers::run(&selection, &[], &mut FakeTerminal::default());
        assert!(matches!(result, Err(Error::NoMatchingCommand(name)) if name == "gone"));
    }

    /// Prompts against a closed input, as after piped stdin was drained.
    struct DrainedInput;

    impl Interaction for DrainedInput {
        fn prompt(&mut self, message: &str, default: &str) -> Result<String> {
            shell_cuts_cli::terminal::input::prompt_value(
                &mut std::io::Cursor::new(""),
                &mut Vec::new(),
                message,
                default,
                false,
            )
        }

        fn confirm(&mut self, _message: &str) -> Result<bool> {
            Ok(false)
        }

        fn show_commands(&mut self, _commands: &[CommandFile]) -> Result<()> {
            Ok(())
        }

        fn select_command(&mut self, _commands: &[CommandFile]) -> Result<usize> {
            Ok(0)
        }

        fn info(&mut self, _message: &str) {}

        fn warn(&mut self, _message: &str) {}
    }

    #[test]
    fn test_run_ask_always_without_input_is_cancelled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        let output = temp_dir.path().join("ran.txt");
        fs::write(
            profile.root().join("deploy.sh"),
            format!(
                "#!/bin/sh\n#PARAM env, Target environment, staging, true\ntouch '{}'\n",
                output.display()
            ),
        )
        .unwrap();

        let registry = Registry::new(get_list(&profile.root(), "").unwrap());
        // The flag carries the declared default, which does not count for ask_always
        let selection = registry.parse(["deploy"]).unwrap();

        let result = handlers::run(&selection, &[], &mut DrainedInput);

        assert!(
            matches!(result, Err(Error::Cancelled(m)) if m == "No input available for <Target environment>")
        );
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_without_params_ignores_open_empty_pipe() {
        use shell_cuts_cli::piped_input::piped_values;
        use std::os::unix::fs::PermissionsExt;
        use std::process::{Command, Stdio};

        let temp_dir = tempfile::tempdir().unwrap();
        let profile = profile_in(&temp_dir, false);
        let output = temp_dir.path().join("ran.txt");
        let script = profile.root().join("hello.sh");
        fs::write(&script, format!("#!/bin/sh\ntouch '{}'\n", output.display())).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let registry = Registry::new(get_list(&profile.root(), "").unwrap());
        let selection = registry.parse(["hello"]).unwrap();

        // A writer that never writes nor closes its end
        let mut writer = Command::new("sleep")
            .arg("5")
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();
        let pipe = writer.stdout.take().unwrap();

        let stdin_values = piped_values(pipe, selection.command_file.params.len()).unwrap();
        handlers::run(&selection, &stdin_values, &mut FakeTerminal::default()).unwrap();

        assert!(stdin_values.is_empty());
        assert!(output.exists());
        writer.kill().unwrap();
        writer.wait().unwrap();
    }
}
