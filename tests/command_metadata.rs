// tests/command_metadata.rs

use shellrig::{Command, CommandFlags, CommandMetadata};

#[test]
fn full_command_is_name_plus_args() {
    let cmd = Command::new("echo").args(["foo", "bar"]);

    assert_eq!(cmd.name(), "echo");
    assert_eq!(cmd.arg_list(), &["foo".to_string(), "bar".to_string()]);
    assert_eq!(
        cmd.full_command(),
        vec!["echo".to_string(), "foo".to_string(), "bar".to_string()]
    );
}

#[test]
fn full_command_without_args_is_just_the_name() {
    let cmd = Command::new("echo");

    assert!(cmd.arg_list().is_empty());
    assert_eq!(cmd.full_command(), vec!["echo".to_string()]);
}

#[test]
fn metadata_full_command_string_is_space_joined() {
    let metadata = CommandMetadata::new("ls", ["-l", "/tmp"], CommandFlags::STANDARD);
    assert_eq!(metadata.full_command_string(), "ls -l /tmp");
}

#[test]
fn command_captures_origin() {
    let cmd = Command::new("echo").arg("foo");
    let expected_line = line!() - 1;

    assert_eq!(cmd.origin().file(), file!());
    assert_eq!(cmd.origin().line(), expected_line);
}

#[test]
fn standard_flags_are_empty() {
    assert_eq!(CommandFlags::STANDARD, CommandFlags::empty());
    let metadata = CommandMetadata::new("echo", Vec::<String>::new(), CommandFlags::STANDARD);
    assert!(!metadata.flags().contains(CommandFlags::INACTIVE));
}

#[test]
fn flags_combine_and_test_independently() {
    let flags = CommandFlags::CLEANUP | CommandFlags::QUIET;
    assert!(flags.contains(CommandFlags::CLEANUP));
    assert!(flags.contains(CommandFlags::QUIET));
    assert!(!flags.contains(CommandFlags::NO_CONSOLE));
    assert_eq!(flags.bits(), 0x2 | 0x4);
}

#[test]
fn flag_values_are_stable() {
    assert_eq!(CommandFlags::STANDARD.bits(), 0x0);
    assert_eq!(CommandFlags::INACTIVE.bits(), 0x1);
    assert_eq!(CommandFlags::CLEANUP.bits(), 0x2);
    assert_eq!(CommandFlags::QUIET.bits(), 0x4);
    assert_eq!(CommandFlags::NO_CONSOLE.bits(), 0x8);
}
