use std::{env, env::VarError};

/// The service takes no arguments, so any argument prints the help and the current settings
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Listed explicitly so that nothing unexpected from the environment is echoed
    const DISPLAY_ENVS: [&str; 5] =
        ["RUST_LOG", "VMS_DATABASE_URL", "VMS_MAX_CONNECTIONS", "VMS_SNAPSHOT_SCHEDULE", "VMS_RUN_MIGRATIONS"];

    println!("Current environment values:");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
