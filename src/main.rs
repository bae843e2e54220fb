mod compose;
mod logging;
mod paths;
mod settings;
mod steam;
mod trampoline;
mod vdf;
mod watch;

use std::ffi::OsString;
use std::path::PathBuf;

use crate::compose::Launch;
use crate::paths::{PATH_HOME, PATH_LAUNCH_LOG, PATH_RUN_SCRIPT, PATH_SETTINGS};
use crate::steam::{find_localconfig_vdf, find_steam_path};
use crate::trampoline::{install_script, seed_settings, trampoline_command, validate_trampoline};
use crate::vdf::{check_app_has_launch_options, set_launch_options_for_all_apps};
use crate::watch::{ConfigWatcher, ignore_sighup};

fn main() {
    logging::init();

    // Game arguments need not be UTF-8, so argv stays as OsString here
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let Some(command) = args.first() else {
        eprintln!("{}", USAGE_TEXT);
        std::process::exit(1);
    };
    let tail = &args[1..];
    let rest: Vec<String> = tail
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match command.to_string_lossy().as_ref() {
        // Everything after `run` belongs to the game, so no option parsing here
        "run" => run_launcher(tail),
        "apply" => apply(&rest),
        "watch" => watch(&rest),
        "check" => check(&rest),
        "install" => install(),
        "--help" | "-h" | "help" => {
            println!("{}", USAGE_TEXT);
            std::process::exit(0);
        }
        _ => {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }
}

/// Value following `flag`, if the flag is present
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let index = args.iter().position(|arg| arg == flag)?;
    match args.get(index + 1) {
        Some(value) => Some(value.clone()),
        None => {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }
}

fn resolve_vdf(args: &[String]) -> PathBuf {
    if let Some(path) = flag_value(args, "--vdf") {
        return PathBuf::from(path);
    }

    let found = find_steam_path().and_then(|steam| {
        log::info!("Found Steam at: {}", steam.display());
        find_localconfig_vdf(&steam)
    });
    match found {
        Ok(path) => {
            log::info!("Found localconfig.vdf at: {}", path.display());
            path
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn resolve_launch_option(args: &[String]) -> String {
    let launch_option = flag_value(args, "--command")
        .unwrap_or_else(|| trampoline_command(&PATH_RUN_SCRIPT, &PATH_HOME));
    if let Err(e) = validate_trampoline(&launch_option) {
        log::error!("Invalid launch option: {}", e);
        std::process::exit(1);
    }
    launch_option
}

fn run_launcher(game_argv: &[OsString]) -> ! {
    if game_argv.is_empty() {
        eprintln!("No game command received from Steam.");
        std::process::exit(1);
    }

    Launch::new(game_argv, &PATH_SETTINGS, &PATH_LAUNCH_LOG, &PATH_HOME).run();

    std::process::exit(127);
}

fn apply(args: &[String]) {
    let path = resolve_vdf(args);
    let launch_option = resolve_launch_option(args);

    match set_launch_options_for_all_apps(&path, &launch_option) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            log::error!("Error setting launch options in {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn watch(args: &[String]) {
    ignore_sighup();

    let path = resolve_vdf(args);
    let launch_option = resolve_launch_option(args);

    let mut watcher = match ConfigWatcher::new(&path, &launch_option) {
        Ok(watcher) => watcher,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    watcher.process();
    watcher.run();
}

fn check(args: &[String]) {
    let Some(app_id) = args.first().filter(|arg| !arg.starts_with("--")) else {
        eprintln!("{}", USAGE_TEXT);
        std::process::exit(1);
    };
    let path = resolve_vdf(&args[1..]);

    let (has_launch_options, value) = check_app_has_launch_options(&path, app_id);
    if has_launch_options {
        println!("{}: \"{}\"", app_id, value);
    } else {
        println!("{}: no launch options", app_id);
    }
}

fn install() {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            log::error!("Cannot determine dlo executable path: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = install_script(&PATH_RUN_SCRIPT, &exe) {
        log::error!("Failed to write {}: {}", PATH_RUN_SCRIPT.display(), e);
        std::process::exit(1);
    }
    log::info!("Installed trampoline: {}", PATH_RUN_SCRIPT.display());

    match seed_settings(&PATH_SETTINGS) {
        Ok(true) => log::info!("Created {}", PATH_SETTINGS.display()),
        Ok(false) => {}
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }

    println!("{}", trampoline_command(&PATH_RUN_SCRIPT, &PATH_HOME));
}

static USAGE_TEXT: &str = r#"
Usage: dlo <COMMAND> [OPTIONS]

Commands:
    run <game argv...>    Launcher shim. Steam invokes this through the trampoline script;
                          composes the configured launch options and replaces itself with the game.
    apply                 Inject the trampoline into every cloud-synced app's LaunchOptions once
    watch                 Watch localconfig.vdf and re-apply whenever Steam rewrites it
    check <appid>         Show an app's current LaunchOptions
    install               Write the trampoline script and an empty settings document

Options:
    --vdf <path>          Use this localconfig.vdf instead of the most recent Steam user's
    --command <value>     LaunchOptions value to inject (default: the trampoline script + %command%)

Environment:
    DLO_HOME              Settings folder (default: ~/dlo)
    DLO_LOG               Log level: error, warn, info, debug, trace (default: info)
"#;
