//! DisplayDeck CLI — the command-line entry point.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use displaydeck_core::command::Command;
use displaydeck_core::response::Response;
use displaydeck_core::sys::Sys;
use displaydeck_core::types::config::{default_data_dir, DeckSettings};


fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("deck: {}", e);
            process::exit(1);
        }
    };

    let data_dir = resolve_data_dir();
    let mut settings = match DeckSettings::load(&data_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("deck: {}", e);
            process::exit(1);
        }
    };
    if let Ok(placer) = std::env::var("DECK_PLACER") {
        settings.placer_path = Some(PathBuf::from(placer));
    }

    let is_apply = matches!(cmd, Command::Apply { .. });
    let mut sys = Sys::new(settings);
    log::debug!("data dir: {}", sys.settings().data_dir.display());
    let response = sys.execute(cmd);

    match response {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
            if is_apply {
                // Give displayplacer its settle window before exiting.
                let wait = sys.apply_remaining_ms();
                if wait > 0 {
                    std::thread::sleep(Duration::from_millis(wait));
                }
            }
        }
        Response::Error { message } => {
            eprintln!("deck error: {}", message);
            process::exit(1);
        }
    }
}


fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DECK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    default_data_dir()
}


fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'deck help' for usage.".into());
    }

    match args[0] {
        "status" => Ok(Command::Status),
        "help" => Ok(Command::Help {
            topic: args.get(1).map(|s| s.to_string()),
        }),
        "capture" => Ok(Command::Capture),
        "save" => {
            if args.len() < 2 {
                return Err("Usage: deck save <name>".into());
            }
            Ok(Command::Save {
                name: args[1..].join(" "),
            })
        }
        "list" => Ok(Command::List {
            format: args.get(1).and_then(|a| {
                if *a == "--json" { Some("json".into()) } else { None }
            }),
        }),
        "preview" => parse_preview(args),
        "apply" => {
            if args.len() < 2 {
                return Err("Usage: deck apply <profile>".into());
            }
            Ok(Command::Apply { profile: args[1].into() })
        }
        "delete" => {
            if args.len() < 2 {
                return Err("Usage: deck delete <profile>".into());
            }
            Ok(Command::Delete { profile: args[1].into() })
        }
        "applied" => Ok(Command::Applied),
        _ => Err(format!("Unknown command: '{}'. Run 'deck help' for usage.", args[0])),
    }
}


fn parse_preview(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: deck preview <profile> [--width <n>] [--height <n>]".into());
    }
    let width = parse_dimension(args, "--width")?;
    let height = parse_dimension(args, "--height")?;
    Ok(Command::Preview {
        profile: args[1].into(),
        width,
        height,
    })
}


fn parse_dimension(args: &[&str], flag: &str) -> Result<Option<u32>, String> {
    match find_flag(args, flag) {
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|_| format!("{} expects a positive integer, got '{}'", flag, v)),
        None => Ok(None),
    }
}


fn find_flag(args: &[&str], flag: &str) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if *arg == flag {
            return args.get(i + 1).map(|s| s.to_string());
        }
    }
    None
}
