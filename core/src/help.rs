//! Help system for DisplayDeck commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = command_help(t) {
                return text;
            }
            if let Some(text) = group_help(t) {
                return text;
            }
            format!("Unknown help topic: '{}'. Run 'deck help' for a list of commands.", t)
        }
    }
}


fn overview() -> String {
    "\
deck — DisplayDeck display profile manager

Usage: deck <command> [args...]

Commands:
  status                     Show data directory, tool and applied profile
  capture                    Read the current display arrangement
  save <name>                Capture and save the arrangement as a profile
  help [topic]               Show help

Profile commands:
  list [--json]                                 List saved profiles
  preview <profile> [--width <n>] [--height <n>]  Show a to-scale layout
  apply <profile>                               Apply a saved arrangement
  delete <profile>                              Delete a saved profile
  applied                                       Show the applied profile

<profile> is an id, a unique name, or a unique id prefix (4+ chars).

Run 'deck help <command>' for detailed help on a specific command."
        .into()
}


fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "profile" => "\
Profile commands — manage saved display arrangements

  list [--json]
    List profiles in save order. '*' marks the applied profile.

  preview <profile> [--width <n>] [--height <n>]
    Scale the profile's displays into a canvas (default 320x200) and
    print each display's rectangle plus the command that apply runs.

  apply <profile>
    Launch displayplacer with the profile's arguments and mark it applied.
    Success means the tool started, not that the displays changed.

  delete <profile>
    Delete the profile. Clears the applied marker if it pointed here.

  applied
    Show the last applied profile.",

        "config" => "\
Configuration — <data dir>/config.yaml

  placer_path: /path/to/displayplacer
  preview_width: 320
  preview_height: 200
  apply_settle_ms: 1500

Environment:
  DECK_DATA_DIR   override the data directory
  DECK_PLACER     override placer_path
  RUST_LOG        log filter (default: warn)",

        _ => return None,
    };
    Some(text.into())
}


fn command_help(command: &str) -> Option<String> {
    let text = match command {
        "status" => "deck status — show configuration and state\n\nUsage: deck status",
        "capture" => "deck capture — read the current arrangement\n\nUsage: deck capture",
        "save" => "deck save — save the current arrangement\n\nUsage: deck save <name>",
        "help" => "deck help — show help\n\nUsage: deck help [topic]",
        "list" => "deck list — list saved profiles\n\nUsage: deck list [--json]",
        "preview" => "deck preview — to-scale layout of a profile\n\nUsage: deck preview <profile> [--width <n>] [--height <n>]",
        "apply" => "deck apply — apply a saved profile\n\nUsage: deck apply <profile>",
        "delete" => "deck delete — delete a saved profile\n\nUsage: deck delete <profile>",
        "applied" => "deck applied — show the applied profile\n\nUsage: deck applied",
        _ => return None,
    };
    Some(text.into())
}
