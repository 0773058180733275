use crate::consts::{START_COMMANDS, START_SCENERY};
use crate::directive::Action;

const INTRO: &str = "You are the director of a 3D virtual world. You will receive a command from a user.\nYour job is to decide what action to take.";
const RESPONSE_HEADER: &str =
    "You must respond with ONLY a JSON object with two keys: \"action\" and \"target\".";
const TARGET_RULE: &str =
    "- The \"target\" is the subject of the command (e.g., \"Mars\", \"the ocean\").";

/// Build the one-shot prompt for a raw user command.
///
/// Pure templating: the command is embedded verbatim, quoted, and the
/// output is identical for identical input.
pub fn build_director_prompt(command: &str) -> String {
    let actions = Action::MODEL_ACTIONS
        .iter()
        .map(|a| format!("'{}'", a.as_str()))
        .collect::<Vec<_>>();
    let actions = or_list(&actions);

    format!(
        "{intro}\n{response_header}\n- The \"action\" can be {actions}.\n{target_rule}\n\n{special_rule}\n\nUser command: \"{command}\"\n\nYour JSON response:\n",
        intro = INTRO,
        response_header = RESPONSE_HEADER,
        actions = actions,
        target_rule = TARGET_RULE,
        special_rule = special_rule(),
        command = command,
    )
}

/// The hard-coded clause for the start commands.
pub fn special_rule() -> String {
    let commands = START_COMMANDS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>();
    let commands = or_list(&commands);
    format!(
        "SPECIAL RULE: If the user command is {commands}, the action must be '{action}' and the target should be '{scenery}'.",
        action = Action::ChangeScenery.as_str(),
        scenery = START_SCENERY,
    )
}

/// Whether the command is one of the exact, case-sensitive start words.
pub fn is_start_command(command: &str) -> bool {
    START_COMMANDS.contains(&command)
}

/// "a", "a or b", "a, b, or c".
fn or_list(items: &[String]) -> String {
    match items.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, [only])) => format!("{} or {}", only, last),
        Some((last, rest)) => format!("{}, or {}", rest.join(", "), last),
        None => String::new(),
    }
}
