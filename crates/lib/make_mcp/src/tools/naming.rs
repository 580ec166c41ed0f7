//! Tool names — `run_scenario_<id>`.

/// Prefix of every scenario tool name.
pub const TOOL_NAME_PREFIX: &str = "run_scenario_";

/// Tool name for a scenario.
pub fn tool_name(scenario_id: u64) -> String {
    format!("{TOOL_NAME_PREFIX}{scenario_id}")
}

/// Recover the scenario id from a tool name.
///
/// Purely lexical: returns `None` unless the name is the prefix followed by
/// one or more ASCII digits. Whether the scenario exists is left to the API.
pub fn parse_tool_name(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(TOOL_NAME_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
