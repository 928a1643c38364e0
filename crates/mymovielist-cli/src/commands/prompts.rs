use color_eyre::Result;
use dialoguer::Input;

/// Prompt for a non-empty string, with an optional default.
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default_value) = default {
        input = input.default(default_value.to_string());
    }
    input
        .validate_with(|value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() {
                Err("A value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Use the flag value when given, otherwise ask.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value),
        None => prompt_string(prompt, None),
    }
}
