//! Interactive prompts.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Username from the flag, else prompted.
pub fn username(given: Option<String>) -> Result<String> {
    if let Some(name) = given {
        return Ok(name);
    }
    let name: String = Input::new().with_prompt("Username").interact_text()?;
    Ok(name)
}

/// Password from `SEATLINK_PASSWORD`, else prompted with hidden input.
pub fn password(confirm: bool) -> Result<String> {
    if let Ok(pw) = std::env::var("SEATLINK_PASSWORD") {
        return Ok(pw);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Manual paste field shown when the clipboard cannot be read.
pub fn manual_link() -> Result<String> {
    let text: String = Input::new()
        .with_prompt("Paste the authorisation link")
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

/// Yes/no question defaulting to "no".
pub fn confirm(question: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()?)
}
