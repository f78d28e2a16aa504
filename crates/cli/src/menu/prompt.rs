//! Thin wrappers over dialoguer so every menu prompts the same way.
use dialoguer::{Confirm, Input, Select};
use std::fmt::Display;
use std::str::FromStr;
use vortexl2_domain::BatchOutcome;

pub fn select(prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

pub fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn text(prompt: &str) -> anyhow::Result<String> {
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value.trim().to_string())
}

/// Re-prompts until the input parses as `T`.
pub fn parsed<T>(prompt: &str, default: Option<T>) -> anyhow::Result<T>
where
    T: FromStr + Display + Clone,
    T::Err: Display,
{
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    let raw = input
        .validate_with(|s: &String| -> Result<(), String> {
            s.trim().parse::<T>().map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Like `parsed`, but empty input yields `None`.
pub fn optional_parsed<T>(prompt: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), String> {
            let s = s.trim();
            if s.is_empty() {
                return Ok(());
            }
            s.parse::<T>().map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("{}", e))
}

pub fn success(message: impl Display) {
    println!("✓ {}", message);
}

pub fn failure(message: impl Display) {
    eprintln!("✗ {}", message);
}

pub fn heading(title: &str) {
    println!("\n── {} ──", title);
}

pub fn outcome(verb: &str, outcome: &BatchOutcome) {
    if outcome.is_success() {
        success(outcome.summary(verb));
    } else {
        failure(outcome.summary(verb));
    }
}
