//! Confirmation prompt text per page language.

pub const CONFIRM_EN: &str = "Do you really want to delete this post?";
pub const CONFIRM_FR: &str = "Voulez-vous vraiment supprimer ce post?";

/// Prompt for the `<html lang>` value; English unless the page is French
pub fn confirm_message(lang: Option<&str>) -> &'static str {
    match lang {
        Some(lang) if primary_subtag(lang).eq_ignore_ascii_case("fr") => CONFIRM_FR,
        _ => CONFIRM_EN,
    }
}

/// `fr-CA` -> `fr`
fn primary_subtag(lang: &str) -> &str {
    lang.trim().split(['-', '_']).next().unwrap_or_default()
}
