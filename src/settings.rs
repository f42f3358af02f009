//! Settings sync between the settings form and the engine.
//!
//! Writes go form → engine (`push_settings`), reads go engine → form
//! (`pull_settings`). A push is always followed by a pull so the form shows
//! whatever the engine normalised the input to.

use crate::engine::{EngineSettings, RenderEngine};

/// Form field holding the "render glyphs as text" checkbox.
pub const GLYPH_AS_TEXT: &str = "glyph_as_text";

/// Form field holding the font size.
pub const FONT_SIZE: &str = "font_size";

/// How a named form control takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// A checkbox; its `checked` state carries the value.
    Checkbox,
    /// A group of radio buttons sharing the name.
    RadioGroup,
    /// Anything with a `value` property (text, number, select, ...).
    Value,
}

/// A value destined for a form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// Truthiness: a non-empty string counts as `true`.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(t) => !t.is_empty(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Text(t) => t.clone(),
        }
    }
}

/// The settings form, seen through its named controls.
pub trait SettingsForm {
    /// Submitted value for `name`, as `FormData` would report it.
    ///
    /// An unchecked checkbox submits nothing and yields `None`.
    fn entry(&self, name: &str) -> Option<String>;

    /// Kind of the control(s) registered under `name`, if any.
    fn control_kind(&self, name: &str) -> Option<ControlKind>;

    fn set_checked(&mut self, name: &str, checked: bool);

    /// Check the radio in group `name` whose value is `value`.
    ///
    /// Returns `false` when no member matches.
    fn select_radio(&mut self, name: &str, value: &str) -> bool;

    fn set_value(&mut self, name: &str, value: &str);
}

/// Read the form's current submission as engine settings.
pub fn read_form<F: SettingsForm + ?Sized>(form: &F) -> EngineSettings {
    EngineSettings {
        // Absent checkbox means unchecked, not "keep previous".
        glyph_as_text: form
            .entry(GLYPH_AS_TEXT)
            .is_some_and(|value| FieldValue::Text(value).as_bool()),
        font_size: form.entry(FONT_SIZE).unwrap_or_default(),
    }
}

/// Push the form's values into the engine's canonical settings.
///
/// Returns what was written.
pub fn push_settings<E, F>(form: &F, engine: &mut E) -> EngineSettings
where
    E: RenderEngine + ?Sized,
    F: SettingsForm + ?Sized,
{
    let settings = read_form(form);
    log::debug!("pushing settings {settings:?}");
    engine.set_settings(&settings);
    settings
}

/// Form field names and values for `settings`.
pub fn form_fields(settings: &EngineSettings) -> [(&'static str, FieldValue); 2] {
    [
        (GLYPH_AS_TEXT, FieldValue::Bool(settings.glyph_as_text)),
        (FONT_SIZE, FieldValue::Text(settings.font_size.clone())),
    ]
}

/// Populate form controls from `fields`, dispatching on control kind.
///
/// Unknown names are logged and skipped. Returns how many fields were
/// applied.
pub fn fill_form<F: SettingsForm + ?Sized>(form: &mut F, fields: &[(&str, FieldValue)]) -> usize {
    let mut applied = 0;
    for (name, value) in fields {
        let Some(kind) = form.control_kind(name) else {
            log::warn!("No form element found with name: {name}");
            continue;
        };
        match kind {
            ControlKind::Checkbox => form.set_checked(name, value.as_bool()),
            ControlKind::RadioGroup => {
                if !form.select_radio(name, &value.as_text()) {
                    log::debug!("no radio in group {name} has value {value:?}");
                }
            }
            ControlKind::Value => form.set_value(name, &value.as_text()),
        }
        applied += 1;
    }
    applied
}

/// Show the engine's canonical settings in the form.
pub fn pull_settings<E, F>(form: &mut F, engine: &E) -> EngineSettings
where
    E: RenderEngine + ?Sized,
    F: SettingsForm + ?Sized,
{
    let settings = engine.settings();
    fill_form(form, &form_fields(&settings));
    settings
}
