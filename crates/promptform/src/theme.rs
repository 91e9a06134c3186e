//! Themes for forms, groups and fields.
//!
//! A [`Theme`] holds one [`FieldStyles`] for the focused field and one for
//! every blurred field, plus group, help and separator styles. Four presets
//! are provided; [`Theme::plain`] strips every color from any of them.

use crate::style::{Border, Style};

/// Every style a form renders with.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Outer frame of the form.
    pub form: FormStyles,
    /// Group title and description.
    pub group: GroupStyles,
    /// Rendered between two fields of a group; its string is the gap.
    pub field_separator: Style,
    /// Help line under the active group.
    pub help: HelpStyles,
    /// Fields other than the active one.
    pub blurred: FieldStyles,
    /// The active field.
    pub focused: FieldStyles,
}

impl Default for Theme {
    fn default() -> Self {
        theme_charm()
    }
}

impl Theme {
    /// Returns a copy of this theme with all colors and attributes removed.
    ///
    /// Used for `NO_COLOR` terminals and for asserting on rendered output.
    #[must_use]
    pub fn plain(&self) -> Self {
        Self {
            form: FormStyles {
                base: self.form.base.clone().plain(),
            },
            group: GroupStyles {
                base: self.group.base.clone().plain(),
                title: self.group.title.clone().plain(),
                description: self.group.description.clone().plain(),
            },
            field_separator: self.field_separator.clone().plain(),
            help: HelpStyles {
                key: self.help.key.clone().plain(),
                desc: self.help.desc.clone().plain(),
                separator: self.help.separator.clone().plain(),
            },
            blurred: self.blurred.plain(),
            focused: self.focused.plain(),
        }
    }
}

/// Styles for the form container.
#[derive(Debug, Clone, Default)]
pub struct FormStyles {
    /// Base style for the form.
    pub base: Style,
}

/// Styles for groups.
#[derive(Debug, Clone, Default)]
pub struct GroupStyles {
    /// Base style for the group.
    pub base: Style,
    /// Title style.
    pub title: Style,
    /// Description style.
    pub description: Style,
}

/// Styles for the short help line.
#[derive(Debug, Clone, Default)]
pub struct HelpStyles {
    /// Key names.
    pub key: Style,
    /// Binding descriptions.
    pub desc: Style,
    /// Separator between entries; its string is the separator itself.
    pub separator: Style,
}

/// Styles for a single field, in one of its two focus states.
#[derive(Debug, Clone, Default)]
pub struct FieldStyles {
    /// Frame around the whole field; carries the left border.
    pub base: Style,
    /// Field title.
    pub title: Style,
    /// Field description, rendered under the title.
    pub description: Style,
    /// Marker appended to the title while the field has an error.
    pub error_indicator: Style,
    /// Inline error line.
    pub error_message: Style,

    /// Cursor prefix in a select list.
    pub select_selector: Style,
    /// Unhighlighted select option.
    pub option: Style,
    /// Arrow after an inline select's option.
    pub next_indicator: Style,
    /// Arrow before an inline select's option.
    pub prev_indicator: Style,

    /// Cursor prefix in a multi-select list.
    pub multi_select_selector: Style,
    /// Label of a chosen option.
    pub selected_option: Style,
    /// Check mark in front of a chosen option.
    pub selected_prefix: Style,
    /// Label of an option that is not chosen.
    pub unselected_option: Style,
    /// Mark in front of an option that is not chosen.
    pub unselected_prefix: Style,

    /// Input and text widgets.
    pub text_input: TextInputStyles,

    /// Highlighted confirm or note button.
    pub focused_button: Style,
    /// The other confirm button.
    pub blurred_button: Style,

    /// Title of a note.
    pub note_title: Style,
}

impl FieldStyles {
    fn plain(&self) -> Self {
        Self {
            base: self.base.clone().plain(),
            title: self.title.clone().plain(),
            description: self.description.clone().plain(),
            error_indicator: self.error_indicator.clone().plain(),
            error_message: self.error_message.clone().plain(),
            select_selector: self.select_selector.clone().plain(),
            option: self.option.clone().plain(),
            next_indicator: self.next_indicator.clone().plain(),
            prev_indicator: self.prev_indicator.clone().plain(),
            multi_select_selector: self.multi_select_selector.clone().plain(),
            selected_option: self.selected_option.clone().plain(),
            selected_prefix: self.selected_prefix.clone().plain(),
            unselected_option: self.unselected_option.clone().plain(),
            unselected_prefix: self.unselected_prefix.clone().plain(),
            text_input: TextInputStyles {
                cursor: self.text_input.cursor.clone().plain(),
                placeholder: self.text_input.placeholder.clone().plain(),
                prompt: self.text_input.prompt.clone().plain(),
                text: self.text_input.text.clone().plain(),
            },
            focused_button: self.focused_button.clone().plain(),
            blurred_button: self.blurred_button.clone().plain(),
            note_title: self.note_title.clone().plain(),
        }
    }
}

/// Styles shared by [`Input`](crate::Input) and [`Text`](crate::Text).
#[derive(Debug, Clone, Default)]
pub struct TextInputStyles {
    /// Character under the cursor.
    pub cursor: Style,
    /// Placeholder shown while empty.
    pub placeholder: Style,
    /// Prompt before the value.
    pub prompt: Style,
    /// Typed value.
    pub text: Style,
}

/// Returns the base theme.
#[allow(clippy::field_reassign_with_default)]
pub fn theme_base() -> Theme {
    let button = Style::new().padding((0, 2)).margin_right(1);

    let mut focused = FieldStyles::default();
    focused.base = Style::new().padding_left(1).border_left(Border::thick());
    focused.error_indicator = Style::new().set_string(" *");
    focused.error_message = Style::new().set_string("* ");
    focused.select_selector = Style::new().set_string("> ");
    focused.next_indicator = Style::new().margin_left(1).set_string("→");
    focused.prev_indicator = Style::new().margin_right(1).set_string("←");
    focused.multi_select_selector = Style::new().set_string("> ");
    focused.selected_prefix = Style::new().set_string("[•] ");
    focused.unselected_prefix = Style::new().set_string("[ ] ");
    focused.focused_button = button.clone().foreground("0").background("7");
    focused.blurred_button = button.foreground("7").background("0");
    focused.text_input.cursor = Style::new().reverse();
    focused.text_input.placeholder = Style::new().foreground("8");

    let mut blurred = focused.clone();
    blurred.base = blurred.base.border_left(Border::hidden());
    blurred.select_selector = Style::new().set_string("  ");
    blurred.multi_select_selector = Style::new().set_string("  ");
    blurred.next_indicator = Style::new();
    blurred.prev_indicator = Style::new();
    blurred.text_input.cursor = Style::new();

    Theme {
        form: FormStyles { base: Style::new() },
        group: GroupStyles {
            base: Style::new(),
            title: Style::new().bold(),
            description: Style::new().faint(),
        },
        field_separator: Style::new().set_string("\n\n"),
        help: HelpStyles {
            key: Style::new().foreground("8"),
            desc: Style::new().foreground("8").faint(),
            separator: Style::new().foreground("8").set_string(" • "),
        },
        focused,
        blurred,
    }
}

/// Returns the Charm theme (default).
pub fn theme_charm() -> Theme {
    let mut t = theme_base();

    let indigo = "#7571F9";
    let fuchsia = "#F780E2";
    let green = "#02BF87";
    let red = "#ED567A";
    let normal_fg = "252";

    t.focused.base = t.focused.base.border_foreground("238");
    t.focused.title = t.focused.title.foreground(indigo).bold();
    t.focused.note_title = t
        .focused
        .note_title
        .foreground(indigo)
        .bold()
        .margin_bottom(1);
    t.focused.description = t.focused.description.foreground("243");
    t.focused.error_indicator = t.focused.error_indicator.foreground(red);
    t.focused.error_message = t.focused.error_message.foreground(red);
    t.focused.select_selector = t.focused.select_selector.foreground(fuchsia);
    t.focused.next_indicator = t.focused.next_indicator.foreground(fuchsia);
    t.focused.prev_indicator = t.focused.prev_indicator.foreground(fuchsia);
    t.focused.option = t.focused.option.foreground(normal_fg);
    t.focused.multi_select_selector = t.focused.multi_select_selector.foreground(fuchsia);
    t.focused.selected_option = t.focused.selected_option.foreground(green);
    t.focused.selected_prefix = Style::new().foreground("#02A877").set_string("✓ ");
    t.focused.unselected_prefix = Style::new().foreground("243").set_string("• ");
    t.focused.unselected_option = t.focused.unselected_option.foreground(normal_fg);
    t.focused.focused_button = t
        .focused
        .focused_button
        .foreground("#FFFDF5")
        .background(fuchsia);
    t.focused.blurred_button = t
        .focused
        .blurred_button
        .foreground(normal_fg)
        .background("237");
    t.focused.text_input.cursor = t.focused.text_input.cursor.foreground(green);
    t.focused.text_input.placeholder = t.focused.text_input.placeholder.foreground("238");
    t.focused.text_input.prompt = t.focused.text_input.prompt.foreground(fuchsia);

    t.blurred = t.focused.clone();
    t.blurred.base = t.focused.base.clone().border_left(Border::hidden());
    t.blurred.select_selector = Style::new().set_string("  ");
    t.blurred.multi_select_selector = Style::new().set_string("  ");
    t.blurred.next_indicator = Style::new();
    t.blurred.prev_indicator = Style::new();
    t.blurred.text_input.cursor = Style::new();

    t.group.title = t.focused.title.clone();
    t.group.description = t.focused.description.clone();

    t
}

/// Returns the Dracula theme.
pub fn theme_dracula() -> Theme {
    let mut t = theme_base();

    let selection = "#44475a";
    let foreground = "#f8f8f2";
    let comment = "#6272a4";
    let green = "#50fa7b";
    let purple = "#bd93f9";
    let red = "#ff5555";
    let yellow = "#f1fa8c";

    t.focused.base = t.focused.base.border_foreground(selection);
    t.focused.title = t.focused.title.foreground(purple);
    t.focused.note_title = t.focused.note_title.foreground(purple);
    t.focused.description = t.focused.description.foreground(comment);
    t.focused.error_indicator = t.focused.error_indicator.foreground(red);
    t.focused.error_message = t.focused.error_message.foreground(red);
    t.focused.select_selector = t.focused.select_selector.foreground(yellow);
    t.focused.next_indicator = t.focused.next_indicator.foreground(yellow);
    t.focused.prev_indicator = t.focused.prev_indicator.foreground(yellow);
    t.focused.option = t.focused.option.foreground(foreground);
    t.focused.multi_select_selector = t.focused.multi_select_selector.foreground(yellow);
    t.focused.selected_option = t.focused.selected_option.foreground(green);
    t.focused.selected_prefix = t.focused.selected_prefix.foreground(green);
    t.focused.unselected_option = t.focused.unselected_option.foreground(foreground);
    t.focused.unselected_prefix = t.focused.unselected_prefix.foreground(comment);
    t.focused.focused_button = t
        .focused
        .focused_button
        .foreground(yellow)
        .background(purple)
        .bold();
    t.focused.blurred_button = t
        .focused
        .blurred_button
        .foreground(foreground)
        .background("#282a36");
    t.focused.text_input.cursor = t.focused.text_input.cursor.foreground(yellow);
    t.focused.text_input.placeholder = t.focused.text_input.placeholder.foreground(comment);
    t.focused.text_input.prompt = t.focused.text_input.prompt.foreground(yellow);

    t.blurred = t.focused.clone();
    t.blurred.base = t.blurred.base.border_left(Border::hidden());
    t.blurred.select_selector = Style::new().set_string("  ");
    t.blurred.multi_select_selector = Style::new().set_string("  ");
    t.blurred.next_indicator = Style::new();
    t.blurred.prev_indicator = Style::new();
    t.blurred.text_input.cursor = Style::new();

    t.group.title = t.focused.title.clone();
    t.group.description = t.focused.description.clone();
    t.help.key = Style::new().foreground(comment);
    t.help.desc = Style::new().foreground(comment).faint();

    t
}

/// Returns the Base16 theme.
pub fn theme_base16() -> Theme {
    let mut t = theme_base();

    t.focused.base = t.focused.base.border_foreground("8");
    t.focused.title = t.focused.title.foreground("6");
    t.focused.note_title = t.focused.note_title.foreground("6");
    t.focused.description = t.focused.description.foreground("8");
    t.focused.error_indicator = t.focused.error_indicator.foreground("9");
    t.focused.error_message = t.focused.error_message.foreground("9");
    t.focused.select_selector = t.focused.select_selector.foreground("3");
    t.focused.next_indicator = t.focused.next_indicator.foreground("3");
    t.focused.prev_indicator = t.focused.prev_indicator.foreground("3");
    t.focused.option = t.focused.option.foreground("7");
    t.focused.multi_select_selector = t.focused.multi_select_selector.foreground("3");
    t.focused.selected_option = t.focused.selected_option.foreground("2");
    t.focused.selected_prefix = t.focused.selected_prefix.foreground("2");
    t.focused.unselected_option = t.focused.unselected_option.foreground("7");
    t.focused.focused_button = t.focused.focused_button.foreground("7").background("5");
    t.focused.blurred_button = t.focused.blurred_button.foreground("7").background("0");

    t.blurred = t.focused.clone();
    t.blurred.base = t.blurred.base.border_left(Border::hidden());
    t.blurred.note_title = t.blurred.note_title.foreground("8");
    t.blurred.title = t.blurred.title.foreground("8");
    t.blurred.select_selector = Style::new().set_string("  ");
    t.blurred.multi_select_selector = Style::new().set_string("  ");
    t.blurred.text_input.prompt = t.blurred.text_input.prompt.foreground("8");
    t.blurred.text_input.text = t.blurred.text_input.text.foreground("7");
    t.blurred.next_indicator = Style::new();
    t.blurred.prev_indicator = Style::new();
    t.blurred.text_input.cursor = Style::new();

    t.group.title = t.focused.title.clone();
    t.group.description = t.focused.description.clone();

    t
}

/// Looks up a preset by name: "base", "charm", "dracula" or "base16".
pub fn theme_by_name(name: &str) -> Option<Theme> {
    match name.to_ascii_lowercase().as_str() {
        "base" => Some(theme_base()),
        "charm" => Some(theme_charm()),
        "dracula" => Some(theme_dracula()),
        "base16" => Some(theme_base16()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strips_colors_keeps_layout() {
        let t = theme_charm().plain();
        assert_eq!(t.focused.title.render("Shell?"), "Shell?");
        assert_eq!(t.focused.select_selector.render("Chicken"), "> Chicken");
        assert_eq!(t.focused.base.render("x"), "┃ x");
        assert_eq!(t.blurred.base.render("x"), "  x");
    }

    #[test]
    fn test_charm_prefixes() {
        let t = theme_charm().plain();
        assert_eq!(t.focused.selected_prefix.render("Lettuce"), "✓ Lettuce");
        assert_eq!(t.focused.unselected_prefix.render("Corn"), "• Corn");
        assert_eq!(t.focused.error_message.render("bad"), "* bad");
    }

    #[test]
    fn test_theme_by_name() {
        assert!(theme_by_name("Dracula").is_some());
        assert!(theme_by_name("base16").is_some());
        assert!(theme_by_name("solarized").is_none());
    }

    #[test]
    fn test_default_is_colored() {
        let t = Theme::default();
        assert!(t.focused.title.render("x").contains('\x1b'));
    }
}
