//! Short help line built from keybindings.

use crate::key::Binding;
use crate::theme::HelpStyles;

/// Renders enabled bindings as `key desc` entries joined by the separator.
///
/// Disabled bindings and bindings without help text are left out, so the
/// line always reflects what the active field accepts right now.
pub fn short_view(bindings: &[Binding], styles: &HelpStyles) -> String {
    let separator = styles.separator.render("");
    bindings
        .iter()
        .filter(|b| b.enabled())
        .filter(|b| !b.get_help().key.is_empty() || !b.get_help().desc.is_empty())
        .map(|b| {
            let help = b.get_help();
            format!(
                "{} {}",
                styles.key.render(&help.key),
                styles.desc.render(&help.desc)
            )
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::theme_charm;

    #[test]
    fn test_short_view_skips_disabled() {
        let styles = theme_charm().plain().help;
        let bindings = vec![
            Binding::new().keys(&["enter"]).help("enter", "next"),
            Binding::new()
                .keys(&["enter"])
                .help("enter", "submit")
                .set_enabled(false),
            Binding::new().keys(&["shift+tab"]).help("shift+tab", "back"),
        ];
        assert_eq!(
            short_view(&bindings, &styles),
            "enter next • shift+tab back"
        );
    }

    #[test]
    fn test_short_view_empty() {
        let styles = theme_charm().plain().help;
        assert_eq!(short_view(&[], &styles), "");
    }
}
