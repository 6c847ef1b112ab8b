//! Page chrome: mobile menu, account dropdown, markdown guide modal.

/// Hamburger button.
pub const MOBILE_TOGGLE_ID: &str = "mobileMenuToggle";
/// Collapsible navigation menu.
pub const NAVBAR_MENU_ID: &str = "navbarMenu";
/// Account menu button.
pub const ACCOUNT_BUTTON_ID: &str = "accountBtn";
/// Account menu panel.
pub const ACCOUNT_DROPDOWN_ID: &str = "accountDropdown";
/// Button opening the markdown guide.
pub const GUIDE_BUTTON_ID: &str = "markdownGuideBtn";
/// Markdown guide modal (also its backdrop).
pub const GUIDE_MODAL_ID: &str = "markdownGuideModal";
/// Close button inside a modal.
pub const MODAL_CLOSE_SELECTOR: &str = ".modal-close";
/// Open state of the menu and modal.
pub const ACTIVE_CLASS: &str = "active";
/// Open state of the dropdown.
pub const SHOW_CLASS: &str = "show";

/// Where a document click landed relative to the dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickTarget {
    /// Inside the dropdown button.
    pub in_button: bool,
    /// Inside the dropdown panel.
    pub in_menu: bool,
}

/// Document clicks outside both the button and the panel close the dropdown.
#[must_use]
pub const fn dropdown_should_close(target: ClickTarget) -> bool {
    !target.in_button && !target.in_menu
}

/// Why the modal might close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent<'a> {
    /// The close button was pressed.
    CloseButton,
    /// A click inside the modal; `on_backdrop` when the target is the modal element itself.
    Click {
        /// Target is the backdrop, not its content.
        on_backdrop: bool,
    },
    /// A key went down anywhere in the document.
    Key(&'a str),
}

/// Decide whether an event closes the modal.
#[must_use]
pub fn modal_should_close(event: ModalEvent<'_>, is_open: bool) -> bool {
    match event {
        ModalEvent::CloseButton => true,
        ModalEvent::Click { on_backdrop } => on_backdrop,
        ModalEvent::Key(key) => is_open && key == "Escape",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_closes_only_for_outside_clicks() {
        assert!(dropdown_should_close(ClickTarget {
            in_button: false,
            in_menu: false
        }));
        assert!(!dropdown_should_close(ClickTarget {
            in_button: true,
            in_menu: false
        }));
        assert!(!dropdown_should_close(ClickTarget {
            in_button: false,
            in_menu: true
        }));
    }

    #[test]
    fn modal_close_rules() {
        assert!(modal_should_close(ModalEvent::CloseButton, true));
        assert!(modal_should_close(
            ModalEvent::Click { on_backdrop: true },
            true
        ));
        assert!(!modal_should_close(
            ModalEvent::Click { on_backdrop: false },
            true
        ));
        assert!(modal_should_close(ModalEvent::Key("Escape"), true));
        assert!(!modal_should_close(ModalEvent::Key("Escape"), false));
        assert!(!modal_should_close(ModalEvent::Key("Enter"), true));
    }
}
