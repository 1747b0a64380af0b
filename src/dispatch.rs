use crate::content::{ButtonAction, ButtonSpec};

/// Host shell collaborator: the routing/window layer the engine drives but
/// does not own.
///
/// `open_external` must isolate the new browsing context (noopener,
/// noreferrer); `scroll_to_anchor` returns false when the anchor does not
/// exist, which the dispatcher treats as a no-op rather than an error.
pub trait UiHost {
    fn scroll_to_anchor(&mut self, id: &str) -> bool;
    fn navigate(&mut self, uri: &str);
    fn open_external(&mut self, url: &str);
    fn close_menu(&mut self);
}

/// Outcome of dispatching a button, for callers that care (tests, logging).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Scrolled,
    AnchorMissing,
    Navigated,
    OpenedExternal,
    Ignored,
}

/// Routes a content-defined button through the host.
///
/// A `scroll` button also closes an open mobile menu, mirroring the nav
/// behavior. Unknown actions are logged and swallowed; there is no
/// user-visible failure path here.
pub fn dispatch_button(
    host: &mut dyn UiHost,
    menu_open: &mut bool,
    button: &ButtonSpec,
) -> DispatchOutcome {
    match &button.action {
        ButtonAction::Scroll => {
            let found = host.scroll_to_anchor(&button.target);
            if *menu_open {
                host.close_menu();
                *menu_open = false;
            }
            if found {
                DispatchOutcome::Scrolled
            } else {
                tracing::debug!(anchor = %button.target, "scroll anchor missing, ignoring");
                DispatchOutcome::AnchorMissing
            }
        }
        ButtonAction::Email => {
            host.navigate(&format!("mailto:{}", button.target));
            DispatchOutcome::Navigated
        }
        ButtonAction::Phone => {
            host.navigate(&format!("tel:{}", button.target));
            DispatchOutcome::Navigated
        }
        ButtonAction::Link => {
            host.open_external(&button.target);
            DispatchOutcome::OpenedExternal
        }
        ButtonAction::Other(verb) => {
            tracing::warn!(action = %verb, "unknown button action, ignoring");
            DispatchOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        anchors: Vec<String>,
        scrolls: Vec<String>,
        navigations: Vec<String>,
        external: Vec<String>,
        menu_closes: usize,
    }

    impl UiHost for RecordingHost {
        fn scroll_to_anchor(&mut self, id: &str) -> bool {
            self.scrolls.push(id.to_string());
            self.anchors.iter().any(|a| a == id)
        }

        fn navigate(&mut self, uri: &str) {
            self.navigations.push(uri.to_string());
        }

        fn open_external(&mut self, url: &str) {
            self.external.push(url.to_string());
        }

        fn close_menu(&mut self) {
            self.menu_closes += 1;
        }
    }

    fn button(action: ButtonAction, target: &str) -> ButtonSpec {
        ButtonSpec {
            text: "x".into(),
            action,
            target: target.into(),
        }
    }

    #[test]
    fn email_builds_mailto_uri() {
        let mut host = RecordingHost::default();
        let mut menu = false;
        let out = dispatch_button(&mut host, &mut menu, &button(ButtonAction::Email, "a@b.com"));
        assert_eq!(out, DispatchOutcome::Navigated);
        assert_eq!(host.navigations, vec!["mailto:a@b.com"]);
    }

    #[test]
    fn phone_builds_tel_uri() {
        let mut host = RecordingHost::default();
        let mut menu = false;
        dispatch_button(&mut host, &mut menu, &button(ButtonAction::Phone, "+39123"));
        assert_eq!(host.navigations, vec!["tel:+39123"]);
    }

    #[test]
    fn scroll_closes_open_menu() {
        let mut host = RecordingHost {
            anchors: vec!["contact".into()],
            ..Default::default()
        };
        let mut menu = true;
        let out = dispatch_button(&mut host, &mut menu, &button(ButtonAction::Scroll, "contact"));
        assert_eq!(out, DispatchOutcome::Scrolled);
        assert_eq!(host.scrolls, vec!["contact"]);
        assert_eq!(host.menu_closes, 1);
        assert!(!menu);
    }

    #[test]
    fn missing_anchor_is_a_no_op() {
        let mut host = RecordingHost::default();
        let mut menu = false;
        let out = dispatch_button(&mut host, &mut menu, &button(ButtonAction::Scroll, "nowhere"));
        assert_eq!(out, DispatchOutcome::AnchorMissing);
        assert_eq!(host.menu_closes, 0);
    }

    #[test]
    fn link_opens_external_context() {
        let mut host = RecordingHost::default();
        let mut menu = false;
        let out = dispatch_button(
            &mut host,
            &mut menu,
            &button(ButtonAction::Link, "https://example.com"),
        );
        assert_eq!(out, DispatchOutcome::OpenedExternal);
        assert_eq!(host.external, vec!["https://example.com"]);
    }

    #[test]
    fn unknown_action_is_swallowed() {
        let mut host = RecordingHost::default();
        let mut menu = true;
        let out = dispatch_button(
            &mut host,
            &mut menu,
            &button(ButtonAction::Other("teleport".into()), "moon"),
        );
        assert_eq!(out, DispatchOutcome::Ignored);
        assert!(host.navigations.is_empty());
        assert!(host.external.is_empty());
        // Unknown actions do not touch the menu either.
        assert!(menu);
    }
}
