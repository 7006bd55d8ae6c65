//! UI modules shipped with the room.

use maud::{Markup, html};

use crate::widget::{FORM_ID, TEMPLATE_ID, WORDING_ID};

use super::module::{ModuleAssets, UiModule};

/// Multiple-choice panel. Its element ids are the ones
/// [`Document::alternatives`](crate::widget::Document::alternatives) models.
pub struct AlternativesPanel;

impl UiModule for AlternativesPanel {
    fn id(&self) -> Option<&str> {
        Some("alternatives-panel")
    }

    fn classes(&self) -> &[&'static str] {
        &["scrolling-panel"]
    }

    fn assets(&self) -> ModuleAssets {
        ModuleAssets {
            static_url_prefix: "/alternatives/",
            css_files: &["alternatives.css"],
            js_files: &["alternatives.js"],
        }
    }

    fn render(&self) -> Markup {
        html! {
            p id=(WORDING_ID) {}
            form id=(FORM_ID) {}
            template id=(TEMPLATE_ID) {
                input type="radio" name="alternative";
                label {}
                span {}
            }
        }
    }
}

/// Connection status badge.
pub struct ConnectionIndicator;

impl UiModule for ConnectionIndicator {
    fn classes(&self) -> &[&'static str] {
        &["system"]
    }

    fn assets(&self) -> ModuleAssets {
        ModuleAssets {
            static_url_prefix: "/conn-ind/",
            css_files: &["conn-ind.css"],
            js_files: &["conn-ind.js"],
        }
    }

    fn render(&self) -> Markup {
        html! {
            div id="conn-ind" class="disconnected" {
                span class="conn-ind-label" { "Disconnected" }
            }
        }
    }
}

/// Locking panel that holds the page until the participant is in a room.
pub struct RoomCodePanel {
    pub room_code: Option<String>,
}

impl UiModule for RoomCodePanel {
    fn id(&self) -> Option<&str> {
        Some("room-code-panel")
    }

    fn classes(&self) -> &[&'static str] {
        &["locking-panel", "room-code-panel"]
    }

    fn render(&self) -> Markup {
        html! {
            @match &self.room_code {
                Some(code) => {
                    p { "Room " strong class="room-code" { (code) } }
                }
                None => {
                    form id="room-code-form" {
                        label for="room-code-input" { "Room code" }
                        input id="room-code-input" type="text" name="room_code" autocomplete="off";
                        button type="submit" { "Enter" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternatives_panel_matches_widget_contract() {
        let html = AlternativesPanel.render().into_string();
        assert!(html.contains(r#"<form id="alternatives_form">"#));
        assert!(html.contains(r#"<template id="alternatives_template">"#));
        assert!(html.contains(r#"<p id="alternatives_wording">"#));

        let template = html.split("<template").nth(1).unwrap();
        assert_eq!(template.matches("<input").count(), 1);
        assert_eq!(template.matches("<label").count(), 1);
        assert_eq!(template.matches("<span").count(), 1);
    }

    #[test]
    fn test_room_code_panel_escapes_code() {
        let panel = RoomCodePanel {
            room_code: Some("<b>A1</b>".to_string()),
        };
        let html = panel.render().into_string();
        assert!(html.contains("&lt;b&gt;A1&lt;/b&gt;"));

        let html = RoomCodePanel { room_code: None }.render().into_string();
        assert!(html.contains(r#"id="room-code-form""#));
    }
}
