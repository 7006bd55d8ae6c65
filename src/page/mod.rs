//! Server-side page composition.
//!
//! A page is a header followed by the `panels` and `locking_panels` module
//! lists. Each module brings its own stylesheets and scripts; the page links
//! each asset once, in the order modules first ask for it.

mod module;
mod panels;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;

use crate::config::Config;

pub use module::{ModuleAssets, UiModule};
pub use panels::{AlternativesPanel, ConnectionIndicator, RoomCodePanel};

/// Values the page template exposes besides the module lists.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub header_title: Option<String>,
    /// Message shown in a banner above every panel.
    pub critical: Option<String>,
    pub room_code: Option<String>,
}

/// Settings handed to page scripts as `window.pageGlobals`.
#[derive(Serialize)]
struct ClientGlobals<'a> {
    app_name: &'a str,
    ws_scheme: &'a str,
    ws_reconnect_interval: u64,
    proxy_url: String,
    header_title: Option<&'a str>,
    critical: Option<&'a str>,
    room_code: Option<&'a str>,
}

/// Render a complete HTML document.
pub fn render_page(
    config: &Config,
    ctx: &PageContext,
    panels: &[&dyn UiModule],
    locking_panels: &[&dyn UiModule],
) -> String {
    let modules = || panels.iter().chain(locking_panels.iter());
    let css = unique(modules().flat_map(|m| m.assets().css_urls().collect::<Vec<_>>()));
    let js = unique(modules().flat_map(|m| m.assets().js_urls().collect::<Vec<_>>()));

    let title = ctx.header_title.as_deref().unwrap_or(&config.app_name);
    let viewport = format!(
        "width=device-width, initial-scale=1, user-scalable={}",
        if config.user_scalable_viewport { "yes" } else { "no" }
    );

    let globals = ClientGlobals {
        app_name: &config.app_name,
        ws_scheme: &config.ws_scheme,
        ws_reconnect_interval: config.ws_reconnect_interval,
        proxy_url: config.proxy_url(),
        header_title: ctx.header_title.as_deref(),
        critical: ctx.critical.as_deref(),
        room_code: ctx.room_code.as_deref(),
    };

    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content=(viewport);
                title { (title) }
                @for href in &css {
                    link rel="stylesheet" href=(href);
                }
            }
            body {
                header id="header" {
                    h1 { (title) }
                    @if let Some(code) = &ctx.room_code {
                        span class="room-code" { (code) }
                    }
                }
                @if let Some(critical) = &ctx.critical {
                    div id="critical" class="critical-message" { (critical) }
                }
                div id="panels" {
                    @for module in panels {
                        (wrap(*module))
                    }
                }
                div id="locking-panels" {
                    @for module in locking_panels {
                        (wrap(*module))
                    }
                }
                script { (PreEscaped(globals_script(&globals))) }
                @for src in &js {
                    script src=(src) {}
                }
            }
        }
    };

    page.into_string()
}

fn wrap(module: &dyn UiModule) -> Markup {
    let classes = module.classes();
    let class = (!classes.is_empty()).then(|| classes.join(" "));
    html! {
        div id=[module.id()] class=[class] {
            (module.render())
        }
    }
}

fn unique(urls: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for url in urls {
        if !seen.contains(&url) {
            seen.push(url);
        }
    }
    seen
}

fn globals_script(globals: &ClientGlobals<'_>) -> String {
    // Serialization of plain strings and integers cannot fail.
    let json = serde_json::to_string(globals).unwrap_or_else(|_| "{}".to_string());
    // `<` only occurs inside JSON strings, where `\u003c` reads back the same.
    format!("window.pageGlobals = {};", json.replace('<', "\\u003c"))
}
