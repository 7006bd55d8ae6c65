use maud::Markup;

/// Static assets a UI module needs on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleAssets {
    pub static_url_prefix: &'static str,
    pub css_files: &'static [&'static str],
    pub js_files: &'static [&'static str],
}

impl ModuleAssets {
    pub const NONE: Self = Self {
        static_url_prefix: "/",
        css_files: &[],
        js_files: &[],
    };

    fn url(&self, file: &str) -> String {
        format!("{}/{}", self.static_url_prefix.trim_end_matches('/'), file)
    }

    pub fn css_urls(&self) -> impl Iterator<Item = String> + '_ {
        self.css_files.iter().map(|f| self.url(f))
    }

    pub fn js_urls(&self) -> impl Iterator<Item = String> + '_ {
        self.js_files.iter().map(|f| self.url(f))
    }
}

/// A self-contained piece of UI the page composer can place.
pub trait UiModule {
    /// Id of the wrapping element.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Classes of the wrapping element.
    fn classes(&self) -> &[&'static str] {
        &[]
    }

    fn assets(&self) -> ModuleAssets {
        ModuleAssets::NONE
    }

    fn render(&self) -> Markup;
}
