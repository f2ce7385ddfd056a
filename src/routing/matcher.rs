//! Route predicates.
//!
//! # Responsibilities
//! - Recognize one trimmer path shape each
//! - Capture locale and extension segments into a typed [`RouteMatch`]
//!
//! # Design Decisions
//! - Predicates see the path remainder after `/trimmer`
//! - Extensions are one or more of the characters `j` and `s`
//! - No regex: shapes are split by hand

/// A request classified as one of the trimmer payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// `/trimmer[/<locale>]/translations.<ext>`
    Translations {
        locale: Option<String>,
        extension: String,
    },
    /// `/trimmer/<locale>/templates.<ext>`
    Templates { locale: String, extension: String },
    /// `/trimmer/<locale>.<ext>`
    Resources { locale: String, extension: String },
}

impl RouteMatch {
    /// Locale captured from the path, if any.
    pub fn locale(&self) -> Option<&str> {
        match self {
            RouteMatch::Translations { locale, .. } => locale.as_deref(),
            RouteMatch::Templates { locale, .. } | RouteMatch::Resources { locale, .. } => {
                Some(locale)
            }
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteMatch::Translations { .. } => "translations",
            RouteMatch::Templates { .. } => "templates",
            RouteMatch::Resources { .. } => "resources",
        }
    }
}

/// Trait for recognizing one path shape.
pub trait RoutePredicate: Send + Sync + std::fmt::Debug {
    /// Classify `rest`, the path remainder after `/trimmer`.
    fn capture(&self, rest: &str) -> Option<RouteMatch>;
}

/// `[/<locale>]/translations.<ext>`; an empty locale means none.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslationsRoute;

impl RoutePredicate for TranslationsRoute {
    fn capture(&self, rest: &str) -> Option<RouteMatch> {
        let rest = rest.strip_prefix('/')?;
        let (locale, file) = match rest.split_once('/') {
            Some((locale, file)) => (Some(locale), file),
            None => (None, rest),
        };
        let extension = extension_of(file, "translations")?;

        Some(RouteMatch::Translations {
            locale: locale.filter(|l| !l.is_empty()).map(str::to_string),
            extension: extension.to_string(),
        })
    }
}

/// `/<locale>/templates.<ext>`
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplatesRoute;

impl RoutePredicate for TemplatesRoute {
    fn capture(&self, rest: &str) -> Option<RouteMatch> {
        let (locale, file) = rest.strip_prefix('/')?.split_once('/')?;
        if locale.is_empty() {
            return None;
        }
        let extension = extension_of(file, "templates")?;

        Some(RouteMatch::Templates {
            locale: locale.to_string(),
            extension: extension.to_string(),
        })
    }
}

/// `/<name>.<ext>` where the name has no `.`, `|` or `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourcesRoute;

impl RoutePredicate for ResourcesRoute {
    fn capture(&self, rest: &str) -> Option<RouteMatch> {
        let (name, extension) = rest.strip_prefix('/')?.split_once('.')?;
        if name.is_empty() || name.contains(['/', '|']) || !is_extension(extension) {
            return None;
        }

        Some(RouteMatch::Resources {
            locale: name.to_string(),
            extension: extension.to_string(),
        })
    }
}

/// Extension of `file` if it is exactly `<stem>.<ext>`.
fn extension_of<'a>(file: &'a str, stem: &str) -> Option<&'a str> {
    let extension = file.strip_prefix(stem)?.strip_prefix('.')?;
    is_extension(extension).then_some(extension)
}

fn is_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.chars().all(|c| c == 'j' || c == 's')
}
