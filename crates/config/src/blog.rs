// Blog settings
// Banner, author block, about page and contact block content

use serde::Serialize;
use serde_json::{json, Value};

use crate::value::{trimmed_string, truthy};

pub const DEFAULT_BANNER_IMAGE: &str = "/images/blog-banner.jpg";
pub const DEFAULT_BANNER_HEADING: &str = "Notes & Articles";
pub const DEFAULT_BANNER_SUBHEADING: &str = "Writing about software, design, and the things I build.";
pub const DEFAULT_AUTHOR_NAME: &str = "Site Owner";
pub const DEFAULT_AUTHOR_TITLE: &str = "Software Engineer";
pub const DEFAULT_AUTHOR_BIO: &str = "I build things for the web and write about what I learn along the way.";
pub const DEFAULT_AUTHOR_AVATAR: &str = "/images/avatar.png";
pub const DEFAULT_ABOUT_TITLE: &str = "About Me";
pub const DEFAULT_ABOUT_CONTENT: &str = "<p>Thanks for stopping by. This is where I share projects, experiments and notes.</p>";
pub const DEFAULT_ABOUT_IMAGE: &str = "/images/about.jpg";
pub const DEFAULT_ABOUT_SHOW_AUTHOR: bool = true;
pub const DEFAULT_ABOUT_SHOW_CONTACT: bool = true;
pub const DEFAULT_CONTACT_HEADLINE: &str = "Let's work together";
pub const DEFAULT_CONTACT_EMAIL: &str = "hello@example.com";
pub const DEFAULT_CONTACT_LOCATION: &str = "Remote";

/// Links shown when no link list has been configured
pub const DEFAULT_CONTACT_LINKS: [(&str, &str); 2] = [
    ("GitHub", "https://github.com"),
    ("LinkedIn", "https://www.linkedin.com"),
];

/// How a post's category is derived for listing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStrategy {
    /// First tag of the post (default)
    #[default]
    Tag,
    /// Leading segment of the post title
    Title,
}

impl CategoryStrategy {
    /// Restrict an untrusted value to the enum; anything else is `Tag`.
    pub fn from_value(value: &Value) -> Self {
        match value.as_str().map(str::trim) {
            Some("title") => CategoryStrategy::Title,
            _ => CategoryStrategy::Tag,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStrategy::Tag => "tag",
            CategoryStrategy::Title => "title",
        }
    }

    /// Category for a post under this strategy.
    ///
    /// `Tag` takes the first non-empty tag. `Title` takes the text before the
    /// first `:` when present, otherwise the first word.
    pub fn derive<S: AsRef<str>>(&self, title: &str, tags: &[S]) -> Option<String> {
        let derived = match self {
            CategoryStrategy::Tag => tags
                .iter()
                .map(|t| t.as_ref().trim())
                .find(|t| !t.is_empty())
                .map(String::from),
            CategoryStrategy::Title => {
                let title = title.trim();
                match title.split_once(':') {
                    Some((prefix, _)) => Some(prefix.trim().to_string()),
                    None => title.split_whitespace().next().map(String::from),
                }
            }
        };
        derived.filter(|c| !c.is_empty())
    }
}

/// Contact link entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

impl ContactLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self { label: label.into(), url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSettings {
    // Banner
    pub banner_image: String,
    pub banner_heading: String,
    pub banner_subheading: String,

    // Author
    pub author_name: String,
    pub author_title: String,
    pub author_bio: String,
    pub author_avatar: String,

    // About page
    pub about_title: String,
    pub about_content: String,
    pub about_image: String,
    pub about_emphasis: Vec<String>,
    pub about_show_author: bool,
    pub about_show_contact: bool,

    // Contact
    pub contact_headline: String,
    pub contact_email: String,
    pub contact_location: String,
    pub contact_links: Vec<ContactLink>,

    pub category_strategy: CategoryStrategy,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            banner_image: DEFAULT_BANNER_IMAGE.into(),
            banner_heading: DEFAULT_BANNER_HEADING.into(),
            banner_subheading: DEFAULT_BANNER_SUBHEADING.into(),
            author_name: DEFAULT_AUTHOR_NAME.into(),
            author_title: DEFAULT_AUTHOR_TITLE.into(),
            author_bio: DEFAULT_AUTHOR_BIO.into(),
            author_avatar: DEFAULT_AUTHOR_AVATAR.into(),
            about_title: DEFAULT_ABOUT_TITLE.into(),
            about_content: DEFAULT_ABOUT_CONTENT.into(),
            about_image: DEFAULT_ABOUT_IMAGE.into(),
            about_emphasis: Vec::new(),
            about_show_author: DEFAULT_ABOUT_SHOW_AUTHOR,
            about_show_contact: DEFAULT_ABOUT_SHOW_CONTACT,
            contact_headline: DEFAULT_CONTACT_HEADLINE.into(),
            contact_email: DEFAULT_CONTACT_EMAIL.into(),
            contact_location: DEFAULT_CONTACT_LOCATION.into(),
            contact_links: default_contact_links(),
            category_strategy: CategoryStrategy::Tag,
        }
    }
}

impl BlogSettings {
    /// Re-run normalization over this value (for values built by hand)
    pub fn normalized(&self) -> Self {
        normalize_blog_settings(&self.to_value())
    }

    pub fn to_value(&self) -> Value {
        let links: Vec<Value> = self
            .contact_links
            .iter()
            .map(|l| json!({ "label": l.label, "url": l.url }))
            .collect();
        json!({
            "bannerImage": self.banner_image,
            "bannerHeading": self.banner_heading,
            "bannerSubheading": self.banner_subheading,
            "authorName": self.author_name,
            "authorTitle": self.author_title,
            "authorBio": self.author_bio,
            "authorAvatar": self.author_avatar,
            "aboutTitle": self.about_title,
            "aboutContent": self.about_content,
            "aboutImage": self.about_image,
            "aboutEmphasis": self.about_emphasis,
            "aboutShowAuthor": self.about_show_author,
            "aboutShowContact": self.about_show_contact,
            "contactHeadline": self.contact_headline,
            "contactEmail": self.contact_email,
            "contactLocation": self.contact_location,
            "contactLinks": links,
            "categoryStrategy": self.category_strategy.as_str(),
        })
    }
}

pub fn default_contact_links() -> Vec<ContactLink> {
    DEFAULT_CONTACT_LINKS
        .iter()
        .map(|(label, url)| ContactLink::new(*label, *url))
        .collect()
}

/// Build a complete [`BlogSettings`] from an untrusted value.
///
/// Total and idempotent. Strings are trimmed and fall back to their default
/// when empty; booleans keep their default only when missing or null.
pub fn normalize_blog_settings(input: &Value) -> BlogSettings {
    let text = |key: &str, default: &str| trimmed_string(&input[key]).unwrap_or_else(|| default.to_string());
    let flag = |key: &str, default: bool| match &input[key] {
        Value::Null => default,
        other => truthy(other),
    };

    BlogSettings {
        banner_image: text("bannerImage", DEFAULT_BANNER_IMAGE),
        banner_heading: text("bannerHeading", DEFAULT_BANNER_HEADING),
        banner_subheading: text("bannerSubheading", DEFAULT_BANNER_SUBHEADING),
        author_name: text("authorName", DEFAULT_AUTHOR_NAME),
        author_title: text("authorTitle", DEFAULT_AUTHOR_TITLE),
        author_bio: text("authorBio", DEFAULT_AUTHOR_BIO),
        author_avatar: text("authorAvatar", DEFAULT_AUTHOR_AVATAR),
        about_title: text("aboutTitle", DEFAULT_ABOUT_TITLE),
        about_content: text("aboutContent", DEFAULT_ABOUT_CONTENT),
        about_image: text("aboutImage", DEFAULT_ABOUT_IMAGE),
        about_emphasis: normalize_emphasis(&input["aboutEmphasis"]),
        about_show_author: flag("aboutShowAuthor", DEFAULT_ABOUT_SHOW_AUTHOR),
        about_show_contact: flag("aboutShowContact", DEFAULT_ABOUT_SHOW_CONTACT),
        contact_headline: text("contactHeadline", DEFAULT_CONTACT_HEADLINE),
        contact_email: text("contactEmail", DEFAULT_CONTACT_EMAIL),
        contact_location: text("contactLocation", DEFAULT_CONTACT_LOCATION),
        contact_links: normalize_contact_links(&input["contactLinks"]),
        category_strategy: CategoryStrategy::from_value(&input["categoryStrategy"]),
    }
}

/// Emphasis keywords: an array of strings or one comma-separated string
pub fn normalize_emphasis(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(trimmed_string).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Contact links: entries without both a label and a url are dropped.
/// A non-array value means "never configured" and yields the default list.
pub fn normalize_contact_links(value: &Value) -> Vec<ContactLink> {
    let Some(entries) = value.as_array() else {
        return default_contact_links();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let label = trimmed_string(&entry["label"])?;
            let url = trimmed_string(&entry["url"])?;
            Some(ContactLink { label, url })
        })
        .collect()
}
