use serde::Serialize;

/// How the transport should interpret the text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    Plain,
    Markdown,
    MarkdownV2,
}

/// What pressing a button does: open a URL, or post a callback payload back
/// to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Url(String),
    Callback(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    pub fn callback(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(payload.into()),
        }
    }
}

/// Outbound message payload handed to the transport adapter.
///
/// `media` is an optional photo URL; `text` doubles as its caption and as
/// the fallback body when the media send fails, so a delivery failure always
/// degrades to a text-only rendering of the same content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundResponse {
    pub text: String,
    pub parse_mode: ParseMode,
    pub buttons: Vec<Vec<Button>>,
    pub media: Option<String>,
}

impl OutboundResponse {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            buttons: Vec::new(),
            media: None,
        }
    }

    pub fn markdown_v2(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::MarkdownV2,
            buttons: Vec::new(),
            media: None,
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Vec<Button>>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_media(mut self, url: impl Into<String>) -> Self {
        self.media = Some(url.into());
        self
    }
}

/// Escape MarkdownV2 metacharacters in user- or feed-supplied text.
pub fn escape_markdown(text: &str) -> String {
    const SPECIAL: &[char] = &[
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
