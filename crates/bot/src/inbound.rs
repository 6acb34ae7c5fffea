/// The user behind an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

impl UserRef {
    /// Display handle used in result headers: `@username` in groups, the
    /// first name in private chats.
    pub fn mention(&self, kind: ChatKind) -> String {
        match kind {
            ChatKind::Group => self
                .username
                .as_ref()
                .map(|name| format!("@{name}"))
                .unwrap_or_else(|| self.first_name.clone()),
            ChatKind::Private => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

/// Where the answer goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub id: i64,
    pub kind: ChatKind,
}

/// Closed model of the transport updates the core reacts to. The adapter
/// translates raw platform payloads into exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundUpdate {
    /// Free-text message, treated as a search query.
    Text {
        user: UserRef,
        chat: ChatContext,
        text: String,
    },
    /// Inline button press carrying a callback payload.
    ButtonPress {
        user: UserRef,
        chat: ChatContext,
        payload: String,
    },
    /// `/start`, optionally with a deep-link parameter.
    Start {
        user: UserRef,
        chat: ChatContext,
        parameter: Option<String>,
    },
    /// The user joined or left one of the required groups. No response is
    /// produced; the next gated action re-checks membership anyway.
    MembershipChange { user: UserRef, group_id: String },
}
