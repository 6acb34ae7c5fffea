use crate::response::{escape_markdown, Button, OutboundResponse};
use reel_catalog::CatalogRecord;
use reel_gate::GroupDescriptor;
use reel_protocol::{CallbackToken, Pager};
use reel_search::SearchMatch;

/// Formats pages, prompts and detail views into outbound payloads.
///
/// The presenter holds no state of its own; it slices whatever ranked list
/// it is given and attaches only the controls whose transitions are valid.
pub struct Presenter {
    pager: Pager,
    deep_link_base: String,
    media_link_base: String,
}

impl Presenter {
    pub fn new(pager: Pager, deep_link_base: String, media_link_base: String) -> Self {
        Self {
            pager,
            deep_link_base,
            media_link_base,
        }
    }

    fn deep_link(&self, key: &str) -> String {
        format!("{}{key}", self.deep_link_base)
    }

    fn media_link(&self, key: &str) -> String {
        format!("{}{key}", self.media_link_base)
    }

    /// Attach an encoded token as a callback button, dropping the control if
    /// the payload would not fit the transport limit.
    fn push_control(row: &mut Vec<Button>, label: &str, token: &CallbackToken) {
        match token.encode() {
            Ok(payload) => row.push(Button::callback(label, payload)),
            Err(err) => log::warn!("dropping {label:?} control: {err}"),
        }
    }

    /// One page of ranked results: numbered list, per-item deep-link buttons,
    /// navigation for valid transitions only, and the join row.
    pub fn results_page(
        &self,
        mention: &str,
        query: &str,
        matches: &[SearchMatch<'_>],
        page: usize,
        groups: &[GroupDescriptor],
    ) -> OutboundResponse {
        let slice = self.pager.slice(matches, page);
        if slice.is_empty() {
            return self.no_results(query);
        }

        let total = matches.len();
        let pages = self.pager.page_count(total);
        let start = page * self.pager.page_size();

        let mut text = format!(
            "🔍 {}, found *{total}* matches for *{}* \\(Page {}/{pages}\\):\n\n",
            escape_markdown(mention),
            escape_markdown(query),
            page + 1,
        );

        let mut buttons: Vec<Vec<Button>> = Vec::with_capacity(slice.len() + 2);
        for (offset, hit) in slice.iter().enumerate() {
            let number = start + offset + 1;
            let link = self.deep_link(&hit.record.key);
            text.push_str(&format!(
                "{number}\\. [{}]({link}) \\({}\\)\n",
                escape_markdown(&hit.record.title),
                escape_markdown(&hit.record.category),
            ));
            buttons.push(vec![Button::url(
                format!("{number}. {}", hit.record.title),
                link,
            )]);
        }

        let mut nav = Vec::new();
        if self.pager.has_prev(page) {
            let token = CallbackToken::Prev {
                query: query.to_string(),
                page: page - 1,
            };
            Self::push_control(&mut nav, "⬅️ Previous", &token);
        }
        if self.pager.has_next(page, total) {
            let token = CallbackToken::Next {
                query: query.to_string(),
                page: page + 1,
            };
            Self::push_control(&mut nav, "Next ➡️", &token);
        }
        if !nav.is_empty() {
            buttons.push(nav);
        }

        if !groups.is_empty() {
            buttons.push(
                groups
                    .iter()
                    .map(|group| Button::url(format!("Join {}", group.name), &group.invite_url))
                    .collect(),
            );
        }

        OutboundResponse::markdown_v2(text).with_buttons(buttons)
    }

    /// Join prompt shown instead of search results. Lists only the missing
    /// groups and withholds all catalog content until the gate is satisfied.
    pub fn join_prompt_for_search(
        &self,
        query: &str,
        missing: &[GroupDescriptor],
    ) -> OutboundResponse {
        let token = CallbackToken::VerifySearch {
            query: query.to_string(),
        };
        self.join_prompt(
            format!("🔍 Please join all our groups to access the search results for \"{query}\":"),
            missing,
            &token,
        )
    }

    /// Join prompt shown instead of a detail view. Deliberately references
    /// the record only by its opaque key, not its title.
    pub fn join_prompt_for_item(&self, key: &str, missing: &[GroupDescriptor]) -> OutboundResponse {
        let token = CallbackToken::VerifyItem {
            key: key.to_string(),
        };
        self.join_prompt(
            "🎬 Please join all our groups to access this title:".to_string(),
            missing,
            &token,
        )
    }

    fn join_prompt(
        &self,
        text: String,
        missing: &[GroupDescriptor],
        verify: &CallbackToken,
    ) -> OutboundResponse {
        let join_row: Vec<Button> = missing
            .iter()
            .map(|group| Button::url(format!("Join {}", group.name), &group.invite_url))
            .collect();

        let mut verify_row = Vec::new();
        Self::push_control(&mut verify_row, "Verify", verify);

        let mut buttons = Vec::new();
        if !join_row.is_empty() {
            buttons.push(join_row);
        }
        if !verify_row.is_empty() {
            buttons.push(verify_row);
        }

        OutboundResponse::plain(text).with_buttons(buttons)
    }

    /// Detail view for one record, gated content already cleared. Carries the
    /// poster as media; the caption text stands alone if the media send
    /// fails.
    pub fn detail_view(&self, record: &CatalogRecord) -> OutboundResponse {
        let text = format!(
            "🎬 *{}* \\({}\\)\n\nUse the buttons below to watch or read more\\.",
            escape_markdown(&record.title),
            escape_markdown(&record.category),
        );
        let buttons = vec![
            vec![Button::url("Watch", self.media_link(&record.key))],
            vec![Button::url("More info", &record.info_link)],
        ];
        OutboundResponse::markdown_v2(text)
            .with_buttons(buttons)
            .with_media(&record.media_ref)
    }

    pub fn greeting(&self, first_name: &str) -> OutboundResponse {
        OutboundResponse::markdown_v2(format!(
            "*Hi {}\\!*\n\nSend a movie name and I will search the catalog\\. In groups, mention me with your query\\.",
            escape_markdown(first_name),
        ))
    }

    pub fn empty_query(&self) -> OutboundResponse {
        OutboundResponse::plain("❌ Please enter a movie name.")
    }

    pub fn no_results(&self, query: &str) -> OutboundResponse {
        OutboundResponse::plain(format!("❌ No movies found for \"{query}\"."))
    }

    pub fn not_found(&self) -> OutboundResponse {
        OutboundResponse::plain("❌ Movie not found.")
    }

    pub fn failure(&self) -> OutboundResponse {
        OutboundResponse::plain("❌ Something went wrong. Please try again later.")
    }
}
