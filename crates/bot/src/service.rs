use crate::config::BotConfig;
use crate::inbound::{ChatContext, InboundUpdate, UserRef};
use crate::notify::NotificationSink;
use crate::present::Presenter;
use crate::response::OutboundResponse;
use anyhow::Result;
use reel_catalog::{CatalogStore, FeedFetcher};
use reel_gate::{check_membership, MembershipLookup, MembershipStatus};
use reel_protocol::{CallbackToken, Pager};
use reel_search::rank;

/// The bot core behind the transport adapter.
///
/// Generic over its three collaborator ports: the feed fetcher, the
/// membership lookup and the notification sink. Every handler computes the
/// primary response first and only then fires side effects; every handler
/// answers, even on internal failure.
pub struct BotService<F, M, N> {
    config: BotConfig,
    store: CatalogStore<F>,
    lookup: M,
    sink: N,
    presenter: Presenter,
}

impl<F, M, N> BotService<F, M, N>
where
    F: FeedFetcher,
    M: MembershipLookup,
    N: NotificationSink,
{
    pub fn new(config: BotConfig, fetcher: F, lookup: M, sink: N) -> Self {
        let store = CatalogStore::new(config.feeds.clone(), fetcher);
        let presenter = Presenter::new(
            Pager::new(config.page_size),
            config.deep_link_base.clone(),
            config.media_link_base.clone(),
        );
        Self {
            config,
            store,
            lookup,
            sink,
            presenter,
        }
    }

    /// Exhaustive dispatcher over the closed inbound-update model. Returns
    /// `None` for updates that produce no reply.
    pub async fn handle_update(&self, update: InboundUpdate) -> Option<OutboundResponse> {
        match update {
            InboundUpdate::Text { user, chat, text } => {
                Some(self.handle_search(&user, &chat, &text).await)
            }
            InboundUpdate::ButtonPress {
                user,
                chat,
                payload,
            } => Some(self.handle_callback(&user, &chat, &payload).await),
            InboundUpdate::Start {
                user,
                chat,
                parameter,
            } => Some(match parameter {
                Some(parameter) => self.handle_deep_link(&user, &chat, &parameter).await,
                None => self.greet(&user, &chat).await,
            }),
            // Membership is re-checked on every gated action anyway, so a
            // join or leave needs no reaction here.
            InboundUpdate::MembershipChange { .. } => None,
        }
    }

    /// Entry point for a fresh text query.
    pub async fn handle_search(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        query: &str,
    ) -> OutboundResponse {
        match self.search_inner(user, chat, query).await {
            Ok(response) => {
                self.notify_contact(user, chat, "interacted").await;
                response
            }
            Err(err) => {
                log::error!("search for {:?} failed: {err:#}", query);
                self.presenter.failure()
            }
        }
    }

    /// Entry point for an inline button press.
    pub async fn handle_callback(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        payload: &str,
    ) -> OutboundResponse {
        match self.callback_inner(user, chat, payload).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("callback {:?} failed: {err:#}", payload);
                self.presenter.failure()
            }
        }
    }

    /// Entry point for a `/start <key>` deep link.
    pub async fn handle_deep_link(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        parameter: &str,
    ) -> OutboundResponse {
        match self.deep_link_inner(user, chat, parameter).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("deep link {:?} failed: {err:#}", parameter);
                self.presenter.failure()
            }
        }
    }

    /// Plain `/start`: greet, then notify the operator.
    pub async fn greet(&self, user: &UserRef, chat: &ChatContext) -> OutboundResponse {
        let response = self.presenter.greeting(&user.first_name);
        self.notify_contact(user, chat, "started the bot").await;
        response
    }

    async fn search_inner(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        query: &str,
    ) -> Result<OutboundResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(self.presenter.empty_query());
        }
        self.results_for(user, chat, query, 0).await
    }

    async fn callback_inner(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        payload: &str,
    ) -> Result<OutboundResponse> {
        let token = match CallbackToken::parse(payload) {
            Ok(token) => token,
            Err(err) => {
                // A stale or foreign button; answer with "not found" rather
                // than a crash or a generic failure.
                log::warn!("unusable callback payload {payload:?}: {err}");
                return Ok(self.presenter.not_found());
            }
        };

        match token {
            CallbackToken::Prev { query, page } | CallbackToken::Next { query, page } => {
                self.results_for(user, chat, &query, page).await
            }
            CallbackToken::VerifySearch { query } => self.results_for(user, chat, &query, 0).await,
            CallbackToken::VerifyItem { key } => self.item_view(user, &key).await,
        }
    }

    async fn deep_link_inner(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        parameter: &str,
    ) -> Result<OutboundResponse> {
        let response = self.item_view(user, parameter.trim()).await?;
        self.notify_contact(user, chat, "opened a deep link").await;
        Ok(response)
    }

    /// Rank, gate, then render the requested page. The gate runs only after
    /// the query is known, and runs again on every transition; nothing about
    /// membership is cached between calls.
    async fn results_for(
        &self,
        user: &UserRef,
        chat: &ChatContext,
        query: &str,
        page: usize,
    ) -> Result<OutboundResponse> {
        let catalog = self.store.get_or_load().await;
        let matches = rank(query, &catalog);
        if matches.is_empty() {
            return Ok(self.presenter.no_results(query));
        }

        let status = self.gate(user).await;
        if !status.satisfied {
            return Ok(self.presenter.join_prompt_for_search(query, &status.missing));
        }

        Ok(self.presenter.results_page(
            &user.mention(chat.kind),
            query,
            &matches,
            page,
            &self.config.groups,
        ))
    }

    /// Resolve the record first, then gate. An unknown key answers "not
    /// found" before any membership traffic happens.
    async fn item_view(&self, user: &UserRef, key: &str) -> Result<OutboundResponse> {
        let catalog = self.store.get_or_load().await;
        let Some(record) = catalog.get(key) else {
            return Ok(self.presenter.not_found());
        };

        let status = self.gate(user).await;
        if !status.satisfied {
            return Ok(self
                .presenter
                .join_prompt_for_item(&record.key, &status.missing));
        }

        Ok(self.presenter.detail_view(record))
    }

    async fn gate(&self, user: &UserRef) -> MembershipStatus {
        check_membership(&self.lookup, user.id, &self.config.groups).await
    }

    async fn notify_contact(&self, user: &UserRef, chat: &ChatContext, what: &str) {
        if chat.id == self.config.admin_chat_id {
            return;
        }
        let username = user
            .username
            .as_ref()
            .map(|name| format!("@{name}"))
            .unwrap_or_else(|| "N/A".to_string());
        let text = format!(
            "New user {what}!\nName: {}\nUsername: {username}\nChat ID: {}",
            user.first_name, chat.id
        );
        self.sink.notify(self.config.admin_chat_id, &text).await;
    }
}
