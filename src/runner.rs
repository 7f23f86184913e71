use crate::bot::commands::{get_first_name, get_user_id_safe, Command};
use crate::bot::telegram::TelegramReply;
use crate::bot::{AccessGate, ChatUser, MediaRouter};
use crate::config::Settings;
use crate::media::{create_http_client, MediaBackend, MediaKind, RadarrClient, SonarrClient};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{error, info, warn};

/// Build the router from validated settings.
#[must_use]
pub fn build_router(settings: &Settings) -> MediaRouter {
    let http = create_http_client(settings.backend_timeout);
    let shows: Arc<dyn MediaBackend> =
        Arc::new(SonarrClient::with_http_client(&settings.sonarr, http.clone()));
    let movies: Arc<dyn MediaBackend> =
        Arc::new(RadarrClient::with_http_client(&settings.radarr, http));

    MediaRouter::new(
        AccessGate::new(settings.allowed_users.iter().copied()),
        shows,
        movies,
    )
}

/// Run the Telegram transport until interrupted.
pub async fn run_bot(settings: Arc<Settings>) {
    let router = Arc::new(build_router(&settings));
    info!(
        "Backends: Sonarr at {}, Radarr at {} ({}s timeout)",
        settings.sonarr.url,
        settings.radarr.url,
        settings.backend_timeout.as_secs()
    );

    let bot = Bot::new(settings.telegram_token.clone());
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        // Every update is its own task, no per-chat ordering
        .distribution_function(|_| None::<std::convert::Infallible>)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(
                    dptree::filter(|msg: Message| {
                        msg.text().is_some_and(|text| !text.starts_with('/'))
                    })
                    .endpoint(handle_text),
                ),
        )
}

fn chat_user(msg: &Message) -> ChatUser {
    ChatUser::new(get_user_id_safe(msg), get_first_name(msg))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    router: Arc<MediaRouter>,
) -> Result<(), teloxide::RequestError> {
    let user = chat_user(&msg);
    let reply = TelegramReply::new(bot, msg.chat.id);

    let res = match cmd {
        Command::Start => router.start(&user, &reply).await,
        Command::Help => router.help(&user, &reply).await,
        Command::SearchShow(query) => router.search(&user, MediaKind::Show, &query, &reply).await,
        Command::SearchMovie(query) => router.search(&user, MediaKind::Movie, &query, &reply).await,
        Command::MyShows => router.library(&user, MediaKind::Show, &reply).await,
        Command::MyMovies => router.library(&user, MediaKind::Movie, &reply).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    router: Arc<MediaRouter>,
) -> Result<(), teloxide::RequestError> {
    let Some(text) = msg.text() else {
        return respond(());
    };
    let user = chat_user(&msg);
    let reply = TelegramReply::new(bot, msg.chat.id);

    if let Err(e) = router.free_text(&user, text, &reply).await {
        error!("Text handler error: {}", e);
    }
    respond(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    router: Arc<MediaRouter>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {}", e);
    }

    let Some(data) = q.data.as_deref() else {
        return respond(());
    };
    let Some(message) = q.message.as_ref() else {
        warn!("Callback from user {} without a message to edit", q.from.id.0);
        return respond(());
    };

    let user = ChatUser::new(q.from.id.0.cast_signed(), q.from.first_name.clone());
    let reply = TelegramReply::editing(bot, message.chat().id, message.id());

    if let Err(e) = router.select(&user, data, &reply).await {
        error!("Callback handler error: {}", e);
    }
    respond(())
}
