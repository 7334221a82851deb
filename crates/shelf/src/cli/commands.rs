//! # CLI Layer
//!
//! This module is **one possible UI client** for shelf; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Build the one `ShelfApi` and install it with [`context::provide`]
//! 3. **API Dispatch**: Handlers reach the installed API and call one method
//! 4. **Output Formatting**: Render `CmdResult` as text or JSON
//! 5. **Error Handling**: Errors bubble up to `main`, which prints them and exits 1

use super::render::{render_listed, render_messages, render_score, render_stores};
use super::setup::{
    Cli, Commands, GroupCommands, ItemArgs, ListCommands, ProgressCommands, RatingCommands,
    RecommendCommands, ReviewCommands, ShareCommands, SortArg,
};
use clap::Parser;
use shelfapp::api::{
    parse_id, ListFilter, NewGroupWatch, NewRecommendation, NewReview, NewShare,
    PlaybackUpdate, Reaction, ShelfApi,
};
use shelfapp::commands::CmdResult;
use shelfapp::context;
use shelfapp::error::{Result, ShelfError};
use shelfapp::init::initialize;
use shelfapp::model::{MediaKind, WatchItem};
use shelfapp::store::fs_backend::FsBackend;
use shelfapp::store::list_store::{ListQuery, Order};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Api = ShelfApi<FsBackend>;

const LOG_ENV: &str = "SHELF_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.data_dir.as_deref())?;
    debug!(data_dir = %ctx.data_dir.display(), "shelf ready");
    let _api = context::provide(ctx.api);

    // Naked `shelf` shows My List
    let command = cli.command.unwrap_or(Commands::List(ListCommands::Items {
        kind: None,
        genre: None,
        limit: None,
        sort: SortArg::Added,
    }));

    let result = match command {
        Commands::List(cmd) => handle_list(cmd),
        Commands::Progress(cmd) => handle_progress(cmd),
        Commands::Rating(cmd) => handle_rating(cmd),
        Commands::Review(cmd) => handle_review(cmd),
        Commands::Share(cmd) => handle_share(cmd),
        Commands::Recommend(cmd) => handle_recommend(cmd),
        Commands::Group(cmd) => handle_group(cmd),
        Commands::Status => call(|api| api.status()),
    }?;

    print_result(&result, cli.json)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run `f` against the installed API.
fn call<R>(f: impl FnOnce(&mut Api) -> Result<R>) -> Result<R> {
    context::with::<Api, _>(f)?
}

fn print_result(result: &CmdResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let mut out = String::new();
    out.push_str(&render_messages(&result.messages));
    if let Some(summary) = &result.score {
        out.push_str(&render_score(summary));
    }
    if !result.stores.is_empty() {
        out.push_str(&render_stores(&result.stores));
    } else if !result.listed.is_empty() || (result.messages.is_empty() && result.score.is_none()) {
        out.push_str(&render_listed(&result.listed));
    }
    print!("{}", out);
    Ok(())
}

fn join_words(words: Vec<String>) -> String {
    words.join(" ")
}

fn parse_kind(kind: Option<&str>) -> Result<Option<MediaKind>> {
    kind.map(str::parse).transpose()
}

fn watch_item(args: ItemArgs) -> Result<WatchItem> {
    let mut item = WatchItem::new(parse_id(&args.id)?, join_words(args.title));
    if let Some(kind) = parse_kind(args.kind.as_deref())? {
        item = item.with_kind(kind);
    }
    if let Some(year) = args.year {
        item = item.with_year(year);
    }
    if !args.genre.is_empty() {
        item = item.with_genres(args.genre);
    }
    if let Some(description) = args.description {
        item = item.with_description(description);
    }
    if let Some(thumbnail) = args.thumbnail {
        item = item.with_thumbnail(thumbnail);
    }
    Ok(item)
}

fn handle_list(cmd: ListCommands) -> Result<CmdResult> {
    match cmd {
        ListCommands::Add(args) => {
            let item = watch_item(args)?;
            call(|api| api.add_to_list(item))
        }
        ListCommands::Toggle(args) => {
            let item = watch_item(args)?;
            call(|api| api.toggle_in_list(item))
        }
        ListCommands::Remove { ids } => call(|api| api.remove_from_list(&ids)),
        ListCommands::Show { id } => call(|api| api.show_in_list(&id)),
        ListCommands::Items {
            kind,
            genre,
            limit,
            sort,
        } => {
            let order = match sort {
                SortArg::Added => Order::Insertion,
                SortArg::Recent => Order::RecentFirst,
                SortArg::Title => Order::Title,
            };
            let mut query = ListQuery::new(order);
            query.limit = limit;
            let filter = ListFilter {
                kind: parse_kind(kind.as_deref())?,
                genre,
            };
            call(|api| api.get_list(&query, &filter))
        }
    }
}

fn handle_progress(cmd: ProgressCommands) -> Result<CmdResult> {
    match cmd {
        ProgressCommands::Set {
            id,
            at,
            duration,
            thumbnail,
            title,
        } => {
            let update = PlaybackUpdate {
                id: parse_id(&id)?,
                title: join_words(title),
                thumbnail,
                current_time: at,
                duration,
            };
            call(|api| api.record_progress(update))
        }
        ProgressCommands::Items { limit } => call(|api| api.continue_watching(limit)),
        ProgressCommands::Show { id } => call(|api| api.show_progress(&id)),
        ProgressCommands::Clear { ids, all } => {
            if ids.is_empty() && !all {
                return Err(ShelfError::InvalidInput(
                    "name the titles to clear, or pass --all".to_string(),
                ));
            }
            call(|api| api.clear_progress(&ids))
        }
    }
}

fn handle_rating(cmd: RatingCommands) -> Result<CmdResult> {
    match cmd {
        RatingCommands::Set { id, score } => call(|api| api.rate(&id, score)),
        RatingCommands::Remove { id } => call(|api| api.unrate(&id)),
        RatingCommands::Show { id } => call(|api| api.show_rating(&id)),
        RatingCommands::Average { id } => call(|api| api.average_score(&id)),
        RatingCommands::Items { limit } => call(|api| api.list_ratings(limit)),
    }
}

fn handle_review(cmd: ReviewCommands) -> Result<CmdResult> {
    match cmd {
        ReviewCommands::Post {
            content_id,
            score,
            author,
            body,
        } => {
            let review = NewReview {
                content_id: parse_id(&content_id)?,
                author: author.unwrap_or_default(),
                score,
                body: join_words(body),
            };
            call(|api| api.post_review(review))
        }
        ReviewCommands::Like { id } => call(|api| api.react_to_review(&id, Reaction::Like)),
        ReviewCommands::Dislike { id } => call(|api| api.react_to_review(&id, Reaction::Dislike)),
        ReviewCommands::Remove { id } => call(|api| api.remove_review(&id)),
        ReviewCommands::Items { content_id } => call(|api| api.list_reviews(content_id.as_deref())),
    }
}

fn handle_share(cmd: ShareCommands) -> Result<CmdResult> {
    match cmd {
        ShareCommands::Add {
            content_id,
            recipients,
            message,
            title,
        } => {
            let share = NewShare {
                content_id: parse_id(&content_id)?,
                title: join_words(title),
                recipients,
                message,
            };
            call(|api| api.share(share))
        }
        ShareCommands::Remove { id } => call(|api| api.unshare(&id)),
        ShareCommands::Items => call(|api| api.list_shared()),
    }
}

fn handle_recommend(cmd: RecommendCommands) -> Result<CmdResult> {
    match cmd {
        RecommendCommands::Add {
            content_id,
            from,
            reason,
            title,
        } => {
            let rec = NewRecommendation {
                content_id: parse_id(&content_id)?,
                title: join_words(title),
                from,
                reason,
            };
            call(|api| api.recommend(rec))
        }
        RecommendCommands::Dismiss { id } => call(|api| api.dismiss_recommendation(&id)),
        RecommendCommands::Items => call(|api| api.list_recommendations()),
    }
}

fn handle_group(cmd: GroupCommands) -> Result<CmdResult> {
    match cmd {
        GroupCommands::Schedule {
            content_id,
            host,
            at,
            title,
        } => {
            let watch = NewGroupWatch {
                content_id: parse_id(&content_id)?,
                title: join_words(title),
                host,
                scheduled_for: at,
            };
            call(|api| api.schedule_group_watch(watch))
        }
        GroupCommands::Join { id, name } => call(|api| api.join_group_watch(&id, &name)),
        GroupCommands::Cancel { id } => call(|api| api.cancel_group_watch(&id)),
        GroupCommands::Items => call(|api| api.list_group_watches()),
    }
}
