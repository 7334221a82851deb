use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    bin_name = "shelf",
    version,
    about = "Watch-list, progress and ratings from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Directory holding the store files
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage My List
    #[command(subcommand, alias = "ml", display_order = 1)]
    List(ListCommands),

    /// Continue watching: playback positions
    #[command(subcommand, alias = "cw", display_order = 2)]
    Progress(ProgressCommands),

    /// Your own 1-5 ratings
    #[command(subcommand, display_order = 3)]
    Rating(RatingCommands),

    /// Reviews and reactions
    #[command(subcommand, display_order = 4)]
    Review(ReviewCommands),

    /// Content shared with friends
    #[command(subcommand, display_order = 5)]
    Share(ShareCommands),

    /// Recommendations received
    #[command(subcommand, alias = "rec", display_order = 6)]
    Recommend(RecommendCommands),

    /// Group watch sessions
    #[command(subcommand, display_order = 7)]
    Group(GroupCommands),

    /// Show the state of every store
    #[command(display_order = 8)]
    Status,
}

/// Title and metadata for an item added to My List.
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Content id (number or text)
    pub id: String,

    /// Title words (joined with spaces)
    #[arg(required = true, trailing_var_arg = true)]
    pub title: Vec<String>,

    /// movie or series
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: Option<String>,

    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Genre, repeatable
    #[arg(long, short = 'g')]
    pub genre: Vec<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    #[arg(long)]
    pub thumbnail: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum SortArg {
    /// Order added
    #[default]
    Added,
    /// Newest first
    Recent,
    /// Alphabetical
    Title,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Add a title to My List
    #[command(alias = "a")]
    Add(ItemArgs),

    /// Add the title if missing, remove it if present
    Toggle(ItemArgs),

    /// Remove titles from My List
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Show whether a title is in My List
    Show { id: String },

    /// List My List
    #[command(name = "list", alias = "ls")]
    Items {
        /// Only this type (movie or series)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        kind: Option<String>,

        /// Only titles with this genre
        #[arg(long, short = 'g')]
        genre: Option<String>,

        #[arg(long, short = 'n')]
        limit: Option<usize>,

        #[arg(long, short = 's', value_enum, default_value_t = SortArg::Added)]
        sort: SortArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    /// Record a playback position
    Set {
        id: String,

        /// Position in seconds
        #[arg(long)]
        at: f64,

        /// Total runtime in seconds
        #[arg(long)]
        duration: f64,

        #[arg(long)]
        thumbnail: Option<String>,

        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Continue-watching list, most recent first
    #[command(name = "list", alias = "ls")]
    Items {
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show the saved position for a title
    Show { id: String },

    /// Forget positions
    Clear {
        ids: Vec<String>,

        /// Forget every position
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RatingCommands {
    /// Rate a title from 1 to 5
    Set { id: String, score: i64 },

    /// Remove your rating
    #[command(alias = "rm")]
    Remove { id: String },

    /// Show your rating for a title
    Show { id: String },

    /// Average of ratings and reviews for a title
    #[command(alias = "avg")]
    Average { id: String },

    /// Rated titles, newest first
    #[command(name = "list", alias = "ls")]
    Items {
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// Post a review
    Post {
        content_id: String,

        score: i64,

        #[arg(long, short = 'a')]
        author: Option<String>,

        /// Review text (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        body: Vec<String>,
    },

    /// Like a review
    Like { id: String },

    /// Dislike a review
    Dislike { id: String },

    /// Delete a review
    #[command(alias = "rm")]
    Remove { id: String },

    /// Reviews, optionally for one title
    #[command(name = "list", alias = "ls")]
    Items { content_id: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum ShareCommands {
    /// Share a title with friends
    Add {
        content_id: String,

        /// Recipient, repeatable
        #[arg(long = "to", required = true)]
        recipients: Vec<String>,

        #[arg(long, short = 'm')]
        message: Option<String>,

        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Remove a share
    #[command(alias = "rm")]
    Remove { id: String },

    #[command(name = "list", alias = "ls")]
    Items,
}

#[derive(Subcommand, Debug)]
pub enum RecommendCommands {
    /// Save a recommendation
    Add {
        content_id: String,

        #[arg(long)]
        from: String,

        #[arg(long, short = 'r')]
        reason: Option<String>,

        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Dismiss a recommendation
    #[command(alias = "rm")]
    Dismiss { id: String },

    #[command(name = "list", alias = "ls")]
    Items,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Schedule a group watch
    Schedule {
        content_id: String,

        #[arg(long)]
        host: String,

        /// Start time, RFC 3339 (e.g. 2026-05-01T20:00:00Z)
        #[arg(long)]
        at: DateTime<Utc>,

        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Join a group watch
    Join { id: String, name: String },

    /// Cancel a group watch
    Cancel { id: String },

    /// Upcoming group watches, soonest first
    #[command(name = "list", alias = "ls")]
    Items,
}
